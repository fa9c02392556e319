/// OS file-browser integration.
///
/// Reveal is best-effort: a failure is worth a log line, never an error
/// surfaced to the user — the scan itself already succeeded by the time
/// this runs.
use std::path::Path;

/// Open the system file browser with `path` selected.
///
/// On Windows this uses `explorer.exe /select,` which highlights the file
/// in its containing folder. Elsewhere the containing directory is opened
/// with the desktop's default handler.
pub fn reveal_in_file_browser(path: &Path) -> std::io::Result<()> {
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("explorer.exe")
            .arg(format!("/select,{}", path.display()))
            .spawn()?;
        Ok(())
    }

    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg("-R")
            .arg(path)
            .spawn()?;
        Ok(())
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        let dir = path.parent().unwrap_or(path);
        std::process::Command::new("xdg-open").arg(dir).spawn()?;
        Ok(())
    }
}
