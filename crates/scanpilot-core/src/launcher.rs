/// Scanner process launching.
///
/// The scanner runs fully out-of-process; its outcome is observed through
/// the log file it writes, never through its exit code. The exit status
/// is still logged here so a crash that never produced a log line leaves
/// a trace in ScanPilot's own diagnostics.
use std::process::{Command, Stdio};

use crate::model::ScanRequest;
use crate::paths::ScannerPaths;

/// Errors launching the scanner process.
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    /// The executable is not where the resolved bundle layout says it
    /// should be.
    #[error("scanner executable not found at {path}")]
    ExecutableNotFound { path: String },

    /// The OS refused to spawn the process.
    #[error("failed to spawn scanner: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Spawn the scanner with the request's positional arguments.
///
/// Stdio is detached: ScanPilot is a windowed application with no console
/// to inherit, and the scanner reports through its log file. The working
/// directory and environment are inherited from this process.
///
/// Returns the child pid. A detached reaper thread waits on the child so
/// it never lingers as a zombie, and logs the exit status.
pub fn spawn_scanner(paths: &ScannerPaths, request: &ScanRequest) -> Result<u32, LaunchError> {
    let exe = paths.executable();
    if !exe.is_file() {
        return Err(LaunchError::ExecutableNotFound {
            path: exe.display().to_string(),
        });
    }

    let args = request.to_args();
    tracing::info!("Launching scanner {} {:?}", exe.display(), args);

    let mut child = Command::new(&exe)
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    let pid = child.id();

    std::thread::Builder::new()
        .name("scanpilot-reaper".to_owned())
        .spawn(move || match child.wait() {
            Ok(status) => tracing::info!("Scanner pid {} exited: {}", pid, status),
            Err(e) => tracing::warn!("Could not wait on scanner pid {}: {}", pid, e),
        })
        .expect("failed to spawn reaper thread");

    Ok(pid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn missing_executable_is_a_typed_error() {
        let paths = ScannerPaths::from_bundle_dir(PathBuf::from("/no/such/bundle"));
        let err = spawn_scanner(&paths, &ScanRequest::default()).unwrap_err();
        assert!(matches!(err, LaunchError::ExecutableNotFound { .. }));
    }
}
