/// Scanner bundle path resolution.
///
/// The external scanner ships as a self-contained bundle directory: the
/// executable at its root and all runtime files (including the log and
/// scan output) under `_internal/`. ScanPilot never writes into the
/// bundle — it only reads the paths the scanner writes to.
///
/// Resolution order:
/// 1. `SCANPILOT_SCANNER_DIR` environment variable (tests, nonstandard
///    installs);
/// 2. packaged layout — bundle directory beside the running executable;
/// 3. development layout — bundle directory beside the working
///    directory's parent, which is where a source checkout keeps it.
///
/// Resolution is pure path arithmetic. A missing bundle is reported via
/// [`ScannerPaths::bundle_exists`], not an error — the UI surfaces it and
/// the launcher fails with a typed error if a scan is attempted anyway.
use std::path::{Path, PathBuf};

/// Environment variable overriding the scanner bundle directory.
pub const SCANNER_DIR_ENV: &str = "SCANPILOT_SCANNER_DIR";

/// Directory name of the scanner bundle.
pub const SCANNER_DIR_NAME: &str = "GearScanner";

/// Executable name inside the bundle.
pub const SCANNER_EXE_NAME: &str = "GearScanner.exe";

/// Output directory inside the bundle, relative to the bundle root.
/// This is where the scanner writes `log.txt` and `scan_data.json`.
pub const SCAN_OUTPUT_SUBDIR: &str = "_internal/scan_output";

/// Resolved locations of the scanner executable and its output files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannerPaths {
    bundle_dir: PathBuf,
}

impl ScannerPaths {
    /// Resolve the bundle directory for the current environment.
    pub fn resolve() -> Self {
        if let Ok(dir) = std::env::var(SCANNER_DIR_ENV) {
            tracing::info!("Scanner bundle overridden via {}: {}", SCANNER_DIR_ENV, dir);
            return Self::from_bundle_dir(PathBuf::from(dir));
        }

        // Packaged layout: the installer places the bundle next to
        // ScanPilot.exe.
        if let Some(beside_exe) = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|d| d.join(SCANNER_DIR_NAME)))
        {
            if beside_exe.is_dir() {
                return Self::from_bundle_dir(beside_exe);
            }
        }

        // Development layout: source checkout keeps the bundle as a
        // sibling of the repository.
        let dev = Path::new("..").join(SCANNER_DIR_NAME);
        Self::from_bundle_dir(dev)
    }

    /// Build paths from an explicit bundle directory.
    pub fn from_bundle_dir(bundle_dir: PathBuf) -> Self {
        Self { bundle_dir }
    }

    /// The bundle directory itself.
    pub fn bundle_dir(&self) -> &Path {
        &self.bundle_dir
    }

    /// Whether the bundle directory exists on disk.
    pub fn bundle_exists(&self) -> bool {
        self.bundle_dir.is_dir()
    }

    /// Path to the scanner executable.
    pub fn executable(&self) -> PathBuf {
        self.bundle_dir.join(SCANNER_EXE_NAME)
    }

    /// Directory the scanner writes its output into.
    pub fn output_dir(&self) -> PathBuf {
        self.bundle_dir.join(SCAN_OUTPUT_SUBDIR)
    }

    /// The scanner's append-only log file.
    pub fn log_file(&self) -> PathBuf {
        self.output_dir().join("log.txt")
    }

    /// The scan artifact produced on a successful run.
    pub fn scan_data_file(&self) -> PathBuf {
        self.output_dir().join("scan_data.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_paths_hang_off_the_bundle_dir() {
        let bundle = PathBuf::from("/opt/bundle");
        let paths = ScannerPaths::from_bundle_dir(bundle.clone());
        let output = bundle.join(SCAN_OUTPUT_SUBDIR);

        assert_eq!(paths.executable(), bundle.join(SCANNER_EXE_NAME));
        assert_eq!(paths.output_dir(), output);
        assert_eq!(paths.log_file(), output.join("log.txt"));
        assert_eq!(paths.scan_data_file(), output.join("scan_data.json"));
    }

    #[test]
    fn missing_bundle_is_reported_not_fatal() {
        let paths = ScannerPaths::from_bundle_dir(PathBuf::from("/definitely/not/here"));
        assert!(!paths.bundle_exists());
    }
}
