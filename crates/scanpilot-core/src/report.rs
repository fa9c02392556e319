/// Scan artifact summary.
///
/// On a successful run the scanner writes `scan_data.json` with three
/// top-level arrays: `disk_data`, `wengine_data`, and `character_data`.
/// ScanPilot does not interpret the entries — downstream tools do — but
/// it summarises the counts so the user can sanity-check a run at a
/// glance before importing the file anywhere.
use serde::Deserialize;
use std::path::Path;

/// Errors reading the scan artifact.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("could not read scan artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("scan artifact is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Raw artifact shape. Unknown keys are ignored; missing arrays count
/// as empty because older scanner builds omit categories they did not
/// scan.
#[derive(Debug, Deserialize)]
struct ScanData {
    #[serde(default)]
    disk_data: Vec<serde_json::Value>,
    #[serde(default)]
    wengine_data: Vec<serde_json::Value>,
    #[serde(default)]
    character_data: Vec<serde_json::Value>,
}

/// Per-category counts for a completed scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanReport {
    pub disk_drives: usize,
    pub wengines: usize,
    pub characters: usize,
    /// Size of the artifact file in bytes.
    pub artifact_bytes: u64,
}

impl ScanReport {
    /// Total number of scanned entries across all categories.
    pub fn total_entries(&self) -> usize {
        self.disk_drives + self.wengines + self.characters
    }
}

/// Load and summarise the scan artifact at `path`.
pub fn load_report(path: &Path) -> Result<ScanReport, ReportError> {
    let bytes = std::fs::read(path)?;
    let data: ScanData = serde_json::from_slice(&bytes)?;

    Ok(ScanReport {
        disk_drives: data.disk_data.len(),
        wengines: data.wengine_data.len(),
        characters: data.character_data.len(),
        artifact_bytes: bytes.len() as u64,
    })
}
