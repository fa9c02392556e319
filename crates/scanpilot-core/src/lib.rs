/// ScanPilot Core — scan launching, log watching, and artifact handling.
///
/// This crate contains all business logic with zero UI dependencies.
/// It is designed to be reusable across different frontends (GUI, CLI).
///
/// # Modules
///
/// - [`model`] — Scan request parameters and argument ordering.
/// - [`paths`] — Scanner bundle resolution (packaged vs. development).
/// - [`launcher`] — Spawning the external scanner process.
/// - [`watcher`] — Background log tailing with terminal-event reporting.
/// - [`session`] — One launch + one watch, tied together.
/// - [`report`] — Scan artifact (`scan_data.json`) summarising.
/// - [`platform`] — Reveal-in-file-browser integration.
pub mod launcher;
pub mod model;
pub mod paths;
pub mod platform;
pub mod report;
pub mod session;
pub mod watcher;
