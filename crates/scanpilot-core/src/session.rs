/// Scan session orchestration — the fire-and-forget `start` operation.
///
/// A session ties one scanner process launch to one log watch. Sessions
/// are fully independent: each owns its process, watcher thread, event
/// channel, and live tail, with no shared state between concurrent
/// sessions.
use crossbeam_channel::Receiver;

use crate::launcher::{spawn_scanner, LaunchError};
use crate::model::ScanRequest;
use crate::paths::ScannerPaths;
use crate::watcher::{self, events::ScanEvent, LiveLog, WatchConfig, WatchHandle};

/// A running (or finished) scan session.
///
/// The terminal outcome arrives asynchronously on [`ScanSession::events`];
/// the live log tail is shared through [`ScanSession::live_log`].
pub struct ScanSession {
    /// Receiver for the session's terminal event.
    pub events: Receiver<ScanEvent>,
    /// Live tail of the scanner log.
    pub live_log: LiveLog,
    /// Paths the session was started with, for artifact lookups.
    pub paths: ScannerPaths,
    /// Pid of the spawned scanner process.
    pub scanner_pid: u32,
    watch: WatchHandle,
}

impl ScanSession {
    /// Launch the scanner and attach a log watcher.
    ///
    /// Returns as soon as the process is spawned and the watcher thread
    /// is running; the outcome is delivered on `events`. The previous
    /// run's log is left in place — the scanner appends to it, and the
    /// watcher baselines pre-existing content so stale terminal lines
    /// from an earlier run never fire.
    pub fn start(paths: ScannerPaths, request: ScanRequest) -> Result<Self, LaunchError> {
        let scanner_pid = spawn_scanner(&paths, &request)?;
        let watch = watcher::start_watch(WatchConfig::new(paths.log_file()));

        Ok(Self {
            events: watch.receiver.clone(),
            live_log: watch.live_log.clone(),
            paths,
            scanner_pid,
            watch,
        })
    }

    /// Start with an explicit watch configuration (tests, tuning).
    pub fn start_with_config(
        paths: ScannerPaths,
        request: ScanRequest,
        config: WatchConfig,
    ) -> Result<Self, LaunchError> {
        let scanner_pid = spawn_scanner(&paths, &request)?;
        let watch = watcher::start_watch(config);

        Ok(Self {
            events: watch.receiver.clone(),
            live_log: watch.live_log.clone(),
            paths,
            scanner_pid,
            watch,
        })
    }

    /// Stop watching. The scanner process itself is left to finish on its
    /// own — it owns the screen-capture sequence and killing it mid-run
    /// leaves the game client in an odd input state.
    pub fn stop(&self) {
        self.watch.stop();
    }

    /// Whether a stop has been requested.
    pub fn is_stopped(&self) -> bool {
        self.watch.is_cancelled()
    }
}
