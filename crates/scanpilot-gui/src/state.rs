/// Application state management.
///
/// Centralises all mutable state that the UI reads and writes. The
/// watcher thread communicates via its event channel; state updates
/// happen in `process_session_events()` which runs once per frame.
///
/// During a scan the log panel reads from a **shared `LiveLog`**
/// (`Arc<RwLock<Vec<String>>>`) so the scanner's output appears in real
/// time; the buffer is retained after the session ends so the user can
/// still review the run.
use scanpilot_core::model::ScanRequest;
use scanpilot_core::paths::ScannerPaths;
use scanpilot_core::report::ScanReport;
use scanpilot_core::session::ScanSession;
use scanpilot_core::watcher::events::ScanEvent;
use scanpilot_core::watcher::LiveLog;

/// The current phase of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppPhase {
    /// Idle — no scan in progress, possibly showing a previous outcome.
    Idle,
    /// A scanner process is running and its log is being watched.
    Scanning,
    /// The last run completed successfully.
    Complete,
    /// The last run failed, timed out, or could not be launched.
    Failed,
}

/// Maximum session events drained from the channel per frame.
///
/// A session only ever emits one terminal event, but a stale channel
/// from an abandoned session could hold a few; this bounds the per-frame
/// work either way.
const MAX_EVENTS_PER_FRAME: usize = 16;

/// All application state.
pub struct AppState {
    // ── Scan parameters ────────────────────────────────
    /// Seconds the scanner waits between individual disc scans.
    pub disc_scan_secs: f64,
    /// Seconds the scanner waits for an inventory page to load.
    pub page_load_secs: f64,

    // ── Scanner bundle ─────────────────────────────────
    pub paths: ScannerPaths,

    // ── Session ────────────────────────────────────────
    pub phase: AppPhase,
    pub session: Option<ScanSession>,
    /// Live tail of the current (or most recent) run's log.
    pub live_log: Option<LiveLog>,
    pub scan_started: Option<chrono::DateTime<chrono::Local>>,
    /// The terminal log line, launch error, or timeout description.
    pub outcome_message: String,
    /// True if the most recent scan was stopped by the user.
    pub scan_was_cancelled: bool,
    /// Summary of `scan_data.json` after a completed run.
    pub report: Option<ScanReport>,

    // ── UI state ───────────────────────────────────────
    /// Reveal the scan artifact in the file browser on completion.
    pub auto_reveal: bool,
    /// `true` = dark mode (default), `false` = light mode.
    pub dark_mode: bool,
    pub show_about: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Create initial application state.
    pub fn new() -> Self {
        let defaults = ScanRequest::default();
        Self {
            disc_scan_secs: defaults.disc_scan,
            page_load_secs: defaults.page_load,
            paths: ScannerPaths::resolve(),
            phase: AppPhase::Idle,
            session: None,
            live_log: None,
            scan_started: None,
            outcome_message: String::new(),
            scan_was_cancelled: false,
            report: None,
            auto_reveal: true,
            dark_mode: true,
            show_about: false,
        }
    }

    /// Launch the scanner with the current parameters and start watching
    /// its log. Refused while a session is already active.
    pub fn start_scan(&mut self) {
        if self.phase == AppPhase::Scanning {
            return;
        }

        // Reset run state.
        self.outcome_message.clear();
        self.scan_was_cancelled = false;
        self.report = None;
        self.live_log = None;

        let request = ScanRequest {
            disc_scan: self.disc_scan_secs,
            page_load: self.page_load_secs,
        };

        match ScanSession::start(self.paths.clone(), request) {
            Ok(session) => {
                self.live_log = Some(session.live_log.clone());
                self.session = Some(session);
                self.scan_started = Some(chrono::Local::now());
                self.phase = AppPhase::Scanning;
            }
            Err(e) => {
                tracing::error!("Failed to launch scanner: {e}");
                self.outcome_message = e.to_string();
                self.phase = AppPhase::Failed;
            }
        }
    }

    /// Stop watching the current run. The scanner process finishes on
    /// its own.
    pub fn cancel_scan(&mut self) {
        if let Some(ref session) = self.session {
            session.stop();
        }
    }

    /// Drain pending session events. Called once per frame.
    ///
    /// Terminal events raise the window (the user is typically tabbed
    /// into the game while the scanner drives it) and, on completion,
    /// trigger the artifact reveal and summary load.
    ///
    /// Returns `true` if the UI should repaint.
    pub fn process_session_events(&mut self, ctx: &egui::Context) -> bool {
        let events = match &self.session {
            Some(s) => &s.events,
            None => return false,
        };

        let mut drained = 0usize;
        while drained < MAX_EVENTS_PER_FRAME {
            let event = match events.try_recv() {
                Ok(ev) => ev,
                Err(crossbeam_channel::TryRecvError::Empty) => break,
                Err(crossbeam_channel::TryRecvError::Disconnected) => {
                    // Watcher thread gone without a terminal event —
                    // should not happen, but do not hang the UI on it.
                    tracing::warn!("Watcher channel disconnected without a terminal event");
                    self.outcome_message = "Watcher stopped unexpectedly".to_owned();
                    self.phase = AppPhase::Failed;
                    self.session = None;
                    return true;
                }
            };
            drained += 1;

            match event {
                ScanEvent::Error { message } => {
                    self.outcome_message = message;
                    self.phase = AppPhase::Failed;
                    raise_window(ctx);
                    self.session = None;
                    return true;
                }
                ScanEvent::Complete { message } => {
                    self.outcome_message = message;
                    self.phase = AppPhase::Complete;
                    raise_window(ctx);
                    self.finish_completed_run();
                    self.session = None;
                    return true;
                }
                ScanEvent::TimedOut { waited } => {
                    self.outcome_message =
                        format!("No result from the scanner after {} s", waited.as_secs());
                    self.phase = AppPhase::Failed;
                    raise_window(ctx);
                    self.session = None;
                    return true;
                }
                ScanEvent::Cancelled => {
                    self.scan_was_cancelled = true;
                    self.phase = AppPhase::Idle;
                    self.session = None;
                    return true;
                }
            }
        }

        // Repaint whenever a scan is live so the tail stays fresh.
        self.phase == AppPhase::Scanning
    }

    /// Post-completion side effects: reveal the artifact and load its
    /// summary. Both are best-effort — the run already succeeded.
    fn finish_completed_run(&mut self) {
        let artifact = self.paths.scan_data_file();

        if self.auto_reveal {
            if let Err(e) = scanpilot_core::platform::reveal_in_file_browser(&artifact) {
                tracing::warn!("Could not reveal {}: {}", artifact.display(), e);
            }
        }

        match scanpilot_core::report::load_report(&artifact) {
            Ok(report) => self.report = Some(report),
            Err(e) => tracing::warn!("Could not summarise {}: {}", artifact.display(), e),
        }
    }

    /// Reveal the scan artifact manually (toolbar button).
    pub fn reveal_artifact(&self) {
        let artifact = self.paths.scan_data_file();
        if let Err(e) = scanpilot_core::platform::reveal_in_file_browser(&artifact) {
            tracing::warn!("Could not reveal {}: {}", artifact.display(), e);
        }
    }
}

/// Bring the application window to the foreground.
///
/// The UI context is passed in from the frame loop — the core crate
/// never holds a window handle.
fn raise_window(ctx: &egui::Context) {
    ctx.send_viewport_cmd(egui::ViewportCommand::Minimized(false));
    ctx.send_viewport_cmd(egui::ViewportCommand::Focus);
}
