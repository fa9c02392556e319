/// Log watcher — tails the scanner's log file and reports the terminal
/// outcome of a run.
///
/// The scanner communicates only through an append-only text log. The
/// watcher polls the file on a fixed cadence, reads it whole when it
/// changes, and classifies the last meaningful line. Polling (rather than
/// OS change notifications) keeps the watcher portable and immune to the
/// missed-event edge cases of notification APIs on appended files.
///
/// # Lifetime
///
/// A watch is a scoped resource. The background thread exits on the
/// first terminal event (error, completion, timeout) or when
/// [`WatchHandle::stop`] is called; it never outlives its session.
///
/// # Startup
///
/// The log file may not exist yet when the watch starts — the scanner
/// creates it shortly after launch. The watcher polls for the file to
/// appear, bounded by [`WatchConfig::appear_timeout`], and reports
/// [`ScanEvent::TimedOut`] if it never does.
pub mod classify;
pub mod events;

use classify::LineClass;
use events::ScanEvent;

use crossbeam_channel::{bounded, Receiver, Sender};
use parking_lot::RwLock;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime};
use tracing::{debug, info, warn};

/// Capacity of the event channel.
///
/// A session emits exactly one terminal event, but the bound leaves room
/// for a stale UI that has not drained a previous session yet.
pub const EVENT_CHANNEL_CAPACITY: usize = 16;

/// Default cadence for polling the log file.
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Default bound on waiting for the log file to appear after launch.
const DEFAULT_APPEAR_TIMEOUT: Duration = Duration::from_secs(30);

/// Default bound on the whole watch. A full scan of a large inventory
/// takes a few minutes; a run that produced no terminal marker after
/// this long is not going to.
const DEFAULT_WATCH_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Shared, concurrently-readable tail of the scanner log.
///
/// The watcher appends each new non-empty line; the UI holds a read lock
/// each frame to render the live tail.
pub type LiveLog = Arc<RwLock<Vec<String>>>;

/// Configuration for one watch session.
#[derive(Debug, Clone)]
pub struct WatchConfig {
    /// The log file to tail.
    pub log_path: PathBuf,
    /// How often to check the file for changes.
    pub poll_interval: Duration,
    /// How long to wait for the file to exist before giving up.
    pub appear_timeout: Duration,
    /// How long to watch for a terminal marker before giving up.
    pub watch_timeout: Duration,
}

impl WatchConfig {
    /// Default timing for `log_path`.
    pub fn new(log_path: PathBuf) -> Self {
        Self {
            log_path,
            poll_interval: DEFAULT_POLL_INTERVAL,
            appear_timeout: DEFAULT_APPEAR_TIMEOUT,
            watch_timeout: DEFAULT_WATCH_TIMEOUT,
        }
    }
}

/// Handle to a running watch session.
///
/// Dropping the handle does not stop the thread; call
/// [`WatchHandle::stop`] for that. The thread also exits on its own on
/// any terminal event.
pub struct WatchHandle {
    /// Receiver for the terminal event of this session.
    pub receiver: Receiver<ScanEvent>,
    /// Live tail of the scanner log.
    pub live_log: LiveLog,
    /// Flag to request cancellation.
    cancel: Arc<AtomicBool>,
    /// Join handle for the watcher thread.
    _thread: Option<std::thread::JoinHandle<()>>,
}

impl WatchHandle {
    /// Signal the watcher thread to stop. Non-blocking; the thread
    /// notices within one poll interval and replies with
    /// [`ScanEvent::Cancelled`].
    pub fn stop(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }
}

/// Start watching per `config` on a background thread.
pub fn start_watch(config: WatchConfig) -> WatchHandle {
    let (tx, rx) = bounded::<ScanEvent>(EVENT_CHANNEL_CAPACITY);
    let cancel = Arc::new(AtomicBool::new(false));
    let cancel_clone = Arc::clone(&cancel);

    let live_log: LiveLog = Arc::new(RwLock::new(Vec::new()));
    let log_clone = Arc::clone(&live_log);

    // Captured here, on the caller's thread, so "pre-existing" means
    // "existed when the watch was requested" — anything written after
    // this point belongs to the run being watched.
    let preexisting = config.log_path.exists();

    let thread = std::thread::Builder::new()
        .name("scanpilot-watcher".to_owned())
        .spawn(move || {
            run_watch(config, preexisting, cancel_clone, tx, log_clone);
        })
        .expect("failed to spawn watcher thread");

    WatchHandle {
        receiver: rx,
        live_log,
        cancel,
        _thread: Some(thread),
    }
}

// ─── Background thread ──────────────────────────────────────────────────────

/// File identity snapshot used to detect changes between polls.
type FileStamp = (u64, Option<SystemTime>);

/// `preexisting`: whether the log file existed when the watch was
/// requested. The scanner opens its log in append mode, so a file that
/// already exists holds a previous run's lines — including, possibly, a
/// stale terminal marker. Such content is baselined and only subsequent
/// changes are classified. A file that appears after the watch starts
/// belongs entirely to this run.
fn run_watch(
    config: WatchConfig,
    preexisting: bool,
    cancel: Arc<AtomicBool>,
    tx: Sender<ScanEvent>,
    live_log: LiveLog,
) {
    debug!("Watcher: starting on {:?}", config.log_path);

    // ── Phase 1: wait for the log file to exist ────────────────────
    let appear_deadline = Instant::now() + config.appear_timeout;
    loop {
        if cancel.load(Ordering::Relaxed) {
            let _ = tx.send(ScanEvent::Cancelled);
            debug!("Watcher: cancelled before log appeared");
            return;
        }
        if config.log_path.exists() {
            break;
        }
        if Instant::now() >= appear_deadline {
            warn!(
                "Watcher: log never appeared at {:?} within {:?}",
                config.log_path, config.appear_timeout
            );
            let _ = tx.send(ScanEvent::TimedOut {
                waited: config.appear_timeout,
            });
            return;
        }
        std::thread::sleep(config.poll_interval);
    }

    // ── Phase 2: tail the file until a terminal line ───────────────
    let started = Instant::now();
    let watch_deadline = started + config.watch_timeout;
    let mut last_line = String::new();
    let mut last_stamp: Option<FileStamp> = None;
    let mut lines_recorded = 0usize;

    if preexisting {
        baseline(
            &config.log_path,
            &mut last_stamp,
            &mut last_line,
            &mut lines_recorded,
        );
    }

    loop {
        if cancel.load(Ordering::Relaxed) {
            let _ = tx.send(ScanEvent::Cancelled);
            debug!("Watcher: cancelled for {:?}", config.log_path);
            return;
        }
        if Instant::now() >= watch_deadline {
            warn!(
                "Watcher: no terminal marker in {:?} after {:?}",
                config.log_path, config.watch_timeout
            );
            let _ = tx.send(ScanEvent::TimedOut {
                waited: started.elapsed(),
            });
            return;
        }

        match poll_once(
            &config.log_path,
            &mut last_stamp,
            &mut last_line,
            &mut lines_recorded,
            &live_log,
        ) {
            Some(LineClass::Critical) => {
                info!("Watcher: scan error: {}", last_line);
                let _ = tx.send(ScanEvent::Error {
                    message: last_line.clone(),
                });
                return;
            }
            Some(LineClass::Complete) => {
                info!("Watcher: scan complete: {}", last_line);
                let _ = tx.send(ScanEvent::Complete {
                    message: last_line.clone(),
                });
                return;
            }
            Some(LineClass::Routine) | None => {}
        }

        std::thread::sleep(config.poll_interval);
    }
}

/// Record the current state of a pre-existing log without classifying it.
///
/// Seeds the change stamp, the last-line dedup state, and the recorded
/// line count so that only lines appended by *this* run are surfaced. On
/// a read error nothing is seeded and the first poll treats the whole
/// file as new — a stale terminal line can then fire, which is preferable
/// to missing a real one.
fn baseline(
    log_path: &std::path::Path,
    last_stamp: &mut Option<FileStamp>,
    last_line: &mut String,
    lines_recorded: &mut usize,
) {
    let meta = match std::fs::metadata(log_path) {
        Ok(m) => m,
        Err(e) => {
            debug!("Watcher: baseline stat {:?} failed: {}", log_path, e);
            return;
        }
    };
    let text = match std::fs::read_to_string(log_path) {
        Ok(t) => t,
        Err(e) => {
            warn!("Watcher: baseline read {:?} failed: {}", log_path, e);
            return;
        }
    };

    *last_stamp = Some((meta.len(), meta.modified().ok()));
    if let Some(line) = classify::last_meaningful_line(&text) {
        *last_line = line.to_owned();
    }
    *lines_recorded = text.lines().map(str::trim).filter(|l| !l.is_empty()).count();
    debug!(
        "Watcher: baselined {} pre-existing lines",
        *lines_recorded
    );
}

/// One poll cycle: re-read the file if it changed and classify the new
/// last line.
///
/// Returns `Some(class)` when a *new* last line was observed, `None` when
/// nothing changed. Read errors are logged and swallowed — the file may
/// be mid-rotation or briefly locked by the scanner; the next cycle
/// retries.
fn poll_once(
    log_path: &std::path::Path,
    last_stamp: &mut Option<FileStamp>,
    last_line: &mut String,
    lines_recorded: &mut usize,
    live_log: &LiveLog,
) -> Option<LineClass> {
    let meta = match std::fs::metadata(log_path) {
        Ok(m) => m,
        Err(e) => {
            debug!("Watcher: stat {:?} failed: {}", log_path, e);
            return None;
        }
    };
    let stamp: FileStamp = (meta.len(), meta.modified().ok());
    if last_stamp.as_ref() == Some(&stamp) {
        return None;
    }
    *last_stamp = Some(stamp);

    let text = match std::fs::read_to_string(log_path) {
        Ok(t) => t,
        Err(e) => {
            warn!("Watcher: error reading {:?}: {}", log_path, e);
            return None;
        }
    };

    sync_live_log(&text, lines_recorded, live_log);

    let candidate = classify::last_meaningful_line(&text)?;
    if candidate == last_line.as_str() {
        // Identical last line (e.g. the same message appended twice) —
        // suppressed.
        return None;
    }
    *last_line = candidate.to_owned();
    Some(classify::classify_line(last_line))
}

/// Append newly-seen non-empty lines to the shared live tail.
///
/// If the file shrank (rotation or truncation) the tail is rebuilt from
/// scratch.
fn sync_live_log(text: &str, lines_recorded: &mut usize, live_log: &LiveLog) {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    if lines.len() < *lines_recorded {
        debug!("Watcher: log shrank, resetting live tail");
        live_log.write().clear();
        *lines_recorded = 0;
    }
    if lines.len() > *lines_recorded {
        let mut tail = live_log.write();
        for line in &lines[*lines_recorded..] {
            tail.push((*line).to_owned());
        }
        *lines_recorded = lines.len();
    }
}
