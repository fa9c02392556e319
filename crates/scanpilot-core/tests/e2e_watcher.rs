/// End-to-end watcher integration tests.
///
/// These tests exercise the real `watcher::start_watch` code path against
/// a real temporary filesystem, verifying that the watcher waits for the
/// log to appear, tails appended lines, classifies terminal markers, and
/// shuts down on every terminal outcome.
///
/// **Why a `tests/` integration test (not unit test)?**
///
/// The watcher creates a real OS thread, polls real file metadata, and
/// reads real file contents. Testing it in isolation would require
/// mocking the filesystem clock and read calls. An integration test with
/// `tempfile` exercises every code path — thread spawning, appear
/// polling, change detection, classification, shutdown — with zero
/// mocking.
use scanpilot_core::watcher::events::ScanEvent;
use scanpilot_core::watcher::{start_watch, WatchConfig, WatchHandle, EVENT_CHANNEL_CAPACITY};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tempfile::TempDir;

// ── Helpers ──────────────────────────────────────────────────────────────────

/// Watch configuration with test-friendly timing: 20 ms polls, short
/// bounded timeouts so failing tests fail fast.
fn fast_config(log_path: PathBuf) -> WatchConfig {
    WatchConfig {
        log_path,
        poll_interval: Duration::from_millis(20),
        appear_timeout: Duration::from_millis(800),
        watch_timeout: Duration::from_secs(10),
    }
}

/// Append `lines` to the log file, each newline-terminated, creating the
/// file if needed — the same append-mode behaviour as the scanner.
fn append_lines(path: &Path, lines: &[&str]) {
    let mut f = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .expect("failed to open log for append");
    for line in lines {
        writeln!(f, "{line}").expect("failed to append log line");
    }
}

/// Wait up to `secs` seconds for the next event.
///
/// Generous enough for any CI machine but short enough that a genuinely
/// stuck watcher does not block the suite indefinitely.
fn recv_within(handle: &WatchHandle, secs: u64) -> Option<ScanEvent> {
    handle
        .receiver
        .recv_timeout(Duration::from_secs(secs))
        .ok()
}

/// Assert that no event arrives within `ms` milliseconds.
fn assert_silent_for(handle: &WatchHandle, ms: u64) {
    let deadline = Instant::now() + Duration::from_millis(ms);
    while Instant::now() < deadline {
        if let Ok(ev) = handle.receiver.try_recv() {
            panic!("expected no event, got {ev:?}");
        }
        std::thread::sleep(Duration::from_millis(5));
    }
}

const ROUTINE: &str = "2024-06-01 12:00:01,000 - INFO - Processing disk drive # 1";
const CRITICAL: &str =
    "2024-06-01 12:00:09,000 - CRITICAL - Over 10 consecutive errors, stopping the program";
const COMPLETE: &str =
    "2024-06-01 12:05:42,000 - INFO - Finished processing. Writing scan data to file";

// ── Tests ─────────────────────────────────────────────────────────────────────

/// A log whose last line contains `CRITICAL` must yield exactly one
/// `Error` event carrying that line, and nothing else.
#[test]
fn critical_line_emits_exactly_one_error() {
    let tmp = TempDir::new().expect("failed to create temp dir");
    let log = tmp.path().join("log.txt");

    let handle = start_watch(fast_config(log.clone()));
    append_lines(&log, &[ROUTINE, CRITICAL]);

    match recv_within(&handle, 5) {
        Some(ScanEvent::Error { message }) => assert_eq!(message, CRITICAL),
        other => panic!("expected Error, got {other:?}"),
    }

    // Terminal: the thread has exited, so no second event can follow.
    assert_silent_for(&handle, 200);
}

/// A log whose last line contains the completion marker must yield
/// exactly one `Complete` event.
#[test]
fn completion_marker_emits_complete() {
    let tmp = TempDir::new().expect("failed to create temp dir");
    let log = tmp.path().join("log.txt");

    let handle = start_watch(fast_config(log.clone()));
    append_lines(&log, &[ROUTINE, COMPLETE]);

    match recv_within(&handle, 5) {
        Some(ScanEvent::Complete { message }) => assert_eq!(message, COMPLETE),
        other => panic!("expected Complete, got {other:?}"),
    }
    assert_silent_for(&handle, 200);
}

/// Routine lines produce no event, and appending the identical line
/// again is suppressed — but the dedup state still updates, so a later
/// terminal line fires normally.
#[test]
fn routine_and_duplicate_lines_are_suppressed() {
    let tmp = TempDir::new().expect("failed to create temp dir");
    let log = tmp.path().join("log.txt");

    let handle = start_watch(fast_config(log.clone()));

    append_lines(&log, &[ROUTINE]);
    assert_silent_for(&handle, 300);

    // Identical line appended twice — last line unchanged, no event.
    append_lines(&log, &[ROUTINE]);
    assert_silent_for(&handle, 300);

    append_lines(&log, &[CRITICAL]);
    assert!(
        matches!(recv_within(&handle, 5), Some(ScanEvent::Error { .. })),
        "terminal line after suppressed duplicates must still fire"
    );
}

/// A log file that never appears must produce a single `TimedOut` event
/// — degraded but explicit, never a crash or a silent hang.
#[test]
fn missing_log_times_out_without_crash() {
    let tmp = TempDir::new().expect("failed to create temp dir");
    let log = tmp.path().join("log.txt");
    // Do NOT create the file.

    let handle = start_watch(fast_config(log));

    match recv_within(&handle, 5) {
        Some(ScanEvent::TimedOut { waited }) => {
            assert!(waited >= Duration::from_millis(800));
        }
        other => panic!("expected TimedOut, got {other:?}"),
    }
}

/// The watcher must cope with the log appearing *after* the watch starts
/// (the scanner takes a moment to create it).
#[test]
fn log_appearing_late_is_still_watched() {
    let tmp = TempDir::new().expect("failed to create temp dir");
    let log = tmp.path().join("log.txt");

    let handle = start_watch(fast_config(log.clone()));
    std::thread::sleep(Duration::from_millis(150));
    append_lines(&log, &[ROUTINE, COMPLETE]);

    assert!(
        matches!(recv_within(&handle, 5), Some(ScanEvent::Complete { .. })),
        "late-appearing log must still be classified"
    );
}

/// `stop()` must yield `Cancelled` promptly.
#[test]
fn stop_yields_cancelled() {
    let tmp = TempDir::new().expect("failed to create temp dir");
    let log = tmp.path().join("log.txt");
    append_lines(&log, &[ROUTINE]);

    let handle = start_watch(fast_config(log));
    handle.stop();
    assert!(handle.is_cancelled());

    assert!(
        matches!(recv_within(&handle, 5), Some(ScanEvent::Cancelled)),
        "stop must be acknowledged with Cancelled"
    );
}

/// A terminal line already present before the watch starts belongs to a
/// previous run (the scanner appends) and must be baselined, not fired.
#[test]
fn preexisting_terminal_line_is_baselined() {
    let tmp = TempDir::new().expect("failed to create temp dir");
    let log = tmp.path().join("log.txt");
    append_lines(&log, &[ROUTINE, COMPLETE]);

    let handle = start_watch(fast_config(log.clone()));
    assert_silent_for(&handle, 400);

    // The new run appends fresh lines; only those are classified.
    append_lines(&log, &[ROUTINE]);
    assert_silent_for(&handle, 300);

    append_lines(&log, &[CRITICAL]);
    assert!(
        matches!(recv_within(&handle, 5), Some(ScanEvent::Error { .. })),
        "fresh terminal line after a baselined log must fire"
    );
}

/// The live tail must contain only lines appended after the watch
/// started, in order.
#[test]
fn live_log_collects_new_lines_only() {
    let tmp = TempDir::new().expect("failed to create temp dir");
    let log = tmp.path().join("log.txt");
    append_lines(&log, &["old line one", "old line two"]);

    let handle = start_watch(fast_config(log.clone()));
    std::thread::sleep(Duration::from_millis(100));

    append_lines(&log, &["new line one", "new line two", "new line three"]);

    // Wait for the watcher to pick the lines up.
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        if handle.live_log.read().len() >= 3 {
            break;
        }
        assert!(
            Instant::now() < deadline,
            "live tail never received the appended lines"
        );
        std::thread::sleep(Duration::from_millis(10));
    }

    let tail = handle.live_log.read();
    assert_eq!(
        *tail,
        vec![
            "new line one".to_string(),
            "new line two".to_string(),
            "new line three".to_string()
        ]
    );
}

/// A run that never logs a terminal marker must end in `TimedOut` once
/// the watch deadline expires.
#[test]
fn marker_never_arriving_times_out() {
    let tmp = TempDir::new().expect("failed to create temp dir");
    let log = tmp.path().join("log.txt");
    append_lines(&log, &[ROUTINE]);

    let mut config = fast_config(log);
    config.watch_timeout = Duration::from_millis(500);
    let handle = start_watch(config);

    assert!(
        matches!(recv_within(&handle, 5), Some(ScanEvent::TimedOut { .. })),
        "watch must end in TimedOut when no marker ever arrives"
    );
}

/// `EVENT_CHANNEL_CAPACITY` must be a positive constant so `send()` on a
/// terminal event can never block immediately. Compile-time invariant.
const _: () = assert!(
    EVENT_CHANNEL_CAPACITY > 0,
    "EVENT_CHANNEL_CAPACITY must be > 0"
);
