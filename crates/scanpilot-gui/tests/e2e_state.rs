/// End-to-end tests for `AppState` — the GUI application state machine.
///
/// These tests exercise the real business-logic paths of `AppState` without
/// spinning up an egui window: a default `egui::Context` is enough for the
/// viewport commands the state machine issues, keeping the tests fast and
/// headless.
///
/// **Scope:** All user-visible state transitions are covered:
///   - Launch failure (missing scanner bundle)
///   - Scan lifecycle (start, completion, failure, cancellation)
///   - Artifact report loading on completion
///
/// The full-lifecycle tests spawn a real (stub) scanner process, so they
/// are Unix-only; the launch-failure path is covered everywhere.
use scanpilot_core::paths::ScannerPaths;
use scanpilot_gui::state::{AppPhase, AppState};
#[cfg(unix)]
use std::fs;
#[cfg(unix)]
use std::path::Path;
#[cfg(unix)]
use std::time::Duration;
use tempfile::TempDir;

// ── Helpers ───────────────────────────────────────────────────────────────────

#[cfg(unix)]
const COMPLETE_LINE: &str =
    "2024-06-01 12:05:42,000 - INFO - Finished processing. Writing scan data to file";
#[cfg(unix)]
const CRITICAL_LINE: &str =
    "2024-06-01 12:00:09,000 - CRITICAL - Over 10 consecutive errors, stopping the program";

/// Append newline-terminated lines to the scanner log, creating it if
/// needed.
#[cfg(unix)]
fn append_log(paths: &ScannerPaths, lines: &[&str]) {
    use std::io::Write;
    let mut f = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(paths.log_file())
        .unwrap();
    for line in lines {
        writeln!(f, "{line}").unwrap();
    }
}

/// Build a scanner bundle in `tmp` with a stub executable and an output
/// directory, and return the resolved paths.
#[cfg(unix)]
fn make_bundle(tmp: &TempDir) -> ScannerPaths {
    let bundle = tmp.path().join("GearScanner");
    let paths = ScannerPaths::from_bundle_dir(bundle);
    fs::create_dir_all(paths.output_dir()).unwrap();
    write_stub_executable(&paths.executable());
    paths
}

/// A stub scanner that exits immediately — the tests write the log lines
/// themselves, which is all the watcher observes anyway.
#[cfg(unix)]
fn write_stub_executable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    fs::write(path, "#!/bin/sh\nexit 0\n").unwrap();
    let mut perm = fs::metadata(path).unwrap().permissions();
    perm.set_mode(0o755);
    fs::set_permissions(path, perm).unwrap();
}

/// Pump `process_session_events()` until the phase leaves `Scanning` or
/// the deadline expires.
#[cfg(unix)]
fn pump_until_done(state: &mut AppState, ctx: &egui::Context) {
    let deadline = std::time::Instant::now() + Duration::from_secs(30);
    while state.phase == AppPhase::Scanning {
        assert!(
            std::time::Instant::now() < deadline,
            "session did not reach a terminal phase within 30 seconds"
        );
        state.process_session_events(ctx);
        std::thread::sleep(Duration::from_millis(10));
    }
}

/// Fresh state pointed at `paths`, with auto-reveal off so headless test
/// machines never spawn a file browser.
fn state_with_paths(paths: ScannerPaths) -> AppState {
    let mut state = AppState::new();
    state.paths = paths;
    state.auto_reveal = false;
    state
}

// ── Launch failure ─────────────────────────────────────────────────────────────

/// A missing scanner bundle must land in `Failed` with a useful message —
/// never a panic, never a silent no-op.
#[test]
fn launch_failure_sets_failed_phase() {
    let tmp = TempDir::new().unwrap();
    let mut state = state_with_paths(ScannerPaths::from_bundle_dir(
        tmp.path().join("not-a-bundle"),
    ));

    state.start_scan();

    assert_eq!(state.phase, AppPhase::Failed);
    assert!(
        state.outcome_message.contains("not found"),
        "message should name the problem, got: {}",
        state.outcome_message
    );
    assert!(state.session.is_none());
}

// ── Scan lifecycle (stub scanner) ──────────────────────────────────────────────

/// After `start_scan` with a present bundle, the phase must be `Scanning`
/// and a session must be live.
#[cfg(unix)]
#[test]
fn start_scan_sets_scanning_phase() {
    let tmp = TempDir::new().unwrap();
    let mut state = state_with_paths(make_bundle(&tmp));

    state.start_scan();

    assert_eq!(state.phase, AppPhase::Scanning);
    assert!(state.session.is_some());
    assert!(state.live_log.is_some());
}

/// The completion marker must flip the phase to `Complete`, carry the
/// terminal line, and load the artifact report.
#[cfg(unix)]
#[test]
fn completion_loads_report_and_message() {
    let tmp = TempDir::new().unwrap();
    let paths = make_bundle(&tmp);
    fs::write(
        paths.scan_data_file(),
        r#"{"disk_data": [1, 2], "wengine_data": [3], "character_data": []}"#,
    )
    .unwrap();

    let ctx = egui::Context::default();
    let mut state = state_with_paths(paths.clone());
    state.start_scan();
    append_log(&paths, &[COMPLETE_LINE]);
    pump_until_done(&mut state, &ctx);

    assert_eq!(state.phase, AppPhase::Complete);
    assert_eq!(state.outcome_message, COMPLETE_LINE);
    let report = state.report.expect("report must load after completion");
    assert_eq!(report.disk_drives, 2);
    assert_eq!(report.wengines, 1);
    assert!(state.session.is_none(), "session is released on completion");
}

/// A critical line must flip the phase to `Failed` with the line as the
/// outcome message.
#[cfg(unix)]
#[test]
fn critical_line_fails_the_run() {
    let tmp = TempDir::new().unwrap();
    let paths = make_bundle(&tmp);

    let ctx = egui::Context::default();
    let mut state = state_with_paths(paths.clone());
    state.start_scan();
    append_log(&paths, &[CRITICAL_LINE]);
    pump_until_done(&mut state, &ctx);

    assert_eq!(state.phase, AppPhase::Failed);
    assert_eq!(state.outcome_message, CRITICAL_LINE);
    assert!(state.report.is_none());
}

/// Cancelling must return to `Idle` with the cancelled flag set.
#[cfg(unix)]
#[test]
fn cancel_returns_to_idle() {
    let tmp = TempDir::new().unwrap();
    let mut state = state_with_paths(make_bundle(&tmp));

    let ctx = egui::Context::default();
    state.start_scan();
    assert_eq!(state.phase, AppPhase::Scanning);

    state.cancel_scan();
    pump_until_done(&mut state, &ctx);

    assert_eq!(state.phase, AppPhase::Idle);
    assert!(state.scan_was_cancelled);
    assert!(state.session.is_none());
}

/// `start_scan` while a session is live must be a no-op, not a second
/// process launch.
#[cfg(unix)]
#[test]
fn start_scan_is_refused_while_scanning() {
    let tmp = TempDir::new().unwrap();
    let mut state = state_with_paths(make_bundle(&tmp));

    state.start_scan();
    let first_pid = state.session.as_ref().map(|s| s.scanner_pid);

    state.start_scan();

    assert_eq!(state.phase, AppPhase::Scanning);
    assert_eq!(
        state.session.as_ref().map(|s| s.scanner_pid),
        first_pid,
        "the original session must survive a re-entrant start"
    );
}
