/// Log line classification.
///
/// The scanner is an opaque external tool; the only signal it offers is
/// the wording of its log lines. The two marker substrings below are the
/// wire contract with it — if the scanner's log format ever grows a
/// structured status line, this module is the single place to change.

/// Substring marking a fatal scanner failure.
///
/// The scanner logs at Python `logging` levels; `CRITICAL` only appears
/// when it has given up on the run.
pub const CRITICAL_MARKER: &str = "CRITICAL";

/// Substring marking a successful run. Logged immediately before the
/// scanner writes `scan_data.json`.
pub const COMPLETE_MARKER: &str = "Writing scan data to file";

/// Classification of a single log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    /// Fatal failure — terminal.
    Critical,
    /// Successful completion — terminal.
    Complete,
    /// Anything else: progress chatter, warnings, per-item errors.
    Routine,
}

/// Classify one trimmed log line by marker substring.
pub fn classify_line(line: &str) -> LineClass {
    if line.contains(CRITICAL_MARKER) {
        LineClass::Critical
    } else if line.contains(COMPLETE_MARKER) {
        LineClass::Complete
    } else {
        LineClass::Routine
    }
}

/// The last non-empty, trimmed line of `text`.
///
/// The scanner terminates every line with a newline, so the raw final
/// split segment is usually empty; whitespace-only lines are skipped the
/// same way. Handles both LF and CRLF endings.
pub fn last_meaningful_line(text: &str) -> Option<&str> {
    text.lines().rev().map(str::trim).find(|l| !l.is_empty())
}
