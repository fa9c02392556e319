/// Watch session events — lightweight messages sent from the watcher
/// thread to the UI thread via a crossbeam channel.
///
/// Every variant is terminal: the watcher thread exits immediately after
/// sending one. Routine log lines are not events; the UI reads those from
/// the shared [`LiveLog`](super::LiveLog) buffer instead.

use std::time::Duration;

/// Terminal outcome of a watch session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEvent {
    /// The scanner logged a critical failure. `message` is the offending
    /// log line verbatim.
    Error { message: String },

    /// The scanner finished and is writing the scan artifact. `message`
    /// is the completion log line verbatim.
    Complete { message: String },

    /// The log file never appeared, or no terminal marker arrived before
    /// the watch deadline.
    TimedOut { waited: Duration },

    /// The watch was stopped by the user.
    Cancelled,
}
