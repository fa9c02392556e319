/// Scan request parameters.
///
/// The two values are timing knobs for the external scanner and are
/// forwarded to it verbatim — no range validation happens here because
/// the scanner applies its own clamping.

/// Parameters for one scan run.
///
/// `page_load` is the seconds the scanner waits for an inventory page to
/// load; `disc_scan` is the seconds it waits between individual item
/// scans. Both may be fractional.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanRequest {
    pub disc_scan: f64,
    pub page_load: f64,
}

impl ScanRequest {
    /// Positional argument strings for the scanner process.
    ///
    /// The scanner expects `[page_load, disc_scan]` — in that order, not
    /// the field order of this struct.
    pub fn to_args(&self) -> Vec<String> {
        vec![format_arg(self.page_load), format_arg(self.disc_scan)]
    }
}

impl Default for ScanRequest {
    /// Defaults match the timings the scanner's own docs recommend for a
    /// mid-range machine.
    fn default() -> Self {
        Self {
            disc_scan: 2.0,
            page_load: 5.0,
        }
    }
}

/// Render a numeric argument the way an argv-driven tool expects it:
/// whole numbers without a decimal point (`5`, not `5.0`).
fn format_arg(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
