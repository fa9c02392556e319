/// Bottom status bar — scan phase and run statistics.
use crate::state::{AppPhase, AppState};
use egui::Ui;

/// Draw the status bar at the bottom of the window.
pub fn status_bar(ui: &mut Ui, state: &AppState) {
    // Extract theme-adaptive colours once for this frame.
    let color_accent = ui.visuals().hyperlink_color;
    let color_weak = ui.visuals().weak_text_color();
    let color_normal = ui.visuals().text_color();
    let color_warning = egui::Color32::from_rgb(0xfa, 0xb3, 0x87);
    let color_success = egui::Color32::from_rgb(0xa6, 0xe3, 0xa1);
    let color_error = egui::Color32::from_rgb(0xf3, 0x8b, 0xa8);

    ui.horizontal(|ui| {
        match state.phase {
            AppPhase::Idle => {
                if state.scan_was_cancelled {
                    ui.label(
                        egui::RichText::new("⏹ Scan stopped")
                            .size(12.0)
                            .color(color_warning),
                    );
                } else {
                    ui.label(egui::RichText::new("Ready").size(12.0).color(color_weak));
                }
            }
            AppPhase::Scanning => {
                // Animated spinner.
                ui.spinner();

                ui.label(
                    egui::RichText::new("Scanning…")
                        .size(12.0)
                        .color(color_normal),
                );

                if let Some(started) = state.scan_started {
                    ui.separator();
                    let elapsed = chrono::Local::now() - started;
                    ui.label(
                        egui::RichText::new(format!("{} s elapsed", elapsed.num_seconds().max(0)))
                            .size(12.0)
                            .color(color_weak),
                    );
                }

                if let Some(ref live_log) = state.live_log {
                    ui.separator();
                    ui.label(
                        egui::RichText::new(format!("{} log lines", live_log.read().len()))
                            .size(12.0)
                            .color(color_accent),
                    );
                }
            }
            AppPhase::Complete => {
                ui.label(
                    egui::RichText::new("✔ Scan complete")
                        .size(12.0)
                        .color(color_success),
                );

                if let Some(report) = state.report {
                    ui.separator();
                    ui.label(
                        egui::RichText::new(format!(
                            "{} discs / {} engines / {} agents",
                            report.disk_drives, report.wengines, report.characters
                        ))
                        .size(12.0)
                        .color(color_normal),
                    );
                }
            }
            AppPhase::Failed => {
                ui.label(
                    egui::RichText::new("✘ Scan failed")
                        .size(12.0)
                        .color(color_error),
                );
                if !state.outcome_message.is_empty() {
                    ui.separator();
                    ui.label(
                        egui::RichText::new(truncate_line(&state.outcome_message, 90))
                            .size(12.0)
                            .color(color_weak),
                    );
                }
            }
        }
    });
}

/// Truncate a long log line for single-row display.
fn truncate_line(line: &str, max_len: usize) -> String {
    if line.chars().count() <= max_len {
        return line.to_string();
    }
    let head: String = line.chars().take(max_len.saturating_sub(1)).collect();
    format!("{head}…")
}
