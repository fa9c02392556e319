/// Live log panel.
///
/// Displays a continuously-updated tail of the scanner's log so the user
/// can follow the run without digging out the log file. Rows are tinted
/// by log level; the view sticks to the bottom while new lines arrive.
use crate::state::{AppPhase, AppState};

use egui::Ui;
use egui_extras::{Column, TableBuilder};

/// Row height for log lines.
const ROW_HEIGHT: f32 = 18.0;

/// Draw the live log panel (central panel content).
pub fn log_panel(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui| {
        ui.label(
            egui::RichText::new("Scanner Log")
                .strong()
                .color(ui.visuals().hyperlink_color),
        );
        if state.phase == AppPhase::Scanning {
            ui.spinner();
        }
    });
    ui.add_space(4.0);

    // Outcome banner once a run has finished.
    match state.phase {
        AppPhase::Complete => {
            ui.label(
                egui::RichText::new(format!("✔ {}", state.outcome_message))
                    .size(13.0)
                    .color(egui::Color32::from_rgb(0xa6, 0xe3, 0xa1)),
            );
            ui.add_space(4.0);
        }
        AppPhase::Failed => {
            ui.label(
                egui::RichText::new(format!("✘ {}", state.outcome_message))
                    .size(13.0)
                    .color(egui::Color32::from_rgb(0xf3, 0x8b, 0xa8)),
            );
            ui.add_space(4.0);
        }
        AppPhase::Idle | AppPhase::Scanning => {}
    }

    let Some(live_log) = state.live_log.as_ref() else {
        ui.add_space(12.0);
        ui.label(
            egui::RichText::new("Start a scan to follow the scanner's log here.")
                .color(ui.visuals().weak_text_color()),
        );
        return;
    };

    // Snapshot under the read lock; rendering happens lock-free.
    let lines: Vec<String> = live_log.read().clone();

    if lines.is_empty() {
        ui.add_space(12.0);
        ui.label(
            egui::RichText::new("Waiting for the scanner to write its first log line…")
                .color(ui.visuals().weak_text_color()),
        );
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .stick_to_bottom(true)
        .column(Column::auto().at_least(36.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.label(egui::RichText::new("#").size(11.0).strong());
            });
            header.col(|ui| {
                ui.label(egui::RichText::new("Line").size(11.0).strong());
            });
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, lines.len(), |mut row| {
                let idx = row.index();
                let line = &lines[idx];
                let color = line_color(line);

                row.col(|ui| {
                    ui.label(
                        egui::RichText::new((idx + 1).to_string())
                            .size(11.0)
                            .color(ui.visuals().weak_text_color()),
                    );
                });
                row.col(|ui| {
                    ui.label(
                        egui::RichText::new(line)
                            .size(12.0)
                            .monospace()
                            .color(color),
                    );
                });
            });
        });
}

/// Tint a log line by its level marker.
///
/// The scanner logs in the `timestamp - LEVEL - message` shape; the
/// level substring is enough, and unknown shapes fall through to the
/// normal text colour.
fn line_color(line: &str) -> egui::Color32 {
    if line.contains("CRITICAL") {
        egui::Color32::from_rgb(0xf3, 0x8b, 0xa8)
    } else if line.contains(" - ERROR - ") {
        egui::Color32::from_rgb(0xfa, 0xb3, 0x87)
    } else if line.contains(" - WARNING - ") {
        egui::Color32::from_rgb(0xf9, 0xe2, 0xaf)
    } else {
        egui::Color32::from_rgb(0xb8, 0xb8, 0xc4)
    }
}
