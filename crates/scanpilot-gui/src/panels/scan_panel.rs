/// Scan panel — timing parameters and scanner bundle info in the left
/// sidebar.
use crate::state::{AppPhase, AppState};

use egui::Ui;

/// Draw the scan settings panel (left sidebar content).
pub fn scan_panel(ui: &mut Ui, state: &mut AppState) {
    ui.add_space(4.0);
    ui.heading("Scan Settings");
    ui.add_space(8.0);

    // Parameters are locked while a scan is running — the scanner has
    // already read them.
    let editable = state.phase != AppPhase::Scanning;

    egui::Grid::new("timing_grid")
        .num_columns(2)
        .spacing([12.0, 8.0])
        .show(ui, |ui| {
            ui.label("Page load wait (s)");
            ui.add_enabled(
                editable,
                egui::DragValue::new(&mut state.page_load_secs)
                    .speed(0.1)
                    .range(0.5..=30.0),
            )
            .on_hover_text("How long the scanner waits for an inventory page to load");
            ui.end_row();

            ui.label("Disc scan wait (s)");
            ui.add_enabled(
                editable,
                egui::DragValue::new(&mut state.disc_scan_secs)
                    .speed(0.1)
                    .range(0.5..=30.0),
            )
            .on_hover_text(
                "Pause between individual disc scans. Increase this if the \
                 scanner reports consecutive read errors",
            );
            ui.end_row();
        });

    ui.add_space(8.0);
    ui.checkbox(&mut state.auto_reveal, "Open output folder when done")
        .on_hover_text("Reveal scan_data.json in the file browser after a successful scan");

    ui.add_space(16.0);
    ui.separator();
    ui.add_space(8.0);

    // ── Scanner bundle ────────────────────────────────────────────────
    ui.heading("Scanner");
    ui.add_space(4.0);

    ui.label(
        egui::RichText::new(state.paths.bundle_dir().display().to_string())
            .size(11.0)
            .monospace()
            .color(ui.visuals().weak_text_color()),
    );

    ui.add_space(4.0);
    if state.paths.bundle_exists() {
        ui.label(
            egui::RichText::new("✔ Scanner bundle found")
                .size(12.0)
                .color(egui::Color32::from_rgb(0xa6, 0xe3, 0xa1)),
        );
    } else {
        ui.label(
            egui::RichText::new("⚠ Scanner bundle not found")
                .size(12.0)
                .color(egui::Color32::from_rgb(0xf3, 0x8b, 0xa8)),
        );
        ui.label(
            egui::RichText::new(format!(
                "Place the scanner next to ScanPilot, or set {}",
                scanpilot_core::paths::SCANNER_DIR_ENV
            ))
            .size(11.0)
            .color(ui.visuals().weak_text_color()),
        );
    }

    // ── Result summary (after a completed run) ────────────────────────
    if let Some(report) = state.report {
        ui.add_space(16.0);
        ui.separator();
        ui.add_space(8.0);
        ui.heading("Last Scan");
        ui.add_space(4.0);

        egui::Grid::new("report_grid")
            .num_columns(2)
            .spacing([12.0, 4.0])
            .show(ui, |ui| {
                ui.label("Disc drives");
                ui.label(report.disk_drives.to_string());
                ui.end_row();
                ui.label("W-Engines");
                ui.label(report.wengines.to_string());
                ui.end_row();
                ui.label("Agents");
                ui.label(report.characters.to_string());
                ui.end_row();
                ui.label("Total entries");
                ui.label(
                    egui::RichText::new(report.total_entries().to_string())
                        .strong(),
                );
                ui.end_row();
            });
    }
}
