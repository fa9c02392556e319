/// Top action bar -- scan controls, theme toggle, and branding.
use crate::state::{AppPhase, AppState};
use egui::Ui;

/// Draw the toolbar.
pub fn toolbar(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        // App title -- uses the egui accent/hyperlink colour so it adapts to
        // dark and light mode automatically.
        ui.label(
            egui::RichText::new("📡 ScanPilot")
                .size(18.0)
                .strong()
                .color(ui.visuals().hyperlink_color),
        );

        ui.separator();

        // Start button. The scanner drives the game client, so the user
        // should tab into the game right after pressing this.
        let can_scan = state.phase != AppPhase::Scanning && state.paths.bundle_exists();
        let scan_btn = ui
            .add_enabled(
                can_scan,
                egui::Button::new("▶ Start Scan").min_size(egui::vec2(100.0, 28.0)),
            )
            .on_hover_text(if state.paths.bundle_exists() {
                "Launch the scanner with the current timings"
            } else {
                "Scanner bundle not found"
            });
        if scan_btn.clicked() {
            state.start_scan();
        }

        // Stop button (only while watching).
        let can_stop = state.phase == AppPhase::Scanning;
        let stop_btn = ui.add_enabled(
            can_stop,
            egui::Button::new("⏹ Stop").min_size(egui::vec2(70.0, 28.0)),
        );
        if stop_btn.clicked() {
            state.cancel_scan();
        }

        ui.separator();

        // Reveal the most recent scan artifact.
        let can_reveal = state.paths.scan_data_file().is_file();
        if ui
            .add_enabled(can_reveal, egui::Button::new("📂 Scan Data"))
            .on_hover_text(if can_reveal {
                "Show scan_data.json in the file browser"
            } else {
                "No scan data yet — run a scan first"
            })
            .clicked()
        {
            state.reveal_artifact();
        }

        // Right-aligned controls.
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            // About button.
            if ui.button("ℹ").on_hover_text("About ScanPilot").clicked() {
                state.show_about = true;
            }

            // ── Theme toggle (☀ light / 🌙 dark) ──────────────────
            let theme_label = if state.dark_mode { "☀" } else { "🌙" };
            let theme_tip = if state.dark_mode {
                "Switch to light mode"
            } else {
                "Switch to dark mode"
            };
            if ui.button(theme_label).on_hover_text(theme_tip).clicked() {
                state.dark_mode = !state.dark_mode;
            }
        });
    });
}
