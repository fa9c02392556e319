/// Main `eframe::App` implementation for ScanPilot.
///
/// This is the top-level UI layout that composes all panels and widgets.
use crate::panels;
use crate::state::{AppPhase, AppState};
use crate::widgets;

/// Pre-built application state.
///
/// Construct this **before** calling `eframe::run_native` so that the
/// startup work (scanner bundle resolution) completes before the OS
/// window is created and the first rendered frame arrives immediately.
pub struct ScanPilotState {
    pub(crate) inner: AppState,
}

impl ScanPilotState {
    /// Resolve the scanner bundle and build initial state.
    /// Call this before `eframe::run_native`.
    pub fn build() -> Self {
        let state = AppState::new();
        if !state.paths.bundle_exists() {
            tracing::warn!(
                "Scanner bundle not found at {}",
                state.paths.bundle_dir().display()
            );
        }
        Self { inner: state }
    }
}

/// The ScanPilot application.
pub struct ScanPilotApp {
    state: AppState,
}

impl ScanPilotApp {
    /// Create a new application instance from pre-built state.
    pub fn with_state(cc: &eframe::CreationContext<'_>, state: ScanPilotState) -> Self {
        // ── Font: Segoe UI ────────────────────────────────────────────────
        // Load Segoe UI from the Windows fonts directory and register it as
        // the highest-priority proportional font so every widget uses it.
        let system_root = std::env::var("SystemRoot").unwrap_or_else(|_| "C:\\Windows".to_string());
        let font_path = format!("{}\\Fonts\\segoeui.ttf", system_root);

        let mut fonts = egui::FontDefinitions::default();
        match std::fs::read(&font_path) {
            Ok(bytes) => {
                fonts.font_data.insert(
                    "SegoeUI".to_owned(),
                    egui::FontData::from_owned(bytes).into(),
                );
                fonts
                    .families
                    .entry(egui::FontFamily::Proportional)
                    .or_default()
                    .insert(0, "SegoeUI".to_owned());
                tracing::info!("Loaded Segoe UI from {}", font_path);
            }
            Err(e) => {
                tracing::warn!(
                    "Could not load Segoe UI from {}: {} -- using default font",
                    font_path,
                    e
                );
            }
        }
        cc.egui_ctx.set_fonts(fonts);

        // Apply initial dark visuals.
        cc.egui_ctx.set_visuals(egui::Visuals::dark());

        Self { state: state.inner }
    }
}

impl eframe::App for ScanPilotApp {
    /// Override the GPU clear colour to match the active theme background,
    /// preventing a colour mismatch flash between frames.
    fn clear_color(&self, visuals: &egui::Visuals) -> [f32; 4] {
        let [r, g, b, a] = visuals.panel_fill.to_array();
        [
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        ]
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ── Apply theme ───────────────────────────────────────────────────
        // Called every frame so that toggling dark_mode takes effect
        // immediately on the next rendered frame.
        if self.state.dark_mode {
            ctx.set_visuals(egui::Visuals::dark());
        } else {
            ctx.set_visuals(egui::Visuals::light());
        }

        // ── Process watcher events ────────────────────────────────────────
        let _changed = self.state.process_session_events(ctx);

        // Request continuous repaint while a scan is live so the log tail
        // and elapsed time stay fresh.
        if self.state.phase == AppPhase::Scanning {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        // ── Top toolbar ───────────────────────────────────────────────────
        egui::TopBottomPanel::top("toolbar")
            .min_height(36.0)
            .show(ctx, |ui| {
                ui.add_space(4.0);
                widgets::toolbar::toolbar(ui, &mut self.state);
                ui.add_space(4.0);
            });

        // ── About dialog ──────────────────────────────────────────────────
        let mut show_about = self.state.show_about;
        egui::Window::new("About ScanPilot")
            .open(&mut show_about)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .fixed_size([340.0, 0.0])
            .show(ctx, |ui| {
                let accent = ui.visuals().hyperlink_color;
                let muted = ui.visuals().weak_text_color();
                let normal = ui.visuals().text_color();

                ui.vertical_centered(|ui| {
                    ui.add_space(8.0);
                    ui.label(
                        egui::RichText::new("📡 ScanPilot")
                            .size(24.0)
                            .strong()
                            .color(accent),
                    );
                    ui.add_space(4.0);
                    ui.label(
                        egui::RichText::new(format!("v{}", env!("CARGO_PKG_VERSION")))
                            .size(13.0)
                            .color(muted),
                    );
                    ui.add_space(12.0);
                    ui.label(
                        egui::RichText::new(
                            "Companion app for the gear scanner.\n\
                             Launches the scanner, follows its log,\n\
                             and hands you the scan data when it's done.",
                        )
                        .size(12.0)
                        .color(normal),
                    );
                    ui.add_space(12.0);
                    ui.separator();
                    ui.add_space(8.0);
                    ui.hyperlink_to(
                        "github.com/Swatto86/ScanPilot",
                        "https://github.com/Swatto86/ScanPilot",
                    );
                    ui.add_space(4.0);
                    ui.label(
                        egui::RichText::new("MIT License - (c) 2026 Swatto")
                            .size(11.0)
                            .color(muted),
                    );
                    ui.add_space(4.0);
                    ui.label(
                        egui::RichText::new("Built with Rust & egui")
                            .size(11.0)
                            .color(muted),
                    );
                    ui.add_space(8.0);
                });
            });
        self.state.show_about = show_about;

        // ── Bottom status bar ─────────────────────────────────────────────
        egui::TopBottomPanel::bottom("status_bar")
            .min_height(24.0)
            .show(ctx, |ui| {
                ui.add_space(2.0);
                widgets::status_bar::status_bar(ui, &self.state);
                ui.add_space(2.0);
            });

        // ── Left settings panel ───────────────────────────────────────────
        egui::SidePanel::left("settings_panel")
            .default_width(320.0)
            .min_width(260.0)
            .max_width(480.0)
            .resizable(true)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    panels::scan_panel::scan_panel(ui, &mut self.state);
                });
            });

        // ── Central panel (log tail) ──────────────────────────────────────
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::log_panel::log_panel(ui, &self.state);
        });
    }
}
