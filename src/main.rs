//! ScanPilot — desktop companion for the external gear scanner.
//!
//! Thin binary entry point. All logic lives in the `scanpilot-core`
//! and `scanpilot-gui` crates.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

fn main() -> anyhow::Result<()> {
    // Initialise structured logging.
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    tracing::info!("ScanPilot starting");

    let icon = scanpilot_gui::icon::generate_icon(64);

    // Build application state *before* opening the window so the first
    // rendered frame arrives immediately and the OS never fills the window
    // with its default white background.
    let state = scanpilot_gui::ScanPilotState::build();

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("ScanPilot -- Gear Scanner Companion")
            .with_inner_size([1000.0, 620.0])
            .with_min_inner_size([720.0, 440.0])
            .with_icon(icon)
            // Prevents Windows from filling the window with white before the
            // first OpenGL frame is rendered. DWM compositing is used instead,
            // which starts transparent/black rather than white.
            .with_transparent(true),
        ..Default::default()
    };

    eframe::run_native(
        "ScanPilot",
        options,
        Box::new(|cc| {
            Ok(Box::new(scanpilot_gui::ScanPilotApp::with_state(cc, state)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {e}"))?;

    Ok(())
}
