#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod io;
mod model;
mod text;
mod ui;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let paths = io::AppPaths::discover();
    let settings = io::load_settings_or_default(&paths.settings);
    tracing::info!(
        settings = %paths.settings.display(),
        schedule = %paths.schedule.display(),
        "time-meter starting"
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([settings.meter_width as f32, ui::theme::FALLBACK_METER_HEIGHT])
            .with_position([0.0, 0.0])
            .with_decorations(false)
            .with_always_on_top()
            .with_transparent(true)
            .with_resizable(false)
            .with_taskbar(false)
            .with_title("Time Meter"),
        ..Default::default()
    };

    eframe::run_native(
        "Time Meter",
        options,
        Box::new(|cc| Ok(Box::new(app::MeterApp::new(cc, paths, settings)))),
    )
}
