mod bootstrap;

use anyhow::Result;
use chrono::Utc;
use medvisor_core::settings::Settings;
use medvisor_data::analysis::{DashboardSnapshot, DashboardState};
use medvisor_ui::app::App;

fn main() -> Result<()> {
    let settings = Settings::load();

    let app_dir = bootstrap::ensure_directories()?;
    let target = bootstrap::log_target(&settings, &app_dir);
    bootstrap::setup_logging(&settings.log_level, &target)?;

    tracing::info!("MedVisor v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Theme: {}, Page size: {}, File: {}",
        settings.theme,
        settings.page_size,
        settings
            .file
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<sample data>".to_string())
    );

    if settings.json {
        let mut state = DashboardState::new();
        if let Some(path) = settings.file.as_deref() {
            state.upload_file(path)?;
        }
        let snapshot = DashboardSnapshot::build(&state, Utc::now());
        println!("{}", snapshot.to_json()?);
        return Ok(());
    }

    let export_dir = std::env::current_dir()?;
    let mut app = App::new(&settings.theme, settings.page_size(), export_dir);
    if let Some(path) = settings.file.as_deref() {
        // A bad startup file is reported in the footer like any other upload.
        app.upload(path);
    }

    app.run()?;
    tracing::info!("MedVisor exiting");
    Ok(())
}
