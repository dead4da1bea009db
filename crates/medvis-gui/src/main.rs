mod app;
mod convert;
mod messages;
mod panels;
mod state;

use medvis_core::config::MedvisConfig;
use medvis_core::sequencer::Sequencer;

/// Optional TOML config read at startup.
const CONFIG_ENV: &str = "MEDVIS_CONFIG";

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = load_config();
    let sequencer = match Sequencer::scripted(&config) {
        Ok(sequencer) => sequencer,
        Err(e) => {
            tracing::warn!(error = %e, "config rejected, using defaults");
            Sequencer::scripted(&MedvisConfig::default())
                .map_err(|e| eframe::Error::AppCreation(Box::new(e)))?
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 820.0])
            .with_min_inner_size([640.0, 480.0])
            .with_title("MedVis"),
        ..Default::default()
    };

    eframe::run_native(
        "MedVis",
        options,
        Box::new(move |_cc| Ok(Box::new(app::MedvisApp::new(sequencer)))),
    )
}

fn load_config() -> MedvisConfig {
    let Some(path) = std::env::var_os(CONFIG_ENV) else {
        return MedvisConfig::default();
    };
    match MedvisConfig::load(std::path::Path::new(&path)) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(path = ?path, error = %e, "failed to load config, using defaults");
            MedvisConfig::default()
        }
    }
}
