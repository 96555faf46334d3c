mod api;
mod channel;
mod config;
mod listing;
mod store;
mod ui;

use tracing_subscriber::EnvFilter;

use api::ApiClient;
use config::AppConfig;
use ui::app::EstateApp;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,estate_scout=debug")),
        )
        .init();

    tracing::info!("Estate Scout client starting...");

    let config = AppConfig::from_env();
    tracing::info!("Backend API: {}", config.api_url);

    let api_client = ApiClient::new(config.api_url);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1080.0, 760.0])
            .with_title("Estate Scout"),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        "Estate Scout",
        native_options,
        Box::new(|_cc| Ok(Box::new(EstateApp::new(api_client)))),
    ) {
        tracing::error!("UI error: {}", e);
        std::process::exit(1);
    }
}
