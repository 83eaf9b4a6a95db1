use anyhow::anyhow;
use eframe::egui;
use log::{error, info};

use spa_tracker_backend::config::TrackerConfig;
use spa_tracker_backend::initialize_backend;

mod ui;

use ui::SpaTrackerApp;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    info!("Starting spa service tracker");

    let config = TrackerConfig::load()?;
    info!("Using database {}", config.database_url);

    // Store calls run here; the UI thread only ever polls for their results
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()?;

    let service = runtime.block_on(initialize_backend(&config)).map_err(|e| {
        error!("Failed to initialize backend: {}", e);
        e
    })?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Spa Service Tracker")
            .with_resizable(true),
        ..Default::default()
    };

    info!("Launching egui window");
    eframe::run_native(
        "Spa Service Tracker",
        options,
        Box::new(move |cc| {
            let app = SpaTrackerApp::new(cc, service, runtime, config);
            info!("Successfully initialized spa tracker app");
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow!("Failed to run app: {}", e))
}
