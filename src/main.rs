use eframe::egui;
use embassy_executor::{Executor, Spawner};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use env_logger::Builder;
use log::{LevelFilter, info};
use std::thread;

use crate::config::{AppConfig, MetricsConfig};
use crate::ui::{AppState, UICommand, UIRefreshState};

mod animation;
mod config;
mod metrics;
mod render;
mod topology;
mod ui;

const UI_REFRESH_QUEUE_SIZE: usize = 16;
type UIRefreshQueue = embassy_sync::channel::Channel<CriticalSectionRawMutex, UIRefreshState, UI_REFRESH_QUEUE_SIZE>;
pub type UIRefreshQueueReceiver = embassy_sync::channel::Receiver<'static, CriticalSectionRawMutex, UIRefreshState, UI_REFRESH_QUEUE_SIZE>;
pub type UIRefreshQueueSender = embassy_sync::channel::Sender<'static, CriticalSectionRawMutex, UIRefreshState, UI_REFRESH_QUEUE_SIZE>;

const UI_COMMAND_QUEUE_SIZE: usize = 4;
type UICommandQueue = embassy_sync::channel::Channel<CriticalSectionRawMutex, UICommand, UI_COMMAND_QUEUE_SIZE>;
pub type UICommandQueueReceiver = embassy_sync::channel::Receiver<'static, CriticalSectionRawMutex, UICommand, UI_COMMAND_QUEUE_SIZE>;
pub type UICommandQueueSender = embassy_sync::channel::Sender<'static, CriticalSectionRawMutex, UICommand, UI_COMMAND_QUEUE_SIZE>;

fn embassy_init(spawner: Spawner, metrics: Option<MetricsConfig>, ui_refresh_tx: UIRefreshQueueSender, ui_command_rx: UICommandQueueReceiver) {
    if let Err(e) = spawner.spawn(metrics::metrics_feed_task(metrics, ui_refresh_tx, ui_command_rx)) {
        log::error!("Failed to spawn metrics feed task: {:?}", e);
    }
}

fn main() {
    // Logging setup
    Builder::new()
        .filter_level(LevelFilter::Info)
        .filter(Some("homenet_topology_viz"), LevelFilter::Debug)
        .parse_default_env()
        .init();

    info!("Starting up");

    let config_path = AppConfig::default_path();
    let (config, config_error) = AppConfig::load_or_default(&config_path);
    let startup_alert = config_error.map(|e| format!("{}\n\nRunning with default settings.", e));

    let ui_refresh_queue: &'static UIRefreshQueue = Box::leak(Box::new(UIRefreshQueue::new()));
    let ui_command_queue: &'static UICommandQueue = Box::leak(Box::new(UICommandQueue::new()));

    let ui_refresh_tx = ui_refresh_queue.sender();
    let ui_refresh_rx = ui_refresh_queue.receiver();
    let ui_command_tx = ui_command_queue.sender();
    let ui_command_rx = ui_command_queue.receiver();

    // Spawn Embassy executor on a dedicated background thread for the metrics feed
    let metrics_config = config.metrics.clone();
    let embassy_handle = thread::Builder::new()
        .name("embassy-executor".to_string())
        .spawn(move || {
            // Leak the executor to satisfy the 'static lifetime required by run()
            let executor: &'static mut Executor = Box::leak(Box::new(Executor::new()));
            executor.run(|spawner| embassy_init(spawner, metrics_config, ui_refresh_tx, ui_command_rx));
        });
    if let Err(e) = embassy_handle {
        // The animation does not depend on the feed; carry on without it
        log::error!("Failed to spawn embassy thread: {}", e);
    }

    // Start the GUI on the main thread (required on macOS)
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Smart-Home Network Topologies")
            .with_inner_size([1200.0, 800.0]),
        ..Default::default()
    };
    let result = eframe::run_native(
        "Smart-Home Network Topologies",
        native_options,
        Box::new(move |cc| Ok(Box::new(AppState::new(ui_refresh_rx, ui_command_tx, &config, startup_alert, cc)))),
    );
    if let Err(e) = result {
        log::error!("GUI terminated with error: {}", e);
    }
}
