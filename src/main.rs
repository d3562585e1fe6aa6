use std::env;
use std::error::Error;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use clap::Parser;

use motionsense::bus::i2c::I2cBus;
use motionsense::config::SensorConfig;
use motionsense::motion::sensor::MotionSensor;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a YAML sensor configuration
    #[arg(short, long)]
    config: Option<String>,
    /// Bus device to open
    #[arg(long)]
    bus: Option<String>,
    /// Peripheral address, decimal or 0x prefixed hex
    #[arg(long, value_parser = parse_address)]
    address: Option<u16>,
    /// Milliseconds between refreshes
    #[arg(long)]
    interval_ms: Option<u64>,
    /// Report the state as JSON
    #[arg(long)]
    json: bool,
}

fn parse_address(value: &str) -> Result<u16, String> {
    let parsed = match value.strip_prefix("0x") {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => value.parse::<u16>(),
    };
    parsed.map_err(|e| format!("invalid address '{value}': {e}"))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let log_level = match env::var("LOG_LEVEL") {
        Ok(value) => value,
        Err(_) => "info".to_string(),
    };
    env::set_var("RUST_LOG", log_level);
    env_logger::init();
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    log::info!("Starting motionsense v{}", VERSION);

    let args = Args::parse();
    let mut config = match args.config {
        Some(path) => SensorConfig::from_yaml_file(path)?,
        None => SensorConfig::default(),
    };
    if let Some(bus) = args.bus {
        config.bus = bus;
    }
    if let Some(address) = args.address {
        config.address = address;
    }
    if let Some(interval) = args.interval_ms {
        config.poll_interval_ms = interval;
    }

    let sensor = Arc::new(MotionSensor::new(I2cBus::new(config.bus.clone()), &config));
    if let Err(e) = sensor.initialize() {
        log::error!("Unable to initialize motion sensor on {}: {e}", config.bus);
        return Err(e.into());
    }

    // Setup CTRL+C handler
    let running = Arc::new(AtomicBool::new(true));
    let signal_running = running.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Unable to listen for shutdown signal: {e}");
            return;
        }
        log::info!("Shutting down");
        signal_running.store(false, Ordering::SeqCst);
    });

    // Spawn a blocking task with the given poll rate to refresh the sensor
    let poll_sensor = sensor.clone();
    let poll_running = running.clone();
    let poll_interval = Duration::from_millis(config.poll_interval_ms);
    let poller = tokio::task::spawn_blocking(move || {
        log::debug!("Starting sensor polling every {poll_interval:?}");
        while poll_running.load(Ordering::SeqCst) {
            poll_sensor.refresh();
            thread::sleep(poll_interval);
        }
        log::debug!("Sensor polling stopped");
    });

    // Periodically report the latest state
    let report_interval = Duration::from_millis(config.report_interval_ms.max(1));
    let mut report = tokio::time::interval(report_interval);
    while running.load(Ordering::SeqCst) {
        report.tick().await;
        let snapshot = sensor.snapshot();
        if args.json {
            match serde_json::to_string(&snapshot) {
                Ok(json) => log::info!("{json}"),
                Err(e) => log::warn!("Unable to serialize state: {e}"),
            }
        } else {
            log::info!(
                "Acceleration: {} | Angular rate: {} | Roll: {:.2} Pitch: {:.2} | Velocity: {}",
                snapshot.acceleration,
                snapshot.angular_rate,
                snapshot.orientation.roll,
                snapshot.orientation.pitch,
                snapshot.velocity
            );
        }
    }

    poller.await?;
    log::info!("motionsense stopped");

    Ok(())
}
