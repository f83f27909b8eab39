use std::{
    io::{self, BufReader},
    path::PathBuf,
};

use config::{ConfigError, DEFAULT_CONFIG_PATH};
use log::{error, info};
use managed::{ManagedDevice, ManagedDeviceError};
use thiserror::Error;

mod config;
mod logging;
mod managed;
mod writer;

#[derive(Debug, Error)]
enum AppError {
    #[error("Configuration error")]
    Config(#[from] ConfigError),
    #[error("Could not set up logging")]
    Logging(#[from] fern::InitError),
    #[error("Device error")]
    Device(#[from] ManagedDeviceError),
    #[error("IO error on the input stream")]
    IOError(#[from] io::Error),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), AppError> {
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    let config = config::load(&config_path)?;
    logging::setup(&config.logging)?;
    info!("Loaded config from {}", config_path.display());

    let mut device = ManagedDevice::new(config.uinput, config.device);
    device.startup()?;

    let lines = writer::spawn_line_reader(BufReader::new(io::stdin()));
    let replayed = writer::replay(lines, device.device_mut()?, shutdown_signal()).await;

    // the device is torn down even when the input stream failed
    device.shutdown()?;
    let stats = replayed?;
    info!(
        "Replayed {} events, {} skipped",
        stats.written, stats.failed
    );
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Could not listen for Ctrl-C: {err}");
        std::future::pending::<()>().await;
    }
}
