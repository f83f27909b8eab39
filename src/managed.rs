use log::info;
use thiserror::Error;
use uinput_device::{UinputDevice, UinputError};

use crate::config::{ConfigError, DeviceConfig, UinputConfig};

#[derive(Debug, Error)]
pub enum ManagedDeviceError {
    #[error("Invalid device configuration")]
    Config(#[from] ConfigError),
    #[error("Could not allocate a uinput device")]
    Startup(#[source] UinputError),
    #[error("Could not shut down uinput device")]
    Shutdown(#[source] UinputError),
    #[error("Uinput device is already started")]
    AlreadyStarted,
    #[error("Uinput device is not started")]
    NotStarted,
}

/// Owns the one uinput device described by the configuration.
pub struct ManagedDevice {
    uinput: UinputConfig,
    config: DeviceConfig,
    device: Option<UinputDevice>,
}

impl ManagedDevice {
    pub fn new(uinput: UinputConfig, config: DeviceConfig) -> Self {
        ManagedDevice {
            uinput,
            config,
            device: None,
        }
    }

    pub fn startup(&mut self) -> Result<(), ManagedDeviceError> {
        if self.device.is_some() {
            return Err(ManagedDeviceError::AlreadyStarted);
        }

        let ranges = self.config.axis_ranges()?;
        let device = UinputDevice::create(&self.uinput.location, self.config.identity(), &ranges)
            .map_err(ManagedDeviceError::Startup)?;
        info!(
            "Started uinput device {:?} on {}",
            self.config.name,
            self.uinput.location.display()
        );
        self.device = Some(device);
        Ok(())
    }

    /// The device is released even when teardown reports an error.
    pub fn shutdown(&mut self) -> Result<(), ManagedDeviceError> {
        let mut device = self.device.take().ok_or(ManagedDeviceError::NotStarted)?;
        device.destroy().map_err(ManagedDeviceError::Shutdown)
    }

    pub fn device_mut(&mut self) -> Result<&mut UinputDevice, ManagedDeviceError> {
        self.device.as_mut().ok_or(ManagedDeviceError::NotStarted)
    }
}
