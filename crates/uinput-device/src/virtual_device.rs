use std::path::Path;

use input_event::InputEvent;
use log::info;
use nix::unistd::{access, AccessFlags};

use crate::{
    create_device, destroy_device, write_event, AxisRanges, DeviceHandle, DeviceIdentity,
    UinputError, VirtualDevice,
};

/// A uinput device that stays usable until [`UinputDevice::destroy`].
#[derive(Debug)]
pub struct UinputDevice {
    handle: Option<DeviceHandle>,
    identity: DeviceIdentity,
}

impl UinputDevice {
    pub fn create(
        path: impl AsRef<Path>,
        identity: DeviceIdentity,
        ranges: &AxisRanges,
    ) -> Result<Self, UinputError> {
        let path = path.as_ref();
        access(path, AccessFlags::W_OK).map_err(|source| UinputError::NodeNotWritable {
            path: path.to_path_buf(),
            source,
        })?;

        let handle = create_device(path, &identity, ranges)?;
        info!("Created uinput device {:?}", identity.name);

        Ok(UinputDevice {
            handle: Some(handle),
            identity,
        })
    }

    pub fn ready(&self) -> bool {
        self.handle.is_some()
    }

    pub fn identity(&self) -> &DeviceIdentity {
        &self.identity
    }

    pub fn handle(&self) -> Option<&DeviceHandle> {
        self.handle.as_ref()
    }

    /// Tears the device down. Afterwards the device is no longer ready, even
    /// if teardown failed.
    pub fn destroy(&mut self) -> Result<(), UinputError> {
        let handle = self.handle.take().ok_or(UinputError::NotReady)?;
        destroy_device(handle)?;
        info!("Destroyed uinput device {:?}", self.identity.name);
        Ok(())
    }
}

impl From<(DeviceHandle, DeviceIdentity)> for UinputDevice {
    fn from((handle, identity): (DeviceHandle, DeviceIdentity)) -> Self {
        UinputDevice {
            handle: Some(handle),
            identity,
        }
    }
}

impl VirtualDevice for UinputDevice {
    fn emit(&mut self, event: InputEvent) -> Result<(), UinputError> {
        let handle = self.handle.as_mut().ok_or(UinputError::NotReady)?;
        write_event(handle, event)
    }
}
