use std::{
    fs::OpenOptions,
    marker::PhantomData,
    os::unix::fs::OpenOptionsExt,
    path::Path,
};

use input_event::EventClass;
use log::{debug, error};
use strum::IntoEnumIterator;

use crate::{
    abi::UinputUserDev,
    control::UinputControl,
    descriptor::{self, AxisRanges, DeviceIdentity},
    handle::DeviceHandle,
    UinputError,
};

pub struct Opened;
pub struct CapabilitiesDeclared;
pub struct DescriptorWritten;

/// The uinput creation handshake as a typestate machine:
/// `Opened -> CapabilitiesDeclared -> DescriptorWritten -> activated`.
///
/// Every state owns the control handle. Leaving the handshake early drops it,
/// which closes the descriptor before the device ever exists.
pub struct Handshake<C, S> {
    control: C,
    _state: PhantomData<S>,
}

impl<C, S> Handshake<C, S> {
    fn advance<T>(self) -> Handshake<C, T> {
        Handshake {
            control: self.control,
            _state: PhantomData,
        }
    }
}

impl<C: UinputControl> Handshake<C, Opened> {
    pub fn new(control: C) -> Self {
        Handshake {
            control,
            _state: PhantomData,
        }
    }

    /// Declares every event class and, per class, every code below its limit.
    /// The first rejected request aborts the declaration.
    pub fn declare_capabilities(mut self) -> Result<Handshake<C, CapabilitiesDeclared>, UinputError> {
        for class in EventClass::iter() {
            self.control.enable_class(class).map_err(|source| {
                error!("error activating {class} type: {source}");
                UinputError::EventClass { class, source }
            })?;

            let Some(limit) = class.code_limit() else {
                continue;
            };
            for code in 0..limit {
                self.control.enable_code(class, code).map_err(|source| {
                    error!("error activating {class} code {code}: {source}");
                    UinputError::EventCode {
                        class,
                        code,
                        source,
                    }
                })?;
            }
        }
        Ok(self.advance())
    }
}

impl<C: UinputControl> Handshake<C, CapabilitiesDeclared> {
    /// Writes the whole descriptor in one call. Anything short of the full
    /// structure is a failure.
    pub fn write_descriptor(
        mut self,
        descriptor: &UinputUserDev,
    ) -> Result<Handshake<C, DescriptorWritten>, UinputError> {
        let bytes = descriptor.as_bytes();
        let written = self.control.write(bytes).map_err(|source| {
            error!("error writing uinput_user_dev: {source}");
            UinputError::DescriptorWrite(source)
        })?;
        if written != bytes.len() {
            error!(
                "short write of uinput_user_dev: {written} of {} bytes",
                bytes.len()
            );
            return Err(UinputError::ShortDescriptorWrite {
                written,
                expected: bytes.len(),
            });
        }
        Ok(self.advance())
    }
}

impl<C: UinputControl> Handshake<C, DescriptorWritten> {
    /// Issues `UI_DEV_CREATE` and releases the control handle to the caller.
    pub fn activate(mut self) -> Result<C, UinputError> {
        self.control.activate().map_err(|source| {
            error!("error on ioctl UI_DEV_CREATE: {source}");
            UinputError::Activate(source)
        })?;
        Ok(self.control)
    }
}

/// Opens the uinput node at `path` and runs the full creation handshake.
///
/// On success the returned handle is the only reference to the new device.
/// On failure the node descriptor has already been closed.
pub fn create_device(
    path: impl AsRef<Path>,
    identity: &DeviceIdentity,
    ranges: &AxisRanges,
) -> Result<DeviceHandle, UinputError> {
    let path = path.as_ref();
    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .custom_flags(libc::O_NONBLOCK)
        .open(path)
        .map_err(|source| {
            error!("opening the uinput node {}: {source}", path.display());
            UinputError::Open {
                path: path.to_path_buf(),
                source,
            }
        })?;

    let handle = Handshake::new(DeviceHandle::from(file))
        .declare_capabilities()?
        .write_descriptor(&descriptor::build(identity, ranges))?
        .activate()?;

    debug!(
        "created device: {} vendor: {} product: {} version: {}",
        identity.name, identity.vendor, identity.product, identity.version
    );
    Ok(handle)
}
