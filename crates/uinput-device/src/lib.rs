use std::{io, path::PathBuf};

use input_event::{EventClass, InputEvent};
use nix::errno::Errno;
use thiserror::Error;

pub mod abi;
pub mod control;
pub mod descriptor;
pub mod device;
pub mod event;
pub mod handle;
pub mod lifecycle;
mod virtual_device;

pub use descriptor::{AxisRanges, DeviceIdentity};
pub use device::create_device;
pub use event::write_event;
pub use handle::DeviceHandle;
pub use lifecycle::{destroy_device, DeactivateError};
pub use virtual_device::UinputDevice;

pub const DEFAULT_UINPUT_PATH: &str = "/dev/uinput";

#[derive(Debug, Error)]
pub enum UinputError {
    #[error("Cannot open uinput node {path}")]
    Open {
        path: PathBuf,
        source: io::Error,
    },
    #[error("No write access to uinput node {path}")]
    NodeNotWritable { path: PathBuf, source: Errno },
    #[error("Error activating {class} type")]
    EventClass { class: EventClass, source: Errno },
    #[error("Error activating {class} code {code}")]
    EventCode {
        class: EventClass,
        code: u16,
        source: Errno,
    },
    #[error("Error writing uinput_user_dev")]
    DescriptorWrite(#[source] io::Error),
    #[error("Short write of uinput_user_dev: {written} of {expected} bytes")]
    ShortDescriptorWrite { written: usize, expected: usize },
    #[error("Error on ioctl UI_DEV_CREATE")]
    Activate(#[source] Errno),
    #[error("Error writing input event")]
    EventWrite(#[source] io::Error),
    #[error("Short write of input event: {written} of {expected} bytes")]
    ShortEventWrite { written: usize, expected: usize },
    #[error(transparent)]
    Deactivate(#[from] DeactivateError),
    #[error("Error closing uinput device")]
    Close(#[source] Errno),
    #[error("Axis {table} table has {actual} entries, expected {expected}")]
    AxisTableLength {
        table: &'static str,
        actual: usize,
        expected: usize,
    },
    #[error("Axis code {0} is out of range")]
    AxisOutOfRange(u16),
    #[error("Tried to use an uninitialized uinput device")]
    NotReady,
}

pub trait VirtualDevice {
    fn emit(&mut self, event: InputEvent) -> Result<(), UinputError>;

    /// Commits the events emitted so far as one input frame.
    fn synchronize(&mut self) -> Result<(), UinputError> {
        self.emit(InputEvent::sync_report())
    }
}
