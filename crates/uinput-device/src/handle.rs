use std::{
    fs::File,
    io::{self, Write},
    os::fd::{AsFd, AsRawFd, BorrowedFd, FromRawFd, IntoRawFd, OwnedFd, RawFd},
};

use input_event::EventClass;

use crate::control::UinputControl;

/// Owned descriptor of a live uinput device.
///
/// Creation hands ownership to the caller and [`crate::destroy_device`]
/// consumes it. The raw descriptor number is available through `AsRawFd`
/// for callers that need an integer token; dropping the handle closes the
/// descriptor, which makes the kernel remove the device.
#[derive(Debug)]
pub struct DeviceHandle {
    file: File,
}

impl From<File> for DeviceHandle {
    fn from(file: File) -> Self {
        DeviceHandle { file }
    }
}

impl From<OwnedFd> for DeviceHandle {
    fn from(fd: OwnedFd) -> Self {
        DeviceHandle { file: fd.into() }
    }
}

impl From<DeviceHandle> for OwnedFd {
    fn from(handle: DeviceHandle) -> Self {
        handle.file.into()
    }
}

impl AsFd for DeviceHandle {
    fn as_fd(&self) -> BorrowedFd<'_> {
        self.file.as_fd()
    }
}

impl AsRawFd for DeviceHandle {
    fn as_raw_fd(&self) -> RawFd {
        self.file.as_raw_fd()
    }
}

impl IntoRawFd for DeviceHandle {
    fn into_raw_fd(self) -> RawFd {
        self.file.into_raw_fd()
    }
}

impl FromRawFd for DeviceHandle {
    unsafe fn from_raw_fd(fd: RawFd) -> Self {
        DeviceHandle {
            // SAFETY: forwarded to the caller.
            file: unsafe { File::from_raw_fd(fd) },
        }
    }
}

impl Write for DeviceHandle {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

impl UinputControl for DeviceHandle {
    fn enable_class(&mut self, class: EventClass) -> nix::Result<()> {
        self.file.enable_class(class)
    }

    fn enable_code(&mut self, class: EventClass, code: u16) -> nix::Result<()> {
        self.file.enable_code(class, code)
    }

    fn activate(&mut self) -> nix::Result<()> {
        self.file.activate()
    }

    fn deactivate(&mut self) -> nix::Result<()> {
        self.file.deactivate()
    }
}
