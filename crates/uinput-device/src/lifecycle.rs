use std::os::fd::IntoRawFd;

use log::{debug, error};
use nix::{errno::Errno, unistd::close};
use thiserror::Error;

use crate::{control::UinputControl, handle::DeviceHandle, UinputError};

/// `UI_DEV_DESTROY` was rejected. The handle was not closed; it is handed back
/// so the caller decides whether to retry or drop it.
#[derive(Debug, Error)]
#[error("Error on ioctl UI_DEV_DESTROY")]
pub struct DeactivateError {
    #[source]
    source: Errno,
    handle: DeviceHandle,
}

impl DeactivateError {
    pub fn errno(&self) -> Errno {
        self.source
    }

    pub fn into_handle(self) -> DeviceHandle {
        self.handle
    }
}

/// Deactivates the device, then closes its descriptor. Both steps must
/// succeed; the handle is consumed either way.
pub fn destroy_device(mut handle: DeviceHandle) -> Result<(), UinputError> {
    if let Err(source) = handle.deactivate() {
        error!("error on ioctl UI_DEV_DESTROY: {source}");
        return Err(DeactivateError { source, handle }.into());
    }

    close(handle.into_raw_fd()).map_err(|source| {
        error!("error closing uinput device: {source}");
        UinputError::Close(source)
    })?;

    debug!("destroyed device");
    Ok(())
}

#[cfg(test)]
mod test {
    use std::{fs::OpenOptions, os::fd::AsRawFd};

    use super::*;

    #[test]
    fn handle_that_was_never_activated_fails_to_destroy() {
        let null = OpenOptions::new().write(true).open("/dev/null").unwrap();
        let handle = DeviceHandle::from(null);
        let fd = handle.as_raw_fd();

        let err = match destroy_device(handle) {
            Err(UinputError::Deactivate(err)) => err,
            other => panic!("expected a deactivation failure, got {other:?}"),
        };
        assert_eq!(err.errno(), Errno::ENOTTY);
        // not closed: the same descriptor comes back
        assert_eq!(err.into_handle().as_raw_fd(), fd);
    }
}
