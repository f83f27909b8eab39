use std::{fs::File, io::Write, os::fd::AsRawFd};

use input_event::EventClass;
use nix::errno::Errno;

use crate::abi;

/// Requests a uinput node understands. Writes go through `io::Write`.
pub trait UinputControl: Write {
    /// `UI_SET_EVBIT`
    fn enable_class(&mut self, class: EventClass) -> nix::Result<()>;
    /// `UI_SET_KEYBIT` / `UI_SET_RELBIT` / `UI_SET_ABSBIT`, chosen by `class`.
    fn enable_code(&mut self, class: EventClass, code: u16) -> nix::Result<()>;
    /// `UI_DEV_CREATE`
    fn activate(&mut self) -> nix::Result<()>;
    /// `UI_DEV_DESTROY`
    fn deactivate(&mut self) -> nix::Result<()>;
}

impl UinputControl for File {
    fn enable_class(&mut self, class: EventClass) -> nix::Result<()> {
        // SAFETY: the descriptor is owned by `self`; the argument is passed by value.
        unsafe { abi::ui_set_evbit(self.as_raw_fd(), class.event_type().into()) }.map(drop)
    }

    fn enable_code(&mut self, class: EventClass, code: u16) -> nix::Result<()> {
        let fd = self.as_raw_fd();
        let code = code.into();
        // SAFETY: as above.
        let status = unsafe {
            match class {
                EventClass::Key => abi::ui_set_keybit(fd, code),
                EventClass::Relative => abi::ui_set_relbit(fd, code),
                EventClass::Absolute => abi::ui_set_absbit(fd, code),
                EventClass::Synchronization => return Err(Errno::EINVAL),
            }
        };
        status.map(drop)
    }

    fn activate(&mut self) -> nix::Result<()> {
        // SAFETY: parameterless request on an owned descriptor.
        unsafe { abi::ui_dev_create(self.as_raw_fd()) }.map(drop)
    }

    fn deactivate(&mut self) -> nix::Result<()> {
        // SAFETY: parameterless request on an owned descriptor.
        unsafe { abi::ui_dev_destroy(self.as_raw_fd()) }.map(drop)
    }
}
