//! Kernel ABI of the legacy uinput protocol (`linux/uinput.h`, `linux/input.h`).
//!
//! Every byte that is written to a uinput node is produced in this module:
//! the `uinput_user_dev` descriptor, the `input_event` record and the ioctl
//! request numbers. Layouts are `#[repr(C)]` mirrors of the kernel headers and
//! their sizes are checked at compile time.

use std::{mem, slice};

use input_event::{codes::ABS_CNT, InputEvent};
use nix::{ioctl_none, ioctl_write_int};

pub const UINPUT_MAX_NAME_SIZE: usize = 80;
pub const UINPUT_IOCTL_BASE: u8 = b'U';

ioctl_none!(ui_dev_create, UINPUT_IOCTL_BASE, 1);
ioctl_none!(ui_dev_destroy, UINPUT_IOCTL_BASE, 2);
ioctl_write_int!(ui_set_evbit, UINPUT_IOCTL_BASE, 100);
ioctl_write_int!(ui_set_keybit, UINPUT_IOCTL_BASE, 101);
ioctl_write_int!(ui_set_relbit, UINPUT_IOCTL_BASE, 102);
ioctl_write_int!(ui_set_absbit, UINPUT_IOCTL_BASE, 103);

/// `struct input_id`
#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InputId {
    pub bustype: u16,
    pub vendor: u16,
    pub product: u16,
    pub version: u16,
}

/// `struct uinput_user_dev`
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UinputUserDev {
    pub name: [u8; UINPUT_MAX_NAME_SIZE],
    pub id: InputId,
    pub ff_effects_max: u32,
    pub absmax: [i32; ABS_CNT],
    pub absmin: [i32; ABS_CNT],
    pub absfuzz: [i32; ABS_CNT],
    pub absflat: [i32; ABS_CNT],
}

/// `struct input_event`. The timestamp is left zero, uinput ignores it.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct RawInputEvent {
    pub time: libc::timeval,
    pub type_: u16,
    pub code: u16,
    pub value: i32,
}

const _: () = assert!(mem::size_of::<InputId>() == 8);
const _: () = assert!(
    mem::size_of::<UinputUserDev>() == UINPUT_MAX_NAME_SIZE + 8 + 4 + 4 * 4 * ABS_CNT
);
const _: () = assert!(mem::size_of::<RawInputEvent>() == mem::size_of::<libc::timeval>() + 8);

/// Marker for the plain-integer structs above.
///
/// # Safety
/// Implementors must be `#[repr(C)]`, contain only integers (or arrays of
/// them) and have no padding bytes.
unsafe trait Plain: Sized {
    fn zeroed() -> Self {
        // SAFETY: all-zero is a valid bit pattern for integer-only structs.
        unsafe { mem::zeroed() }
    }

    fn bytes(&self) -> &[u8] {
        // SAFETY: no padding, so every byte of `Self` is initialized.
        unsafe { slice::from_raw_parts((self as *const Self).cast::<u8>(), mem::size_of::<Self>()) }
    }
}

// SAFETY: sizes are asserted above to equal the sum of their fields.
unsafe impl Plain for UinputUserDev {}
// SAFETY: `timeval` is two integers; total size asserted above.
unsafe impl Plain for RawInputEvent {}

impl UinputUserDev {
    /// Zero-initialized descriptor, so no stale memory reaches the kernel.
    pub fn zeroed() -> Self {
        <Self as Plain>::zeroed()
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.bytes()
    }

    /// Name up to the first NUL byte.
    pub fn name(&self) -> &[u8] {
        let end = self
            .name
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(UINPUT_MAX_NAME_SIZE);
        &self.name[..end]
    }
}

impl RawInputEvent {
    pub fn new(event: InputEvent) -> Self {
        let mut raw = <Self as Plain>::zeroed();
        raw.type_ = event.event_type;
        raw.code = event.code;
        raw.value = event.value;
        raw
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.bytes()
    }
}

/// Encodes `name` into the fixed kernel name buffer.
///
/// Input is cut at an embedded NUL and truncated to `UINPUT_MAX_NAME_SIZE - 1`
/// bytes on a character boundary; the buffer always ends in a NUL.
pub fn encode_name(name: &str) -> [u8; UINPUT_MAX_NAME_SIZE] {
    let name = name.split('\0').next().unwrap_or_default();
    let mut end = name.len().min(UINPUT_MAX_NAME_SIZE - 1);
    while !name.is_char_boundary(end) {
        end -= 1;
    }

    let mut buf = [0u8; UINPUT_MAX_NAME_SIZE];
    buf[..end].copy_from_slice(&name.as_bytes()[..end]);
    buf
}
