//! Event type and code numbers from `linux/input-event-codes.h`.
//!
//! Only the values this workspace needs are listed; anything else can be
//! passed through as a plain number.

pub const EV_SYN: u16 = 0x00;
pub const EV_KEY: u16 = 0x01;
pub const EV_REL: u16 = 0x02;
pub const EV_ABS: u16 = 0x03;

pub const SYN_REPORT: u16 = 0;

pub const BTN_A: u16 = 0x130;
pub const KEY_MAX: u16 = 0x2ff;

pub const REL_MAX: u16 = 0x0f;

pub const ABS_X: u16 = 0x00;
pub const ABS_MAX: u16 = 0x3f;
pub const ABS_CNT: usize = ABS_MAX as usize + 1;

pub const BUS_USB: u16 = 0x03;
