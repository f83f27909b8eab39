use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use codes::{ABS_MAX, EV_ABS, EV_KEY, EV_REL, EV_SYN, KEY_MAX, REL_MAX, SYN_REPORT};
use mapper::error::EventMappingError;

pub mod codes;
pub mod mapper;

/// One `{type, code, value}` triple, exactly as it is handed to the kernel.
///
/// Missing fields deserialize to zero, so `{"type": 0}` is a `SYN_REPORT`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct InputEvent {
    #[serde(rename = "type")]
    pub event_type: u16,
    pub code: u16,
    pub value: i32,
}

impl InputEvent {
    pub const fn new(event_type: u16, code: u16, value: i32) -> Self {
        InputEvent {
            event_type,
            code,
            value,
        }
    }

    /// `(EV_SYN, SYN_REPORT, 0)`, the marker that commits an input frame.
    pub const fn sync_report() -> Self {
        Self::new(EV_SYN, SYN_REPORT, 0)
    }
}

impl fmt::Display for InputEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "type: {} code: {} value: {}",
            self.event_type, self.code, self.value
        )
    }
}

/// Event classes a virtual device declares, in declaration order.
#[derive(Debug, EnumIter, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum EventClass {
    #[strum(to_string = "EV_KEY")]
    Key,
    #[strum(to_string = "EV_REL")]
    Relative,
    #[strum(to_string = "EV_ABS")]
    Absolute,
    #[strum(to_string = "EV_SYN")]
    Synchronization,
}

impl EventClass {
    pub const fn event_type(self) -> u16 {
        match self {
            EventClass::Key => EV_KEY,
            EventClass::Relative => EV_REL,
            EventClass::Absolute => EV_ABS,
            EventClass::Synchronization => EV_SYN,
        }
    }

    /// Exclusive upper bound of the per-code bits declared for this class.
    /// `None` for classes that carry no per-code bits.
    pub const fn code_limit(self) -> Option<u16> {
        match self {
            EventClass::Key => Some(KEY_MAX),
            EventClass::Relative => Some(REL_MAX),
            EventClass::Absolute => Some(ABS_MAX),
            EventClass::Synchronization => None,
        }
    }
}

impl TryFrom<u16> for EventClass {
    type Error = EventMappingError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            EV_KEY => Ok(EventClass::Key),
            EV_REL => Ok(EventClass::Relative),
            EV_ABS => Ok(EventClass::Absolute),
            EV_SYN => Ok(EventClass::Synchronization),
            other => Err(EventMappingError::UnknownEventClass(other)),
        }
    }
}
