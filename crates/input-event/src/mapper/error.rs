use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EventMappingError {
    #[error("Event type {0} is not a declared event class")]
    UnknownEventClass(u16),
}
