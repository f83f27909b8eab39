pub mod error;
pub mod evdev;
