use std::io::Write;

use input_event::InputEvent;
use log::debug;

use crate::{abi::RawInputEvent, UinputError};

/// Writes one `input_event` record in a single write call.
///
/// Events are written exactly as given; nothing is batched and no `SYN_REPORT`
/// is added. A short write fails only this event and is not retried.
pub fn write_event<W: Write + ?Sized>(handle: &mut W, event: InputEvent) -> Result<(), UinputError> {
    let raw = RawInputEvent::new(event);
    let bytes = raw.as_bytes();

    let written = handle.write(bytes).map_err(UinputError::EventWrite)?;
    if written != bytes.len() {
        return Err(UinputError::ShortEventWrite {
            written,
            expected: bytes.len(),
        });
    }

    debug!("wrote {written} bytes. {event}");
    Ok(())
}
