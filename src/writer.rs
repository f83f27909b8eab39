use std::{
    error::Error as _,
    future::Future,
    io::{self, BufRead},
    thread,
};

use input_event::InputEvent;
use log::{debug, info, warn};
use thiserror::Error;
use tokio::sync::mpsc;
use uinput_device::{UinputError, VirtualDevice};

const LINE_BUFFER: usize = 64;

#[derive(Debug, Error)]
pub enum WriterError {
    #[error("Malformed input event message")]
    Json(#[from] serde_json::Error),
    #[error("Error writing input message")]
    Device(#[from] UinputError),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReplayStats {
    pub written: usize,
    pub failed: usize,
}

/// Parses one `{"type", "code", "value"}` message and writes it as one event.
pub fn handle_message<D: VirtualDevice + ?Sized>(
    device: &mut D,
    message: &str,
) -> Result<InputEvent, WriterError> {
    let event: InputEvent = serde_json::from_str(message)?;
    debug!("Writing input message to uinput device: {event}");
    device.emit(event)?;
    Ok(event)
}

/// Reads `input` line by line on a detached thread.
///
/// A blocking read cannot be cancelled, so it must not live on the runtime's
/// blocking pool: shutting the runtime down would wait for the next line.
/// The thread ends at EOF, on a read error or once the receiver is dropped.
pub fn spawn_line_reader<R>(input: R) -> mpsc::Receiver<io::Result<String>>
where
    R: BufRead + Send + 'static,
{
    let (sender, receiver) = mpsc::channel(LINE_BUFFER);
    thread::spawn(move || {
        for line in input.lines() {
            let failed = line.is_err();
            if sender.blocking_send(line).is_err() || failed {
                break;
            }
        }
    });
    receiver
}

/// Writes every received line to `device` until the reader closes or
/// `shutdown` resolves. Bad lines and failed writes are logged and skipped.
pub async fn replay<D>(
    mut lines: mpsc::Receiver<io::Result<String>>,
    device: &mut D,
    shutdown: impl Future<Output = ()>,
) -> io::Result<ReplayStats>
where
    D: VirtualDevice + ?Sized,
{
    let mut stats = ReplayStats::default();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            line = lines.recv() => {
                let Some(line) = line else {
                    debug!("Input stream closed");
                    break;
                };
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }
                match handle_message(device, &line) {
                    Ok(_) => stats.written += 1,
                    Err(err) => {
                        let cause = err.source().map(ToString::to_string).unwrap_or_default();
                        warn!("Skipping input message {line:?}: {err}: {cause}");
                        stats.failed += 1;
                    }
                }
            },
            _ = &mut shutdown => {
                info!("Shutdown requested");
                break;
            },
        }
    }

    Ok(stats)
}

#[cfg(test)]
mod test {
    use std::{
        io::{BufReader, Cursor, Read},
        sync::mpsc as std_mpsc,
    };

    use input_event::codes::{BTN_A, EV_KEY};

    use super::*;

    fn lines_of(input: &'static str) -> mpsc::Receiver<io::Result<String>> {
        spawn_line_reader(Cursor::new(input))
    }

    /// Blocks in `read` until the paired sender is dropped, like an idle terminal.
    struct IdleInput(std_mpsc::Receiver<()>);

    impl Read for IdleInput {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            let _ = self.0.recv();
            Ok(0)
        }
    }

    #[derive(Default)]
    struct Recording {
        events: Vec<InputEvent>,
        reject: Option<InputEvent>,
    }

    impl VirtualDevice for Recording {
        fn emit(&mut self, event: InputEvent) -> Result<(), UinputError> {
            if self.reject == Some(event) {
                return Err(UinputError::ShortEventWrite {
                    written: 0,
                    expected: 24,
                });
            }
            self.events.push(event);
            Ok(())
        }
    }

    #[test]
    fn message_fields_default_to_zero() {
        let mut device = Recording::default();

        let event = handle_message(&mut device, r#"{"type": 1, "code": 304}"#).unwrap();

        assert_eq!(event, InputEvent::new(EV_KEY, BTN_A, 0));
        assert_eq!(device.events, vec![event]);
    }

    #[test]
    fn malformed_message_is_not_written() {
        let mut device = Recording::default();

        assert!(matches!(
            handle_message(&mut device, "not json"),
            Err(WriterError::Json(_))
        ));
        assert!(device.events.is_empty());
    }

    #[tokio::test]
    async fn replay_writes_lines_in_order_and_skips_bad_ones() {
        let input = concat!(
            "{\"type\": 1, \"code\": 304, \"value\": 1}\n",
            "\n",
            "{\"type\": 0}\n",
            "garbage\n",
            "{\"type\": 1, \"code\": 304, \"value\": 0}\n",
        );
        let mut device = Recording::default();

        let stats = replay(
            lines_of(input),
            &mut device,
            std::future::pending(),
        )
        .await
        .unwrap();

        assert_eq!(stats, ReplayStats { written: 3, failed: 1 });
        assert_eq!(
            device.events,
            vec![
                InputEvent::new(EV_KEY, BTN_A, 1),
                InputEvent::sync_report(),
                InputEvent::new(EV_KEY, BTN_A, 0),
            ]
        );
    }

    #[tokio::test]
    async fn replay_continues_after_a_failed_write() {
        let input = "{\"type\": 1, \"code\": 1}\n{\"type\": 1, \"code\": 2}\n";
        let mut device = Recording {
            reject: Some(InputEvent::new(EV_KEY, 1, 0)),
            ..Default::default()
        };

        let stats = replay(
            lines_of(input),
            &mut device,
            std::future::pending(),
        )
        .await
        .unwrap();

        assert_eq!(stats, ReplayStats { written: 1, failed: 1 });
        assert_eq!(device.events, vec![InputEvent::new(EV_KEY, 2, 0)]);
    }

    #[tokio::test]
    async fn replay_stops_on_shutdown_while_the_reader_is_open() {
        let (_sender, lines) = mpsc::channel(1);
        let mut device = Recording::default();

        let stats = replay(lines, &mut device, async {}).await.unwrap();

        assert_eq!(stats, ReplayStats::default());
    }

    #[tokio::test]
    async fn read_error_ends_the_replay() {
        let (sender, lines) = mpsc::channel(2);
        sender
            .send(Ok("{\"type\": 1, \"code\": 304, \"value\": 1}".to_string()))
            .await
            .unwrap();
        sender
            .send(Err(io::ErrorKind::InvalidData.into()))
            .await
            .unwrap();
        let mut device = Recording::default();

        let result = replay(lines, &mut device, std::future::pending()).await;

        assert!(matches!(result, Err(err) if err.kind() == io::ErrorKind::InvalidData));
        assert_eq!(device.events.len(), 1);
    }

    #[test]
    fn runtime_shuts_down_while_input_blocks() {
        let (idle, input) = std_mpsc::channel::<()>();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let mut device = Recording::default();

        let stats = runtime
            .block_on(async {
                let lines = spawn_line_reader(BufReader::new(IdleInput(input)));
                replay(lines, &mut device, async {}).await
            })
            .unwrap();
        // returns even though the reader thread is still parked in `read`
        drop(runtime);

        assert_eq!(stats, ReplayStats::default());
        drop(idle);
    }
}
