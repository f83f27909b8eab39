use std::{process, thread};

use chrono::Local;
use fern::Dispatch;
use log::LevelFilter;

use crate::config::LoggingConfig;

/// Installs the global logger. Records go to stderr, since stdin and stdout
/// belong to the event stream, and to the configured file if any.
pub fn setup(config: &LoggingConfig) -> Result<(), fern::InitError> {
    let mut dispatch = Dispatch::new()
        .format(|out, msg, record| {
            out.finish(format_args!(
                "[{}][{:5}][{}][pid={}][tid={:?}] {}",
                Local::now().to_rfc3339(),
                record.level(),
                record.target(),
                process::id(),
                thread::current().id(),
                msg
            ))
        })
        .level(level(&config.level))
        .chain(std::io::stderr());

    if let Some(path) = &config.file {
        dispatch = dispatch.chain(fern::log_file(path)?);
    }

    dispatch.apply()?;
    Ok(())
}

fn level(name: &str) -> LevelFilter {
    match name.to_uppercase().as_str() {
        "OFF" => LevelFilter::Off,
        "ERROR" => LevelFilter::Error,
        "WARN" => LevelFilter::Warn,
        "DEBUG" => LevelFilter::Debug,
        "TRACE" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn level_names_are_case_insensitive() {
        assert_eq!(level("debug"), LevelFilter::Debug);
        assert_eq!(level("Warn"), LevelFilter::Warn);
        assert_eq!(level("off"), LevelFilter::Off);
    }

    #[test]
    fn unknown_level_falls_back_to_info() {
        assert_eq!(level("verbose"), LevelFilter::Info);
    }
}
