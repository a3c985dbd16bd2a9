//! Tracing setup. The terminal UI owns stdout, so logs only go to a file.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::QuizError;

/// Install a subscriber writing to `log_file`, filtered by `RUST_LOG`
/// (default `info`). Without a file nothing is installed.
pub fn init(log_file: Option<&Path>) -> Result<(), QuizError> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .with_line_number(true)
        .try_init()
        .map_err(|err| QuizError::Logging(err.to_string()))
}
