use log::warn;
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, LevelFilter, SharedLogger, TermLogger,
    TerminalMode, WriteLogger,
};
use std::{fs::OpenOptions, path::Path};

use crate::gpa::GpaError;

/// Install the terminal logger, plus a file logger when `log_file` is set.
///
/// Only the first call installs anything; later calls leave the existing
/// logger in place.
pub fn init(level: LevelFilter, log_file: Option<&Path>) -> Result<(), GpaError> {
    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Error)
        .set_time_format_rfc3339()
        .build();

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        config.clone(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];

    if let Some(path) = log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        loggers.push(WriteLogger::new(level, config, file));
    }

    if CombinedLogger::init(loggers).is_err() {
        warn!("logger already initialized, keeping the existing one");
    }
    Ok(())
}
