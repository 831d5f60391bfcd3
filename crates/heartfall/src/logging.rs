//! Log output setup.
//!
//! The terminal is owned by the animation, so logs only go to a file.

use std::fs::OpenOptions;

use color_eyre::eyre::WrapErr;
use heartfall_config::LogConfig;

/// Route `log` records to the configured file. Does nothing without one.
pub fn init(config: &LogConfig) -> color_eyre::Result<()> {
    let Some(path) = &config.file else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .wrap_err_with(|| format!("Failed to open log file {}", path.display()))?;

    env_logger::Builder::new()
        .parse_filters(&config.level)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .wrap_err("Failed to install logger")?;
    Ok(())
}
