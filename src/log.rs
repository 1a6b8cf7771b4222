// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! Log module sets up the log4rs backend behind the `log` facade, reference
//! https://docs.rs/log4rs
//!
//! Without the `log4rs` feature the macros still compile, they just go nowhere
//! until the application installs its own logger.

use log::LevelFilter;

#[cfg(feature = "log4rs")]
use log4rs::{
    append::file::FileAppender,
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
};

#[cfg(feature = "log4rs")]
const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {l} {t} {m}{n}";

/// init logs system, writing everything at `level` or above to `file_path`
#[allow(unused)]
pub fn init_log(level: LevelFilter, file_path: &str) {
    #[cfg(feature = "log4rs")]
    {
        let logfile = match FileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
            .build(file_path)
        {
            Ok(f) => f,
            Err(e) => {
                eprintln!("log file {} unavailable: {}", file_path, e);
                return;
            }
        };
        let config = Config::builder()
            .appender(
                Appender::builder()
                    .filter(Box::new(ThresholdFilter::new(level)))
                    .build("logfile", Box::new(logfile)),
            )
            .build(Root::builder().appender("logfile").build(level));
        match config {
            // a second init keeps the first logger
            Ok(config) => {
                let _ = log4rs::init_config(config);
            }
            Err(e) => eprintln!("log config rejected: {}", e),
        }
    }
}

/// Maps a config string ("info", "DEBUG", ...) onto a level, falling back to Info.
pub fn level_from_str(level: &str) -> LevelFilter {
    level.parse().unwrap_or(LevelFilter::Info)
}
