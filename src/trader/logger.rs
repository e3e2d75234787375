//! Logging bootstrap for applications embedding the chart.

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log level constants (compatible with Python logging module)
pub const DEBUG: i32 = 10;
pub const INFO: i32 = 20;
pub const WARNING: i32 = 30;
pub const ERROR: i32 = 40;
pub const CRITICAL: i32 = 50;

/// Convert integer log level to tracing Level
pub fn level_from_int(level: i32) -> Level {
    match level {
        i32::MIN..=0 => Level::TRACE,
        1..=10 => Level::DEBUG,
        11..=20 => Level::INFO,
        21..=30 => Level::WARN,
        _ => Level::ERROR,
    }
}

/// Convert integer log level to string
pub fn level_to_string(level: i32) -> &'static str {
    match level {
        i32::MIN..=0 => "TRACE",
        1..=10 => "DEBUG",
        11..=20 => "INFO",
        21..=30 => "WARNING",
        31..=40 => "ERROR",
        _ => "CRITICAL",
    }
}

/// Install a console subscriber. `RUST_LOG` directives are honoured on top of
/// `level`. Returns false if a global subscriber was already set.
pub fn init_logger(level: i32) -> bool {
    let filter = EnvFilter::from_default_env().add_directive(level_from_int(level).into());

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_ansi(true);

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .is_ok();
    if installed {
        tracing::debug!(level = level_to_string(level), "logger initialised");
    }
    installed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_int() {
        assert_eq!(level_from_int(0), Level::TRACE);
        assert_eq!(level_from_int(DEBUG), Level::DEBUG);
        assert_eq!(level_from_int(INFO), Level::INFO);
        assert_eq!(level_from_int(WARNING), Level::WARN);
        assert_eq!(level_from_int(ERROR), Level::ERROR);
    }

    #[test]
    fn test_level_to_string() {
        assert_eq!(level_to_string(DEBUG), "DEBUG");
        assert_eq!(level_to_string(INFO), "INFO");
        assert_eq!(level_to_string(WARNING), "WARNING");
        assert_eq!(level_to_string(ERROR), "ERROR");
        assert_eq!(level_to_string(CRITICAL), "CRITICAL");
    }

    #[test]
    fn test_init_logger_twice() {
        init_logger(INFO);
        assert!(!init_logger(DEBUG));
    }
}
