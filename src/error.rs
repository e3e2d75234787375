//! Error type shared by the chart and configuration modules.

use thiserror::Error;

/// Errors raised while building a chart model or handling its configuration.
#[derive(Debug, Error)]
pub enum ChartError {
    /// The candle history is shorter than the minimum number of candles a chart shows.
    #[error("not enough candles to draw: {available} available, {required} required")]
    NotEnoughCandles { available: usize, required: usize },

    /// The requested window contains no candles.
    #[error("viewport window is empty")]
    EmptyWindow,

    /// No per-user configuration directory exists on this platform.
    #[error("failed to get config directory")]
    ConfigDirUnavailable,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, ChartError>;
