//! Trader module - chart inputs and ambient services.
//!
//! - **constant**: Trade direction and indicator signal enums
//! - **object**: Candle, indicator and trade data supplied by the caller
//! - **setting**: Tuning constants and display toggles
//! - **logger**: Logging bootstrap

pub mod constant;
pub mod logger;
pub mod object;
pub mod setting;

// Re-exports for convenience
pub use constant::{FractalSignal, RevBarSignal, TradeType};
pub use logger::{init_logger, CRITICAL, DEBUG, ERROR, INFO, WARNING};
pub use object::{Alligator, AoValue, AssignedTrade, CandleData, Indicators};
pub use setting::{ChartConfig, ChartProfile, ChartSettings};
