//! Candle Canvas - candlestick chart geometry and viewport engine
//!
//! This crate turns a candle history into pixel-space geometry for an
//! interactive chart:
//!
//! - Price/pixel transforms with padding bands
//! - Candle layout with alligator lines, oscillator bars and marker slots
//! - Trade location and entry/exit annotations
//! - Pan/zoom viewport reducer driven by wheel, drag and pinch gestures
//! - Draw command scenes, with an egui back end (with `gui` feature)
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use candle_canvas::chart::{build_scene, CandleCanvas, ViewportState};
//! use candle_canvas::trader::{CandleData, ChartConfig, ChartSettings};
//!
//! fn render(history: &[CandleData]) -> candle_canvas::Result<()> {
//!     let config = ChartConfig::default();
//!     let state = ViewportState::initial(&config);
//!     let canvas = CandleCanvas::build(800.0, 500.0, state.shift, state.candles_shown, history, None, &config)?;
//!     let scene = build_scene(&canvas, history, &ChartSettings::default(), None);
//!     println!("{} draw commands", scene.len());
//!     Ok(())
//! }
//! ```

pub mod chart;
pub mod error;
pub mod trader;

// Re-export commonly used types
pub use chart::{CandleCanvas, CursorReadout, GestureController, GestureDelta, Scene, ViewportState};
pub use error::{ChartError, Result};
pub use trader::{
    // Constants
    FractalSignal, RevBarSignal, TradeType,
    // Data objects
    AssignedTrade, CandleData, Indicators,
    // Settings
    ChartConfig, ChartProfile, ChartSettings,
    // Logging
    init_logger,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
