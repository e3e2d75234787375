//! Chart module: candle geometry, layout and viewport handling.
//!
//! This module provides:
//! - `ChartWindow` - The single window slicing used by every consumer
//! - `PriceScale` / `AoScale` - Price and oscillator to pixel transforms
//! - `CandleCanvas` - Pixel-space model of one render pass
//! - `MountPoints` - Marker slots above and below a candle
//! - Trade locator and trade annotation geometry
//! - Viewport reducer and gesture trackers
//! - `Scene` - Draw commands for a rendering back end (egui with the `gui` feature)
//!
//! # Example
//!
//! ```ignore
//! use candle_canvas::chart::{build_scene, CandleCanvas, GestureController, GestureDelta};
//! use candle_canvas::trader::{ChartConfig, ChartSettings};
//!
//! let config = ChartConfig::default();
//! let settings = ChartSettings::default();
//! let mut viewport = GestureController::new(config.clone(), &settings);
//! viewport.wheel(GestureDelta::new(0.0, -40.0), history.len());
//!
//! let state = viewport.state();
//! let canvas = CandleCanvas::build(800.0, 500.0, state.shift, state.candles_shown, &history, None, &config)?;
//! let scene = build_scene(&canvas, &history, &settings, None);
//! ```

mod base;
mod cursor;
mod geometry;
mod layout;
mod locator;
mod mount;
#[cfg(feature = "gui")]
mod painter;
mod scene;
mod trade;
mod viewport;
mod window;

pub use base::*;
pub use cursor::{CursorReadout, Ohlc};
pub use geometry::{AoScale, MinMax, PriceScale};
pub use layout::{AlligatorLines, AlligatorPoints, AoBar, Candle2D, CandleCanvas, PriceLabel, TradePixels};
pub use locator::{find_trade_end, find_trade_leg, find_trade_start, max_trade_id, FoundCandle, TradeCarrier, TradeLeg};
pub use mount::{MarkerKind, MountPoints, MountSide, MountedMarker};
#[cfg(feature = "gui")]
pub use painter::ScenePainter;
pub use scene::{build_ao_scene, build_scene, cursor_scene, DrawCommand, Scene};
pub use trade::{trade_span, visible_trade_spans, TradeSpan};
pub use viewport::{
    focus_on_trade, focus_trade, on_history_changed, reset_for_deselect, scroll_zoom, DragPan, GestureController,
    GestureDelta, PinchZoom, ViewportState,
};
pub use window::ChartWindow;
