//! Cursor readout: price, date and OHLC under the pointer.

use chrono::{DateTime, Utc};

use crate::trader::{CandleData, ChartConfig};

use super::base::{format_price, Point};
use super::layout::CandleCanvas;

/// Prices of the hovered candle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ohlc {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// Labels shown next to the crosshair.
#[derive(Debug, Clone, PartialEq)]
pub struct CursorReadout {
    /// Cursor position in device pixels
    pub position: Point,
    pub price: Option<f64>,
    pub date: Option<DateTime<Utc>>,
    /// Only set when none of the four prices is missing
    pub ohlc: Option<Ohlc>,
}

impl CursorReadout {
    /// Readout for a cursor at `css` (CSS pixels relative to the chart's top
    /// left corner). Positions left of or above the chart clear the readout.
    ///
    /// `history` must be the history `canvas` was built from.
    pub fn at(canvas: &CandleCanvas, history: &[CandleData], css: Point, config: &ChartConfig) -> Option<Self> {
        if css.x < 0.0 || css.y < 0.0 || !css.is_finite() {
            return None;
        }
        let position = Point::new(css.x * config.scale_for_quality, css.y * config.scale_for_quality);
        let price = canvas.scale.displayed_price(position.y);

        let css_width = canvas.width / config.scale_for_quality;
        let candle = canvas
            .window
            .slot_at_fraction(css.x / css_width)
            .and_then(|slot| canvas.window.slice(history).get(slot));

        let date = candle.map(|candle| candle.open_time);
        let ohlc = candle.filter(|candle| !candle.has_missing_price()).map(|candle| Ohlc {
            open: candle.open,
            high: candle.high,
            low: candle.low,
            close: candle.close,
        });

        Some(Self { position, price, date, ohlc })
    }

    pub fn price_label(&self) -> Option<String> {
        self.price.map(|price| price.to_string())
    }

    pub fn date_label(&self) -> Option<String> {
        self.date.map(|date| date.format("%Y-%m-%d %H:%M").to_string())
    }

    /// `O:`, `C:`, `L:`, `H:` lines with two decimals
    pub fn ohlc_lines(&self) -> Vec<String> {
        match self.ohlc {
            Some(ohlc) => [("O", ohlc.open), ("C", ohlc.close), ("L", ohlc.low), ("H", ohlc.high)]
                .iter()
                .map(|(key, value)| format!("{key}: {}", format_price(*value, 2)))
                .collect(),
            None => Vec::new(),
        }
    }
}
