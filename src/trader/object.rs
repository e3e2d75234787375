//! Candle and trade data supplied by the caller.
//!
//! A price of exactly `0.0` is a sentinel for "no data" and is never drawn or
//! used for scaling.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::constant::{FractalSignal, RevBarSignal, TradeType};

/// Alligator lines (jaw, teeth, lips). A value of 0 means the line is absent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Alligator {
    pub jaw: f64,
    pub teeth: f64,
    pub lips: f64,
}

/// Awesome Oscillator bar value and the vertex it is compared against.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AoValue {
    pub value: f64,
    pub vertex_value: f64,
}

/// Precomputed indicators attached to one candle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Indicators {
    #[serde(rename = "revBar")]
    pub rev_bar: RevBarSignal,
    pub fractal: FractalSignal,
    pub alligator: Alligator,
    pub ao: AoValue,
}

/// One leg of a trade anchored to a candle.
///
/// `buy_price` is the price at the start leg and `sell_price` the price at the
/// end leg, whatever the direction of the trade.
///
/// A trade spanning several candles has exactly one entry with
/// `is_this_candle_start` and one with `is_this_candle_end`; a trade inside a
/// single candle has both flags set on the same entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedTrade {
    #[serde(rename = "tradeID")]
    pub trade_id: u64,
    pub trade_type: TradeType,
    pub buy_price: f64,
    pub sell_price: f64,
    pub profit: f64,
    pub is_this_candle_start: bool,
    pub is_this_candle_end: bool,
}

impl AssignedTrade {
    /// Whether the trade closed in profit.
    ///
    /// `buy_price` is always the price of the start leg and `sell_price` the
    /// price of the end leg, so a long profits when the exit is higher and a
    /// short when the exit is lower.
    pub fn is_profitable(&self) -> bool {
        match self.trade_type {
            TradeType::Long => self.sell_price > self.buy_price,
            TradeType::Short => self.sell_price < self.buy_price,
        }
    }
}

/// One OHLC candle of the chart history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandleData {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub open_time: DateTime<Utc>,
    pub close_time: DateTime<Utc>,
    #[serde(default)]
    pub indicators: Indicators,
    #[serde(default)]
    pub trades: Vec<AssignedTrade>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset: Option<String>,
}

impl CandleData {
    /// Create a new candle with empty indicators and no trades
    pub fn new(
        open_time: DateTime<Utc>,
        close_time: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
    ) -> Self {
        Self {
            open,
            high,
            low,
            close,
            open_time,
            close_time,
            indicators: Indicators::default(),
            trades: Vec::new(),
            asset: None,
        }
    }

    pub fn with_indicators(mut self, indicators: Indicators) -> Self {
        self.indicators = indicators;
        self
    }

    pub fn with_trade(mut self, trade: AssignedTrade) -> Self {
        self.trades.push(trade);
        self
    }

    /// True if any of open/high/low/close carries the "no data" sentinel.
    pub fn has_missing_price(&self) -> bool {
        self.open == 0.0 || self.high == 0.0 || self.low == 0.0 || self.close == 0.0
    }
}
