//! Trade annotations: entry to exit arrow and profit/loss shading.
//!
//! Legs are located over the full history so that a trade keeps its identity
//! while the window moves; slots are then made relative to the window and may
//! fall outside it.

use tracing::trace;

use crate::trader::{AssignedTrade, CandleData, ChartSettings, TradeType};

use super::base::{Point, Rect};
use super::layout::CandleCanvas;
use super::locator::{find_trade_end, find_trade_start, max_trade_id};

/// Pixel geometry of one trade.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TradeSpan {
    pub trade_id: u64,
    pub trade_type: TradeType,
    /// Window slot of the start leg; negative or past the window when hidden
    pub start_slot: i64,
    pub end_slot: i64,
    /// Entry point at the buy price
    pub start: Point,
    /// Exit point at the sell price
    pub end: Point,
    pub profitable: bool,
    /// Shading behind the arrow; absent when the trade sits in one candle
    pub shading: Option<Rect>,
    pub corner_radius: f64,
}

impl TradeSpan {
    pub fn is_single_candle(&self) -> bool {
        self.shading.is_none()
    }
}

/// Geometry of trade `trade_id`, or `None` when it cannot be resolved or lies
/// entirely on one side outside the window.
///
/// `history` must be the history `canvas` was built from.
pub fn trade_span(history: &[CandleData], canvas: &CandleCanvas, trade_id: u64) -> Option<TradeSpan> {
    let start = find_trade_start(history, trade_id)?;
    let end = find_trade_end(history, trade_id)?;

    let window = &canvas.window;
    let start_slot = window.slot_of(start.index);
    let end_slot = window.slot_of(end.index);
    let len = window.len() as i64;
    if (start_slot < 0 && end_slot < 0) || (start_slot >= len && end_slot >= len) {
        trace!(trade_id, start_slot, end_slot, "trade outside window");
        return None;
    }

    let start_leg = &start.candle.trades[start.inner_index];
    let end_leg = &end.candle.trades[end.inner_index];
    let settled = AssignedTrade {
        buy_price: start_leg.buy_price,
        sell_price: end_leg.sell_price,
        ..*end_leg
    };

    let scale = &canvas.scale;
    let start_point = Point::new(
        scale.slot_center_x(start_slot),
        scale.checked_pixel_of_price(settled.buy_price)?,
    );
    let end_point = Point::new(
        scale.slot_center_x(end_slot),
        scale.checked_pixel_of_price(settled.sell_price)?,
    );

    let shading = (start.index != end.index).then(|| Rect::from_corners(start_point, end_point));

    Some(TradeSpan {
        trade_id,
        trade_type: settled.trade_type,
        start_slot,
        end_slot,
        start: start_point,
        end: end_point,
        profitable: settled.is_profitable(),
        shading,
        corner_radius: canvas.width / 150.0,
    })
}

/// Trades to annotate for the current settings.
///
/// With `all_trades_shown` every id up to the highest one in history (or the
/// selected id, if higher) is tried; otherwise only the selected trade.
pub fn visible_trade_spans(
    history: &[CandleData],
    canvas: &CandleCanvas,
    settings: &ChartSettings,
    selected: Option<u64>,
) -> Vec<TradeSpan> {
    if settings.all_trades_shown {
        let max = max_trade_id(history).max(selected);
        return match max {
            Some(max) => (0..=max).filter_map(|id| trade_span(history, canvas, id)).collect(),
            None => Vec::new(),
        };
    }
    selected
        .and_then(|id| trade_span(history, canvas, id))
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trader::ChartConfig;
    use chrono::{Duration, TimeZone, Utc};

    fn history(n: usize) -> Vec<CandleData> {
        let t = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        (0..n)
            .map(|i| {
                let base = 100.0 + (i % 5) as f64;
                CandleData::new(
                    t + Duration::minutes(i as i64),
                    t + Duration::minutes(i as i64 + 1),
                    base,
                    base + 3.0,
                    base - 3.0,
                    base + 1.0,
                )
            })
            .collect()
    }

    fn leg(trade_id: u64, trade_type: TradeType, buy: f64, sell: f64, start: bool, end: bool) -> AssignedTrade {
        AssignedTrade {
            trade_id,
            trade_type,
            buy_price: buy,
            sell_price: sell,
            profit: 0.0,
            is_this_candle_start: start,
            is_this_candle_end: end,
        }
    }

    fn add_trade(history: &mut [CandleData], id: u64, trade_type: TradeType, from: usize, to: usize, buy: f64, sell: f64) {
        if from == to {
            history[from].trades.push(leg(id, trade_type, buy, sell, true, true));
        } else {
            history[from].trades.push(leg(id, trade_type, buy, sell, true, false));
            history[to].trades.push(leg(id, trade_type, buy, sell, false, true));
        }
    }

    fn canvas(history: &[CandleData], shift: usize, shown: usize) -> CandleCanvas {
        CandleCanvas::build(500.0, 300.0, shift, shown, history, None, &ChartConfig::default()).unwrap()
    }

    #[test]
    fn test_span_inside_window() {
        let mut history = history(100);
        add_trade(&mut history, 2, TradeType::Long, 75, 80, 101.0, 103.0);
        let canvas = canvas(&history, 0, 30);

        let span = trade_span(&history, &canvas, 2).unwrap();
        assert_eq!((span.start_slot, span.end_slot), (5, 10));
        assert!(span.profitable);
        assert!(span.start.y > span.end.y);
        let shading = span.shading.unwrap();
        assert_eq!(shading.x, span.start.x);
        assert!((shading.width - (span.end.x - span.start.x)).abs() < 1e-9);
        assert!((span.corner_radius - 1000.0 / 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_span_partially_visible() {
        let mut history = history(100);
        add_trade(&mut history, 1, TradeType::Short, 60, 75, 104.0, 102.0);
        let canvas = canvas(&history, 0, 30);

        let span = trade_span(&history, &canvas, 1).unwrap();
        assert_eq!(span.start_slot, -10);
        assert!(span.start.x < 0.0);
        assert!(span.profitable);
    }

    #[test]
    fn test_span_hidden() {
        let mut history = history(100);
        add_trade(&mut history, 1, TradeType::Long, 10, 20, 101.0, 102.0);
        add_trade(&mut history, 2, TradeType::Long, 95, 98, 101.0, 102.0);
        let canvas = canvas(&history, 10, 30);
        assert!(trade_span(&history, &canvas, 1).is_none());
        assert!(trade_span(&history, &canvas, 2).is_none());
        assert!(trade_span(&history, &canvas, 3).is_none());
    }

    #[test]
    fn test_single_candle_trade_has_no_shading() {
        let mut history = history(100);
        add_trade(&mut history, 4, TradeType::Long, 90, 90, 103.0, 101.0);
        let canvas = canvas(&history, 0, 30);

        let span = trade_span(&history, &canvas, 4).unwrap();
        assert!(span.is_single_candle());
        assert_eq!(span.start.x, span.end.x);
        assert!(!span.profitable);
    }

    #[test]
    fn test_visible_trade_spans() {
        let mut history = history(100);
        add_trade(&mut history, 0, TradeType::Long, 72, 74, 101.0, 102.0);
        add_trade(&mut history, 1, TradeType::Long, 5, 8, 101.0, 102.0);
        add_trade(&mut history, 3, TradeType::Short, 85, 95, 104.0, 101.0);
        let canvas = canvas(&history, 0, 30);

        let mut settings = ChartSettings::default();
        assert!(visible_trade_spans(&history, &canvas, &settings, None).is_empty());
        let selected = visible_trade_spans(&history, &canvas, &settings, Some(3));
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].trade_id, 3);

        settings.all_trades_shown = true;
        let ids: Vec<u64> = visible_trade_spans(&history, &canvas, &settings, None)
            .iter()
            .map(|span| span.trade_id)
            .collect();
        assert_eq!(ids, vec![0, 3]);
    }
}
