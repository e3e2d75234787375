//! Trade Locator: find the candles holding the legs of a trade.
//!
//! Works over the full history ([`CandleData`]) as well as the laid-out window
//! ([`Candle2D`]); both expose their trade entries through [`TradeCarrier`].

use crate::trader::{AssignedTrade, CandleData};

use super::layout::Candle2D;

/// Anything that carries trade legs.
pub trait TradeCarrier {
    fn trades(&self) -> &[AssignedTrade];
}

impl TradeCarrier for CandleData {
    fn trades(&self) -> &[AssignedTrade] {
        &self.trades
    }
}

impl TradeCarrier for Candle2D {
    fn trades(&self) -> &[AssignedTrade] {
        &self.trades
    }
}

/// A located trade leg.
#[derive(Debug, Clone, Copy)]
pub struct FoundCandle<'a, T> {
    pub candle: &'a T,
    /// Position of the candle in the scanned slice
    pub index: usize,
    /// Position of the leg within the candle's trades
    pub inner_index: usize,
}

/// Which leg of a trade to look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeLeg {
    Start,
    End,
}

impl TradeLeg {
    fn matches_strict(self, trade: &AssignedTrade) -> bool {
        match self {
            TradeLeg::Start => trade.is_this_candle_start && !trade.is_this_candle_end,
            TradeLeg::End => !trade.is_this_candle_start && trade.is_this_candle_end,
        }
    }
}

/// First candle holding the requested leg of `trade_id`.
///
/// A strict leg (start only / end only) wins; failing that, an entry flagged
/// both start and end answers for either leg, so a trade closed inside one
/// candle resolves to the same candle and inner index on both sides.
/// `None` means the trade is not resolvable in `candles`.
pub fn find_trade_leg<T: TradeCarrier>(candles: &[T], trade_id: u64, leg: TradeLeg) -> Option<FoundCandle<'_, T>> {
    find_where(candles, |trade| trade.trade_id == trade_id && leg.matches_strict(trade)).or_else(|| {
        find_where(candles, |trade| {
            trade.trade_id == trade_id && trade.is_this_candle_start && trade.is_this_candle_end
        })
    })
}

pub fn find_trade_start<T: TradeCarrier>(candles: &[T], trade_id: u64) -> Option<FoundCandle<'_, T>> {
    find_trade_leg(candles, trade_id, TradeLeg::Start)
}

pub fn find_trade_end<T: TradeCarrier>(candles: &[T], trade_id: u64) -> Option<FoundCandle<'_, T>> {
    find_trade_leg(candles, trade_id, TradeLeg::End)
}

fn find_where<T, F>(candles: &[T], predicate: F) -> Option<FoundCandle<'_, T>>
where
    T: TradeCarrier,
    F: Fn(&AssignedTrade) -> bool,
{
    candles.iter().enumerate().find_map(|(index, candle)| {
        candle
            .trades()
            .iter()
            .position(&predicate)
            .map(|inner_index| FoundCandle { candle, index, inner_index })
    })
}

/// Highest trade id present in `candles`
pub fn max_trade_id<T: TradeCarrier>(candles: &[T]) -> Option<u64> {
    candles
        .iter()
        .flat_map(|candle| candle.trades().iter().map(|trade| trade.trade_id))
        .max()
}
