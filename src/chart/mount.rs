//! Marker slots stacked above and below a candle body.

use crate::trader::{AssignedTrade, FractalSignal, Indicators, RevBarSignal, TradeType};

/// What occupies a mount slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarkerKind {
    RevBar(RevBarSignal),
    Fractal(FractalSignal),
    /// A trade opened and closed within this candle
    Trade {
        trade_type: TradeType,
        profit: f64,
        profitable: bool,
    },
}

/// A marker with its vertical position in device pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MountedMarker {
    pub kind: MarkerKind,
    pub y_pos: f64,
}

/// Side of the candle a marker is stacked on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountSide {
    Above,
    Below,
}

/// Ordered marker stacks of one candle. Slot `i` sits `candle_width * (1 + i)`
/// pixels away from the high (above) or the low (below).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MountPoints {
    pub above: Vec<MountedMarker>,
    pub below: Vec<MountedMarker>,
}

impl MountPoints {
    /// Allocate slots for the indicators and single-candle trades of a candle.
    ///
    /// `high` and `low` are the candle's mapped y-coordinates. `upper_half`
    /// tells whether the candle sits in the upper half of the chart; trade
    /// markers then go below it, otherwise above.
    pub fn allocate(
        candle_width: f64,
        indicators: &Indicators,
        trades: &[AssignedTrade],
        high: f64,
        low: f64,
        upper_half: bool,
    ) -> Self {
        let mut points = Self::default();

        match indicators.rev_bar {
            RevBarSignal::Sell => points.mount(MountSide::Above, MarkerKind::RevBar(RevBarSignal::Sell), candle_width, high, low),
            RevBarSignal::Buy => points.mount(MountSide::Below, MarkerKind::RevBar(RevBarSignal::Buy), candle_width, high, low),
            RevBarSignal::None => {}
        }

        match indicators.fractal {
            FractalSignal::Up => points.mount(MountSide::Above, MarkerKind::Fractal(FractalSignal::Up), candle_width, high, low),
            FractalSignal::Down => points.mount(MountSide::Below, MarkerKind::Fractal(FractalSignal::Down), candle_width, high, low),
            FractalSignal::None => {}
        }

        let trade_side = if upper_half { MountSide::Below } else { MountSide::Above };
        for trade in trades.iter().filter(|trade| trade.is_this_candle_start) {
            if !closes_in_same_candle(trade, trades) {
                continue;
            }
            let kind = MarkerKind::Trade {
                trade_type: trade.trade_type,
                profit: trade.profit,
                profitable: trade.profit > 0.0,
            };
            points.mount(trade_side, kind, candle_width, high, low);
        }

        points
    }

    fn mount(&mut self, side: MountSide, kind: MarkerKind, candle_width: f64, high: f64, low: f64) {
        match side {
            MountSide::Above => {
                let y_pos = high - candle_width * (1 + self.above.len()) as f64;
                self.above.push(MountedMarker { kind, y_pos });
            }
            MountSide::Below => {
                let y_pos = low + candle_width * (1 + self.below.len()) as f64;
                self.below.push(MountedMarker { kind, y_pos });
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.above.is_empty() && self.below.is_empty()
    }

    /// Every marker with the side it was stacked on
    pub fn iter(&self) -> impl Iterator<Item = (MountSide, &MountedMarker)> {
        self.above
            .iter()
            .map(|marker| (MountSide::Above, marker))
            .chain(self.below.iter().map(|marker| (MountSide::Below, marker)))
    }
}

/// A start leg whose end leg lives in the same candle
fn closes_in_same_candle(start: &AssignedTrade, trades: &[AssignedTrade]) -> bool {
    if start.is_this_candle_end {
        return true;
    }
    trades
        .iter()
        .any(|other| other.trade_id == start.trade_id && other.is_this_candle_end && !other.is_this_candle_start)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leg(trade_id: u64, start: bool, end: bool, profit: f64) -> AssignedTrade {
        AssignedTrade {
            trade_id,
            trade_type: TradeType::Long,
            buy_price: 10.0,
            sell_price: 11.0,
            profit,
            is_this_candle_start: start,
            is_this_candle_end: end,
        }
    }

    #[test]
    fn test_indicator_sides() {
        let indicators = Indicators {
            rev_bar: RevBarSignal::Sell,
            fractal: FractalSignal::Up,
            ..Default::default()
        };
        let points = MountPoints::allocate(4.0, &indicators, &[], 100.0, 200.0, false);
        assert_eq!(points.above.len(), 2);
        assert!(points.below.is_empty());
        assert_eq!(points.above[0].y_pos, 96.0);
        assert_eq!(points.above[1].y_pos, 92.0);
        assert_eq!(points.above[1].kind, MarkerKind::Fractal(FractalSignal::Up));

        let indicators = Indicators {
            rev_bar: RevBarSignal::Buy,
            fractal: FractalSignal::Down,
            ..Default::default()
        };
        let points = MountPoints::allocate(4.0, &indicators, &[], 100.0, 200.0, false);
        assert_eq!(points.below.iter().map(|m| m.y_pos).collect::<Vec<_>>(), vec![204.0, 208.0]);
    }

    #[test]
    fn test_no_markers() {
        let points = MountPoints::allocate(4.0, &Indicators::default(), &[], 100.0, 200.0, true);
        assert!(points.is_empty());
    }

    #[test]
    fn test_single_candle_trade_split_legs() {
        let trades = [leg(3, true, false, 2.5), leg(3, false, true, 2.5)];
        let points = MountPoints::allocate(4.0, &Indicators::default(), &trades, 100.0, 200.0, true);
        assert!(points.above.is_empty());
        assert_eq!(points.below.len(), 1);
        assert_eq!(
            points.below[0].kind,
            MarkerKind::Trade { trade_type: TradeType::Long, profit: 2.5, profitable: true }
        );
    }

    #[test]
    fn test_single_candle_trade_one_entry() {
        let trades = [leg(1, true, true, -1.0)];
        let points = MountPoints::allocate(4.0, &Indicators::default(), &trades, 100.0, 200.0, false);
        assert_eq!(points.above.len(), 1);
        assert!(matches!(points.above[0].kind, MarkerKind::Trade { profitable: false, .. }));
    }

    #[test]
    fn test_multi_candle_trade_not_mounted() {
        let trades = [leg(1, true, false, 1.0), leg(2, false, true, 1.0)];
        let points = MountPoints::allocate(4.0, &Indicators::default(), &trades, 100.0, 200.0, false);
        assert!(points.is_empty());
    }

    #[test]
    fn test_trade_stacks_after_indicators() {
        let indicators = Indicators { fractal: FractalSignal::Down, ..Default::default() };
        let trades = [leg(1, true, true, 1.0)];
        let points = MountPoints::allocate(4.0, &indicators, &trades, 100.0, 200.0, true);
        assert_eq!(points.below.len(), 2);
        assert_eq!(points.below[1].y_pos, 208.0);
        assert_eq!(points.iter().count(), 2);
    }
}
