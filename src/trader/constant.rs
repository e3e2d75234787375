//! Enumerations attached to candles and trades.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TradeType {
    /// Bought first, sold later
    #[default]
    Long,
    /// Sold first, bought back later
    Short,
}

impl fmt::Display for TradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeType::Long => write!(f, "long"),
            TradeType::Short => write!(f, "short"),
        }
    }
}

/// Reversal-bar signal of a candle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RevBarSignal {
    Buy,
    Sell,
    #[default]
    #[serde(alias = "")]
    None,
}

impl RevBarSignal {
    pub fn is_none(&self) -> bool {
        matches!(self, RevBarSignal::None)
    }
}

impl fmt::Display for RevBarSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RevBarSignal::Buy => write!(f, "buy"),
            RevBarSignal::Sell => write!(f, "sell"),
            RevBarSignal::None => write!(f, ""),
        }
    }
}

/// Fractal signal of a candle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FractalSignal {
    Up,
    Down,
    #[default]
    #[serde(alias = "")]
    None,
}

impl FractalSignal {
    pub fn is_none(&self) -> bool {
        matches!(self, FractalSignal::None)
    }
}

impl fmt::Display for FractalSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FractalSignal::Up => write!(f, "up"),
            FractalSignal::Down => write!(f, "down"),
            FractalSignal::None => write!(f, ""),
        }
    }
}
