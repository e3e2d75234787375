//! Price/geometry mapping for one render pass.
//!
//! [`PriceScale`] owns the linear transform between prices and device-pixel
//! y-coordinates, and the horizontal slot metrics. [`AoScale`] does the same
//! for the oscillator sub-panel.

use crate::trader::{CandleData, ChartConfig};

use super::base::{finite, round_to};

/// Price and oscillator extremes of a window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinMax {
    pub min: f64,
    pub max: f64,
    pub ao_min: f64,
    pub ao_max: f64,
}

impl MinMax {
    /// Extremes over `candles`, skipping sentinel zeros.
    ///
    /// With every low/high missing `min`/`max` stay at `+inf`/`-inf`; see
    /// [`MinMax::is_degenerate`]. The oscillator range is made to straddle zero:
    /// an all-positive range gets `ao_min = -ao_max` and an all-negative one
    /// `ao_max = -ao_min`.
    pub fn from_candles(candles: &[CandleData]) -> Self {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut ao_min = f64::INFINITY;
        let mut ao_max = f64::NEG_INFINITY;

        for candle in candles {
            if candle.low != 0.0 {
                min = min.min(candle.low);
            }
            if candle.high != 0.0 {
                max = max.max(candle.high);
            }
            let ao = candle.indicators.ao.value;
            if ao != 0.0 {
                ao_min = ao_min.min(ao);
                ao_max = ao_max.max(ao);
            }
        }

        if !ao_min.is_finite() || !ao_max.is_finite() {
            ao_min = 0.0;
            ao_max = 0.0;
        } else if ao_min >= 0.0 {
            ao_min = -ao_max;
        } else if ao_max <= 0.0 {
            ao_max = -ao_min;
        }

        Self { min, max, ao_min, ao_max }
    }

    /// True when no candle in the window had a usable low or high
    pub fn is_degenerate(&self) -> bool {
        !self.min.is_finite() || !self.max.is_finite()
    }

    pub fn range(&self) -> f64 {
        self.max - self.min
    }
}

/// Linear price ↔ pixel transform and slot metrics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceScale {
    /// Device-pixel width of the main chart
    pub width: f64,
    /// Device-pixel height of the main chart
    pub height: f64,
    pub min_max: MinMax,
    /// Horizontal gap between two candles
    pub gap: f64,
    pub candle_width: f64,
    /// Padding band kept free at the top and bottom
    pub gap_space: f64,
}

impl PriceScale {
    /// Build the transform for a window of `slots` candles.
    ///
    /// `width`/`height` are device pixels. `slots` must be non-zero.
    pub fn new(window: &[CandleData], width: f64, height: f64, slots: usize, config: &ChartConfig) -> Self {
        let min_max = MinMax::from_candles(window);
        let slots = slots.max(1) as f64;
        let gap = width / slots / config.gap_ratio;
        let candle_width = (width - (slots - 1.0) * gap) / slots;
        Self {
            width,
            height,
            min_max,
            gap,
            candle_width,
            gap_space: candle_width * config.gap_space_factor,
        }
    }

    /// Vertical span available to prices between the two padding bands
    fn usable_height(&self) -> f64 {
        self.height - self.gap_space * 2.0
    }

    /// Device-pixel y of a price; higher prices map to smaller y.
    ///
    /// A flat window maps every price to the vertical centre. A degenerate
    /// window yields a non-finite value, use [`PriceScale::checked_pixel_of_price`]
    /// before handing it to a renderer.
    pub fn pixel_of_price(&self, price: f64) -> f64 {
        let range = self.min_max.range();
        if range == 0.0 {
            return self.height / 2.0;
        }
        (self.min_max.max - price) / range * self.usable_height() + self.gap_space
    }

    pub fn checked_pixel_of_price(&self, price: f64) -> Option<f64> {
        finite(self.pixel_of_price(price))
    }

    /// Exact inverse of [`PriceScale::pixel_of_price`]
    pub fn price_at_pixel(&self, y: f64) -> f64 {
        let range = self.min_max.range();
        if range == 0.0 {
            return self.min_max.min;
        }
        self.min_max.max - (y - self.gap_space) / self.usable_height() * range
    }

    /// Price shown for a cursor at device-pixel `y`, rounded to 3 decimals
    pub fn displayed_price(&self, y: f64) -> Option<f64> {
        finite(self.price_at_pixel(y)).map(|price| round_to(price, 3))
    }

    /// Left edge of a window slot; slots left of the window are negative
    pub fn slot_x(&self, slot: i64) -> f64 {
        slot as f64 * (self.candle_width + self.gap)
    }

    pub fn slot_center_x(&self, slot: i64) -> f64 {
        self.slot_x(slot) + self.candle_width / 2.0
    }
}

/// Oscillator panel metrics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AoScale {
    /// Device-pixel height of the panel
    pub panel_height: f64,
    /// Zero line, measured from the top of the panel
    pub mid_line: f64,
    /// Pixels per oscillator unit
    pub unit_height: f64,
}

impl AoScale {
    /// The zero line sits at the ratio of the positive extreme to the whole
    /// range, and bars keep `ao_headroom` free beyond the extremes.
    pub fn new(min_max: &MinMax, main_height: f64, config: &ChartConfig) -> Self {
        let panel_height = main_height * config.ao_panel_ratio;
        let span = min_max.ao_min.abs() + min_max.ao_max;
        if span <= 0.0 || !span.is_finite() {
            return Self {
                panel_height,
                mid_line: panel_height / 2.0,
                unit_height: 0.0,
            };
        }
        Self {
            panel_height,
            mid_line: panel_height * min_max.ao_max / span,
            unit_height: panel_height / (span * config.ao_headroom),
        }
    }

    /// Top and height of the bar for `value`: drawn upward from the zero line
    /// when positive, downward otherwise.
    pub fn bar(&self, value: f64) -> (f64, f64) {
        let height = value.abs() * self.unit_height;
        if value > 0.0 {
            (self.mid_line - height, height)
        } else {
            (self.mid_line, height)
        }
    }
}
