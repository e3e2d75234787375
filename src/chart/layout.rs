//! Candle Layout Builder.
//!
//! [`CandleCanvas::build`] turns the candle history and the current window into
//! an immutable pixel-space model. The model is rebuilt from scratch whenever
//! any input changes.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::error::{ChartError, Result};
use crate::trader::{AssignedTrade, CandleData, ChartConfig};

use super::base::{finite, round_to, Point};
use super::geometry::{AoScale, MinMax, PriceScale};
use super::mount::MountPoints;
use super::window::ChartWindow;

/// Mapped alligator values of one candle; `None` when absent upstream.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AlligatorPoints {
    pub jaw: Option<f64>,
    pub teeth: Option<f64>,
    pub lips: Option<f64>,
}

/// Pixel y of the legs a candle holds for one trade entry.
///
/// `buy_y` is only set on the start leg and `sell_y` only on the end leg.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TradePixels {
    pub trade_id: u64,
    pub buy_y: Option<f64>,
    pub sell_y: Option<f64>,
}

/// One visible candle in device pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct Candle2D {
    pub open: f64,
    pub close: f64,
    pub low: f64,
    pub high: f64,
    pub x_position: f64,
    /// Index of the candle in the full history
    pub original_index: usize,
    pub open_time: DateTime<Utc>,
    /// Missing or unmappable prices; the candle keeps its slot but is not drawn
    pub no_draw: bool,
    pub alligator: AlligatorPoints,
    /// Trade entries as supplied, in their original order
    pub trades: Vec<AssignedTrade>,
    /// Mapped legs, parallel to `trades`
    pub trade_pixels: Vec<TradePixels>,
    pub mount_points: MountPoints,
}

impl Candle2D {
    fn layout(candle: &CandleData, slot: usize, original_index: usize, scale: &PriceScale) -> Self {
        let open = scale.pixel_of_price(candle.open);
        let close = scale.pixel_of_price(candle.close);
        let low = scale.pixel_of_price(candle.low);
        let high = scale.pixel_of_price(candle.high);
        let no_draw = candle.has_missing_price() || ![open, close, low, high].iter().all(|v| v.is_finite());

        let mount_points = if no_draw {
            MountPoints::default()
        } else {
            let upper_half = (high + low) / 2.0 < scale.height / 2.0;
            MountPoints::allocate(
                scale.candle_width,
                &candle.indicators,
                &candle.trades,
                high,
                low,
                upper_half,
            )
        };

        let alligator = &candle.indicators.alligator;
        let map_line = |value: f64| {
            if value == 0.0 {
                None
            } else {
                scale.checked_pixel_of_price(value)
            }
        };

        let trade_pixels = candle
            .trades
            .iter()
            .map(|trade| TradePixels {
                trade_id: trade.trade_id,
                buy_y: trade
                    .is_this_candle_start
                    .then(|| scale.checked_pixel_of_price(trade.buy_price))
                    .flatten(),
                sell_y: trade
                    .is_this_candle_end
                    .then(|| scale.checked_pixel_of_price(trade.sell_price))
                    .flatten(),
            })
            .collect();

        Self {
            open,
            close,
            low,
            high,
            x_position: scale.slot_x(slot as i64),
            original_index,
            open_time: candle.open_time,
            no_draw,
            alligator: AlligatorPoints {
                jaw: map_line(alligator.jaw),
                teeth: map_line(alligator.teeth),
                lips: map_line(alligator.lips),
            },
            trades: candle.trades.clone(),
            trade_pixels,
            mount_points,
        }
    }
}

/// Alligator polylines through the candle centres.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlligatorLines {
    pub jaw: Vec<Point>,
    pub teeth: Vec<Point>,
    pub lips: Vec<Point>,
}

/// One oscillator bar, relative to the top of the oscillator panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AoBar {
    pub x: f64,
    pub y: f64,
    pub height: f64,
    pub vertex_value: f64,
}

/// Label next to the live candle showing its close.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceLabel {
    pub position: Point,
    pub text: String,
}

/// Pixel-space model of one render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct CandleCanvas {
    /// Device-pixel width
    pub width: f64,
    /// Device-pixel height of the main chart
    pub height: f64,
    pub window: ChartWindow,
    pub scale: PriceScale,
    pub candles: Vec<Candle2D>,
    pub alligator: AlligatorLines,
    pub ao_scale: AoScale,
    pub ao_bars: Vec<AoBar>,
    pub last_candle: Option<CandleData>,
    pub last_price: Option<PriceLabel>,
}

impl CandleCanvas {
    /// Build the model for `candles_shown` candles ending `shift` candles
    /// before the latest one.
    ///
    /// `width`/`height` are CSS pixels and get multiplied by
    /// `scale_for_quality`. A `live_candle` replaces the history entry
    /// `live_candle_offset` positions from the end before windowing.
    pub fn build(
        width: f64,
        height: f64,
        shift: usize,
        candles_shown: usize,
        history: &[CandleData],
        live_candle: Option<&CandleData>,
        config: &ChartConfig,
    ) -> Result<Self> {
        if history.len() < config.min_candles_shown {
            warn!(
                available = history.len(),
                required = config.min_candles_shown,
                "not enough candles to draw"
            );
            return Err(ChartError::NotEnoughCandles {
                available: history.len(),
                required: config.min_candles_shown,
            });
        }

        let width = width * config.scale_for_quality;
        let height = height * config.scale_for_quality;

        let history = with_live_candle(history, live_candle, config.live_candle_offset);
        let window = ChartWindow::resolve(history.len(), shift, candles_shown);
        if window.is_empty() {
            warn!(total = window.total, shift, candles_shown, "chart window is empty");
            return Err(ChartError::EmptyWindow);
        }

        let visible = window.slice(&history);
        let scale = PriceScale::new(visible, width, height, window.len(), config);
        if scale.min_max.is_degenerate() {
            warn!(start = window.start, end = window.end, "no usable prices in window, candles will not be drawn");
        }
        debug!(
            start = window.start,
            end = window.end,
            total = window.total,
            min = scale.min_max.min,
            max = scale.min_max.max,
            candle_width = scale.candle_width,
            "candle canvas built"
        );

        let candles: Vec<Candle2D> = visible
            .iter()
            .enumerate()
            .map(|(slot, candle)| Candle2D::layout(candle, slot, window.original_index(slot), &scale))
            .collect();

        let alligator = alligator_lines(&candles, &scale);
        let ao_scale = AoScale::new(&scale.min_max, height, config);
        let ao_bars = visible
            .iter()
            .enumerate()
            .map(|(slot, candle)| {
                let (y, height) = ao_scale.bar(candle.indicators.ao.value);
                AoBar {
                    x: scale.slot_x(slot as i64),
                    y,
                    height,
                    vertex_value: candle.indicators.ao.vertex_value,
                }
            })
            .collect();

        let last_price = live_candle.and_then(|live| last_price_label(live, &window, &candles, &scale, config));

        Ok(Self {
            width,
            height,
            window,
            scale,
            candles,
            alligator,
            ao_scale,
            ao_bars,
            last_candle: live_candle.cloned(),
            last_price,
        })
    }

    pub fn min_max(&self) -> &MinMax {
        &self.scale.min_max
    }

    pub fn gap(&self) -> f64 {
        self.scale.gap
    }

    pub fn candle_width(&self) -> f64 {
        self.scale.candle_width
    }

    /// Visible candle holding history index `original_index`
    pub fn candle_at(&self, original_index: usize) -> Option<&Candle2D> {
        if !self.window.contains(original_index) {
            return None;
        }
        self.candles.get(original_index - self.window.start)
    }
}

fn with_live_candle<'a>(history: &'a [CandleData], live: Option<&CandleData>, offset: usize) -> Cow<'a, [CandleData]> {
    let index = history.len().checked_sub(offset).filter(|&index| index < history.len());
    match (live, index) {
        (Some(live), Some(index)) => {
            let mut owned = history.to_vec();
            owned[index] = live.clone();
            Cow::Owned(owned)
        }
        _ => Cow::Borrowed(history),
    }
}

fn alligator_lines(candles: &[Candle2D], scale: &PriceScale) -> AlligatorLines {
    let mut lines = AlligatorLines::default();
    for (slot, candle) in candles.iter().enumerate() {
        let x = scale.slot_center_x(slot as i64);
        if let Some(y) = candle.alligator.jaw {
            lines.jaw.push(Point::new(x, y));
        }
        if let Some(y) = candle.alligator.teeth {
            lines.teeth.push(Point::new(x, y));
        }
        if let Some(y) = candle.alligator.lips {
            lines.lips.push(Point::new(x, y));
        }
    }
    lines
}

fn last_price_label(
    live: &CandleData,
    window: &ChartWindow,
    candles: &[Candle2D],
    scale: &PriceScale,
    config: &ChartConfig,
) -> Option<PriceLabel> {
    if live.close == 0.0 {
        return None;
    }
    let index = window.total.checked_sub(config.alligator_offset + 1)?;
    if !window.contains(index) {
        return None;
    }
    let candle = candles.get(index - window.start)?;
    let x = finite(candle.x_position + scale.candle_width * 2.0 + scale.gap)?;
    let y = finite(candle.close)?;
    Some(PriceLabel {
        position: Point::new(x, y),
        text: format!("-- {}", round_to(live.close, 2)),
    })
}
