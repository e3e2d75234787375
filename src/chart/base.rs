//! Base constants and utility functions for the chart module.

use serde::{Deserialize, Serialize};

/// RGBA colour handed to the rendering back end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

// Candle colors
pub const RED_COLOR: Color = Color::rgb(255, 0, 55);
pub const GREEN_COLOR: Color = Color::rgb(107, 200, 0);
pub const WHITE_COLOR: Color = Color::rgb(255, 255, 255);
pub const GREY_COLOR: Color = Color::rgb(128, 128, 128);

// Trade colors
pub const POSITIVE_ARROW_COLOR: Color = GREEN_COLOR;
pub const NEGATIVE_ARROW_COLOR: Color = RED_COLOR;
pub const POSITIVE_RECT_COLOR: Color = Color::rgba(50, 255, 30, 89);
pub const NEGATIVE_RECT_COLOR: Color = Color::rgba(255, 0, 55, 89);

// Alligator colors
pub const JAW_COLOR: Color = Color::rgba(25, 118, 210, 204);
pub const TEETH_COLOR: Color = Color::rgba(226, 56, 52, 204);
pub const LIPS_COLOR: Color = Color::rgba(76, 175, 80, 204);
pub const ALLIGATOR_LINE_WEIGHT: f64 = 0.6;

// Cursor
pub const CURSOR_COLOR: Color = Color::rgba(255, 255, 255, 204);
pub const CURSOR_LINE_WIDTH: f64 = 0.7;

// Candle drawing
/// Body height used when a candle opens and closes at the same price
pub const FLAT_BODY_HEIGHT: f64 = 3.0;
/// Wick width as a fraction of the candle width
pub const WICK_WIDTH_RATIO: f64 = 1.0 / 6.0;

/// A point in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// An axis-aligned rectangle in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Rectangle spanning two corners, whatever their order
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (a.x - b.x).abs(),
            height: (a.y - b.y).abs(),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }
}

/// Round to a fixed number of decimals
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Format price with appropriate precision
pub fn format_price(price: f64, decimals: usize) -> String {
    format!("{:.prec$}", price, prec = decimals)
}

/// Keep a value only when it can be handed to a renderer
#[inline]
pub fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}
