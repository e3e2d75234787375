//! Window slicing shared by every consumer of the candle history.
//!
//! The geometry mapper, the layout builder, the trade annotations and the
//! cursor readout all go through [`ChartWindow`] so that `shift`,
//! `candles_shown` and history indices are derived in exactly one place.

use std::ops::Range;

/// The contiguous range of history rendered by one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartWindow {
    /// Index of the first visible candle in the full history
    pub start: usize,
    /// One past the index of the last visible candle
    pub end: usize,
    /// Length of the full history
    pub total: usize,
}

impl ChartWindow {
    /// Resolve `shift` / `candles_shown` against a history of `total` candles.
    ///
    /// The window ends `shift` candles before the latest one and is cut at the
    /// start of history when it does not fit.
    pub fn resolve(total: usize, shift: usize, candles_shown: usize) -> Self {
        let end = total - shift.min(total);
        let start = end.saturating_sub(candles_shown);
        Self { start, end, total }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Candles excluded at the right edge
    pub fn shift(&self) -> usize {
        self.total - self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Visible part of `items`, which must be the full history
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let end = self.end.min(items.len());
        let start = self.start.min(end);
        &items[start..end]
    }

    /// History index of a window slot
    pub fn original_index(&self, slot: usize) -> usize {
        self.start + slot
    }

    /// Window slot of a history index; negative or `>= len()` when off-window
    pub fn slot_of(&self, original_index: usize) -> i64 {
        original_index as i64 - self.start as i64
    }

    pub fn contains(&self, original_index: usize) -> bool {
        self.range().contains(&original_index)
    }

    /// Slot under a horizontal position given as a fraction of the chart width
    pub fn slot_at_fraction(&self, fraction: f64) -> Option<usize> {
        if !fraction.is_finite() || fraction < 0.0 {
            return None;
        }
        let slot = (fraction * self.len() as f64).floor() as usize;
        (slot < self.len()).then_some(slot)
    }
}
