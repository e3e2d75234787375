//! Viewport Reducer: gestures to `(shift, candles_shown)`.
//!
//! Every transition is a total function of its inputs. Out-of-range requests
//! are clamped; nothing here fails.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::trader::{CandleData, ChartConfig, ChartSettings};

use super::locator::{find_trade_end, find_trade_start};

/// Visible window of the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportState {
    /// Most recent candles excluded at the right edge
    pub shift: usize,
    pub candles_shown: usize,
}

impl ViewportState {
    pub const fn new(shift: usize, candles_shown: usize) -> Self {
        Self { shift, candles_shown }
    }

    /// Latest data with the initial zoom
    pub fn initial(config: &ChartConfig) -> Self {
        Self::new(0, config.initial_candles_shown)
    }
}

/// Normalised gesture movement. `x` pans, `y` zooms.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GestureDelta {
    pub x: f64,
    pub y: f64,
}

impl GestureDelta {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

/// Apply one gesture: zoom first, then pan with the new zoom.
///
/// Positive `delta.y` shows fewer candles, positive `delta.x` moves towards
/// the latest candle.
pub fn scroll_zoom(state: ViewportState, delta: GestureDelta, total_candles: usize, config: &ChartConfig) -> ViewportState {
    let max_candles = total_candles.saturating_sub(config.overscroll_margin);
    if max_candles == 0 {
        return state;
    }
    let candles_shown = zoom(state, delta.y, max_candles, config);
    let shift = pan(state.shift, candles_shown, delta.x, max_candles, config);
    let next = ViewportState { shift, candles_shown };
    if next != state {
        trace!(?state, ?next, ?delta, total_candles, "viewport changed");
    }
    next
}

/// Speed factor growing with the share of history on screen
fn multiplier(candles_shown: usize, max_candles: usize, floor: f64) -> f64 {
    floor.max(candles_shown as f64 / max_candles as f64 * 3.0)
}

fn zoom(state: ViewportState, dy: f64, max_candles: usize, config: &ChartConfig) -> usize {
    if dy == 0.0 || !dy.is_finite() {
        return state.candles_shown;
    }
    let current = state.candles_shown as i64;
    let lower = config.min_candles_shown.max(1) as i64;
    let upper = max_candles as i64 - state.shift as i64;

    let factor = multiplier(state.candles_shown, max_candles, config.zoom_min_multiplier);
    let target = current - (dy * factor * config.zoom_strength).round() as i64;

    // already out of bounds: only accept moves back towards the range
    if (current < lower && target < current) || (current > upper && target > current) {
        return state.candles_shown;
    }
    target.min(upper).max(lower) as usize
}

fn pan(shift: usize, candles_shown: usize, dx: f64, max_candles: usize, config: &ChartConfig) -> usize {
    if dx == 0.0 || !dx.is_finite() {
        return shift;
    }
    let current = shift as i64;
    let upper = max_candles as i64 - candles_shown as i64;

    let factor = multiplier(candles_shown, max_candles, config.shift_min_multiplier);
    let target = current - (dx * factor * config.shift_strength).round() as i64;

    if current > upper && target > current {
        return shift;
    }
    target.min(upper).max(0) as usize
}

/// Recover after the history was replaced.
///
/// When the new history is still drawable but too short for the current
/// window, jump back to the latest data with at most the initial zoom.
pub fn on_history_changed(state: ViewportState, new_total: usize, config: &ChartConfig) -> ViewportState {
    let needed = state.shift + state.candles_shown + config.history_reset_margin;
    if new_total >= config.min_candles_shown && needed > new_total {
        let next = ViewportState::new(0, config.initial_candles_shown.min(new_total));
        trace!(?state, ?next, new_total, "viewport reset after history change");
        return next;
    }
    state
}

/// Window restored when the selected trade is cleared
pub fn reset_for_deselect(config: &ChartConfig) -> ViewportState {
    ViewportState::initial(config)
}

/// Frame a trade whose legs sit at history indices `start_index..=end_index`.
pub fn focus_trade(start_index: usize, end_index: usize, total_candles: usize, config: &ChartConfig) -> ViewportState {
    let trailing = total_candles.saturating_sub(end_index + config.focus_trailing_candles);
    let shift = trailing.min(total_candles.saturating_sub(config.focus_max_shift_margin));

    let mut candles_shown = end_index.saturating_sub(start_index) + config.focus_margin_candles;
    let upper = total_candles
        .saturating_sub(config.overscroll_margin)
        .saturating_sub(shift);
    if upper >= config.min_candles_shown {
        candles_shown = candles_shown.min(upper);
    }
    ViewportState::new(shift, candles_shown.max(config.min_candles_shown))
}

/// Locate trade `trade_id` in `history` and frame it; `None` if either leg is
/// missing.
pub fn focus_on_trade(history: &[CandleData], trade_id: u64, config: &ChartConfig) -> Option<ViewportState> {
    let start = find_trade_start(history, trade_id)?;
    let end = find_trade_end(history, trade_id)?;
    Some(focus_trade(start.index, end.index, history.len(), config))
}

/// Mouse drag: turns pointer movement into a horizontal delta.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragPan {
    last_x: Option<f64>,
}

impl DragPan {
    pub fn pointer_down(&mut self, x: f64) {
        self.last_x = Some(x);
    }

    /// Movement since the previous event; `None` unless a drag is active
    pub fn pointer_move(&mut self, x: f64) -> Option<GestureDelta> {
        let last = self.last_x?;
        self.last_x = Some(x);
        Some(GestureDelta::new(last - x, 0.0))
    }

    pub fn pointer_up(&mut self) {
        self.last_x = None;
    }

    pub fn pointer_leave(&mut self) {
        self.last_x = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.last_x.is_some()
    }
}

/// Touch pinch: turns the platform scale factor into a vertical delta.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PinchZoom {
    last_scale: Option<f64>,
}

impl PinchZoom {
    pub fn start(&mut self, scale: f64) {
        self.last_scale = Some(scale);
    }

    pub fn update(&mut self, scale: f64, sensitivity: f64) -> Option<GestureDelta> {
        let last = self.last_scale?;
        self.last_scale = Some(scale);
        Some(GestureDelta::new(0.0, (scale - last) * sensitivity))
    }

    pub fn end(&mut self) {
        self.last_scale = None;
    }

    pub fn is_active(&self) -> bool {
        self.last_scale.is_some()
    }
}

/// Owns the viewport state and routes every input through the reducer.
#[derive(Debug, Clone)]
pub struct GestureController {
    config: ChartConfig,
    zoom_enabled: bool,
    scroll_enabled: bool,
    state: ViewportState,
    drag: DragPan,
    pinch: PinchZoom,
}

impl GestureController {
    pub fn new(config: ChartConfig, settings: &ChartSettings) -> Self {
        let state = ViewportState::initial(&config);
        Self {
            config,
            zoom_enabled: settings.zoom,
            scroll_enabled: settings.scroll,
            state,
            drag: DragPan::default(),
            pinch: PinchZoom::default(),
        }
    }

    pub fn with_state(mut self, state: ViewportState) -> Self {
        self.state = state;
        self
    }

    pub fn state(&self) -> ViewportState {
        self.state
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Feed a delta through the zoom/scroll toggles and the reducer
    pub fn apply(&mut self, delta: GestureDelta, total_candles: usize) -> ViewportState {
        let delta = GestureDelta {
            x: if self.scroll_enabled { delta.x } else { 0.0 },
            y: if self.zoom_enabled { delta.y } else { 0.0 },
        };
        if !delta.is_zero() {
            self.state = scroll_zoom(self.state, delta, total_candles, &self.config);
        }
        self.state
    }

    /// Wheel input; ignored while a pinch is in progress
    pub fn wheel(&mut self, delta: GestureDelta, total_candles: usize) -> ViewportState {
        if self.pinch.is_active() {
            return self.state;
        }
        self.apply(delta, total_candles)
    }

    pub fn pointer_down(&mut self, x: f64) {
        self.drag.pointer_down(x);
    }

    pub fn pointer_move(&mut self, x: f64, total_candles: usize) -> ViewportState {
        match self.drag.pointer_move(x) {
            Some(delta) => self.apply(delta, total_candles),
            None => self.state,
        }
    }

    pub fn pointer_up(&mut self) {
        self.drag.pointer_up();
    }

    pub fn pointer_leave(&mut self) {
        self.drag.pointer_leave();
    }

    pub fn pinch_start(&mut self, scale: f64) {
        self.pinch.start(scale);
    }

    pub fn pinch_update(&mut self, scale: f64, total_candles: usize) -> ViewportState {
        match self.pinch.update(scale, self.config.pinch_sensitivity) {
            Some(delta) => self.apply(delta, total_candles),
            None => self.state,
        }
    }

    pub fn pinch_end(&mut self) {
        self.pinch.end();
    }

    pub fn history_changed(&mut self, new_total: usize) -> ViewportState {
        self.state = on_history_changed(self.state, new_total, &self.config);
        self.state
    }

    /// Follow the selected trade: frame it when set, reset when cleared.
    /// An unresolvable trade leaves the window untouched.
    pub fn select_trade(&mut self, history: &[CandleData], trade_id: Option<u64>) -> ViewportState {
        match trade_id {
            Some(id) => {
                if let Some(state) = focus_on_trade(history, id, &self.config) {
                    self.state = state;
                }
            }
            None => self.state = reset_for_deselect(&self.config),
        }
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trader::{AssignedTrade, TradeType};
    use chrono::{TimeZone, Utc};

    fn config() -> ChartConfig {
        ChartConfig::default()
    }

    fn deltas() -> Vec<GestureDelta> {
        let mut out = Vec::new();
        for i in 0..200 {
            let x = ((i * 37) % 101) as f64 - 50.0;
            let y = ((i * 53) % 89) as f64 - 44.0;
            out.push(GestureDelta::new(x * (1 + i % 4) as f64, y * (1 + i % 3) as f64));
        }
        out
    }

    #[test]
    fn test_zoom_at_minimum_boundary() {
        let state = ViewportState::new(0, 30);
        let next = scroll_zoom(state, GestureDelta::new(0.0, 10.0), 100, &config());
        assert_eq!(next.candles_shown, 30);

        let next = scroll_zoom(state, GestureDelta::new(0.0, -10.0), 100, &config());
        assert!(next.candles_shown > 30);
    }

    #[test]
    fn test_zoom_step() {
        // 0.12 * max(0.3, 50 / 97 * 3) * -100 rounds to -19
        let next = scroll_zoom(ViewportState::new(0, 50), GestureDelta::new(0.0, -100.0), 100, &config());
        assert_eq!(next.candles_shown, 69);
    }

    #[test]
    fn test_zoom_clamped_to_history() {
        let next = scroll_zoom(ViewportState::new(10, 80), GestureDelta::new(0.0, -500.0), 100, &config());
        assert_eq!(next.candles_shown, 87);
        assert_eq!(next.shift, 10);
    }

    #[test]
    fn test_zoom_out_of_bounds_recovers() {
        let state = ViewportState::new(0, 120);
        let further = scroll_zoom(state, GestureDelta::new(0.0, -10.0), 100, &config());
        assert_eq!(further, state);
        let back = scroll_zoom(state, GestureDelta::new(0.0, 10.0), 100, &config());
        assert_eq!(back.candles_shown, 97);
    }

    #[test]
    fn test_pan_direction_and_bounds() {
        let state = ViewportState::new(20, 40);
        let older = scroll_zoom(state, GestureDelta::new(-50.0, 0.0), 200, &config());
        assert!(older.shift > 20);
        let newer = scroll_zoom(state, GestureDelta::new(50.0, 0.0), 200, &config());
        assert!(newer.shift < 20);

        let latest = scroll_zoom(ViewportState::new(0, 40), GestureDelta::new(500.0, 0.0), 200, &config());
        assert_eq!(latest.shift, 0);
        let oldest = scroll_zoom(ViewportState::new(0, 40), GestureDelta::new(-1e6, 0.0), 200, &config());
        assert_eq!(oldest.shift, 197 - 40);
    }

    #[test]
    fn test_bounds_hold_for_any_sequence() {
        let config = config();
        let total = 150;
        let max_candles = total - config.overscroll_margin;
        let mut state = ViewportState::new(0, 60);
        for delta in deltas() {
            state = scroll_zoom(state, delta, total, &config);
            assert!(state.candles_shown >= config.min_candles_shown);
            assert!(state.shift + state.candles_shown <= max_candles, "{state:?}");
        }
    }

    #[test]
    fn test_tiny_history_is_left_alone() {
        let state = ViewportState::new(0, 30);
        assert_eq!(scroll_zoom(state, GestureDelta::new(10.0, 10.0), 2, &config()), state);
    }

    #[test]
    fn test_history_shrink_reset() {
        let state = ViewportState::new(50, 80);
        let next = on_history_changed(state, 60, &config());
        assert_eq!(next, ViewportState::new(0, 60));

        // still fits
        assert_eq!(on_history_changed(state, 200, &config()), state);
        // too short to draw at all
        assert_eq!(on_history_changed(state, 20, &config()), state);
    }

    #[test]
    fn test_deselect_resets() {
        assert_eq!(reset_for_deselect(&config()), ViewportState::new(0, 100));
    }

    #[test]
    fn test_focus_trade() {
        assert_eq!(focus_trade(40, 55, 100, &config()), ViewportState::new(35, 35));
        // short trades still show the minimum
        assert_eq!(focus_trade(90, 92, 100, &config()).candles_shown, 30);
        // trades near the start of history are capped by the shift limit
        assert_eq!(focus_trade(2, 5, 100, &config()), ViewportState::new(60, 30));
    }

    fn history_with_trade(start: usize, end: usize) -> Vec<CandleData> {
        let t = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut history: Vec<CandleData> = (0..100).map(|_| CandleData::new(t, t, 1.0, 2.0, 0.5, 1.5)).collect();
        let leg = |start_flag: bool, end_flag: bool| AssignedTrade {
            trade_id: 5,
            trade_type: TradeType::Long,
            buy_price: 1.0,
            sell_price: 1.5,
            profit: 0.5,
            is_this_candle_start: start_flag,
            is_this_candle_end: end_flag,
        };
        history[start].trades.push(leg(true, false));
        history[end].trades.push(leg(false, true));
        history
    }

    #[test]
    fn test_focus_on_trade() {
        let history = history_with_trade(40, 55);
        assert_eq!(focus_on_trade(&history, 5, &config()), Some(ViewportState::new(35, 35)));
        assert_eq!(focus_on_trade(&history, 6, &config()), None);
    }

    #[test]
    fn test_drag_pan() {
        let mut drag = DragPan::default();
        assert_eq!(drag.pointer_move(10.0), None);
        drag.pointer_down(100.0);
        assert_eq!(drag.pointer_move(130.0), Some(GestureDelta::new(-30.0, 0.0)));
        assert_eq!(drag.pointer_move(120.0), Some(GestureDelta::new(10.0, 0.0)));
        drag.pointer_leave();
        assert!(!drag.is_dragging());
    }

    #[test]
    fn test_pinch_zoom() {
        let mut pinch = PinchZoom::default();
        assert_eq!(pinch.update(1.2, 100.0), None);
        pinch.start(1.0);
        let delta = pinch.update(1.25, 100.0).unwrap();
        assert_eq!(delta.x, 0.0);
        assert!((delta.y - 25.0).abs() < 1e-9);
        pinch.end();
        assert!(!pinch.is_active());
    }

    #[test]
    fn test_controller_toggles() {
        let mut settings = ChartSettings::default();
        settings.zoom = false;
        let mut controller = GestureController::new(config(), &settings).with_state(ViewportState::new(10, 50));
        let state = controller.wheel(GestureDelta::new(0.0, -100.0), 200);
        assert_eq!(state, ViewportState::new(10, 50));
        let state = controller.wheel(GestureDelta::new(50.0, -100.0), 200);
        assert_eq!(state.candles_shown, 50);
        assert!(state.shift < 10);
    }

    #[test]
    fn test_controller_pinch_suppresses_wheel() {
        let mut controller = GestureController::new(config(), &ChartSettings::default()).with_state(ViewportState::new(0, 60));
        controller.pinch_start(1.0);
        assert_eq!(controller.wheel(GestureDelta::new(0.0, -200.0), 200), ViewportState::new(0, 60));
        let state = controller.pinch_update(1.5, 200);
        assert!(state.candles_shown < 60);
        controller.pinch_end();
        let state = controller.wheel(GestureDelta::new(0.0, -200.0), 200);
        assert!(state.candles_shown > 50);
    }

    #[test]
    fn test_controller_drag_and_selection() {
        let mut controller = GestureController::new(config(), &ChartSettings::default());
        controller.pointer_down(200.0);
        let state = controller.pointer_move(300.0, 300);
        assert!(state.shift > 0);
        controller.pointer_up();
        assert_eq!(controller.pointer_move(400.0, 300), state);

        let history = history_with_trade(40, 55);
        assert_eq!(controller.select_trade(&history, Some(5)), ViewportState::new(35, 35));
        assert_eq!(controller.select_trade(&history, Some(9)), ViewportState::new(35, 35));
        assert_eq!(controller.select_trade(&history, None), ViewportState::new(0, 100));
        assert_eq!(controller.history_changed(60), ViewportState::new(0, 60));
    }
}
