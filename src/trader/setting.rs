//! Chart configuration: tuning constants and display toggles.
//!
//! Both records are fully specified and defaulted once, when they are built or
//! deserialized. Code further down never re-applies defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ChartError, Result};

/// Folder under the platform config directory holding saved profiles
pub const CONFIG_FOLDER: &str = "candle_canvas";

/// Tuning constants for the geometry mapper and the viewport reducer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Zoom speed applied to the vertical gesture component
    pub zoom_strength: f64,
    /// Pan speed applied to the horizontal gesture component
    pub shift_strength: f64,
    /// Smallest window a chart shows; shorter histories are not drawn
    pub min_candles_shown: usize,
    /// Window width restored after a reset
    pub initial_candles_shown: usize,
    /// Device pixels per CSS pixel
    pub scale_for_quality: f64,
    /// Candles kept free at the left edge so the window never overscrolls
    pub overscroll_margin: usize,
    /// Lower bound of the zoom speed multiplier
    pub zoom_min_multiplier: f64,
    /// Lower bound of the pan speed multiplier
    pub shift_min_multiplier: f64,
    /// Top/bottom padding band in candle widths
    pub gap_space_factor: f64,
    /// Slot width divided by gap width
    pub gap_ratio: f64,
    /// Oscillator panel height relative to the main chart
    pub ao_panel_ratio: f64,
    /// Headroom multiplier over the oscillator extremes
    pub ao_headroom: f64,
    /// Distance from the end of history where the live candle is written
    pub live_candle_offset: usize,
    /// Indicator lag used to place the last price label
    pub alligator_offset: usize,
    /// Candles left after the end leg when focusing a trade
    pub focus_trailing_candles: usize,
    /// Extra candles around a focused trade
    pub focus_margin_candles: usize,
    /// Focusing a trade never shifts closer than this to the start of history
    pub focus_max_shift_margin: usize,
    /// Slack used to decide whether a shorter history still fits the window
    pub history_reset_margin: usize,
    /// Vertical delta produced by a pinch scale change of 1.0
    pub pinch_sensitivity: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            zoom_strength: 0.12,
            shift_strength: 0.15,
            min_candles_shown: 30,
            initial_candles_shown: 100,
            scale_for_quality: 2.0,
            overscroll_margin: 3,
            zoom_min_multiplier: 0.3,
            shift_min_multiplier: 0.6,
            gap_space_factor: 4.5,
            gap_ratio: 5.0,
            ao_panel_ratio: 0.2,
            ao_headroom: 1.1,
            live_candle_offset: 9,
            alligator_offset: 8,
            focus_trailing_candles: 10,
            focus_margin_candles: 20,
            focus_max_shift_margin: 40,
            history_reset_margin: 3,
            pinch_sensitivity: 100.0,
        }
    }
}

/// Display toggles supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartSettings {
    pub all_trades_shown: bool,
    pub alligator: bool,
    pub ao: bool,
    pub mounted_indicators: bool,
    pub zoom: bool,
    pub scroll: bool,
    pub show_asset: bool,
    pub show_last_candle_price: bool,
    pub cursor: bool,
    pub resizable: bool,
    pub fullscreen: bool,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            all_trades_shown: false,
            alligator: true,
            ao: true,
            mounted_indicators: true,
            zoom: true,
            scroll: true,
            show_asset: false,
            show_last_candle_price: false,
            cursor: true,
            resizable: false,
            fullscreen: false,
        }
    }
}

/// Configuration and toggles saved together.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartProfile {
    pub config: ChartConfig,
    pub settings: ChartSettings,
}

impl ChartProfile {
    /// Path of a named profile under the platform config directory
    pub fn config_path(name: &str) -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ChartError::ConfigDirUnavailable)?
            .join(CONFIG_FOLDER);
        let filename = format!("{}_chart.json", name.replace('/', "_"));
        Ok(config_dir.join(filename))
    }

    /// Save profile as pretty JSON, creating parent folders
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        tracing::info!(path = %path.display(), "chart profile saved");
        Ok(())
    }

    /// Load profile; fields missing from the file keep their defaults
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        let profile: ChartProfile = serde_json::from_str(&json)?;
        tracing::info!(path = %path.display(), "chart profile loaded");
        Ok(profile)
    }

    /// Save under a name in the platform config directory
    pub fn save_named(&self, name: &str) -> Result<()> {
        self.save_to_file(&Self::config_path(name)?)
    }

    /// Load a named profile, falling back to defaults when none was saved
    pub fn load_named(name: &str) -> Result<Self> {
        let path = Self::config_path(name)?;
        if !path.exists() {
            tracing::warn!(path = %path.display(), "chart profile not found, using defaults");
            return Ok(Self::default());
        }
        Self::load_from_file(&path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_defaults() {
        let settings = ChartSettings::default();
        assert!(!settings.all_trades_shown);
        assert!(settings.alligator);
        assert!(settings.ao);
        assert!(settings.mounted_indicators);
        assert!(settings.zoom);
        assert!(settings.scroll);
        assert!(!settings.show_asset);
        assert!(!settings.show_last_candle_price);
        assert!(settings.cursor);
        assert!(!settings.resizable);
        assert!(!settings.fullscreen);
    }

    #[test]
    fn test_partial_settings_filled_with_defaults() {
        let settings: ChartSettings =
            serde_json::from_str(r#"{"zoom": false, "allTradesShown": true}"#).unwrap();
        assert!(!settings.zoom);
        assert!(settings.all_trades_shown);
        assert!(settings.scroll);
        assert!(settings.alligator);
    }

    #[test]
    fn test_partial_config_filled_with_defaults() {
        let config: ChartConfig = serde_json::from_str(r#"{"min_candles_shown": 50}"#).unwrap();
        assert_eq!(config.min_candles_shown, 50);
        assert_eq!(config.zoom_strength, 0.12);
        assert_eq!(config.overscroll_margin, 3);
    }

    #[test]
    fn test_profile_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("btc_chart.json");

        let mut profile = ChartProfile::default();
        profile.config.zoom_strength = 0.5;
        profile.settings.show_asset = true;
        profile.save_to_file(&path).unwrap();

        let loaded = ChartProfile::load_from_file(&path).unwrap();
        assert_eq!(loaded, profile);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ChartProfile::load_from_file(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ChartError::Io(_)));
    }
}
