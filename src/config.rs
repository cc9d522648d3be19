//! Monitor configuration: window presets, refresh cadence, render budget,
//! and JSON persistence of user settings.

use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ─────────────────────────────────────────────────────────────────────────────
// Window presets
// ─────────────────────────────────────────────────────────────────────────────

/// A selectable look-back span. `seconds = None` means unbounded (show the
/// entire history).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowPreset {
    pub label: String,
    pub seconds: Option<f64>,
}

impl WindowPreset {
    fn new(label: &str, seconds: Option<f64>) -> Self {
        Self {
            label: label.to_string(),
            seconds,
        }
    }
}

/// The built-in window presets, in menu order.
pub static WINDOW_PRESETS: Lazy<Vec<WindowPreset>> = Lazy::new(|| {
    vec![
        WindowPreset::new("10m", Some(600.0)),
        WindowPreset::new("30m", Some(1_800.0)),
        WindowPreset::new("60m", Some(3_600.0)),
        WindowPreset::new("4h", Some(14_400.0)),
        WindowPreset::new("1D", Some(86_400.0)),
        WindowPreset::new("∞", None),
    ]
});

/// Default look-back span in seconds.
pub const DEFAULT_WINDOW_SECS: f64 = 600.0;
/// Default tick cadence in milliseconds.
pub const DEFAULT_REFRESH_INTERVAL_MS: u64 = 1_000;

// ─────────────────────────────────────────────────────────────────────────────
// Render budget
// ─────────────────────────────────────────────────────────────────────────────

/// Knobs bounding how many points reach the renderer per channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderBudget {
    /// Reduced points per pixel of render surface width.
    pub points_per_pixel: f64,
    /// Floor for the point budget, so narrow surfaces still get detail.
    pub min_points: usize,
    /// Number of trailing raw samples that always bypass reduction.
    pub tail_len: usize,
}

impl Default for RenderBudget {
    fn default() -> Self {
        Self {
            points_per_pixel: 1.2,
            min_points: 200,
            tail_len: 60,
        }
    }
}

impl RenderBudget {
    /// Point budget for a render surface `plot_px` pixels wide.
    pub fn max_points(&self, plot_px: u32) -> usize {
        let px = plot_px.max(1) as f64;
        ((px * self.points_per_pixel) as usize).max(self.min_points)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// MonitorSettings
// ─────────────────────────────────────────────────────────────────────────────

/// User-facing settings, persisted as JSON between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorSettings {
    /// Selected look-back span in seconds; `None` = unbounded.
    pub window_secs: Option<f64>,
    /// Tick cadence in milliseconds.
    pub refresh_interval_ms: u64,
    /// Render point budget.
    pub budget: RenderBudget,
    /// EMA coefficient for un-downsampled windows.
    pub smoothing_alpha: f64,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            window_secs: Some(DEFAULT_WINDOW_SECS),
            refresh_interval_ms: DEFAULT_REFRESH_INTERVAL_MS,
            budget: RenderBudget::default(),
            smoothing_alpha: crate::data::smooth::DEFAULT_ALPHA,
        }
    }
}

/// Errors from loading or saving the settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings JSON invalid: {0}")]
    Json(#[from] serde_json::Error),
}

impl MonitorSettings {
    /// Load settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Save settings to a JSON file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }
}
