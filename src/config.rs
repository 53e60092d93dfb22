//! Engine configuration: highlight, handle and preview styling.
//!
//! Every field has a default, so a host can pass a partial JSON object and
//! only override what it cares about.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    HANDLE_FILL, HANDLE_RADIUS_PX, HANDLE_STROKE, HIGHLIGHT_COLOR, HIGHLIGHT_WIDTH, MOVER_FILL, PREVIEW_DASH_PX,
};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("{0} must not be empty")]
    Empty(&'static str),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Stroke color of the hovered or highlighted shape.
    pub highlight_color: String,
    /// Stroke width of the hovered or highlighted shape, in pixels.
    pub highlight_width: f64,
    /// Half-size of edit handles and their hit slop, in pixels.
    pub handle_radius_px: f64,
    pub handle_fill: String,
    pub handle_stroke: String,
    /// Fill of the mover region while editing.
    pub mover_fill: String,
    /// Dash length of the drawing preview stroke, in pixels.
    pub preview_dash_px: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            highlight_color: HIGHLIGHT_COLOR.to_string(),
            highlight_width: HIGHLIGHT_WIDTH,
            handle_radius_px: HANDLE_RADIUS_PX,
            handle_fill: HANDLE_FILL.to_string(),
            handle_stroke: HANDLE_STROKE.to_string(),
            mover_fill: MOVER_FILL.to_string(),
            preview_dash_px: PREVIEW_DASH_PX,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a (possibly partial) JSON config.
    ///
    /// # Errors
    ///
    /// Returns `Json` for malformed input and `NotPositive` / `Empty` for
    /// values the renderer cannot use.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that sizes are positive and colors are present.
    ///
    /// # Errors
    ///
    /// Returns the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("highlightWidth", self.highlight_width),
            ("handleRadiusPx", self.handle_radius_px),
            ("previewDashPx", self.preview_dash_px),
        ] {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        for (field, value) in [
            ("highlightColor", &self.highlight_color),
            ("handleFill", &self.handle_fill),
            ("handleStroke", &self.handle_stroke),
            ("moverFill", &self.mover_fill),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Empty(field));
            }
        }
        Ok(())
    }
}
