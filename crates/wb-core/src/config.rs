//! Board configuration.
//!
//! Hosts may pass a partial JSON object; every missing field falls back to
//! the defaults below.

use crate::background::BackgroundStyle;
use crate::model::{Background, Color, Tool};
use serde::{Deserialize, Serialize};

// ─── Config ───────────────────────────────────────────────────────────────

/// How a shape tool wipes its previous preview before drawing the next one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShapePreview {
    /// Snapshot the surface when the shape starts and restore it before
    /// each preview. Earlier strokes stay visible under the preview.
    /// Surfaces that cannot snapshot fall back to `RedrawBackground`.
    #[default]
    Snapshot,
    /// Redraw the whole background before each preview. Anything drawn
    /// earlier is wiped along with the previous preview.
    RedrawBackground,
}

/// Initial toolbar selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolbarDefaults {
    pub tool: Tool,
    pub color: Color,
    pub line_width: f64,
    pub background: Background,
}

impl Default for ToolbarDefaults {
    fn default() -> Self {
        Self {
            tool: Tool::Pencil,
            color: Color::BLACK,
            line_width: 2.0,
            background: Background::Blank,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WhiteboardConfig {
    pub background: BackgroundStyle,
    /// Stroke color the eraser paints with. Default: **#FFFFFF**.
    pub eraser_color: Color,
    /// Pen width multiplier: `width × pressure × gain`. Default: **2.0**.
    pub pressure_gain: f64,
    pub shape_preview: ShapePreview,
    pub toolbar: ToolbarDefaults,
}

impl Default for WhiteboardConfig {
    fn default() -> Self {
        Self {
            background: BackgroundStyle::default(),
            eraser_color: Color::WHITE,
            pressure_gain: 2.0,
            shape_preview: ShapePreview::default(),
            toolbar: ToolbarDefaults::default(),
        }
    }
}

impl WhiteboardConfig {
    /// Parse a (possibly partial) JSON config.
    ///
    /// # Errors
    /// Returns the deserializer message for malformed JSON or bad values,
    /// or the first out-of-range background length.
    pub fn from_json(json: &str) -> Result<Self, String> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| format!("invalid whiteboard config: {e}"))?;
        config
            .background
            .validate()
            .map_err(|e| format!("invalid whiteboard config: {e}"))?;
        Ok(config)
    }
}
