//! Toolbar selection.
//!
//! The toolbar itself is host UI; the board only reads its current values
//! and consumes its clear requests.

use wb_core::config::ToolbarDefaults;
use wb_core::model::{Background, Color, Tool};

/// Thinnest stroke the toolbar will hand out.
pub const MIN_LINE_WIDTH: f64 = 0.1;

#[derive(Debug, Clone, PartialEq)]
pub struct ToolbarState {
    pub tool: Tool,
    pub color: Color,
    pub background: Background,
    line_width: f64,
    clear_requested: bool,
}

impl Default for ToolbarState {
    fn default() -> Self {
        Self::from_defaults(&ToolbarDefaults::default())
    }
}

impl ToolbarState {
    pub fn from_defaults(defaults: &ToolbarDefaults) -> Self {
        let mut state = Self {
            tool: defaults.tool,
            color: defaults.color,
            background: defaults.background,
            line_width: MIN_LINE_WIDTH,
            clear_requested: false,
        };
        state.set_line_width(defaults.line_width);
        state
    }

    pub fn line_width(&self) -> f64 {
        self.line_width
    }

    /// Set the base stroke width. Non-finite values are ignored; tiny or
    /// negative ones clamp to [`MIN_LINE_WIDTH`].
    pub fn set_line_width(&mut self, width: f64) {
        if width.is_finite() {
            self.line_width = width.max(MIN_LINE_WIDTH);
        }
    }

    /// Fire-once clear command.
    pub fn request_clear(&mut self) {
        self.clear_requested = true;
    }

    /// Consume a pending clear request.
    pub fn take_clear_request(&mut self) -> bool {
        std::mem::take(&mut self.clear_requested)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_match_toolbar() {
        let t = ToolbarState::default();
        assert_eq!(t.tool, Tool::Pencil);
        assert_eq!(t.color, Color::BLACK);
        assert_eq!(t.line_width(), 2.0);
        assert_eq!(t.background, Background::Blank);
    }

    #[test]
    fn width_clamps() {
        let mut t = ToolbarState::default();
        t.set_line_width(-3.0);
        assert_eq!(t.line_width(), MIN_LINE_WIDTH);
        t.set_line_width(f64::NAN);
        assert_eq!(t.line_width(), MIN_LINE_WIDTH);
        t.set_line_width(8.0);
        assert_eq!(t.line_width(), 8.0);
    }

    #[test]
    fn clear_request_fires_once() {
        let mut t = ToolbarState::default();
        assert!(!t.take_clear_request());
        t.request_clear();
        t.request_clear();
        assert!(t.take_clear_request());
        assert!(!t.take_clear_request());
    }
}
