//! Background pattern rendering.
//!
//! Every render starts with a full clear and a paper fill, so redrawing the
//! same pattern at the same size always produces the same pixels no matter
//! what was on the surface before.

use crate::model::{Background, Color, Point};
use crate::surface::Surface;
use serde::{Deserialize, Serialize};

/// Smallest pattern spacing, in logical units. Finer spacings are drawn at
/// this spacing.
pub const MIN_SPACING: f64 = 1.0;

/// Colors, spacings and widths used by the patterns. All lengths are
/// logical units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundStyle {
    pub paper: Color,
    /// Minor rule color (grid, lines, dots, fine graph grid).
    pub minor: Color,
    /// Heavy graph rule color.
    pub major: Color,
    pub minor_width: f64,
    pub major_width: f64,
    pub grid_spacing: f64,
    pub line_spacing: f64,
    pub dot_spacing: f64,
    pub dot_radius: f64,
    /// Heavy graph rules every `graph_major_every` minor cells.
    pub graph_major_every: u32,
}

impl Default for BackgroundStyle {
    fn default() -> Self {
        Self {
            paper: Color::WHITE,
            minor: Color::from_rgba8(0xE5, 0xE7, 0xEB, 0xFF),
            major: Color::from_rgba8(0xD1, 0xD5, 0xDB, 0xFF),
            minor_width: 0.5,
            major_width: 1.0,
            grid_spacing: 20.0,
            line_spacing: 30.0,
            dot_spacing: 20.0,
            dot_radius: 1.0,
            graph_major_every: 5,
        }
    }
}

impl BackgroundStyle {
    /// Reject spacings below [`MIN_SPACING`] and non-finite or negative
    /// widths and radii.
    ///
    /// # Errors
    /// Names the first offending field.
    pub fn validate(&self) -> Result<(), String> {
        for (name, spacing) in [
            ("grid_spacing", self.grid_spacing),
            ("line_spacing", self.line_spacing),
            ("dot_spacing", self.dot_spacing),
        ] {
            if !(spacing.is_finite() && spacing >= MIN_SPACING) {
                return Err(format!("{name} must be at least {MIN_SPACING}, got {spacing}"));
            }
        }
        for (name, len) in [
            ("minor_width", self.minor_width),
            ("major_width", self.major_width),
            ("dot_radius", self.dot_radius),
        ] {
            if !(len.is_finite() && len >= 0.0) {
                return Err(format!("{name} must be a non-negative number, got {len}"));
            }
        }
        Ok(())
    }
}

/// Wipe the `width × height` logical area and draw `pattern` over white.
pub fn render_background<S: Surface + ?Sized>(
    surface: &mut S,
    pattern: Background,
    width: f64,
    height: f64,
    style: &BackgroundStyle,
) {
    log::trace!("BACKGROUND {} {width}x{height}", pattern.name());

    surface.clear_rect(0.0, 0.0, width, height);
    surface.set_fill_color(style.paper);
    surface.fill_rect(0.0, 0.0, width, height);

    surface.set_stroke_color(style.minor);
    surface.set_line_width(style.minor_width);

    match pattern {
        Background::Blank => {}
        Background::Grid => {
            grid(surface, width, height, spacing(style.grid_spacing));
        }
        Background::Lines => {
            let step = spacing(style.line_spacing);
            surface.begin_path();
            for y in steps(step, step, height) {
                surface.move_to(Point::new(0.0, y));
                surface.line_to(Point::new(width, y));
            }
            surface.stroke();
        }
        Background::Dots => {
            let step = spacing(style.dot_spacing);
            surface.set_fill_color(style.minor);
            for x in steps(step, step, width) {
                for y in steps(step, step, height) {
                    surface.begin_path();
                    surface.arc(Point::new(x, y), style.dot_radius);
                    surface.fill();
                }
            }
        }
        Background::Graph => {
            let minor = spacing(style.grid_spacing);
            grid(surface, width, height, minor);

            if style.graph_major_every > 0 {
                surface.set_stroke_color(style.major);
                surface.set_line_width(style.major_width);
                grid(surface, width, height, minor * f64::from(style.graph_major_every));
            }
        }
    }
}

/// One path of vertical and horizontal rules from 0 through the far edge.
fn grid<S: Surface + ?Sized>(surface: &mut S, width: f64, height: f64, spacing: f64) {
    surface.begin_path();
    for x in steps(0.0, spacing, width) {
        surface.move_to(Point::new(x, 0.0));
        surface.line_to(Point::new(x, height));
    }
    for y in steps(0.0, spacing, height) {
        surface.move_to(Point::new(0.0, y));
        surface.line_to(Point::new(width, y));
    }
    surface.stroke();
}

fn spacing(requested: f64) -> f64 {
    if requested.is_finite() {
        requested.max(MIN_SPACING)
    } else {
        MIN_SPACING
    }
}

/// `start, start + step, …` up to and including `end`. Empty for a
/// non-positive step.
fn steps(start: f64, step: f64, end: f64) -> impl Iterator<Item = f64> {
    let count = if step > 0.0 && step.is_finite() && end >= start {
        (((end - start) / step).floor() as usize).saturating_add(1)
    } else {
        0
    };
    (0..count).map(move |i| start + step * i as f64)
}
