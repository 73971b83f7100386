//! Surface sizing and pointer coordinate mapping.
//!
//! A surface has three sizes: the layout box measured from its container,
//! the backing resolution (`floor(layout × density)`), and the logical
//! size that drawing code sees once the density scale is applied.

use crate::model::Point;

/// The surface's box in viewport (client) coordinates, as reported by the
/// host at the time of an input event.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ClientRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ClientRect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// Resolved sizes for one layout pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceMetrics {
    pub layout_width: f64,
    pub layout_height: f64,
    pub density: f64,
    pub backing_width: u32,
    pub backing_height: u32,
}

impl Default for SurfaceMetrics {
    fn default() -> Self {
        Self::from_layout(0.0, 0.0, 1.0)
    }
}

impl SurfaceMetrics {
    /// Compute metrics for a container of `width × height` layout units on a
    /// display with the given pixel density. A density that is not a
    /// positive finite number is treated as 1.
    pub fn from_layout(width: f64, height: f64, density: f64) -> Self {
        let density = if density.is_finite() && density > 0.0 {
            density
        } else {
            log::debug!("invalid device pixel ratio {density}, using 1");
            1.0
        };
        let width = sanitize_extent(width);
        let height = sanitize_extent(height);
        Self {
            layout_width: width,
            layout_height: height,
            density,
            backing_width: (width * density).floor() as u32,
            backing_height: (height * density).floor() as u32,
        }
    }

    /// Size in logical units: backing resolution divided by density.
    pub fn logical_size(&self) -> (f64, f64) {
        (
            f64::from(self.backing_width) / self.density,
            f64::from(self.backing_height) / self.density,
        )
    }

    /// CSS display size, equal to the unscaled layout size.
    pub fn display_size(&self) -> (f64, f64) {
        (self.layout_width, self.layout_height)
    }

    /// Map a raw client position to logical surface coordinates.
    ///
    /// Subtracts the surface's viewport offset, scales by
    /// backing / displayed size, then divides out the density scale that
    /// the drawing context already applies. Returns `None` for a collapsed
    /// client rect.
    pub fn to_logical(&self, client_x: f64, client_y: f64, rect: &ClientRect) -> Option<Point> {
        if rect.width <= 0.0 || rect.height <= 0.0 {
            return None;
        }
        let scale_x = f64::from(self.backing_width) / rect.width;
        let scale_y = f64::from(self.backing_height) / rect.height;
        Some(Point::new(
            (client_x - rect.left) * scale_x / self.density,
            (client_y - rect.top) * scale_y / self.density,
        ))
    }

    /// Inverse of [`to_logical`](Self::to_logical).
    pub fn to_client(&self, p: Point, rect: &ClientRect) -> Option<(f64, f64)> {
        if self.backing_width == 0 || self.backing_height == 0 {
            return None;
        }
        let scale_x = rect.width / f64::from(self.backing_width);
        let scale_y = rect.height / f64::from(self.backing_height);
        Some((
            p.x * self.density * scale_x + rect.left,
            p.y * self.density * scale_y + rect.top,
        ))
    }
}

fn sanitize_extent(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { 0.0 }
}
