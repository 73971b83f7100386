//! Immediate-mode drawing surface.
//!
//! Mirrors the shape of an HTML canvas 2D context so the same board logic
//! drives a browser canvas, a CPU raster, or a recording back-end. All
//! path and rect coordinates are logical units; the back-end applies the
//! density scale set via [`Surface::set_scale`].

use crate::model::{Color, LineCap, LineJoin, Point};

pub trait Surface {
    /// Opaque copy of the surface contents, used to restore committed
    /// content under a shape preview.
    type Snapshot;

    /// Backing resolution in device pixels.
    fn backing_size(&self) -> (u32, u32);

    /// Resize the pixel buffer. Like a canvas, this discards contents,
    /// the current path, and the transform.
    fn resize_backing(&mut self, width: u32, height: u32);

    /// Replace the current transform with a uniform scale.
    fn set_scale(&mut self, scale: f64);

    fn set_stroke_color(&mut self, color: Color);
    fn set_fill_color(&mut self, color: Color);
    fn set_line_width(&mut self, width: f64);
    fn set_line_cap(&mut self, cap: LineCap);
    fn set_line_join(&mut self, join: LineJoin);

    fn begin_path(&mut self);
    fn move_to(&mut self, p: Point);
    fn line_to(&mut self, p: Point);
    /// Add a closed rectangle subpath. Negative extents are allowed.
    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    /// Add a full circle subpath.
    fn arc(&mut self, center: Point, radius: f64);
    fn close_path(&mut self);

    /// Stroke the current path with the current stroke state.
    fn stroke(&mut self);
    /// Fill the current path (non-zero rule) with the current fill color.
    fn fill(&mut self);

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    /// Reset the given area to transparent.
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Capture the current pixels. Back-ends that cannot read back return
    /// `None`.
    fn snapshot(&self) -> Option<Self::Snapshot>;

    /// Put a snapshot back, ignoring the current transform.
    fn restore(&mut self, snapshot: &Self::Snapshot);
}
