//! Canvas2D surface.
//!
//! Forwards every `Surface` call to an HTML `<canvas>` through
//! `CanvasRenderingContext2d`. Snapshots use `getImageData` /
//! `putImageData`, which work in device pixels and ignore the transform.

use wasm_bindgen::JsCast;
use wb_core::metrics::ClientRect;
use wb_core::model::{Color, LineCap, LineJoin, Point};
use wb_core::surface::Surface;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData};

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Wrap a canvas. Returns `None` when no 2D context is available.
    pub fn from_canvas(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { canvas, ctx })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// The canvas's current box in viewport coordinates.
    pub fn client_rect(&self) -> ClientRect {
        let r = self.canvas.get_bounding_client_rect();
        ClientRect::new(r.left(), r.top(), r.width(), r.height())
    }

    /// Set the CSS display size in layout pixels.
    pub fn set_display_size(&self, width: f64, height: f64) {
        let style = self.canvas.style();
        let _ = style.set_property("width", &format!("{width}px"));
        let _ = style.set_property("height", &format!("{height}px"));
    }

    /// Stop the browser from scrolling or zooming while the pen is down.
    pub fn disable_touch_gestures(&self) {
        let _ = self.canvas.style().set_property("touch-action", "none");
    }
}

impl Surface for CanvasSurface {
    type Snapshot = ImageData;

    fn backing_size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn resize_backing(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn set_scale(&mut self, scale: f64) {
        let _ = self.ctx.set_transform(scale, 0.0, 0.0, scale, 0.0, 0.0);
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.ctx.set_stroke_style_str(&color.to_hex());
    }

    fn set_fill_color(&mut self, color: Color) {
        self.ctx.set_fill_style_str(&color.to_hex());
    }

    fn set_line_width(&mut self, width: f64) {
        self.ctx.set_line_width(width);
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.ctx.set_line_cap(cap.css_name());
    }

    fn set_line_join(&mut self, join: LineJoin) {
        self.ctx.set_line_join(join.css_name());
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn move_to(&mut self, p: Point) {
        self.ctx.move_to(p.x, p.y);
    }

    fn line_to(&mut self, p: Point) {
        self.ctx.line_to(p.x, p.y);
    }

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.rect(x, y, width, height);
    }

    fn arc(&mut self, center: Point, radius: f64) {
        // Throws only for a negative radius.
        let _ = self
            .ctx
            .arc(center.x, center.y, radius, 0.0, std::f64::consts::TAU);
    }

    fn close_path(&mut self) {
        self.ctx.close_path();
    }

    fn stroke(&mut self) {
        self.ctx.stroke();
    }

    fn fill(&mut self) {
        self.ctx.fill();
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.fill_rect(x, y, width, height);
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.clear_rect(x, y, width, height);
    }

    fn snapshot(&self) -> Option<Self::Snapshot> {
        let (w, h) = self.backing_size();
        self.ctx
            .get_image_data(0.0, 0.0, f64::from(w), f64::from(h))
            .ok()
    }

    fn restore(&mut self, snapshot: &Self::Snapshot) {
        if let Err(e) = self.ctx.put_image_data(snapshot, 0.0, 0.0) {
            log::debug!("putImageData failed: {e:?}");
        }
    }
}
