//! CPU raster surface.
//!
//! Paths are built in logical units with `kurbo`, strokes are expanded to
//! outlines with `kurbo::stroke`, and outlines are filled with a 4×4
//! supersampled non-zero scanline rasterizer. Compositing is plain
//! source-over on straight (non-premultiplied) RGBA8.

use kurbo::{Affine, BezPath, Cap, Circle, Join, PathEl, Shape, StrokeOpts};
use wb_core::model::{Color, LineCap, LineJoin, Point};
use wb_core::surface::Surface;

/// Subsamples per pixel along each axis.
const SUBSAMPLES: usize = 4;
/// Curve flattening tolerance in device pixels.
const TOLERANCE: f64 = 0.05;

pub struct RasterSurface {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
    scale: f64,
    stroke_color: Color,
    fill_color: Color,
    line_width: f64,
    cap: LineCap,
    join: LineJoin,
    path: BezPath,
    /// Start of the current subpath, for `close_path` and `line_to` after it.
    subpath_start: Option<kurbo::Point>,
    /// True when the last subpath was closed and a new one hasn't begun.
    closed: bool,
}

impl RasterSurface {
    /// A transparent surface of `width × height` device pixels.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0; 4]; width as usize * height as usize],
            scale: 1.0,
            stroke_color: Color::BLACK,
            fill_color: Color::BLACK,
            line_width: 1.0,
            cap: LineCap::Butt,
            join: LineJoin::Miter,
            path: BezPath::new(),
            subpath_start: None,
            closed: false,
        }
    }

    /// Read one device pixel as straight RGBA8.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y as usize * self.width as usize + x as usize])
    }

    /// Read the device pixel under a logical point.
    pub fn pixel_at(&self, p: Point) -> Option<[u8; 4]> {
        let x = (p.x * self.scale).floor();
        let y = (p.y * self.scale).floor();
        if x < 0.0 || y < 0.0 {
            return None;
        }
        self.pixel(x as u32, y as u32)
    }

    pub fn pixels(&self) -> &[[u8; 4]] {
        &self.pixels
    }

    fn transform(&self) -> Affine {
        Affine::scale(self.scale)
    }

    fn kurbo_stroke(&self) -> kurbo::Stroke {
        let cap = match self.cap {
            LineCap::Butt => Cap::Butt,
            LineCap::Round => Cap::Round,
            LineCap::Square => Cap::Square,
        };
        let join = match self.join {
            LineJoin::Miter => Join::Miter,
            LineJoin::Round => Join::Round,
            LineJoin::Bevel => Join::Bevel,
        };
        kurbo::Stroke::new(self.line_width)
            .with_caps(cap)
            .with_join(join)
    }

    /// Start a subpath at `p` if there is no open one to continue.
    fn ensure_open(&mut self, p: kurbo::Point) -> bool {
        if self.subpath_start.is_none() {
            self.path.move_to(p);
            self.subpath_start = Some(p);
            self.closed = false;
            return false;
        }
        if self.closed
            && let Some(start) = self.subpath_start
        {
            self.path.move_to(start);
            self.closed = false;
        }
        true
    }

    fn paint(&mut self, outline: &BezPath, op: Composite) {
        let Some(mask) = rasterize(outline, self.width, self.height) else {
            return;
        };
        let stride = self.width as usize;
        for row in 0..mask.h {
            for col in 0..mask.w {
                let cov = mask.cov[row * mask.w + col].min(1.0);
                if cov <= 0.0 {
                    continue;
                }
                let px = &mut self.pixels[(mask.y0 + row) * stride + mask.x0 + col];
                *px = op.apply(*px, cov);
            }
        }
    }
}

impl Surface for RasterSurface {
    type Snapshot = Vec<[u8; 4]>;

    fn backing_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize_backing(&mut self, width: u32, height: u32) {
        *self = Self::new(width, height);
    }

    fn set_scale(&mut self, scale: f64) {
        if scale.is_finite() && scale > 0.0 {
            self.scale = scale;
        }
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.stroke_color = color;
    }

    fn set_fill_color(&mut self, color: Color) {
        self.fill_color = color;
    }

    fn set_line_width(&mut self, width: f64) {
        // Canvas ignores non-positive and non-finite widths.
        if width.is_finite() && width > 0.0 {
            self.line_width = width;
        }
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.cap = cap;
    }

    fn set_line_join(&mut self, join: LineJoin) {
        self.join = join;
    }

    fn begin_path(&mut self) {
        self.path = BezPath::new();
        self.subpath_start = None;
        self.closed = false;
    }

    fn move_to(&mut self, p: Point) {
        let p = kurbo::Point::new(p.x, p.y);
        self.path.move_to(p);
        self.subpath_start = Some(p);
        self.closed = false;
    }

    fn line_to(&mut self, p: Point) {
        let p = kurbo::Point::new(p.x, p.y);
        if self.ensure_open(p) {
            self.path.line_to(p);
        }
    }

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.path.move_to((x, y));
        self.path.line_to((x + width, y));
        self.path.line_to((x + width, y + height));
        self.path.line_to((x, y + height));
        self.path.close_path();
        self.subpath_start = Some(kurbo::Point::new(x, y));
        self.closed = true;
    }

    fn arc(&mut self, center: Point, radius: f64) {
        if !(radius.is_finite() && radius >= 0.0) {
            return;
        }
        let circle = Circle::new((center.x, center.y), radius);
        let open = self.subpath_start.is_some() && !self.closed;
        for el in circle.path_elements(TOLERANCE) {
            match el {
                // An open subpath is joined to the arc start, as on a canvas.
                PathEl::MoveTo(p) if open => self.path.line_to(p),
                PathEl::MoveTo(p) => {
                    self.path.move_to(p);
                    self.subpath_start = Some(p);
                    self.closed = false;
                }
                PathEl::ClosePath => {}
                other => self.path.push(other),
            }
        }
    }

    fn close_path(&mut self) {
        if self.subpath_start.is_some() && !self.closed {
            self.path.close_path();
            self.closed = true;
        }
    }

    fn stroke(&mut self) {
        if self.path.elements().is_empty() {
            return;
        }
        let mut outline = kurbo::stroke(
            self.path.iter(),
            &self.kurbo_stroke(),
            &StrokeOpts::default(),
            TOLERANCE / self.scale,
        );
        outline.apply_affine(self.transform());
        self.paint(&outline, Composite::Over(self.stroke_color));
    }

    fn fill(&mut self) {
        if self.path.elements().is_empty() {
            return;
        }
        let mut area = self.path.clone();
        area.apply_affine(self.transform());
        self.paint(&area, Composite::Over(self.fill_color));
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let area = self.transform() * kurbo::Rect::new(x, y, x + width, y + height).to_path(TOLERANCE);
        self.paint(&area, Composite::Over(self.fill_color));
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let area = self.transform() * kurbo::Rect::new(x, y, x + width, y + height).to_path(TOLERANCE);
        self.paint(&area, Composite::Clear);
    }

    fn snapshot(&self) -> Option<Self::Snapshot> {
        Some(self.pixels.clone())
    }

    fn restore(&mut self, snapshot: &Self::Snapshot) {
        if snapshot.len() == self.pixels.len() {
            self.pixels.copy_from_slice(snapshot);
        } else {
            log::debug!("snapshot size mismatch, restore skipped");
        }
    }
}

// ─── Compositing ─────────────────────────────────────────────────────────

#[derive(Clone, Copy)]
enum Composite {
    Over(Color),
    Clear,
}

impl Composite {
    fn apply(self, dst: [u8; 4], coverage: f32) -> [u8; 4] {
        match self {
            Composite::Clear => {
                if coverage >= 1.0 {
                    return [0; 4];
                }
                let a = f32::from(dst[3]) * (1.0 - coverage);
                [dst[0], dst[1], dst[2], a.round() as u8]
            }
            Composite::Over(color) => {
                let sa = color.a.clamp(0.0, 1.0) * coverage;
                if sa >= 1.0 {
                    return color.to_rgba8();
                }
                let src = [color.r, color.g, color.b];
                let da = f32::from(dst[3]) / 255.0;
                let out_a = sa + da * (1.0 - sa);
                if out_a <= 0.0 {
                    return [0; 4];
                }
                let mut out = [0u8; 4];
                for i in 0..3 {
                    let dc = f32::from(dst[i]) / 255.0;
                    let c = (src[i].clamp(0.0, 1.0) * sa + dc * da * (1.0 - sa)) / out_a;
                    out[i] = (c * 255.0).round() as u8;
                }
                out[3] = (out_a * 255.0).round() as u8;
                out
            }
        }
    }
}

// ─── Scanline rasterizer ─────────────────────────────────────────────────

/// Per-pixel coverage over the clipped bounding box of a path.
struct Mask {
    x0: usize,
    y0: usize,
    w: usize,
    h: usize,
    cov: Vec<f32>,
}

/// A flattened edge, stored top to bottom with its original direction.
struct Edge {
    xa: f64,
    ya: f64,
    xb: f64,
    yb: f64,
    winding: i32,
}

impl Edge {
    fn new(from: kurbo::Point, to: kurbo::Point) -> Option<Self> {
        if from.y == to.y {
            return None;
        }
        let (a, b, winding) = if from.y < to.y {
            (from, to, 1)
        } else {
            (to, from, -1)
        };
        Some(Self {
            xa: a.x,
            ya: a.y,
            xb: b.x,
            yb: b.y,
            winding,
        })
    }

    fn x_at(&self, y: f64) -> f64 {
        self.xa + (y - self.ya) * (self.xb - self.xa) / (self.yb - self.ya)
    }
}

/// Flatten a path into edges, closing every subpath.
fn edges(path: &BezPath) -> Vec<Edge> {
    let mut out = Vec::new();
    let mut start = kurbo::Point::ZERO;
    let mut last: Option<kurbo::Point> = None;
    kurbo::flatten(path.iter(), TOLERANCE, |el| match el {
        PathEl::MoveTo(p) => {
            if let Some(l) = last {
                out.extend(Edge::new(l, start));
            }
            start = p;
            last = Some(p);
        }
        PathEl::LineTo(p) => {
            if let Some(l) = last {
                out.extend(Edge::new(l, p));
            }
            last = Some(p);
        }
        PathEl::ClosePath => {
            if let Some(l) = last {
                out.extend(Edge::new(l, start));
            }
            last = Some(start);
        }
        _ => {}
    });
    if let Some(l) = last {
        out.extend(Edge::new(l, start));
    }
    out
}

fn rasterize(path: &BezPath, width: u32, height: u32) -> Option<Mask> {
    let bbox = path.bounding_box();
    if !(bbox.x0.is_finite() && bbox.y0.is_finite() && bbox.x1.is_finite() && bbox.y1.is_finite())
    {
        return None;
    }
    let x0 = bbox.x0.floor().max(0.0) as usize;
    let y0 = bbox.y0.floor().max(0.0) as usize;
    let x1 = (bbox.x1.ceil().max(0.0) as usize).min(width as usize);
    let y1 = (bbox.y1.ceil().max(0.0) as usize).min(height as usize);
    if x0 >= x1 || y0 >= y1 {
        return None;
    }

    let edges = edges(path);
    let (w, h) = (x1 - x0, y1 - y0);
    let mut cov = vec![0.0f32; w * h];
    let ss = SUBSAMPLES as f64;
    let weight = 1.0 / (SUBSAMPLES * SUBSAMPLES) as f32;
    let col_lo = (x0 * SUBSAMPLES) as i64;
    let col_hi = (x1 * SUBSAMPLES) as i64;
    let mut crossings: Vec<(f64, i32)> = Vec::new();

    for sub_row in y0 * SUBSAMPLES..y1 * SUBSAMPLES {
        let sy = (sub_row as f64 + 0.5) / ss;
        crossings.clear();
        crossings.extend(
            edges
                .iter()
                .filter(|e| e.ya <= sy && sy < e.yb)
                .map(|e| (e.x_at(sy), e.winding)),
        );
        if crossings.is_empty() {
            continue;
        }
        crossings.sort_by(|a, b| a.0.total_cmp(&b.0));

        let row = sub_row / SUBSAMPLES - y0;
        let mut winding = 0;
        let mut span_start = 0.0;
        for &(x, dir) in &crossings {
            if winding != 0 {
                // Subsample columns whose centers lie in [span_start, x).
                let c0 = ((span_start * ss - 0.5).ceil() as i64).max(col_lo);
                let c1 = ((x * ss - 0.5).ceil() as i64).min(col_hi);
                for c in c0..c1 {
                    let px = c as usize / SUBSAMPLES - x0;
                    cov[row * w + px] += weight;
                }
            }
            winding += dir;
            span_start = x;
        }
    }

    Some(Mask { x0, y0, w, h, cov })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const WHITE: [u8; 4] = [255, 255, 255, 255];
    const BLACK: [u8; 4] = [0, 0, 0, 255];

    #[test]
    fn starts_transparent() {
        let s = RasterSurface::new(4, 3);
        assert_eq!(s.backing_size(), (4, 3));
        assert!(s.pixels().iter().all(|p| *p == [0; 4]));
        assert_eq!(s.pixel(4, 0), None);
    }

    #[test]
    fn fill_rect_covers_whole_pixels() {
        let mut s = RasterSurface::new(10, 10);
        s.set_fill_color(Color::WHITE);
        s.fill_rect(2.0, 2.0, 4.0, 4.0);
        assert_eq!(s.pixel(2, 2), Some(WHITE));
        assert_eq!(s.pixel(5, 5), Some(WHITE));
        assert_eq!(s.pixel(6, 6), Some([0; 4]));
        assert_eq!(s.pixel(1, 2), Some([0; 4]));
    }

    #[test]
    fn scale_applies_to_fill_rect() {
        let mut s = RasterSurface::new(10, 10);
        s.set_scale(2.0);
        s.set_fill_color(Color::BLACK);
        s.fill_rect(0.0, 0.0, 2.0, 2.0);
        assert_eq!(s.pixel(3, 3), Some(BLACK));
        assert_eq!(s.pixel(4, 4), Some([0; 4]));
    }

    #[test]
    fn clear_rect_resets_to_transparent() {
        let mut s = RasterSurface::new(8, 8);
        s.set_fill_color(Color::BLACK);
        s.fill_rect(0.0, 0.0, 8.0, 8.0);
        s.clear_rect(0.0, 0.0, 4.0, 8.0);
        assert_eq!(s.pixel(0, 0), Some([0; 4]));
        assert_eq!(s.pixel(7, 7), Some(BLACK));
    }

    #[test]
    fn wide_stroke_paints_solid_center() {
        let mut s = RasterSurface::new(40, 20);
        s.set_stroke_color(Color::BLACK);
        s.set_line_width(6.0);
        s.begin_path();
        s.move_to(Point::new(5.0, 10.0));
        s.line_to(Point::new(35.0, 10.0));
        s.stroke();
        assert_eq!(s.pixel(20, 9), Some(BLACK));
        assert_eq!(s.pixel(20, 10), Some(BLACK));
        assert_eq!(s.pixel(20, 2), Some([0; 4]));
    }

    #[test]
    fn hairline_leaves_partial_coverage() {
        let mut s = RasterSurface::new(40, 40);
        s.set_fill_color(Color::WHITE);
        s.fill_rect(0.0, 0.0, 40.0, 40.0);
        s.set_stroke_color(Color::BLACK);
        s.set_line_width(0.5);
        s.begin_path();
        s.move_to(Point::new(20.0, 0.0));
        s.line_to(Point::new(20.0, 40.0));
        s.stroke();
        let [r, _, _, a] = s.pixel(20, 10).unwrap();
        assert_eq!(a, 255);
        assert!(r < 255 && r > 0, "expected a grey hairline pixel, got {r}");
    }

    #[test]
    fn filled_circle() {
        let mut s = RasterSurface::new(20, 20);
        s.set_fill_color(Color::BLACK);
        s.begin_path();
        s.arc(Point::new(10.0, 10.0), 5.0);
        s.fill();
        assert_eq!(s.pixel(10, 10), Some(BLACK));
        assert_eq!(s.pixel(1, 1), Some([0; 4]));
    }

    #[test]
    fn negative_rect_strokes_same_outline() {
        let mut a = RasterSurface::new(30, 30);
        let mut b = RasterSurface::new(30, 30);
        for (s, (x, y, w, h)) in [
            (&mut a, (5.0, 5.0, 20.0, 10.0)),
            (&mut b, (25.0, 15.0, -20.0, -10.0)),
        ] {
            s.set_line_width(2.0);
            s.begin_path();
            s.rect(x, y, w, h);
            s.stroke();
        }
        assert_eq!(a.pixels(), b.pixels());
    }

    #[test]
    fn snapshot_restores_pixels() {
        let mut s = RasterSurface::new(8, 8);
        let snap = s.snapshot().unwrap();
        s.set_fill_color(Color::BLACK);
        s.fill_rect(0.0, 0.0, 8.0, 8.0);
        s.restore(&snap);
        assert!(s.pixels().iter().all(|p| *p == [0; 4]));
    }

    #[test]
    fn resize_discards_content_and_transform() {
        let mut s = RasterSurface::new(8, 8);
        s.set_scale(2.0);
        s.set_fill_color(Color::BLACK);
        s.fill_rect(0.0, 0.0, 8.0, 8.0);
        s.resize_backing(4, 4);
        assert_eq!(s.backing_size(), (4, 4));
        assert!(s.pixels().iter().all(|p| *p == [0; 4]));
        assert_eq!(s.pixel_at(Point::new(3.5, 3.5)), Some([0; 4]));
    }
}
