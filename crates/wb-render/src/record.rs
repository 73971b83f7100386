//! Recording surface: keeps every draw call in order.
//!
//! Used where the exact primitive matters more than the pixels, e.g. to
//! check that a rectangle drag committed `rect(10, 10, 40, 20)`.

use wb_core::model::{Color, LineCap, LineJoin, Point};
use wb_core::surface::Surface;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Resize { width: u32, height: u32 },
    Scale(f64),
    StrokeColor(Color),
    FillColor(Color),
    LineWidth(f64),
    LineCap(LineCap),
    LineJoin(LineJoin),
    BeginPath,
    MoveTo(Point),
    LineTo(Point),
    Rect { x: f64, y: f64, width: f64, height: f64 },
    Arc { center: Point, radius: f64 },
    ClosePath,
    Stroke,
    Fill,
    FillRect { x: f64, y: f64, width: f64, height: f64 },
    ClearRect { x: f64, y: f64, width: f64, height: f64 },
    /// Restore to the log position captured by `snapshot`.
    Restore(usize),
}

impl DrawOp {
    /// Ops that change what is on the surface (as opposed to state setters
    /// and path building).
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            DrawOp::Resize { .. }
                | DrawOp::Stroke
                | DrawOp::Fill
                | DrawOp::FillRect { .. }
                | DrawOp::ClearRect { .. }
                | DrawOp::Restore(_)
        )
    }
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    ops: Vec<DrawOp>,
    /// Act like a back-end that cannot read pixels back.
    no_readback: bool,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
            no_readback: false,
        }
    }

    /// A surface whose `snapshot` always returns `None`.
    pub fn without_snapshots(mut self) -> Self {
        self.no_readback = true;
        self
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Current log position, for use with [`ops_since`](Self::ops_since).
    pub fn mark(&self) -> usize {
        self.ops.len()
    }

    pub fn ops_since(&self, mark: usize) -> &[DrawOp] {
        &self.ops[mark.min(self.ops.len())..]
    }

    pub fn mutation_count(&self) -> usize {
        self.ops.iter().filter(|op| op.is_mutation()).count()
    }

    /// The last rectangle, circle, or segment added to a path.
    pub fn last_primitive(&self) -> Option<&DrawOp> {
        self.ops
            .iter()
            .rev()
            .find(|op| matches!(op, DrawOp::Rect { .. } | DrawOp::Arc { .. } | DrawOp::LineTo(_)))
    }

    fn push(&mut self, op: DrawOp) {
        log::trace!("DRAW {op:?}");
        self.ops.push(op);
    }
}

impl Surface for RecordingSurface {
    type Snapshot = usize;

    fn backing_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize_backing(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.push(DrawOp::Resize { width, height });
    }

    fn set_scale(&mut self, scale: f64) {
        self.push(DrawOp::Scale(scale));
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.push(DrawOp::StrokeColor(color));
    }

    fn set_fill_color(&mut self, color: Color) {
        self.push(DrawOp::FillColor(color));
    }

    fn set_line_width(&mut self, width: f64) {
        self.push(DrawOp::LineWidth(width));
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.push(DrawOp::LineCap(cap));
    }

    fn set_line_join(&mut self, join: LineJoin) {
        self.push(DrawOp::LineJoin(join));
    }

    fn begin_path(&mut self) {
        self.push(DrawOp::BeginPath);
    }

    fn move_to(&mut self, p: Point) {
        self.push(DrawOp::MoveTo(p));
    }

    fn line_to(&mut self, p: Point) {
        self.push(DrawOp::LineTo(p));
    }

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.push(DrawOp::Rect {
            x,
            y,
            width,
            height,
        });
    }

    fn arc(&mut self, center: Point, radius: f64) {
        self.push(DrawOp::Arc { center, radius });
    }

    fn close_path(&mut self) {
        self.push(DrawOp::ClosePath);
    }

    fn stroke(&mut self) {
        self.push(DrawOp::Stroke);
    }

    fn fill(&mut self) {
        self.push(DrawOp::Fill);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.push(DrawOp::FillRect {
            x,
            y,
            width,
            height,
        });
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.push(DrawOp::ClearRect {
            x,
            y,
            width,
            height,
        });
    }

    fn snapshot(&self) -> Option<Self::Snapshot> {
        if self.no_readback {
            return None;
        }
        Some(self.ops.len())
    }

    fn restore(&mut self, snapshot: &Self::Snapshot) {
        self.push(DrawOp::Restore(*snapshot));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn records_in_order() {
        let mut s = RecordingSurface::new(10, 10);
        s.begin_path();
        s.rect(1.0, 2.0, 3.0, 4.0);
        s.stroke();
        assert_eq!(
            s.ops(),
            &[
                DrawOp::BeginPath,
                DrawOp::Rect {
                    x: 1.0,
                    y: 2.0,
                    width: 3.0,
                    height: 4.0
                },
                DrawOp::Stroke,
            ]
        );
        assert_eq!(s.mutation_count(), 1);
    }

    #[test]
    fn mark_and_last_primitive() {
        let mut s = RecordingSurface::new(10, 10);
        s.line_to(Point::new(1.0, 1.0));
        let mark = s.mark();
        s.arc(Point::ORIGIN, 5.0);
        s.set_line_width(3.0);
        assert_eq!(s.ops_since(mark).len(), 2);
        assert_eq!(
            s.last_primitive(),
            Some(&DrawOp::Arc {
                center: Point::ORIGIN,
                radius: 5.0
            })
        );
    }

    #[test]
    fn snapshot_is_log_position() {
        let mut s = RecordingSurface::new(10, 10);
        s.stroke();
        let snap = s.snapshot().unwrap();
        s.restore(&snap);
        assert_eq!(s.ops().last(), Some(&DrawOp::Restore(1)));
    }

    #[test]
    fn no_readback_has_no_snapshot() {
        let mut s = RecordingSurface::new(10, 10).without_snapshots();
        s.stroke();
        assert_eq!(s.snapshot(), None);
    }
}
