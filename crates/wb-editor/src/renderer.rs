//! Stroke renderer.
//!
//! Turns begin / continue / end events into drawing calls on the surface.
//! Every entry point is a no-op for viewers.
//!
//! | Tool | begin | continue | end |
//! |------|-------|----------|-----|
//! | pencil | open path at start | extend path, stroke | close path |
//! | eraser | same as pencil, painting with the eraser color | same | same |
//! | rect / circle / line | remember origin | restore, draw one preview | last preview stays |

use crate::input::PointerSample;
use crate::manager::SurfaceManager;
use crate::session::StrokeSession;
use crate::toolbar::ToolbarState;
use wb_core::config::{ShapePreview, WhiteboardConfig};
use wb_core::model::{Background, Color, LineCap, LineJoin, Point, Role, Tool};
use wb_core::surface::Surface;

pub struct StrokeRenderer<S: Surface> {
    role: Role,
    session: StrokeSession,
    /// Surface contents when the current shape stroke began.
    committed: Option<S::Snapshot>,
    eraser_color: Color,
    pressure_gain: f64,
    preview: ShapePreview,
}

impl<S: Surface> StrokeRenderer<S> {
    pub fn new(role: Role, config: &WhiteboardConfig) -> Self {
        Self {
            role,
            session: StrokeSession::new(),
            committed: None,
            eraser_color: config.eraser_color,
            pressure_gain: config.pressure_gain,
            preview: config.shape_preview,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn session(&self) -> &StrokeSession {
        &self.session
    }

    pub fn is_drawing(&self) -> bool {
        self.session.is_drawing()
    }

    fn allowed(&self, what: &str) -> bool {
        if !self.role.can_draw() {
            log::debug!("{what} ignored: viewer");
            return false;
        }
        true
    }

    /// Pointer down at logical `point`. Returns `true` if the surface was
    /// touched.
    pub fn begin(
        &mut self,
        surface: &mut S,
        toolbar: &ToolbarState,
        point: Point,
        sample: &PointerSample,
    ) -> bool {
        if !self.allowed("begin") {
            return false;
        }

        let tool = toolbar.tool;
        surface.set_stroke_color(toolbar.color);
        surface.set_line_width(sample.width_for(toolbar.line_width(), self.pressure_gain));
        surface.set_line_cap(LineCap::Round);
        surface.set_line_join(LineJoin::Round);

        match tool {
            Tool::Pencil | Tool::Eraser => {
                if tool == Tool::Eraser {
                    surface.set_stroke_color(self.eraser_color);
                }
                surface.begin_path();
                surface.move_to(point);
                self.committed = None;
            }
            Tool::Rect | Tool::Circle | Tool::Line => {
                self.committed = match self.preview {
                    ShapePreview::Snapshot => surface.snapshot(),
                    ShapePreview::RedrawBackground => None,
                };
            }
        }
        self.session.begin(tool, point);
        true
    }

    /// Pointer move while drawing. Returns `true` if anything was drawn.
    pub fn continue_stroke(
        &mut self,
        surface: &mut S,
        manager: &SurfaceManager,
        toolbar: &ToolbarState,
        point: Point,
        sample: &PointerSample,
    ) -> bool {
        if !self.allowed("continue") || !self.session.is_drawing() {
            return false;
        }

        if sample.pen_pressure().is_some() {
            surface.set_line_width(sample.width_for(toolbar.line_width(), self.pressure_gain));
        }

        match self.session.tool() {
            Tool::Pencil | Tool::Eraser => {
                surface.line_to(point);
                surface.stroke();
            }
            shape => {
                if let Some(origin) = self.session.shape_origin() {
                    self.restore_committed(surface, manager, toolbar.background);
                    surface.set_stroke_color(toolbar.color);
                    surface.set_line_width(toolbar.line_width());
                    surface.begin_path();
                    trace_shape(surface, shape, origin, point);
                    surface.stroke();
                }
            }
        }

        self.session.advance(point);
        true
    }

    /// Pointer up or leave. The last shape preview stays as the final shape.
    pub fn end(&mut self, surface: &mut S) -> bool {
        if !self.allowed("end") || !self.session.is_drawing() {
            return false;
        }
        surface.close_path();
        self.session.end();
        self.committed = None;
        true
    }

    /// Wipe the surface and redraw `background`. Any stroke in progress is
    /// abandoned.
    pub fn clear(&mut self, surface: &mut S, manager: &SurfaceManager, background: Background) -> bool {
        if !self.allowed("clear") {
            return false;
        }
        let (w, h) = manager.metrics().logical_size();
        surface.clear_rect(0.0, 0.0, w, h);
        manager.redraw_background(surface, background);
        self.cancel();
        true
    }

    /// Drop the active stroke without drawing anything.
    pub fn cancel(&mut self) {
        self.session.end();
        self.committed = None;
    }

    /// Put the surface back to its state before the current shape began.
    fn restore_committed(&self, surface: &mut S, manager: &SurfaceManager, background: Background) {
        match &self.committed {
            Some(snapshot) => surface.restore(snapshot),
            None => manager.redraw_background(surface, background),
        }
    }
}

/// Add one shape primitive from `origin` to `to` to the current path.
fn trace_shape<S: Surface + ?Sized>(surface: &mut S, tool: Tool, origin: Point, to: Point) {
    match tool {
        Tool::Rect => surface.rect(origin.x, origin.y, to.x - origin.x, to.y - origin.y),
        Tool::Circle => surface.arc(origin, origin.distance_to(to)),
        Tool::Line => {
            surface.move_to(origin);
            surface.line_to(to);
        }
        Tool::Pencil | Tool::Eraser => {}
    }
}
