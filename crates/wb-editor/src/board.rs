//! The whiteboard controller.
//!
//! Owns the surface together with the surface manager, the stroke
//! renderer, and the toolbar selection. Hosts feed it layout sizes and
//! input events; it never reaches out to the host itself.

use crate::input::{InputEvent, PointerSample};
use crate::manager::SurfaceManager;
use crate::renderer::StrokeRenderer;
use crate::toolbar::ToolbarState;
use wb_core::config::WhiteboardConfig;
use wb_core::metrics::{ClientRect, SurfaceMetrics};
use wb_core::model::{Background, Color, Point, Role, Tool};
use wb_core::surface::Surface;

pub struct Whiteboard<S: Surface> {
    surface: S,
    manager: SurfaceManager,
    renderer: StrokeRenderer<S>,
    toolbar: ToolbarState,
}

impl<S: Surface> Whiteboard<S> {
    pub fn new(surface: S, role: Role, config: &WhiteboardConfig) -> Self {
        Self {
            surface,
            manager: SurfaceManager::new(config.background.clone()),
            renderer: StrokeRenderer::new(role, config),
            toolbar: ToolbarState::from_defaults(&config.toolbar),
        }
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn role(&self) -> Role {
        self.renderer.role()
    }

    pub fn toolbar(&self) -> &ToolbarState {
        &self.toolbar
    }

    pub fn metrics(&self) -> &SurfaceMetrics {
        self.manager.metrics()
    }

    pub fn is_drawing(&self) -> bool {
        self.renderer.is_drawing()
    }

    /// Logical position of the last point of the active stroke.
    pub fn last_point(&self) -> Point {
        self.renderer.session().last_point()
    }

    // ─── Sizing ──────────────────────────────────────────────────────────

    /// Container resized (or first mounted). Cancels any stroke in progress,
    /// since the resize discards the surface contents.
    pub fn resize(&mut self, width: f64, height: f64, density: f64) -> SurfaceMetrics {
        self.renderer.cancel();
        self.manager.resize(
            &mut self.surface,
            width,
            height,
            density,
            self.toolbar.background,
        )
    }

    // ─── Input ───────────────────────────────────────────────────────────

    /// Dispatch a normalized input event. `rect` is the surface's current
    /// viewport box. Returns `true` if the surface changed.
    pub fn handle(&mut self, event: &InputEvent, rect: &ClientRect) -> bool {
        match event {
            InputEvent::Down(sample) => self.pointer_down(sample, rect),
            InputEvent::Move(sample) => self.pointer_move(sample, rect),
            InputEvent::Up | InputEvent::Leave => self.pointer_up(),
        }
    }

    pub fn pointer_down(&mut self, sample: &PointerSample, rect: &ClientRect) -> bool {
        let Some(point) = self.map(sample, rect) else {
            return false;
        };
        self.renderer
            .begin(&mut self.surface, &self.toolbar, point, sample)
    }

    pub fn pointer_move(&mut self, sample: &PointerSample, rect: &ClientRect) -> bool {
        if !self.renderer.is_drawing() {
            return false;
        }
        let Some(point) = self.map(sample, rect) else {
            return false;
        };
        self.renderer.continue_stroke(
            &mut self.surface,
            &self.manager,
            &self.toolbar,
            point,
            sample,
        )
    }

    pub fn pointer_up(&mut self) -> bool {
        self.renderer.end(&mut self.surface)
    }

    /// Leaving the surface ends the stroke like a release.
    pub fn pointer_leave(&mut self) -> bool {
        self.pointer_up()
    }

    fn map(&self, sample: &PointerSample, rect: &ClientRect) -> Option<Point> {
        let point = self
            .manager
            .metrics()
            .to_logical(sample.client_x, sample.client_y, rect);
        if point.is_none() {
            log::debug!("pointer ignored: surface has no client area");
        }
        point
    }

    // ─── Toolbar ─────────────────────────────────────────────────────────

    pub fn set_tool(&mut self, tool: Tool) {
        self.toolbar.tool = tool;
    }

    pub fn set_color(&mut self, color: Color) {
        self.toolbar.color = color;
    }

    pub fn set_line_width(&mut self, width: f64) {
        self.toolbar.set_line_width(width);
    }

    /// Switch patterns and repaint the background. Anything drawn so far is
    /// replaced, and a stroke in progress is abandoned.
    pub fn set_background(&mut self, background: Background) {
        self.toolbar.background = background;
        self.renderer.cancel();
        self.manager
            .redraw_background(&mut self.surface, background);
    }

    pub fn request_clear(&mut self) {
        self.toolbar.request_clear();
    }

    /// Run a pending clear request, if any.
    pub fn apply_pending_clear(&mut self) -> bool {
        self.toolbar.take_clear_request() && self.clear()
    }

    /// Wipe the surface back to the current background. Presenter only.
    pub fn clear(&mut self) -> bool {
        self.renderer
            .clear(&mut self.surface, &self.manager, self.toolbar.background)
    }
}
