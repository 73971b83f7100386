//! WASM bridge for the whiteboard: binds the Rust board to an HTML canvas.
//!
//! Compiled via `wasm-pack build --target web`. The host page owns the
//! event listeners and the toolbar; it forwards events and selections here.

mod canvas2d;
mod console;

pub use canvas2d::CanvasSurface;

use wasm_bindgen::prelude::*;
use wb_core::config::WhiteboardConfig;
use wb_core::model::{Background, Color, Role, Tool};
use wb_editor::Whiteboard;
use wb_editor::input::InputEvent;
use web_sys::{HtmlCanvasElement, TouchEvent};

/// The JS-facing whiteboard.
///
/// Every method is a silent no-op when the canvas has no 2D context, and
/// every drawing method is a no-op for viewers.
#[wasm_bindgen]
pub struct WhiteboardCanvas {
    board: Option<Whiteboard<CanvasSurface>>,
}

#[wasm_bindgen]
impl WhiteboardCanvas {
    /// Attach to `canvas`. `config_json` is an optional, possibly partial,
    /// `WhiteboardConfig`; invalid JSON falls back to the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, is_presenter: bool, config_json: Option<String>) -> Self {
        console::setup();

        let config = match config_json.as_deref() {
            Some(json) => WhiteboardConfig::from_json(json).unwrap_or_else(|e| {
                log::warn!("{e}; using defaults");
                WhiteboardConfig::default()
            }),
            None => WhiteboardConfig::default(),
        };

        let role = Role::from_presenter_flag(is_presenter);
        let board = CanvasSurface::from_canvas(canvas).map(|surface| {
            surface.disable_touch_gestures();
            Whiteboard::new(surface, role, &config)
        });
        if board.is_none() {
            log::warn!("canvas has no 2d context; whiteboard disabled");
        }

        let mut this = Self { board };
        this.resize();
        this
    }

    /// Change console verbosity (`off`, `error`, `warn`, `info`, `debug`,
    /// `trace`). Returns `false` for an unknown level.
    pub fn set_log_level(level: &str) -> bool {
        match console::parse_level(level) {
            Some(filter) => {
                log::set_max_level(filter);
                true
            }
            None => false,
        }
    }

    // ─── Sizing ──────────────────────────────────────────────────────────

    /// Re-measure the parent element and `devicePixelRatio`, then resize.
    /// Call on mount and from a window `resize` listener.
    pub fn resize(&mut self) -> bool {
        let Some(board) = self.board.as_ref() else {
            return false;
        };
        let Some(parent) = board.surface().canvas().parent_element() else {
            log::debug!("canvas has no parent element; resize skipped");
            return false;
        };
        let rect = parent.get_bounding_client_rect();
        let density = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
        self.resize_to(rect.width(), rect.height(), density)
    }

    /// Resize to an explicit layout size and pixel density.
    pub fn resize_to(&mut self, width: f64, height: f64, density: f64) -> bool {
        let Some(board) = self.board.as_mut() else {
            return false;
        };
        let metrics = board.resize(width, height, density);
        let (w, h) = metrics.display_size();
        board.surface().set_display_size(w, h);
        true
    }

    // ─── Pointer events ──────────────────────────────────────────────────

    /// `pointerdown`. Returns `true` if the canvas changed.
    pub fn handle_pointer_down(
        &mut self,
        client_x: f64,
        client_y: f64,
        pressure: f32,
        pointer_type: &str,
    ) -> bool {
        self.dispatch(InputEvent::from_pointer_down(
            client_x,
            client_y,
            pressure,
            pointer_type,
        ))
    }

    pub fn handle_pointer_move(
        &mut self,
        client_x: f64,
        client_y: f64,
        pressure: f32,
        pointer_type: &str,
    ) -> bool {
        self.dispatch(InputEvent::from_pointer_move(
            client_x,
            client_y,
            pressure,
            pointer_type,
        ))
    }

    pub fn handle_pointer_up(&mut self) -> bool {
        self.dispatch(InputEvent::Up)
    }

    pub fn handle_pointer_leave(&mut self) -> bool {
        self.dispatch(InputEvent::Leave)
    }

    // ─── Mouse events (fallback) ─────────────────────────────────────────

    pub fn handle_mouse_down(&mut self, client_x: f64, client_y: f64) -> bool {
        self.dispatch(InputEvent::from_mouse_down(client_x, client_y))
    }

    pub fn handle_mouse_move(&mut self, client_x: f64, client_y: f64) -> bool {
        self.dispatch(InputEvent::from_mouse_move(client_x, client_y))
    }

    pub fn handle_mouse_up(&mut self) -> bool {
        self.dispatch(InputEvent::Up)
    }

    pub fn handle_mouse_leave(&mut self) -> bool {
        self.dispatch(InputEvent::Leave)
    }

    // ─── Touch events (fallback) ─────────────────────────────────────────

    /// `touchstart`. Suppresses the browser's default scroll/zoom and
    /// draws with the first touch point.
    pub fn handle_touch_start(&mut self, event: &TouchEvent) -> bool {
        event.prevent_default();
        match first_touch(event) {
            Some((x, y, force)) => self.dispatch(InputEvent::from_touch_start(x, y, force)),
            None => false,
        }
    }

    pub fn handle_touch_move(&mut self, event: &TouchEvent) -> bool {
        event.prevent_default();
        match first_touch(event) {
            Some((x, y, force)) => self.dispatch(InputEvent::from_touch_move(x, y, force)),
            None => false,
        }
    }

    pub fn handle_touch_end(&mut self) -> bool {
        self.dispatch(InputEvent::Up)
    }

    // ─── Toolbar ─────────────────────────────────────────────────────────

    /// Select a tool by name. Returns `false` for an unknown name.
    pub fn set_tool(&mut self, name: &str) -> bool {
        let Some(tool) = Tool::from_name(name) else {
            log::debug!("unknown tool {name:?}");
            return false;
        };
        self.with_board(|b| b.set_tool(tool))
    }

    /// Set the stroke color from a hex string. Returns `false` if it
    /// doesn't parse.
    pub fn set_color(&mut self, hex: &str) -> bool {
        let Some(color) = Color::from_hex(hex) else {
            log::debug!("unparseable color {hex:?}");
            return false;
        };
        self.with_board(|b| b.set_color(color))
    }

    pub fn set_line_width(&mut self, width: f64) -> bool {
        self.with_board(|b| b.set_line_width(width))
    }

    /// Select a background pattern by name and repaint.
    pub fn set_background(&mut self, name: &str) -> bool {
        let Some(background) = Background::from_name(name) else {
            log::debug!("unknown background {name:?}");
            return false;
        };
        self.with_board(|b| b.set_background(background))
    }

    /// Wipe to the current background. Presenter only.
    pub fn clear(&mut self) -> bool {
        self.board.as_mut().is_some_and(|b| b.clear())
    }

    /// Queue a clear from a toolbar button; the next animation frame
    /// applies it with `apply_pending_clear`.
    pub fn request_clear(&mut self) -> bool {
        self.with_board(|b| b.request_clear())
    }

    pub fn apply_pending_clear(&mut self) -> bool {
        self.board.as_mut().is_some_and(|b| b.apply_pending_clear())
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    pub fn is_drawing(&self) -> bool {
        self.board.as_ref().is_some_and(|b| b.is_drawing())
    }

    pub fn is_presenter(&self) -> bool {
        self.board.as_ref().is_some_and(|b| b.role().can_draw())
    }

    pub fn tool_name(&self) -> String {
        self.board
            .as_ref()
            .map_or(Tool::default(), |b| b.toolbar().tool)
            .name()
            .to_string()
    }

    pub fn background_name(&self) -> String {
        self.board
            .as_ref()
            .map_or(Background::default(), |b| b.toolbar().background)
            .name()
            .to_string()
    }
}

impl WhiteboardCanvas {
    fn dispatch(&mut self, event: InputEvent) -> bool {
        let Some(board) = self.board.as_mut() else {
            return false;
        };
        let rect = board.surface().client_rect();
        board.handle(&event, &rect)
    }

    fn with_board(&mut self, f: impl FnOnce(&mut Whiteboard<CanvasSurface>)) -> bool {
        match self.board.as_mut() {
            Some(board) => {
                f(board);
                true
            }
            None => false,
        }
    }
}

/// Client position and force of the first active touch.
fn first_touch(event: &TouchEvent) -> Option<(f64, f64, Option<f32>)> {
    let touch = event.touches().get(0)?;
    Some((
        f64::from(touch.client_x()),
        f64::from(touch.client_y()),
        Some(touch.force()),
    ))
}
