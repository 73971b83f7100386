//! Stroke session state.
//!
//! One pointer session at a time: `Idle → Drawing` on begin,
//! `Drawing → Idle` on end. There are no other states.

use wb_core::model::{Point, Tool};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeState {
    Idle,
    Drawing,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StrokeSession {
    drawing: bool,
    last_point: Point,
    /// Fixed start of a rect / circle / line stroke.
    shape_origin: Option<Point>,
    /// Tool captured at begin; a toolbar change mid-stroke does not affect
    /// the stroke in progress.
    tool: Tool,
}

impl StrokeSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> StrokeState {
        if self.drawing {
            StrokeState::Drawing
        } else {
            StrokeState::Idle
        }
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    pub fn last_point(&self) -> Point {
        self.last_point
    }

    pub fn shape_origin(&self) -> Option<Point> {
        self.shape_origin
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Start a stroke at `at`. Shape tools remember `at` as their origin.
    pub fn begin(&mut self, tool: Tool, at: Point) {
        log::debug!("stroke begin: {} at ({}, {})", tool.name(), at.x, at.y);
        self.drawing = true;
        self.last_point = at;
        self.tool = tool;
        self.shape_origin = tool.is_shape().then_some(at);
    }

    /// Record the latest point of an active stroke.
    pub fn advance(&mut self, to: Point) {
        if self.drawing {
            self.last_point = to;
        }
    }

    /// Finish the stroke. Returns `true` if a stroke was active.
    pub fn end(&mut self) -> bool {
        let was_drawing = self.drawing;
        if was_drawing {
            log::debug!("stroke end: {}", self.tool.name());
        }
        self.drawing = false;
        self.shape_origin = None;
        was_drawing
    }
}
