//! Input abstraction layer.
//!
//! Normalizes pointer, mouse, and touch events into a single `InputEvent`
//! stream so the board handles one kind of pointer session no matter which
//! listener fired.

/// The device behind a pointer sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PointerKind {
    #[default]
    Mouse,
    Pen,
    Touch,
}

impl PointerKind {
    /// Map a DOM `pointerType` string. Unknown types are treated as mouse.
    pub fn from_name(name: &str) -> Self {
        match name {
            "pen" => PointerKind::Pen,
            "touch" => PointerKind::Touch,
            _ => PointerKind::Mouse,
        }
    }
}

/// One pointer position in client (viewport) coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub client_x: f64,
    pub client_y: f64,
    /// Pressure from 0.0 (none / unknown) to 1.0 (max).
    pub pressure: f32,
    pub kind: PointerKind,
}

impl PointerSample {
    pub fn new(client_x: f64, client_y: f64, pressure: f32, kind: PointerKind) -> Self {
        Self {
            client_x,
            client_y,
            pressure,
            kind,
        }
    }

    /// Pen input with a reported pressure scales the base width by
    /// `pressure × gain`; everything else draws at the base width.
    pub fn width_for(&self, base: f64, gain: f64) -> f64 {
        match self.pen_pressure() {
            Some(p) => base * f64::from(p) * gain,
            None => base,
        }
    }

    /// The pressure value, if this is pen input that reports one.
    pub fn pen_pressure(&self) -> Option<f32> {
        (self.kind == PointerKind::Pen && self.pressure > 0.0 && self.pressure.is_finite())
            .then_some(self.pressure)
    }
}

/// A normalized input event from any pointing device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed (pointer down, mouse down, touch start).
    Down(PointerSample),
    /// Pointer moved (pointer move, mouse move, touch move).
    Move(PointerSample),
    /// Pointer released (pointer up, mouse up, touch end).
    Up,
    /// Pointer left the surface. Ends a stroke exactly like `Up`.
    Leave,
}

impl InputEvent {
    // ── Pointer events ──

    pub fn from_pointer_down(x: f64, y: f64, pressure: f32, pointer_type: &str) -> Self {
        Self::Down(PointerSample::new(
            x,
            y,
            pressure,
            PointerKind::from_name(pointer_type),
        ))
    }

    pub fn from_pointer_move(x: f64, y: f64, pressure: f32, pointer_type: &str) -> Self {
        Self::Move(PointerSample::new(
            x,
            y,
            pressure,
            PointerKind::from_name(pointer_type),
        ))
    }

    // ── Mouse fallback ──

    /// Mouse events carry no pressure.
    pub fn from_mouse_down(x: f64, y: f64) -> Self {
        Self::Down(PointerSample::new(x, y, 0.0, PointerKind::Mouse))
    }

    pub fn from_mouse_move(x: f64, y: f64) -> Self {
        Self::Move(PointerSample::new(x, y, 0.0, PointerKind::Mouse))
    }

    // ── Touch fallback ──

    /// First touch point. `force` is whatever the platform reports; a
    /// missing or zero force becomes 1.0.
    pub fn from_touch_start(x: f64, y: f64, force: Option<f32>) -> Self {
        Self::Down(touch_sample(x, y, force))
    }

    pub fn from_touch_move(x: f64, y: f64, force: Option<f32>) -> Self {
        Self::Move(touch_sample(x, y, force))
    }

    /// Extract the sample if this is a down or move event.
    pub fn sample(&self) -> Option<&PointerSample> {
        match self {
            Self::Down(s) | Self::Move(s) => Some(s),
            Self::Up | Self::Leave => None,
        }
    }

    /// Up and leave both terminate a stroke.
    pub fn ends_stroke(&self) -> bool {
        matches!(self, Self::Up | Self::Leave)
    }
}

fn touch_sample(x: f64, y: f64, force: Option<f32>) -> PointerSample {
    let pressure = force.filter(|f| *f > 0.0 && f.is_finite()).unwrap_or(1.0);
    PointerSample::new(x, y, pressure, PointerKind::Touch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn pointer_type_names() {
        assert_eq!(PointerKind::from_name("pen"), PointerKind::Pen);
        assert_eq!(PointerKind::from_name("touch"), PointerKind::Touch);
        assert_eq!(PointerKind::from_name("mouse"), PointerKind::Mouse);
        assert_eq!(PointerKind::from_name(""), PointerKind::Mouse);
    }

    #[test]
    fn pen_pressure_scales_width() {
        let s = PointerSample::new(0.0, 0.0, 0.25, PointerKind::Pen);
        assert_eq!(s.width_for(4.0, 2.0), 2.0);
    }

    #[test]
    fn zero_pressure_pen_keeps_base_width() {
        let s = PointerSample::new(0.0, 0.0, 0.0, PointerKind::Pen);
        assert_eq!(s.width_for(4.0, 2.0), 4.0);
    }

    #[test]
    fn mouse_pressure_is_ignored() {
        // Browsers report 0.5 for a pressed mouse button.
        let s = PointerSample::new(0.0, 0.0, 0.5, PointerKind::Mouse);
        assert_eq!(s.pen_pressure(), None);
        assert_eq!(s.width_for(3.0, 2.0), 3.0);
    }

    #[test]
    fn touch_defaults_pressure_to_one() {
        let e = InputEvent::from_touch_start(5.0, 6.0, None);
        let s = e.sample().unwrap();
        assert_eq!(s.pressure, 1.0);
        assert_eq!(s.kind, PointerKind::Touch);
        assert_eq!((s.client_x, s.client_y), (5.0, 6.0));

        let e = InputEvent::from_touch_move(5.0, 6.0, Some(0.0));
        assert_eq!(e.sample().unwrap().pressure, 1.0);

        let e = InputEvent::from_touch_move(5.0, 6.0, Some(0.4));
        assert_eq!(e.sample().unwrap().pressure, 0.4);
    }

    #[test]
    fn mouse_and_pointer_normalize_alike() {
        let a = InputEvent::from_mouse_down(1.0, 2.0);
        let b = InputEvent::from_pointer_down(1.0, 2.0, 0.0, "mouse");
        assert_eq!(a, b);
    }

    #[test]
    fn up_and_leave_end_strokes() {
        assert!(InputEvent::Up.ends_stroke());
        assert!(InputEvent::Leave.ends_stroke());
        assert!(!InputEvent::from_mouse_move(0.0, 0.0).ends_stroke());
        assert_eq!(InputEvent::Leave.sample(), None);
    }
}
