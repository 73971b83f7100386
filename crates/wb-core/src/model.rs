//! Whiteboard data model.
//!
//! Everything here is ephemeral view-session state: points are recomputed
//! per input event, tool/color/background come from the toolbar, and the
//! role is fixed for the lifetime of a board.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

// ─── Geometry ────────────────────────────────────────────────────────────

/// A position in logical (density-independent) surface units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

// ─── Colors ──────────────────────────────────────────────────────────────

/// RGBA color. Stored as 4 × f32 [0.0, 1.0]; (de)serialized as a hex string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Parse a single hex digit.
fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::rgba(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            f32::from(a) / 255.0,
        )
    }

    /// Parse a hex color string: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`.
    /// The leading `#` is optional.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();

        let short = |i: usize| hex_val(bytes[i]).map(|v| v * 17);
        let long = |i: usize| Some(hex_val(bytes[i])? << 4 | hex_val(bytes[i + 1])?);

        match bytes.len() {
            3 => Some(Self::from_rgba8(short(0)?, short(1)?, short(2)?, 255)),
            4 => Some(Self::from_rgba8(short(0)?, short(1)?, short(2)?, short(3)?)),
            6 => Some(Self::from_rgba8(long(0)?, long(2)?, long(4)?, 255)),
            8 => Some(Self::from_rgba8(long(0)?, long(2)?, long(4)?, long(6)?)),
            _ => None,
        }
    }

    /// Quantize to 8-bit channels.
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    /// Emit as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            format!("#{r:02X}{g:02X}{b:02X}")
        } else {
            format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid hex color: {s:?}")))
    }
}

// ─── Tools ───────────────────────────────────────────────────────────────

/// The active drawing tool, owned by the toolbar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Pencil,
    Eraser,
    #[serde(alias = "rectangle")]
    Rect,
    Circle,
    Line,
}

impl Tool {
    pub const ALL: [Tool; 5] = [
        Tool::Pencil,
        Tool::Eraser,
        Tool::Rect,
        Tool::Circle,
        Tool::Line,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "pencil" | "pen" => Some(Tool::Pencil),
            "eraser" => Some(Tool::Eraser),
            "rect" | "rectangle" => Some(Tool::Rect),
            "circle" => Some(Tool::Circle),
            "line" => Some(Tool::Line),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Tool::Pencil => "pencil",
            Tool::Eraser => "eraser",
            Tool::Rect => "rect",
            Tool::Circle => "circle",
            Tool::Line => "line",
        }
    }

    /// Shape tools anchor at an origin and preview a single primitive;
    /// freehand tools extend an open path.
    pub fn is_shape(self) -> bool {
        matches!(self, Tool::Rect | Tool::Circle | Tool::Line)
    }
}

// ─── Background ──────────────────────────────────────────────────────────

/// The pattern drawn underneath strokes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Background {
    #[default]
    Blank,
    Grid,
    Lines,
    Dots,
    Graph,
}

impl Background {
    pub const ALL: [Background; 5] = [
        Background::Blank,
        Background::Grid,
        Background::Lines,
        Background::Dots,
        Background::Graph,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "blank" => Some(Background::Blank),
            "grid" => Some(Background::Grid),
            "lines" => Some(Background::Lines),
            "dots" => Some(Background::Dots),
            "graph" => Some(Background::Graph),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Background::Blank => "blank",
            Background::Grid => "grid",
            Background::Lines => "lines",
            Background::Dots => "dots",
            Background::Graph => "graph",
        }
    }
}

// ─── Role ────────────────────────────────────────────────────────────────

/// Who is looking at the board. Fixed for the lifetime of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The presenter; the only role allowed to draw.
    Presenter,
    /// A student; sees the board read-only.
    Viewer,
}

impl Role {
    pub fn from_presenter_flag(is_presenter: bool) -> Self {
        if is_presenter {
            Role::Presenter
        } else {
            Role::Viewer
        }
    }

    pub fn can_draw(self) -> bool {
        self == Role::Presenter
    }
}

// ─── Stroke style ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

impl LineCap {
    pub fn css_name(self) -> &'static str {
        match self {
            LineCap::Butt => "butt",
            LineCap::Round => "round",
            LineCap::Square => "square",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

impl LineJoin {
    pub fn css_name(self) -> &'static str {
        match self {
            LineJoin::Miter => "miter",
            LineJoin::Round => "round",
            LineJoin::Bevel => "bevel",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn hex_parse_all_lengths() {
        assert_eq!(Color::from_hex("#fff"), Some(Color::WHITE));
        assert_eq!(Color::from_hex("000000"), Some(Color::BLACK));
        assert_eq!(
            Color::from_hex("#E5E7EB").map(Color::to_rgba8),
            Some([0xE5, 0xE7, 0xEB, 0xFF])
        );
        assert_eq!(
            Color::from_hex("#0000"),
            Some(Color::rgba(0.0, 0.0, 0.0, 0.0))
        );
        assert_eq!(
            Color::from_hex("#D1D5DB80").map(Color::to_rgba8),
            Some([0xD1, 0xD5, 0xDB, 0x80])
        );
    }

    #[test]
    fn hex_rejects_garbage() {
        assert_eq!(Color::from_hex("#12"), None);
        assert_eq!(Color::from_hex("#GGGGGG"), None);
        assert_eq!(Color::from_hex(""), None);
    }

    #[test]
    fn hex_emit_is_uppercase_and_drops_opaque_alpha() {
        assert_eq!(Color::from_hex("#e5e7eb").unwrap().to_hex(), "#E5E7EB");
        assert_eq!(Color::from_rgba8(1, 2, 3, 4).to_hex(), "#01020304");
    }

    #[test]
    fn tool_names() {
        for tool in Tool::ALL {
            assert_eq!(Tool::from_name(tool.name()), Some(tool));
        }
        assert_eq!(Tool::from_name("Rectangle"), Some(Tool::Rect));
        assert_eq!(Tool::from_name("lasso"), None);
        assert!(Tool::Circle.is_shape());
        assert!(!Tool::Eraser.is_shape());
    }

    #[test]
    fn background_names() {
        for bg in Background::ALL {
            assert_eq!(Background::from_name(bg.name()), Some(bg));
        }
        assert_eq!(Background::from_name("checker"), None);
    }

    #[test]
    fn three_four_five() {
        assert_eq!(Point::ORIGIN.distance_to(Point::new(3.0, 4.0)), 5.0);
    }

    #[test]
    fn role_gate() {
        assert!(Role::from_presenter_flag(true).can_draw());
        assert!(!Role::from_presenter_flag(false).can_draw());
    }
}
