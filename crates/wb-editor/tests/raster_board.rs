//! Integration tests: whiteboard over the CPU raster surface.
//!
//! Checks what ends up in the pixels: background idempotence, erasing,
//! resize behavior, and shape previews over earlier strokes.

use pretty_assertions::assert_eq;
use wb_core::background::{BackgroundStyle, render_background};
use wb_core::config::{ShapePreview, WhiteboardConfig};
use wb_core::metrics::ClientRect;
use wb_core::model::{Background, Color, Role, Tool};
use wb_core::surface::Surface;
use wb_editor::Whiteboard;
use wb_editor::input::InputEvent;
use wb_render::RasterSurface;

const WHITE: [u8; 4] = [255, 255, 255, 255];
const BLACK: [u8; 4] = [0, 0, 0, 255];
const RECT: ClientRect = ClientRect::new(0.0, 0.0, 120.0, 80.0);

fn board_with(config: &WhiteboardConfig) -> Whiteboard<RasterSurface> {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut board = Whiteboard::new(RasterSurface::new(0, 0), Role::Presenter, config);
    board.resize(RECT.width, RECT.height, 1.0);
    board
}

fn board() -> Whiteboard<RasterSurface> {
    board_with(&WhiteboardConfig::default())
}

fn drag(board: &mut Whiteboard<RasterSurface>, from: (f64, f64), through: &[(f64, f64)]) {
    board.handle(&InputEvent::from_mouse_down(from.0, from.1), &RECT);
    for &(x, y) in through {
        board.handle(&InputEvent::from_mouse_move(x, y), &RECT);
    }
    board.handle(&InputEvent::Up, &RECT);
}

fn px(board: &Whiteboard<RasterSurface>, x: u32, y: u32) -> [u8; 4] {
    board.surface().pixel(x, y).expect("pixel in bounds")
}

// ─── Background ─────────────────────────────────────────────────────────

#[test]
fn every_pattern_renders_idempotently() {
    let style = BackgroundStyle::default();
    for pattern in Background::ALL {
        let mut surface = RasterSurface::new(240, 160);
        surface.set_scale(2.0);
        render_background(&mut surface, pattern, 120.0, 80.0, &style);
        let first = surface.pixels().to_vec();
        render_background(&mut surface, pattern, 120.0, 80.0, &style);
        assert_eq!(surface.pixels(), &first[..], "{} not idempotent", pattern.name());
    }
}

#[test]
fn pattern_overwrites_prior_content() {
    let style = BackgroundStyle::default();
    let mut fresh = RasterSurface::new(120, 80);
    render_background(&mut fresh, Background::Graph, 120.0, 80.0, &style);

    let mut b = board();
    b.set_line_width(10.0);
    drag(&mut b, (5.0, 5.0), &[(100.0, 70.0), (20.0, 60.0)]);
    b.set_background(Background::Graph);

    assert_eq!(b.surface().pixels(), fresh.pixels());
}

#[test]
fn patterns_draw_where_expected() {
    let mut b = board();

    b.set_background(Background::Blank);
    assert!(b.surface().pixels().iter().all(|p| *p == WHITE));

    b.set_background(Background::Grid);
    assert_ne!(px(&b, 20, 10), WHITE);
    assert_ne!(px(&b, 10, 40), WHITE);
    assert_eq!(px(&b, 10, 10), WHITE);

    b.set_background(Background::Lines);
    assert_ne!(px(&b, 10, 30), WHITE);
    assert_eq!(px(&b, 10, 20), WHITE);
    assert_eq!(px(&b, 20, 10), WHITE);

    b.set_background(Background::Dots);
    assert_ne!(px(&b, 20, 20), WHITE);
    assert_eq!(px(&b, 30, 30), WHITE);
    assert_eq!(px(&b, 0, 0), WHITE);

    b.set_background(Background::Graph);
    // The heavy rule at x = 100 is darker than a fine rule at x = 20.
    let fine = px(&b, 20, 10);
    let heavy = px(&b, 100, 10);
    assert!(heavy[0] < fine[0], "heavy {heavy:?} vs fine {fine:?}");
}

// ─── Resize ─────────────────────────────────────────────────────────────

#[test]
fn resize_floors_backing_and_keeps_pattern() {
    let mut b = board();
    b.set_background(Background::Grid);
    let metrics = b.resize(101.5, 50.5, 2.0);

    assert_eq!((metrics.backing_width, metrics.backing_height), (203, 101));
    assert_eq!(b.surface().backing_size(), (203, 101));
    assert_eq!(b.toolbar().background, Background::Grid);
    // Grid rule at logical x = 20 lands on device x = 40.
    assert_ne!(px(&b, 40, 10), WHITE);
    assert_eq!(px(&b, 30, 10), WHITE);
}

// ─── Strokes ────────────────────────────────────────────────────────────

#[test]
fn pencil_draws_in_stroke_color() {
    let mut b = board();
    drag(&mut b, (10.0, 20.0), &[(60.0, 20.0)]);
    assert_eq!(px(&b, 30, 19), BLACK);
    assert_eq!(px(&b, 30, 20), BLACK);
    assert_eq!(px(&b, 30, 40), WHITE);
}

#[test]
fn eraser_restores_white() {
    let mut b = board();
    drag(&mut b, (10.0, 20.0), &[(60.0, 20.0)]);
    assert_eq!(px(&b, 30, 20), BLACK);

    b.set_tool(Tool::Eraser);
    b.set_line_width(12.0);
    drag(&mut b, (10.0, 20.0), &[(60.0, 20.0)]);

    for y in 17..=23 {
        for x in 8..=62 {
            assert_eq!(px(&b, x, y), WHITE, "pixel ({x}, {y}) not erased");
        }
    }
}

#[test]
fn committed_rect_outline() {
    let mut b = board();
    b.set_tool(Tool::Rect);
    drag(&mut b, (10.0, 10.0), &[(30.0, 20.0), (50.0, 30.0)]);

    assert_eq!(px(&b, 10, 20), BLACK); // left edge
    assert_eq!(px(&b, 49, 20), BLACK); // right edge
    assert_eq!(px(&b, 30, 10), BLACK); // top edge
    assert_eq!(px(&b, 30, 20), WHITE); // interior
    // The first preview's right edge at x = 30 is gone.
    assert_eq!(px(&b, 29, 15), WHITE);
}

#[test]
fn shape_preview_keeps_earlier_strokes() {
    let mut b = board();
    b.set_line_width(4.0);
    drag(&mut b, (10.0, 60.0), &[(100.0, 60.0)]);
    assert_eq!(px(&b, 50, 60), BLACK);

    b.set_tool(Tool::Circle);
    b.set_color(Color::from_hex("#FF0000").unwrap());
    drag(&mut b, (60.0, 30.0), &[(70.0, 30.0), (80.0, 30.0)]);

    assert_eq!(px(&b, 50, 60), BLACK);
    assert_eq!(px(&b, 80, 30), [255, 0, 0, 255]);
    // The 10-unit preview ring was replaced by the 20-unit one.
    assert_eq!(px(&b, 70, 30), WHITE);
}

#[test]
fn background_redraw_preview_wipes_earlier_strokes() {
    let config = WhiteboardConfig {
        shape_preview: ShapePreview::RedrawBackground,
        ..WhiteboardConfig::default()
    };
    let mut b = board_with(&config);
    b.set_line_width(4.0);
    drag(&mut b, (10.0, 60.0), &[(100.0, 60.0)]);

    b.set_tool(Tool::Line);
    drag(&mut b, (10.0, 10.0), &[(100.0, 10.0)]);

    assert_eq!(px(&b, 50, 60), WHITE);
    assert_eq!(px(&b, 50, 10), BLACK);
}

#[test]
fn clear_returns_to_background() {
    let mut b = board();
    b.set_background(Background::Lines);
    let expected = b.surface().pixels().to_vec();

    b.set_line_width(6.0);
    drag(&mut b, (5.0, 5.0), &[(110.0, 75.0)]);
    assert_ne!(b.surface().pixels(), &expected[..]);

    assert!(b.clear());
    assert_eq!(b.surface().pixels(), &expected[..]);
}
