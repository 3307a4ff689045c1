//! Drawing surface
//!
//! Views draw through a `Canvas` rather than calling macroquad directly, so
//! the per-frame draw logic can run (and be checked) without a window.

use macroquad::prelude::*;
use super::Rect;

/// Minimal set of drawing primitives the views need
pub trait Canvas {
    /// Fill the whole frame with one colour
    fn clear(&mut self, color: Color);

    fn fill_rect(&mut self, rect: Rect, color: Color);

    fn stroke_rect(&mut self, rect: Rect, thickness: f32, color: Color);

    /// Draw text with its baseline at `y`
    fn text(&mut self, text: &str, x: f32, y: f32, font_size: f32, color: Color);

    /// Width and height of a string at the given size
    fn measure(&self, text: &str, font_size: f32) -> (f32, f32);

    /// Size of the drawable area
    fn size(&self) -> (f32, f32);
}

/// Canvas backed by macroquad's immediate-mode drawing
pub struct ScreenCanvas;

impl Canvas for ScreenCanvas {
    fn clear(&mut self, color: Color) {
        clear_background(color);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        draw_rectangle(rect.x, rect.y, rect.w, rect.h, color);
    }

    fn stroke_rect(&mut self, rect: Rect, thickness: f32, color: Color) {
        draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, thickness, color);
    }

    fn text(&mut self, text: &str, x: f32, y: f32, font_size: f32, color: Color) {
        // Round to integer pixels for crisp rendering
        draw_text(text, x.round(), y.round(), font_size, color);
    }

    fn measure(&self, text: &str, font_size: f32) -> (f32, f32) {
        let dims = measure_text(text, None, font_size as u16, 1.0);
        (dims.width, dims.height)
    }

    fn size(&self) -> (f32, f32) {
        (screen_width(), screen_height())
    }
}
