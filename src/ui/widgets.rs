//! Basic UI widgets

use macroquad::prelude::Color;
use super::{Canvas, Rect, UiContext, theme::*};

/// A labelled push button with a fixed place on screen
#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub rect: Rect,
    pub label: String,
}

impl Button {
    pub fn new(rect: Rect, label: impl Into<String>) -> Self {
        Self { rect, label: label.into() }
    }

    /// Draw the button, returns true if clicked this frame
    pub fn show(&self, ctx: &mut UiContext, canvas: &mut dyn Canvas) -> bool {
        text_button(ctx, canvas, self.rect, &self.label)
    }
}

/// Draw a text button, returns true if clicked
pub fn text_button(ctx: &mut UiContext, canvas: &mut dyn Canvas, rect: Rect, label: &str) -> bool {
    let id = ctx.next_id();
    let hovered = ctx.mouse.inside(&rect);
    let pressed = ctx.mouse.clicking(&rect);
    let clicked = ctx.mouse.clicked(&rect);

    if hovered {
        ctx.set_hot(id);
    }

    let bg = if pressed {
        BUTTON_PRESSED
    } else if hovered {
        BUTTON_HOVER
    } else {
        BUTTON_BG
    };
    canvas.fill_rect(rect, bg);
    canvas.stroke_rect(rect, 1.0, BUTTON_BORDER);

    let (text_w, text_h) = canvas.measure(label, FONT_SIZE_BUTTON);
    let text_x = rect.center_x() - text_w * 0.5;
    let text_y = rect.center_y() + text_h * 0.5;
    canvas.text(label, text_x, text_y, FONT_SIZE_BUTTON, if hovered { WHITE_TEXT } else { TEXT_COLOR });

    clicked
}

const WHITE_TEXT: Color = Color::new(1.0, 1.0, 1.0, 1.0);

/// Draw text horizontally centered on `cx` with its baseline at `y`
pub fn draw_text_centered(canvas: &mut dyn Canvas, text: &str, cx: f32, y: f32, font_size: f32, color: Color) {
    let (w, _) = canvas.measure(text, font_size);
    canvas.text(text, cx - w * 0.5, y, font_size, color);
}
