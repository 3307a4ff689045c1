//! Main menu: title and the two ways into a game

use macroquad::prelude::Color;

use crate::ui::{draw_text_centered, theme::*, Button, Canvas, Rect, UiContext};

/// What the menu asks the application to do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    None,
    QuickStart,
    Load,
}

pub const TITLE: &str = "Goblin Pit";

const BUTTON_WIDTH: f32 = 220.0;
const BUTTON_HEIGHT: f32 = 48.0;
const BUTTON_GAP: f32 = 16.0;

/// Widget layout, built when the view is shown
#[derive(Debug, Clone, PartialEq)]
struct MenuLayout {
    center_x: f32,
    title_y: f32,
    quick_start: Button,
    load: Button,
    status_y: f32,
}

impl MenuLayout {
    fn build(screen: (f32, f32)) -> Self {
        let (w, h) = screen;
        let center_x = w * 0.5;
        let first_y = h * 0.5;
        let second_y = first_y + BUTTON_HEIGHT + BUTTON_GAP;
        Self {
            center_x,
            title_y: h * 0.3,
            quick_start: Button::new(Rect::centered(center_x, first_y, BUTTON_WIDTH, BUTTON_HEIGHT), "Quick Start"),
            load: Button::new(Rect::centered(center_x, second_y, BUTTON_WIDTH, BUTTON_HEIGHT), "Load"),
            status_y: second_y + BUTTON_HEIGHT + BUTTON_GAP,
        }
    }
}

pub struct MainMenuView {
    background: Color,
    layout: Option<MenuLayout>,
    status: Option<String>,
}

impl MainMenuView {
    pub fn new() -> Self {
        Self {
            background: BG_COLOR,
            layout: None,
            status: None,
        }
    }

    /// Called when the menu becomes the active view
    pub fn on_show_view(&mut self, screen: (f32, f32)) {
        self.background = BG_COLOR;
        self.layout = Some(MenuLayout::build(screen));
    }

    #[cfg(test)]
    pub fn background(&self) -> Color {
        self.background
    }

    /// Show a one-line message under the buttons
    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(text.into());
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Draw one frame and report which button, if any, was clicked
    pub fn on_draw(&self, ctx: &mut UiContext, canvas: &mut dyn Canvas) -> MenuAction {
        canvas.clear(self.background);

        let Some(layout) = &self.layout else {
            return MenuAction::None;
        };

        draw_text_centered(canvas, TITLE, layout.center_x, layout.title_y, FONT_SIZE_TITLE, TITLE_COLOR);

        let mut action = MenuAction::None;
        if layout.quick_start.show(ctx, canvas) {
            action = MenuAction::QuickStart;
        }
        if layout.load.show(ctx, canvas) {
            action = MenuAction::Load;
        }

        if let Some(status) = &self.status {
            draw_text_centered(canvas, status, layout.center_x, layout.status_y, FONT_SIZE_CONTENT, STATUS_COLOR);
        }

        action
    }
}

impl Default for MainMenuView {
    fn default() -> Self {
        Self::new()
    }
}
