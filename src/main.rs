//! Goblin Pit: a 2D sandbox colony game
//!
//! Starts on the main menu. "Quick Start" opens the built-in scenario,
//! "Load" opens one picked from disk. In game:
//! - PageUp / PageDown change level
//! - Arrow keys pan (hold Shift to pan faster), mouse wheel zooms
//! - Ctrl+S saves, Ctrl+Q quits

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod app;
mod config;
mod dialog;
mod ui;
mod views;
mod world;

use macroquad::prelude::*;
use app::{App, WINDOW_HEIGHT, WINDOW_TITLE, WINDOW_WIDTH};
use config::Settings;
use dialog::NativeFilePicker;
use ui::{MouseState, ScreenCanvas};
use views::GameInput;

fn window_conf() -> Conf {
    Conf {
        window_title: WINDOW_TITLE.to_string(),
        window_width: WINDOW_WIDTH,
        window_height: WINDOW_HEIGHT,
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("=== Goblin Pit v{} ===", VERSION);

    let settings = Settings::load();
    let mut app = App::new(settings, Box::new(NativeFilePicker));
    let mut canvas = ScreenCanvas;

    loop {
        app.frame(MouseState::capture(), &GameInput::capture(), &mut canvas);

        if app.should_quit() {
            break;
        }

        next_frame().await;
    }
}
