//! Full-screen views: the main menu and the game

mod game;
mod main_menu;
pub mod pov;
pub mod sprites;

pub use game::{GameAction, GameInput, GameView};
pub use main_menu::{MainMenuView, MenuAction};
