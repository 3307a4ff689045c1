//! Application state and view switching
//!
//! Exactly one view is active at a time. The menu hands control to the game
//! view and there is no way back; the world state lives here and is lent
//! to the active view each frame.

use crate::config::Settings;
use crate::dialog::FilePicker;
use crate::ui::{Canvas, MouseState, UiContext};
use crate::views::{GameAction, GameInput, GameView, MainMenuView, MenuAction};
use crate::world::World;

pub const WINDOW_TITLE: &str = "Goblin Pit";
pub const WINDOW_WIDTH: i32 = 800;
pub const WINDOW_HEIGHT: i32 = 600;

/// The view currently receiving input and drawing
pub enum ActiveView {
    MainMenu(MainMenuView),
    Game(GameView),
}

#[allow(dead_code)]
impl ActiveView {
    pub fn is_main_menu(&self) -> bool {
        matches!(self, ActiveView::MainMenu(_))
    }

    pub fn as_game(&self) -> Option<&GameView> {
        match self {
            ActiveView::Game(game) => Some(game),
            ActiveView::MainMenu(_) => None,
        }
    }

    pub fn as_menu(&self) -> Option<&MainMenuView> {
        match self {
            ActiveView::MainMenu(menu) => Some(menu),
            ActiveView::Game(_) => None,
        }
    }
}

/// Main application state
pub struct App {
    /// World state shared by the views
    pub world: World,
    pub settings: Settings,
    pub view: ActiveView,
    ui: UiContext,
    picker: Box<dyn FilePicker>,
    quit: bool,
}

impl App {
    /// Start on the main menu
    pub fn new(settings: Settings, picker: Box<dyn FilePicker>) -> Self {
        let mut menu = MainMenuView::new();
        menu.on_show_view((WINDOW_WIDTH as f32, WINDOW_HEIGHT as f32));

        Self {
            world: World::empty(),
            settings,
            view: ActiveView::MainMenu(menu),
            ui: UiContext::new(),
            picker,
            quit: false,
        }
    }

    /// True once the user asked to leave
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Run the active view for one frame
    pub fn frame(&mut self, mouse: MouseState, input: &GameInput, canvas: &mut dyn Canvas) {
        self.ui.begin_frame(mouse);

        match &mut self.view {
            ActiveView::MainMenu(menu) => match menu.on_draw(&mut self.ui, canvas) {
                MenuAction::QuickStart => self.quick_start(),
                MenuAction::Load => self.load(),
                MenuAction::None => {}
            },
            ActiveView::Game(game) => {
                match game.handle_input(input, &self.world, &self.settings) {
                    GameAction::Save => {
                        // The view has already logged it and put it in the header
                        if let Err(e) = game.save(&mut self.world, &self.settings) {
                            log::debug!("Save not completed: {}", e);
                        }
                    }
                    GameAction::Quit => {
                        log::info!("Quit requested");
                        self.quit = true;
                    }
                    GameAction::None => {}
                }
                game.on_draw(canvas, &self.world);
            }
        }
    }

    /// "Quick Start": game view on the default scenario
    pub fn quick_start(&mut self) {
        self.activate_game(GameView::new(None));
    }

    /// "Load": ask for a file, then open a game view on it
    pub fn load(&mut self) {
        match self.picker.pick_scenario(&self.settings.scenario_dir) {
            Some(path) => self.activate_game(GameView::new(Some(path))),
            None => {
                log::info!("Load cancelled");
                self.set_menu_status("Load cancelled");
            }
        }
    }

    /// Show the game view, or stay on the current view if loading fails
    fn activate_game(&mut self, mut game: GameView) {
        match game.on_show_view(&mut self.world, &self.settings) {
            Ok(()) => self.view = ActiveView::Game(game),
            Err(e) => {
                log::error!("Failed to load {}: {}", game.target().label(), e);
                self.set_menu_status(format!("Could not load: {}", e));
            }
        }
    }

    fn set_menu_status(&mut self, text: impl Into<String>) {
        if let ActiveView::MainMenu(menu) = &mut self.view {
            menu.set_status(text);
        }
    }
}
