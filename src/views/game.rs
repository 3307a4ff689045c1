//! Game view
//!
//! Shows one level of the world from above: terrain first, then the actors
//! standing on it. Loading happens when the view is shown; the world itself
//! belongs to the application and is only borrowed here.

use std::path::PathBuf;

use macroquad::prelude::*;

use crate::config::Settings;
use crate::ui::{theme::*, Canvas, Rect};
use crate::world::{save_scenario, LoadTarget, ScenarioError, World};
use super::pov::{load_pov, pov_path, save_pov, Pov};
use super::sprites::{build_actors, build_terrain, SpriteList};

/// Height of the info header drawn over the map
const HEADER_HEIGHT: f32 = 24.0;

/// What the game view asks the application to do after handling input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    None,
    Save,
    Quit,
}

/// Keyboard and wheel state relevant to the game view for one frame
#[derive(Debug, Clone, Copy, Default)]
pub struct GameInput {
    pub level_up: bool,
    pub level_down: bool,
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub shift: bool,
    pub ctrl: bool,
    pub save: bool,
    pub quit: bool,
    pub scroll: f32,
}

impl GameInput {
    /// Read this frame's key presses from macroquad
    pub fn capture() -> Self {
        Self {
            level_up: is_key_pressed(KeyCode::PageUp),
            level_down: is_key_pressed(KeyCode::PageDown),
            up: is_key_pressed(KeyCode::Up),
            down: is_key_pressed(KeyCode::Down),
            left: is_key_pressed(KeyCode::Left),
            right: is_key_pressed(KeyCode::Right),
            shift: is_key_down(KeyCode::LeftShift) || is_key_down(KeyCode::RightShift),
            ctrl: is_key_down(KeyCode::LeftControl) || is_key_down(KeyCode::RightControl),
            save: is_key_pressed(KeyCode::S),
            quit: is_key_pressed(KeyCode::Q),
            scroll: mouse_wheel().1,
        }
    }
}

pub struct GameView {
    target: LoadTarget,
    terrain: SpriteList,
    actors: SpriteList,
    pov: Pov,
    status: Option<String>,
}

impl GameView {
    /// New view with empty sprite lists. No path means the default scenario.
    pub fn new(path: Option<PathBuf>) -> Self {
        Self {
            target: LoadTarget::resolve(path),
            terrain: SpriteList::new(),
            actors: SpriteList::new(),
            pov: Pov::default(),
            status: None,
        }
    }

    pub fn target(&self) -> &LoadTarget {
        &self.target
    }

    pub fn pov(&self) -> &Pov {
        &self.pov
    }

    pub fn terrain(&self) -> &SpriteList {
        &self.terrain
    }

    pub fn actors(&self) -> &SpriteList {
        &self.actors
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Load the target into `world` and build the sprite lists.
    ///
    /// On error `world` is left as it was.
    pub fn on_show_view(&mut self, world: &mut World, settings: &Settings) -> Result<(), ScenarioError> {
        let scenario = self.target.read(settings.default_scenario.as_deref())?;
        let loaded = World::from_scenario(scenario, self.target.clone())?;

        self.pov = self.restore_pov(&loaded).unwrap_or_else(|| Pov::centered_on(&loaded, settings.default_scale));
        log::info!(
            "Loaded '{}' ({}x{}x{}, {} actors) from {}",
            loaded.name,
            loaded.size.x,
            loaded.size.y,
            loaded.size.z,
            loaded.actors.len(),
            self.target.label()
        );

        *world = loaded;
        self.rebuild_sprites(world);
        Ok(())
    }

    /// Saved pov for file targets, fitted to the loaded world
    fn restore_pov(&self, world: &World) -> Option<Pov> {
        let path = pov_path(self.target.path()?);
        if !path.exists() {
            return None;
        }
        match load_pov(&path) {
            Ok(mut pov) => {
                pov.fit_to(world);
                Some(pov)
            }
            Err(e) => {
                log::warn!("Ignoring view file {}: {}", path.display(), e);
                None
            }
        }
    }

    fn rebuild_sprites(&mut self, world: &World) {
        self.terrain = build_terrain(world, self.pov.z, self.pov.scale);
        self.actors = build_actors(world, self.pov.z, self.pov.scale);
    }

    /// Apply one frame of input
    pub fn handle_input(&mut self, input: &GameInput, world: &World, settings: &Settings) -> GameAction {
        if input.ctrl && input.quit {
            return GameAction::Quit;
        }
        if input.ctrl && input.save {
            return GameAction::Save;
        }

        let mut dirty = false;
        if input.level_up {
            dirty |= self.pov.level_up(world);
        }
        if input.level_down {
            dirty |= self.pov.level_down();
        }

        let step = if input.shift {
            settings.scroll_step * settings.fast_scroll_multiplier
        } else {
            settings.scroll_step
        };
        let dx = (input.right as i32 - input.left as i32) as f32 * step;
        let dy = (input.down as i32 - input.up as i32) as f32 * step;
        if dx != 0.0 || dy != 0.0 {
            self.pov.pan(dx, dy, world);
        }

        if input.scroll != 0.0 {
            let before = self.pov.scale;
            self.pov.zoom(input.scroll.signum());
            dirty |= self.pov.scale != before;
        }

        if dirty {
            self.rebuild_sprites(world);
        }
        GameAction::None
    }

    /// Write the world and the current pov to disk.
    ///
    /// The default scenario is saved as a quick save in the scenario
    /// directory; from then on this view targets that file.
    pub fn save(&mut self, world: &mut World, settings: &Settings) -> Result<PathBuf, ScenarioError> {
        let path = match &self.target {
            LoadTarget::File(path) => path.clone(),
            LoadTarget::DefaultScenario => settings.scenario_dir.join("quicksave.ron"),
        };

        let result = save_scenario(&world.to_scenario(), &path)
            .and_then(|()| save_pov(&self.pov, &pov_path(&path)));

        match result {
            Ok(()) => {
                log::info!("Saved '{}' to {}", world.name, path.display());
                self.target = LoadTarget::File(path.clone());
                world.source = self.target.clone();
                self.status = Some(format!("Saved {}", path.display()));
                Ok(path)
            }
            Err(e) => {
                log::error!("Save to {} failed: {}", path.display(), e);
                self.status = Some(format!("Save failed: {}", e));
                Err(e)
            }
        }
    }

    /// Clear the frame and draw terrain, then actors, then the header
    pub fn on_draw(&self, canvas: &mut dyn Canvas, world: &World) {
        canvas.clear(BG_COLOR);

        let offset = self.pov.offset(canvas.size());
        self.terrain.draw(canvas, offset);
        self.actors.draw(canvas, offset);

        if !world.is_empty() {
            self.draw_header(canvas, world);
        }
    }

    fn draw_header(&self, canvas: &mut dyn Canvas, world: &World) {
        let (w, _) = canvas.size();
        let header = Rect::new(0.0, 0.0, w, HEADER_HEIGHT);
        canvas.fill_rect(header, HEADER_COLOR);

        let info = format!("{}  |  level {}/{}", world.name, self.pov.z, world.size.z.saturating_sub(1));
        let baseline = header.center_y() + FONT_SIZE_CONTENT * 0.35;
        canvas.text(&info, 8.0, baseline, FONT_SIZE_CONTENT, TEXT_COLOR);

        if let Some(status) = &self.status {
            let (tw, _) = canvas.measure(status, FONT_SIZE_CONTENT);
            canvas.text(status, w - tw - 8.0, baseline, FONT_SIZE_CONTENT, TEXT_DIM);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::recording::{DrawCall, RecordingCanvas};
    use crate::world::{load_scenario, Material, Point3, Species, DEFAULT_SCENARIO};
    use std::fs;
    use tempfile::TempDir;

    const SMALL: &str = r#"(
        name: "Small",
        size: (x: 6, y: 6, z: 3),
        terrain: [
            (low: (x: 0, y: 0, z: 0), high: (x: 5, y: 5, z: 0), material: Some(Stone)),
            (low: (x: 0, y: 0, z: 1), high: (x: 1, y: 5, z: 1), material: Some(Dirt)),
        ],
        actors: [
            (name: "Snag", species: Goblin, position: (x: 3, y: 3, z: 1)),
            (name: "Urist", species: Dwarf, position: (x: 0, y: 0, z: 2)),
        ],
    )"#;

    fn write_small(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("small.ron");
        fs::write(&path, SMALL).unwrap();
        path
    }

    fn settings_in(dir: &TempDir) -> Settings {
        Settings { scenario_dir: dir.path().join("saves"), ..Settings::default() }
    }

    fn screen() -> RecordingCanvas {
        RecordingCanvas::new(800.0, 600.0)
    }

    #[test]
    fn test_no_path_resolves_to_default_scenario() {
        let view = GameView::new(None);
        assert_eq!(view.target(), &LoadTarget::DefaultScenario);
        assert!(view.terrain().is_empty());
        assert!(view.actors().is_empty());
    }

    #[test]
    fn test_fresh_view_draws_cleared_black_frame() {
        let view = GameView::new(None);
        let mut canvas = screen();
        view.on_draw(&mut canvas, &World::empty());
        assert_eq!(canvas.calls, vec![DrawCall::Clear(BG_COLOR)]);
    }

    #[test]
    fn test_show_loads_default_scenario() {
        let dir = TempDir::new().unwrap();
        let mut world = World::empty();
        let mut view = GameView::new(None);
        view.on_show_view(&mut world, &settings_in(&dir)).unwrap();

        let expected = crate::world::load_scenario_from_str(DEFAULT_SCENARIO).unwrap();
        assert_eq!(world.name, expected.name);
        assert_eq!(world.actors.len(), expected.actors.len());
        assert_eq!(world.source, LoadTarget::DefaultScenario);
        assert!(!view.terrain().is_empty());
        // The default map centres on the pit floor where the goblins stand
        assert!(!view.actors().is_empty());
    }

    #[test]
    fn test_default_scenario_setting_overrides_builtin() {
        let dir = TempDir::new().unwrap();
        let path = write_small(&dir);
        let settings = Settings { default_scenario: Some(path), ..settings_in(&dir) };
        let mut world = World::empty();
        let mut view = GameView::new(None);
        view.on_show_view(&mut world, &settings).unwrap();

        assert_eq!(view.target(), &LoadTarget::DefaultScenario);
        assert_eq!(world.name, "Small");
        assert_eq!(world.source, LoadTarget::DefaultScenario);
        assert_eq!(view.terrain().len(), 36);
    }

    #[test]
    fn test_mouse_wheel_zoom_rebuilds_sprites() {
        let dir = TempDir::new().unwrap();
        let path = write_small(&dir);
        let settings = settings_in(&dir);
        let mut world = World::empty();
        let mut view = GameView::new(Some(path));
        view.on_show_view(&mut world, &settings).unwrap();
        assert_eq!(view.pov().scale, settings.default_scale);
        let tile_width = |view: &GameView| view.terrain().iter().next().unwrap().rect.w;
        assert_eq!(tile_width(&view), settings.default_scale);

        view.handle_input(&GameInput { scroll: 1.0, ..Default::default() }, &world, &settings);
        let zoomed = view.pov().scale;
        assert!(zoomed > settings.default_scale);
        assert_eq!(tile_width(&view), zoomed);

        view.handle_input(&GameInput { scroll: -3.0, ..Default::default() }, &world, &settings);
        assert!(view.pov().scale < zoomed);
        assert_eq!(tile_width(&view), view.pov().scale);
    }

    #[test]
    fn test_show_loads_file_and_centres_on_ground() {
        let dir = TempDir::new().unwrap();
        let path = write_small(&dir);
        let mut world = World::empty();
        let mut view = GameView::new(Some(path.clone()));
        view.on_show_view(&mut world, &settings_in(&dir)).unwrap();

        assert_eq!(view.target(), &LoadTarget::File(path));
        assert_eq!(world.name, "Small");
        assert_eq!(view.pov().z, 1);
        // Level 1: 12 dirt blocks plus 24 floor tiles from the stone below
        assert_eq!(view.terrain().len(), 36);
        assert_eq!(view.actors().len(), 1);
    }

    #[test]
    fn test_failed_load_leaves_world_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.ron");
        fs::write(&path, "(name: \"Broken\", size: (x: 0, y: 1, z: 1))").unwrap();

        let mut world = World::empty();
        let mut view = GameView::new(Some(path));
        let result = view.on_show_view(&mut world, &settings_in(&dir));
        assert!(matches!(result, Err(ScenarioError::ValidationError(_))));
        assert!(world.is_empty());

        let mut view = GameView::new(Some(dir.path().join("missing.ron")));
        assert!(matches!(view.on_show_view(&mut world, &settings_in(&dir)), Err(ScenarioError::IoError(_))));
    }

    #[test]
    fn test_draw_order_terrain_then_actors() {
        let dir = TempDir::new().unwrap();
        let path = write_small(&dir);
        let mut world = World::empty();
        let mut view = GameView::new(Some(path));
        view.on_show_view(&mut world, &settings_in(&dir)).unwrap();

        let mut canvas = screen();
        view.on_draw(&mut canvas, &world);
        assert_eq!(canvas.calls[0], DrawCall::Clear(BG_COLOR));

        let goblin = Species::Goblin.color();
        let fills = canvas.fills();
        let first_actor = fills.iter().position(|(_, c)| *c == goblin).unwrap();
        let terrain_count = view.terrain().len();
        assert_eq!(first_actor, terrain_count);
        assert!(fills[..terrain_count].iter().all(|(_, c)| *c != goblin));
    }

    #[test]
    fn test_level_keys_rebuild_sprites() {
        let dir = TempDir::new().unwrap();
        let path = write_small(&dir);
        let settings = settings_in(&dir);
        let mut world = World::empty();
        let mut view = GameView::new(Some(path));
        view.on_show_view(&mut world, &settings).unwrap();

        let up = GameInput { level_up: true, ..Default::default() };
        assert_eq!(view.handle_input(&up, &world, &settings), GameAction::None);
        assert_eq!(view.pov().z, 2);
        // Only the dirt strip shows through as floor on the top level
        assert_eq!(view.terrain().len(), 12);
        assert_eq!(view.actors().len(), 1);

        // Already at the top
        view.handle_input(&up, &world, &settings);
        assert_eq!(view.pov().z, 2);

        let down = GameInput { level_down: true, ..Default::default() };
        view.handle_input(&down, &world, &settings);
        view.handle_input(&down, &world, &settings);
        view.handle_input(&down, &world, &settings);
        assert_eq!(view.pov().z, 0);
        assert_eq!(view.terrain().len(), 36);
        assert!(view.actors().is_empty());
    }

    #[test]
    fn test_arrow_keys_pan_with_shift_multiplier() {
        let dir = TempDir::new().unwrap();
        let path = write_small(&dir);
        let settings = Settings { scroll_step: 1.0, fast_scroll_multiplier: 2.0, ..settings_in(&dir) };
        let mut world = World::empty();
        let mut view = GameView::new(Some(path));
        view.on_show_view(&mut world, &settings).unwrap();
        assert_eq!(view.pov().center_x, 3.0);

        view.handle_input(&GameInput { right: true, ..Default::default() }, &world, &settings);
        assert_eq!(view.pov().center_x, 4.0);
        view.handle_input(&GameInput { right: true, shift: true, ..Default::default() }, &world, &settings);
        assert_eq!(view.pov().center_x, 6.0);
        view.handle_input(&GameInput { up: true, shift: true, ..Default::default() }, &world, &settings);
        assert_eq!(view.pov().center_y, 1.0);
    }

    #[test]
    fn test_ctrl_shortcuts() {
        let world = World::empty();
        let settings = Settings::default();
        let mut view = GameView::new(None);
        let save = GameInput { ctrl: true, save: true, ..Default::default() };
        let quit = GameInput { ctrl: true, quit: true, ..Default::default() };
        assert_eq!(view.handle_input(&save, &world, &settings), GameAction::Save);
        assert_eq!(view.handle_input(&quit, &world, &settings), GameAction::Quit);
        // Without ctrl the letters do nothing
        let plain = GameInput { save: true, quit: true, ..Default::default() };
        assert_eq!(view.handle_input(&plain, &world, &settings), GameAction::None);
    }

    #[test]
    fn test_quick_save_then_reload_restores_pov() {
        let dir = TempDir::new().unwrap();
        let settings = settings_in(&dir);
        let mut world = World::empty();
        let mut view = GameView::new(None);
        view.on_show_view(&mut world, &settings).unwrap();

        // Dig a hole and move the camera before saving
        world.set_block(Point3::new(0, 0, 0), None);
        view.handle_input(&GameInput { level_down: true, ..Default::default() }, &world, &settings);
        let pov = *view.pov();

        let path = view.save(&mut world, &settings).unwrap();
        assert_eq!(path, dir.path().join("saves/quicksave.ron"));
        assert_eq!(view.target(), &LoadTarget::File(path.clone()));
        assert_eq!(world.source, LoadTarget::File(path.clone()));
        assert!(view.status().unwrap().starts_with("Saved"));

        let saved = load_scenario(&path).unwrap();
        assert_eq!(saved.actors, world.actors);

        let mut reloaded = World::empty();
        let mut again = GameView::new(Some(path));
        again.on_show_view(&mut reloaded, &settings).unwrap();
        assert_eq!(*again.pov(), pov);
        assert_eq!(reloaded.block(Point3::new(0, 0, 0)), None);
        assert_eq!(reloaded.block(Point3::new(1, 0, 0)), Some(Material::Stone));
    }

    #[test]
    fn test_header_shows_world_and_level() {
        let dir = TempDir::new().unwrap();
        let path = write_small(&dir);
        let mut world = World::empty();
        let mut view = GameView::new(Some(path));
        view.on_show_view(&mut world, &settings_in(&dir)).unwrap();
        let mut canvas = screen();
        view.on_draw(&mut canvas, &world);
        assert!(canvas.texts().contains(&"Small  |  level 1/2"));
    }
}
