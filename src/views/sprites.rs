//! Sprite collections for the game view
//!
//! Sprites are placed in world pixels (block coordinate times scale) and
//! shifted by the camera offset when drawn.

use macroquad::prelude::Color;

use crate::ui::{theme::FLOOR_DIM, Canvas, Rect};
use crate::world::{Point3, World};

/// One drawable tile
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub rect: Rect,
    pub color: Color,
    pub glyph: Option<char>,
}

/// Ordered list of sprites drawn together
#[derive(Debug, Clone, Default)]
pub struct SpriteList {
    sprites: Vec<Sprite>,
}

impl SpriteList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sprite: Sprite) {
        self.sprites.push(sprite);
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sprite> {
        self.sprites.iter()
    }

    /// Draw every sprite that lands on screen, in insertion order
    pub fn draw(&self, canvas: &mut dyn Canvas, offset: (f32, f32)) {
        let (w, h) = canvas.size();
        let screen = Rect::screen(w, h);
        for sprite in &self.sprites {
            let rect = sprite.rect.translate(offset.0, offset.1);
            if !screen.intersects(&rect) {
                continue;
            }
            canvas.fill_rect(rect, sprite.color);
            if let Some(glyph) = sprite.glyph {
                let font_size = rect.h;
                let mut buf = [0u8; 4];
                let text = glyph.encode_utf8(&mut buf);
                let (tw, th) = canvas.measure(text, font_size);
                canvas.text(text, rect.center_x() - tw * 0.5, rect.center_y() + th * 0.5, font_size, Color::new(0.05, 0.05, 0.05, 1.0));
            }
        }
    }
}

fn dim(color: Color) -> Color {
    Color::new(color.r * FLOOR_DIM, color.g * FLOOR_DIM, color.b * FLOOR_DIM, color.a)
}

fn tile(x: u32, y: u32, scale: f32) -> Rect {
    Rect::new(x as f32 * scale, y as f32 * scale, scale, scale)
}

/// Terrain visible on level `z`.
///
/// A solid block on the level is drawn in its material colour. An open
/// block shows the block beneath it as dimmed floor; open air over open air
/// draws nothing.
pub fn build_terrain(world: &World, z: u32, scale: f32) -> SpriteList {
    let mut list = SpriteList::new();
    if z >= world.size.z {
        return list;
    }
    for y in 0..world.size.y {
        for x in 0..world.size.x {
            let color = match world.block(Point3::new(x, y, z)) {
                Some(material) => material.color(),
                None if z > 0 => match world.block(Point3::new(x, y, z - 1)) {
                    Some(floor) => dim(floor.color()),
                    None => continue,
                },
                None => continue,
            };
            list.push(Sprite { rect: tile(x, y, scale), color, glyph: None });
        }
    }
    list
}

/// Actors standing on level `z`, inset slightly so the floor shows around them
pub fn build_actors(world: &World, z: u32, scale: f32) -> SpriteList {
    let mut list = SpriteList::new();
    let inset = (scale * 0.1).floor();
    for actor in world.actors_on_level(z) {
        list.push(Sprite {
            rect: tile(actor.position.x, actor.position.y, scale).pad(inset),
            color: actor.species.color(),
            glyph: Some(actor.species.glyph()),
        });
    }
    list
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::recording::{DrawCall, RecordingCanvas};
    use crate::world::{Actor, Material, Size3, Species};

    fn pit() -> World {
        let mut world = World::with_size("pit", Size3::new(3, 3, 2));
        for y in 0..3 {
            for x in 0..3 {
                world.set_block(Point3::new(x, y, 0), Some(Material::Stone));
            }
        }
        world.set_block(Point3::new(0, 0, 1), Some(Material::Dirt));
        world.actors.push(Actor {
            name: "Snag".to_string(),
            species: Species::Goblin,
            position: Point3::new(1, 1, 1),
        });
        world
    }

    #[test]
    fn test_terrain_shows_floor_below() {
        let world = pit();
        let level1 = build_terrain(&world, 1, 10.0);
        assert_eq!(level1.len(), 9);
        let solid = level1.iter().filter(|s| s.color == Material::Dirt.color()).count();
        assert_eq!(solid, 1);
        let floor = level1.iter().filter(|s| s.color == dim(Material::Stone.color())).count();
        assert_eq!(floor, 8);

        // Level 0 has nothing beneath it, only its own blocks
        assert_eq!(build_terrain(&world, 0, 10.0).len(), 9);
        assert!(build_terrain(&world, 5, 10.0).is_empty());
    }

    #[test]
    fn test_actor_sprites_on_level_only() {
        let world = pit();
        let actors = build_actors(&world, 1, 10.0);
        assert_eq!(actors.len(), 1);
        let sprite = actors.iter().next().unwrap();
        assert_eq!(sprite.rect, Rect::new(11.0, 11.0, 8.0, 8.0));
        assert_eq!(sprite.glyph, Some('g'));
        assert!(build_actors(&world, 0, 10.0).is_empty());
    }

    #[test]
    fn test_offscreen_sprites_are_skipped() {
        let mut list = SpriteList::new();
        list.push(Sprite { rect: Rect::new(0.0, 0.0, 10.0, 10.0), color: Material::Sand.color(), glyph: None });
        list.push(Sprite { rect: Rect::new(500.0, 0.0, 10.0, 10.0), color: Material::Wood.color(), glyph: None });
        let mut canvas = RecordingCanvas::new(100.0, 100.0);
        list.draw(&mut canvas, (0.0, 0.0));
        assert_eq!(canvas.calls, vec![DrawCall::FillRect(Rect::new(0.0, 0.0, 10.0, 10.0), Material::Sand.color())]);

        let mut canvas = RecordingCanvas::new(100.0, 100.0);
        list.draw(&mut canvas, (-450.0, 0.0));
        assert_eq!(canvas.fills().len(), 1);
        assert_eq!(canvas.fills()[0].1, Material::Wood.color());
    }
}
