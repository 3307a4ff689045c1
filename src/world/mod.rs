//! World state - the block grid and the actors standing in it
//!
//! The world is owned by the application and lent to whichever view needs
//! it. Views never keep their own copy; they read it while drawing and the
//! game view replaces it wholesale when a scenario loads.

mod geometry;
mod scenario;

pub use geometry::*;
pub use scenario::*;

use macroquad::prelude::Color;
use serde::{Deserialize, Serialize};

/// Solid block material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Material {
    Stone,
    Dirt,
    Sand,
    Marble,
    Wood,
}

impl Material {
    pub fn color(&self) -> Color {
        match self {
            Material::Stone => Color::new(0.45, 0.45, 0.48, 1.0),
            Material::Dirt => Color::new(0.42, 0.30, 0.18, 1.0),
            Material::Sand => Color::new(0.82, 0.74, 0.50, 1.0),
            Material::Marble => Color::new(0.88, 0.88, 0.86, 1.0),
            Material::Wood => Color::new(0.55, 0.38, 0.20, 1.0),
        }
    }
}

/// Kind of creature an actor is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    Dwarf,
    Goblin,
    Deer,
    Wolf,
}

impl Species {
    pub fn color(&self) -> Color {
        match self {
            Species::Dwarf => Color::new(0.85, 0.35, 0.25, 1.0),
            Species::Goblin => Color::new(0.35, 0.75, 0.30, 1.0),
            Species::Deer => Color::new(0.75, 0.55, 0.30, 1.0),
            Species::Wolf => Color::new(0.55, 0.55, 0.65, 1.0),
        }
    }

    /// Single character drawn on the actor's tile
    pub fn glyph(&self) -> char {
        match self {
            Species::Dwarf => 'D',
            Species::Goblin => 'g',
            Species::Deer => 'd',
            Species::Wolf => 'w',
        }
    }
}

/// A creature placed in the world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub name: String,
    pub species: Species,
    pub position: Point3,
}

/// The world state shared between views
#[derive(Debug, Clone)]
pub struct World {
    pub name: String,
    pub size: Size3,
    blocks: Vec<Option<Material>>,
    pub actors: Vec<Actor>,
    /// Where this world was loaded from (used when saving)
    pub source: LoadTarget,
}

impl World {
    /// A world with no blocks and no actors, shown before anything is loaded
    pub fn empty() -> Self {
        Self {
            name: String::new(),
            size: Size3::default(),
            blocks: Vec::new(),
            actors: Vec::new(),
            source: LoadTarget::DefaultScenario,
        }
    }

    /// All air, no actors
    pub fn with_size(name: impl Into<String>, size: Size3) -> Self {
        Self {
            name: name.into(),
            size,
            blocks: vec![None; size.volume() as usize],
            actors: Vec::new(),
            source: LoadTarget::DefaultScenario,
        }
    }

    /// Build a world from a parsed scenario. The scenario is validated first.
    pub fn from_scenario(scenario: Scenario, source: LoadTarget) -> Result<Self, ScenarioError> {
        validate_scenario(&scenario)?;

        let mut world = World::with_size(scenario.name, scenario.size);
        for fill in &scenario.terrain {
            for p in fill.cuboid().points() {
                world.set_block(p, fill.material);
            }
        }
        world.actors = scenario.actors;
        world.source = source;
        Ok(world)
    }

    /// Convert back to the on-disk form.
    ///
    /// Solid blocks are merged into one fill per run along x; air is implicit.
    pub fn to_scenario(&self) -> Scenario {
        let mut terrain = Vec::new();
        for z in 0..self.size.z {
            for y in 0..self.size.y {
                let mut x = 0;
                while x < self.size.x {
                    let Some(material) = self.block(Point3::new(x, y, z)) else {
                        x += 1;
                        continue;
                    };
                    let start = x;
                    while x + 1 < self.size.x && self.block(Point3::new(x + 1, y, z)) == Some(material) {
                        x += 1;
                    }
                    terrain.push(TerrainFill {
                        low: Point3::new(start, y, z),
                        high: Point3::new(x, y, z),
                        material: Some(material),
                    });
                    x += 1;
                }
            }
        }

        Scenario {
            name: self.name.clone(),
            size: self.size,
            terrain,
            actors: self.actors.clone(),
        }
    }

    /// Material at a point; `None` for air or out of bounds
    pub fn block(&self, p: Point3) -> Option<Material> {
        self.size.index(p).and_then(|i| self.blocks[i])
    }

    /// Set a block, returns false if the point is out of bounds
    pub fn set_block(&mut self, p: Point3, material: Option<Material>) -> bool {
        match self.size.index(p) {
            Some(i) => {
                self.blocks[i] = material;
                true
            }
            None => false,
        }
    }

    /// Number of solid blocks
    #[cfg(test)]
    pub fn solid_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.size.volume() == 0
    }

    /// Actors standing on the given level
    pub fn actors_on_level(&self, z: u32) -> impl Iterator<Item = &Actor> {
        self.actors.iter().filter(move |a| a.position.z == z)
    }

    /// First open level above solid ground in the given column.
    ///
    /// Scans down from the top; returns 0 when the column is all air.
    pub fn ground_level(&self, x: u32, y: u32) -> u32 {
        for z in (0..self.size.z).rev() {
            if self.block(Point3::new(x, y, z)).is_some() {
                return (z + 1).min(self.size.z - 1);
            }
        }
        0
    }

    /// Ground level at the centre column, used as the initial view level
    pub fn center_ground_level(&self) -> u32 {
        self.ground_level(self.size.x / 2, self.size.y / 2)
    }
}

impl Default for World {
    fn default() -> Self {
        Self::empty()
    }
}
