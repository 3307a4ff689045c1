//! Point of view for the game view: camera centre, current level and zoom
//!
//! Saved next to a scenario file as `<name>.pov.ron` so reopening a save
//! returns to the same spot.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::world::{ScenarioError, World};

/// Smallest and largest pixels-per-block
pub const MIN_SCALE: f32 = 4.0;
pub const MAX_SCALE: f32 = 96.0;

/// Zoom factor per mouse wheel notch
const ZOOM_STEP: f32 = 1.1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pov {
    /// Camera centre in block units
    pub center_x: f32,
    pub center_y: f32,
    /// Level being viewed
    pub z: u32,
    /// Pixels per block
    pub scale: f32,
}

impl Default for Pov {
    fn default() -> Self {
        Self { center_x: 0.0, center_y: 0.0, z: 0, scale: 24.0 }
    }
}

impl Pov {
    /// Centre of the world at ground level of the centre column
    pub fn centered_on(world: &World, scale: f32) -> Self {
        Self {
            center_x: world.size.x as f32 * 0.5,
            center_y: world.size.y as f32 * 0.5,
            z: world.center_ground_level(),
            scale: scale.clamp(MIN_SCALE, MAX_SCALE),
        }
    }

    /// Screen-space offset that puts the camera centre in the middle of the screen
    pub fn offset(&self, screen: (f32, f32)) -> (f32, f32) {
        (
            (screen.0 * 0.5 - self.center_x * self.scale).round(),
            (screen.1 * 0.5 - self.center_y * self.scale).round(),
        )
    }

    /// Move the camera by a number of blocks, clamped to the world
    pub fn pan(&mut self, dx: f32, dy: f32, world: &World) {
        self.center_x = (self.center_x + dx).clamp(0.0, world.size.x as f32);
        self.center_y = (self.center_y + dy).clamp(0.0, world.size.y as f32);
    }

    /// Go up one level. Returns false at the top.
    pub fn level_up(&mut self, world: &World) -> bool {
        if self.z + 1 < world.size.z {
            self.z += 1;
            true
        } else {
            false
        }
    }

    /// Go down one level. Returns false at the bottom.
    pub fn level_down(&mut self) -> bool {
        if self.z > 0 {
            self.z -= 1;
            true
        } else {
            false
        }
    }

    /// Zoom by wheel notches (positive zooms in)
    pub fn zoom(&mut self, notches: f32) {
        self.scale = (self.scale * ZOOM_STEP.powf(notches)).clamp(MIN_SCALE, MAX_SCALE);
    }

    /// Clamp a restored pov to the bounds of the world it is shown over
    pub fn fit_to(&mut self, world: &World) {
        self.center_x = self.center_x.clamp(0.0, world.size.x as f32);
        self.center_y = self.center_y.clamp(0.0, world.size.y as f32);
        self.z = self.z.min(world.size.z.saturating_sub(1));
        self.scale = self.scale.clamp(MIN_SCALE, MAX_SCALE);
    }
}

/// Location of the pov file for a scenario file
pub fn pov_path(scenario: &Path) -> PathBuf {
    let stem = scenario.file_stem().map(|s| s.to_string_lossy().to_string()).unwrap_or_default();
    scenario.with_file_name(format!("{}.pov.ron", stem))
}

pub fn load_pov(path: &Path) -> Result<Pov, ScenarioError> {
    let contents = fs::read_to_string(path)?;
    Ok(ron::from_str(&contents)?)
}

pub fn save_pov(pov: &Pov, path: &Path) -> Result<(), ScenarioError> {
    let contents = ron::ser::to_string_pretty(pov, ron::ser::PrettyConfig::new())?;
    fs::write(path, contents)?;
    Ok(())
}
