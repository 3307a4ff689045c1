//! Block-grid geometry: points, extents and inclusive cuboids

use serde::{Deserialize, Serialize};

/// A block coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point3 {
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

impl Point3 {
    pub const fn new(x: u32, y: u32, z: u32) -> Self {
        Self { x, y, z }
    }
}

/// World extent in blocks along each axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Size3 {
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

impl Size3 {
    pub const fn new(x: u32, y: u32, z: u32) -> Self {
        Self { x, y, z }
    }

    /// Total number of blocks
    pub fn volume(&self) -> u64 {
        self.x as u64 * self.y as u64 * self.z as u64
    }

    /// Check if a point lies inside the extent
    pub fn contains(&self, p: Point3) -> bool {
        p.x < self.x && p.y < self.y && p.z < self.z
    }

    /// Dense index of a point (x fastest, then y, then z)
    pub fn index(&self, p: Point3) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some(p.x as usize + p.y as usize * self.x as usize + p.z as usize * self.x as usize * self.y as usize)
    }
}

/// Inclusive box of blocks between two corners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cuboid {
    pub low: Point3,
    pub high: Point3,
}

impl Cuboid {
    pub const fn new(low: Point3, high: Point3) -> Self {
        Self { low, high }
    }

    /// Corners are ordered on every axis
    pub fn is_ordered(&self) -> bool {
        self.low.x <= self.high.x && self.low.y <= self.high.y && self.low.z <= self.high.z
    }

    /// Number of blocks covered; zero when the corners are out of order
    pub fn volume(&self) -> u64 {
        if !self.is_ordered() {
            return 0;
        }
        let span = |lo: u32, hi: u32| (hi - lo) as u64 + 1;
        span(self.low.x, self.high.x) * span(self.low.y, self.high.y) * span(self.low.z, self.high.z)
    }

    #[cfg(test)]
    pub fn contains(&self, p: Point3) -> bool {
        p.x >= self.low.x && p.x <= self.high.x
            && p.y >= self.low.y && p.y <= self.high.y
            && p.z >= self.low.z && p.z <= self.high.z
    }

    /// Iterate every block in the cuboid (x fastest)
    pub fn points(&self) -> impl Iterator<Item = Point3> + '_ {
        (self.low.z..=self.high.z).flat_map(move |z| {
            (self.low.y..=self.high.y).flat_map(move |y| {
                (self.low.x..=self.high.x).map(move |x| Point3::new(x, y, z))
            })
        })
    }
}
