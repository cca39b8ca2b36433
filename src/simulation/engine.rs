//! High-level runtime engine settings
//!
//! Describes the arena the bodies live in, how it is split into grid
//! cells, and which broad phase the step routine uses

use crate::simulation::states::NVec2;

/// Bounded rectangular region plus its grid resolution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    pub width: f64,
    pub height: f64,
    pub columns: u32, // grid cells across the width
    pub rows: u32, // grid cells across the height
}

impl Arena {
    pub fn new(width: f64, height: f64, columns: u32, rows: u32) -> Self {
        Self { width, height, columns, rows }
    }

    pub fn cell_width(&self) -> f64 {
        self.width / f64::from(self.columns)
    }

    pub fn cell_height(&self) -> f64 {
        self.height / f64::from(self.rows)
    }

    /// Unpadded grid coordinates of a position, `floor(x / cell_width)` per axis
    pub fn cell_of(&self, position: &NVec2) -> (i32, i32) {
        (
            (position.x / self.cell_width()).floor() as i32,
            (position.y / self.cell_height()).floor() as i32,
        )
    }
}

#[derive(Debug, Clone)]
pub struct Engine {
    pub grid: bool, // false = all-pairs collision scan, true = spatial grid
    pub arena: Arena,
}
