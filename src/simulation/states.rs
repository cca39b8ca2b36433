//! Core state types for the circle simulation.
//!
//! - `Body` holds the state of one circle and its integration / wall bounce
//! - `System` holds the ordered list of bodies, the current simulation time
//!   `t` and the number of completed steps
//!
//! Bodies are addressed by their index in `System::bodies`; two bodies at the
//! same position are still distinct.

use nalgebra::Vector2;

use crate::simulation::engine::Arena;

pub type NVec2 = Vector2<f64>;

/// Cosmetic colour, only read by whatever draws the bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Clone)]
pub struct Body {
    pub(crate) position: NVec2,
    pub(crate) velocity: NVec2,
    radius: f64,
    mass: f64, // radius^2 at construction, never recomputed
    color: Color,
    cell: (i32, i32), // cached grid coordinates, refreshed every step
}

impl Body {
    /// Body at rest with mass derived from its radius
    pub fn new(position: NVec2, radius: f64, color: Color) -> Self {
        Self {
            position,
            velocity: NVec2::zeros(),
            radius,
            mass: radius * radius,
            color,
            cell: (0, 0),
        }
    }

    pub fn with_velocity(mut self, velocity: NVec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn position(&self) -> NVec2 {
        self.position
    }

    pub fn velocity(&self) -> NVec2 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: NVec2) {
        self.velocity = velocity;
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Grid cell computed by the last `advance` / `locate`
    pub fn cell(&self) -> (i32, i32) {
        self.cell
    }

    pub fn speed(&self) -> f64 {
        self.velocity.norm()
    }

    /// Refresh the cached grid cell from the current position
    pub fn locate(&mut self, arena: &Arena) -> (i32, i32) {
        self.cell = arena.cell_of(&self.position);
        self.cell
    }

    /// Move by `velocity * dt`, reflect off the arena walls and return the new cell
    ///
    /// Each axis is checked once: the position is clamped to the wall and the
    /// matching velocity component is negated without any energy loss.
    pub fn advance(&mut self, dt: f64, arena: &Arena) -> (i32, i32) {
        self.position += self.velocity * dt;

        let r = self.radius;
        if self.position.x < r {
            self.position.x = r;
            self.velocity.x = -self.velocity.x;
        } else if self.position.x > arena.width - r {
            self.position.x = arena.width - r;
            self.velocity.x = -self.velocity.x;
        }
        if self.position.y < r {
            self.position.y = r;
            self.velocity.y = -self.velocity.y;
        } else if self.position.y > arena.height - r {
            self.position.y = arena.height - r;
            self.velocity.y = -self.velocity.y;
        }

        self.locate(arena)
    }

    /// Clamp the position into the arena without touching the velocity
    ///
    /// Collision separation can nudge a body past a wall after `advance`
    /// already ran; this restores the containment bound for the step.
    pub fn contain(&mut self, arena: &Arena) {
        let r = self.radius;
        self.position.x = self.position.x.clamp(r, arena.width - r);
        self.position.y = self.position.y.clamp(r, arena.height - r);
    }
}

#[derive(Debug, Clone, Default)]
pub struct System {
    pub bodies: Vec<Body>, // collection of bodies, indices stable within a step
    pub t: f64, // time, advanced by the motion step
    pub steps: u64, // completed steps
}

impl System {
    pub fn new(bodies: Vec<Body>) -> Self {
        Self { bodies, t: 0.0, steps: 0 }
    }

    /// Sum of 1/2 m v^2 over all bodies
    pub fn kinetic_energy(&self) -> f64 {
        self.bodies
            .iter()
            .map(|b| 0.5 * b.mass * b.velocity.norm_squared())
            .sum()
    }

    /// Sum of m v over all bodies
    pub fn momentum(&self) -> NVec2 {
        self.bodies
            .iter()
            .fold(NVec2::zeros(), |acc, b| acc + b.mass * b.velocity)
    }
}
