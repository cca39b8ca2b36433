//! Fixed-step update of the circle system
//!
//! One step runs four passes in order:
//! 1. gravity: accelerations from every other body, integrated into velocity
//!    with `gravity_dt`
//! 2. motion: positions integrated with `motion_dt`, walls reflect
//! 3. broad phase: the spatial grid is rebuilt from the new cells
//! 4. narrow phase: touching pairs are separated and exchange speeds, then
//!    positions are clamped back inside the arena

use log::trace;

use super::collision::{self, CollisionStats};
use super::engine::{Arena, Engine};
use super::forces::AccelSet;
use super::grid::SpatialGrid;
use super::params::Parameters;
use super::states::{NVec2, System};

/// What happened during one call to [`step`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    pub candidate_pairs: usize,
    pub collisions: usize,
}

impl From<CollisionStats> for StepReport {
    fn from(stats: CollisionStats) -> Self {
        Self {
            candidate_pairs: stats.candidate_pairs,
            collisions: stats.collisions,
        }
    }
}

/// Integrate the accelerations of every term in `forces` into velocity
///
/// All accelerations are computed from the same positions before any
/// velocity is touched.
pub fn apply_gravity(sys: &mut System, forces: &AccelSet, dt: f64) {
    let n = sys.bodies.len();
    if n == 0 { // no bodies, return
        return;
    }

    let mut accels = vec![NVec2::zeros(); n];
    forces.accumulate_accels(sys.t, &*sys, &mut accels);

    // v += a * dt
    for (b, a) in sys.bodies.iter_mut().zip(accels.iter()) {
        b.velocity += *a * dt;
    }
}

/// Move every body by one motion step, bouncing off the walls
pub fn advance_all(sys: &mut System, arena: &Arena, dt: f64) {
    for b in sys.bodies.iter_mut() {
        b.advance(dt, arena);
    }
    sys.t += dt;
}

/// Advance the system by one full step
///
/// `grid` is only read when `engine.grid` is set; it is left holding the
/// bucket snapshot taken before the collision pass.
pub fn step(sys: &mut System, grid: &mut SpatialGrid, forces: &AccelSet, engine: &Engine, params: &Parameters) -> StepReport {
    apply_gravity(sys, forces, params.gravity_dt);
    advance_all(sys, &engine.arena, params.motion_dt);

    let stats = if engine.grid {
        grid.rebuild(&sys.bodies);
        collision::resolve_with_grid(&mut sys.bodies, grid, params.separation, params.min_distance)
    } else {
        collision::resolve_all_pairs(&mut sys.bodies, params.separation, params.min_distance)
    };

    for b in sys.bodies.iter_mut() {
        b.contain(&engine.arena);
    }

    sys.steps += 1;
    trace!(
        "step {}: {} candidate pairs, {} collisions",
        sys.steps,
        stats.candidate_pairs,
        stats.collisions
    );

    stats.into()
}
