//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! `Scenario` containing:
//! - engine settings (`Engine`, arena and broad phase)
//! - numerical parameters (`Parameters`)
//! - system state (`System` with bodies at t = 0)
//! - active force set (`AccelSet`)
//! - the spatial grid reused by every step
//!
//! A renderer owns a `Scenario`, calls [`Scenario::step`] once per frame and
//! reads positions, radii and colours back through [`Scenario::bodies`].

use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::configuration::config::{ConfigError, ScenarioConfig};
use crate::simulation::engine::{Arena, Engine};
use crate::simulation::forces::{AccelSet, NewtonianGravity};
use crate::simulation::grid::SpatialGrid;
use crate::simulation::integrator::{self, StepReport};
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, Color, NVec2, System};

/// Runtime bundle constructed from a [`ScenarioConfig`]
///
/// `parameters` is private: the gravity term holds its own copy of `g` and
/// `min_distance`, so changes go through [`Scenario::set_parameters`].
pub struct Scenario {
    pub engine: Engine,
    parameters: Parameters,
    pub system: System,
    pub forces: AccelSet,
    pub grid: SpatialGrid,
}

impl Scenario {
    /// Validate `cfg` and spawn its bodies at seeded random positions
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;

        // Engine (runtime) from EngineConfig + ArenaConfig
        let arena = Arena::new(cfg.arena.width, cfg.arena.height, cfg.engine.columns, cfg.engine.rows);
        let engine = Engine {
            grid: cfg.engine.grid,
            arena,
        };

        // Parameters (runtime) from ParametersConfig
        let p_cfg = &cfg.parameters;
        let parameters = Parameters {
            g: p_cfg.g,
            gravity_dt: p_cfg.gravity_dt,
            motion_dt: p_cfg.motion_dt,
            separation: p_cfg.separation,
            min_distance: p_cfg.min_distance,
        };

        let bodies = spawn_bodies(cfg.bodies.count, cfg.bodies.radius, &arena, p_cfg.seed);

        info!(
            "built scenario: {} bodies of radius {} in a {}x{} arena ({} broad phase, seed {})",
            bodies.len(),
            cfg.bodies.radius,
            arena.width,
            arena.height,
            if engine.grid { "grid" } else { "all-pairs" },
            p_cfg.seed
        );

        Ok(Self::from_parts(engine, parameters, bodies))
    }

    /// Assemble a scenario around an existing set of bodies
    ///
    /// Registers Newtonian gravity and buckets the bodies once so the grid
    /// is consistent before the first step.
    pub fn from_parts(engine: Engine, parameters: Parameters, mut bodies: Vec<Body>) -> Self {
        for b in bodies.iter_mut() {
            b.locate(&engine.arena);
        }

        let mut grid = SpatialGrid::new(engine.arena);
        grid.rebuild(&bodies);

        let forces = force_set(&parameters);

        Self {
            engine,
            parameters,
            system: System::new(bodies),
            forces,
            grid,
        }
    }

    /// Advance one step: gravity, motion, grid rebuild, collisions
    pub fn step(&mut self) -> StepReport {
        let Scenario {
            engine,
            parameters,
            system,
            forces,
            grid,
        } = self;

        integrator::step(system, grid, forces, engine, parameters)
    }

    pub fn bodies(&self) -> &[Body] {
        &self.system.bodies
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Swap in new parameters and re-register the force terms that read them
    pub fn set_parameters(&mut self, parameters: Parameters) {
        self.forces = force_set(&parameters);
        self.parameters = parameters;
    }
}

fn force_set(parameters: &Parameters) -> AccelSet {
    AccelSet::new().with(NewtonianGravity {
        g: parameters.g,
        min_distance: parameters.min_distance,
    })
}

/// `count` resting bodies uniformly placed so that none touches a wall
///
/// Colours vary only in their green channel, `25 * u` for `u` in `0..=10`.
pub fn spawn_bodies(count: usize, radius: f64, arena: &Arena, seed: u64) -> Vec<Body> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let x = rng.random_range(radius..=arena.width - radius);
            let y = rng.random_range(radius..=arena.height - radius);
            let green = rng.random_range(0..=10u8) * 25;
            Body::new(NVec2::new(x, y), radius, Color::new(0, green, 255))
        })
        .collect()
}
