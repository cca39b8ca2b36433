pub mod simulation;
pub mod configuration;
pub mod benchmark;

pub use simulation::states::{Body, Color, System, NVec2};
pub use simulation::engine::{Arena, Engine};
pub use simulation::params::Parameters;
pub use simulation::forces::{Acceleration, AccelSet, NewtonianGravity};
pub use simulation::grid::SpatialGrid;
pub use simulation::collision::{resolve_all_pairs, resolve_pair, resolve_with_grid, CollisionStats};
pub use simulation::integrator::{apply_gravity, advance_all, step, StepReport};
pub use simulation::scenario::{spawn_bodies, Scenario};

pub use configuration::config::{
    ArenaConfig, BodiesConfig, ConfigError, EngineConfig, ParametersConfig, RunConfig, ScenarioConfig,
};

pub use benchmark::benchmark::{bench_broad_phase, bench_step, bench_step_curve};
