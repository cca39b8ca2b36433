//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – broad phase selection and grid resolution
//! - [`ArenaConfig`]      – size of the bounded arena
//! - [`ParametersConfig`] – physical constants and the two time steps
//! - [`BodiesConfig`]     – how many bodies to spawn and how large they are
//! - [`RunConfig`]        – headless run length and logging cadence
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! An example scenario matching these types:
//!
//! ```yaml
//! engine:
//!   grid: true              # false -> all-pairs collision scan
//!   columns: 70
//!   rows: 50
//!
//! arena:
//!   width: 700.0
//!   height: 500.0
//!
//! parameters:
//!   G: 1.0                  # gravitational constant
//!   gravity_dt: 0.1         # step used when integrating gravity into velocity
//!   motion_dt: 0.2          # step used when integrating velocity into position
//!   separation: 0.1         # overlap separation factor, in (0, 1]
//!   min_distance: 1.0e-9    # pairs closer than this are skipped
//!   seed: 42                # deterministic seed for body placement
//!
//! bodies:
//!   count: 10
//!   radius: 5.0
//!
//! run:
//!   steps: 1000
//!   log_every: 100
//! ```
//!
//! Everything except `arena`, `bodies` and `parameters.G` has a default.
//! [`ScenarioConfig::validate`] checks the values before a runtime
//! `Scenario` is built from them.

use serde::Deserialize;
use thiserror::Error;

/// Reasons a scenario configuration is rejected
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("arena dimensions must be positive and finite, got {width} x {height}")]
    InvalidArena { width: f64, height: f64 },
    #[error("grid resolution must be at least 1 x 1, got {columns} x {rows}")]
    InvalidGrid { columns: u32, rows: u32 },
    #[error("body radius must be positive and finite, got {0}")]
    InvalidRadius(f64),
    #[error("bodies of radius {radius} do not fit in a {width} x {height} arena")]
    RadiusTooLarge { radius: f64, width: f64, height: f64 },
    #[error("grid cells of {cell_width} x {cell_height} are smaller than a body diameter of {diameter}")]
    CellTooSmall { cell_width: f64, cell_height: f64, diameter: f64 },
    #[error("time step `{name}` must be finite and non-negative, got {value}")]
    InvalidTimeStep { name: &'static str, value: f64 },
    #[error("separation factor must lie in (0, 1], got {0}")]
    InvalidSeparation(f64),
    #[error("minimum distance must be finite and non-negative, got {0}")]
    InvalidMinDistance(f64),
    #[error("gravitational constant must be finite, got {0}")]
    InvalidGravity(f64),
}

/// Broad phase selection and grid resolution
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct EngineConfig {
    pub grid: bool,   // `true` - bucket bodies into a grid, `false` - scan every pair
    pub columns: u32, // grid columns across the arena width
    pub rows: u32,    // grid rows across the arena height
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid: true,
            columns: 70,
            rows: 50,
        }
    }
}

/// Size of the bounded region bodies move within
#[derive(Deserialize, Debug, Clone)]
pub struct ArenaConfig {
    pub width: f64,
    pub height: f64,
}

/// Physical constants and numerical parameters
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    #[serde(rename = "G")]
    pub g: f64, // gravitational constant
    #[serde(default = "default_gravity_dt")]
    pub gravity_dt: f64, // step for the gravity -> velocity pass
    #[serde(default = "default_motion_dt")]
    pub motion_dt: f64, // step for the velocity -> position pass
    #[serde(default = "default_separation")]
    pub separation: f64, // fraction of the overlap corrected per collision
    #[serde(default = "default_min_distance")]
    pub min_distance: f64, // pairs closer than this are skipped
    #[serde(default = "default_seed")]
    pub seed: u64, // deterministic seed to make runs reproducable
}

fn default_gravity_dt() -> f64 {
    0.1
}

fn default_motion_dt() -> f64 {
    0.2
}

fn default_separation() -> f64 {
    0.1
}

fn default_min_distance() -> f64 {
    1.0e-9
}

fn default_seed() -> u64 {
    42
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            g: 1.0,
            gravity_dt: default_gravity_dt(),
            motion_dt: default_motion_dt(),
            separation: default_separation(),
            min_distance: default_min_distance(),
            seed: default_seed(),
        }
    }
}

/// Population of uniform bodies to spawn
#[derive(Deserialize, Debug, Clone)]
pub struct BodiesConfig {
    pub count: usize,
    pub radius: f64, // shared by every body, mass is derived as radius^2
}

/// Headless run settings used by the command line driver
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct RunConfig {
    pub steps: usize,
    pub log_every: usize, // 0 disables periodic diagnostics
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            steps: 1000,
            log_every: 100,
        }
    }
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    pub arena: ArenaConfig,
    pub parameters: ParametersConfig,
    pub bodies: BodiesConfig,
    #[serde(default)]
    pub run: RunConfig,
}

impl Default for ScenarioConfig {
    /// 10 bodies of radius 5 in a 700 x 500 arena split into 70 x 50 cells
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            arena: ArenaConfig {
                width: 700.0,
                height: 500.0,
            },
            parameters: ParametersConfig::default(),
            bodies: BodiesConfig {
                count: 10,
                radius: 5.0,
            },
            run: RunConfig::default(),
        }
    }
}

impl ScenarioConfig {
    /// Reject configurations the step routine cannot honour
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ArenaConfig { width, height } = self.arena;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ConfigError::InvalidArena { width, height });
        }

        let EngineConfig { columns, rows, .. } = self.engine;
        if columns == 0 || rows == 0 {
            return Err(ConfigError::InvalidGrid { columns, rows });
        }

        let radius = self.bodies.radius;
        if !(radius.is_finite() && radius > 0.0) {
            return Err(ConfigError::InvalidRadius(radius));
        }
        if 2.0 * radius > width || 2.0 * radius > height {
            return Err(ConfigError::RadiusTooLarge { radius, width, height });
        }

        // The 3x3 neighbourhood only sees every touching pair when a cell is
        // at least one diameter wide. The all-pairs scan has no such limit.
        let cell_width = width / f64::from(columns);
        let cell_height = height / f64::from(rows);
        let diameter = 2.0 * radius;
        if self.engine.grid && (cell_width < diameter || cell_height < diameter) {
            return Err(ConfigError::CellTooSmall { cell_width, cell_height, diameter });
        }

        let p = &self.parameters;
        if !p.g.is_finite() {
            return Err(ConfigError::InvalidGravity(p.g));
        }
        for (name, value) in [("gravity_dt", p.gravity_dt), ("motion_dt", p.motion_dt)] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::InvalidTimeStep { name, value });
            }
        }
        if !(p.separation > 0.0 && p.separation <= 1.0) {
            return Err(ConfigError::InvalidSeparation(p.separation));
        }
        if !(p.min_distance.is_finite() && p.min_distance >= 0.0) {
            return Err(ConfigError::InvalidMinDistance(p.min_distance));
        }

        Ok(())
    }
}
