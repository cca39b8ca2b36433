//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - gravitational constant `g`,
//! - the two independent time steps (gravity pass and motion pass),
//! - overlap separation factor and the zero-distance threshold

#[derive(Debug, Clone)]
pub struct Parameters {
    pub g: f64, // gravitational constant
    pub gravity_dt: f64, // step size when integrating gravity into velocity
    pub motion_dt: f64, // step size when integrating velocity into position
    pub separation: f64, // overlap separation factor k, in (0, 1]
    pub min_distance: f64, // pairs closer than this are skipped by gravity and collisions
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            g: 1.0,
            gravity_dt: 0.1,
            motion_dt: 0.2,
            separation: 0.1,
            min_distance: 1.0e-9,
        }
    }
}
