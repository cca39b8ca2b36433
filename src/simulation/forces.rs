//! Force / acceleration contributors for the circle simulation
//!
//! Defines the acceleration trait, the set that sums its terms, and direct
//! Newtonian gravity between every pair of bodies

use crate::simulation::states::{Body, NVec2, System};

/// Collection of acceleration terms (gravity, drag, etc.)
/// Each term implements [`Acceleration`] and their contributions are summed
/// into a single acceleration vector per body
pub struct AccelSet {
    terms: Vec<Box<dyn Acceleration + Send + Sync>>,
}

impl Default for AccelSet {
    fn default() -> Self {
        Self::new()
    }
}

impl AccelSet {
    /// Create an empty acceleration set
    pub fn new() -> Self {
        Self {
            terms: Vec::new()
        }
    }

    /// Add an acceleration term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Acceleration + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    /// Compute total accelerations at time `t` for all bodies in `sys`
    /// - `out[i]` will be set to the sum of contributions from all terms
    pub fn accumulate_accels(&self, t: f64, sys: &System, out: &mut [NVec2]) {
        for a in out.iter_mut() {
            *a = NVec2::zeros();
        }
        for term in &self.terms {
            term.acceleration(t, sys, out);
        }
    }
}

/// Trait for acceleration sources operating on [`System`]
/// Implementations add their contribution into `out[i]` for each body and
/// only read the rest of the system
pub trait Acceleration {
    fn acceleration(&self, t: f64, sys: &System, out: &mut [NVec2]);
}

/// Direct Newtonian gravity, every body against every other body
///
/// Pairs closer than `min_distance` contribute nothing
pub struct NewtonianGravity {
    pub g: f64, // gravitational constant
    pub min_distance: f64, // zero-distance guard
}

impl Acceleration for NewtonianGravity {
    fn acceleration(&self, _t: f64, sys: &System, out: &mut [NVec2]) {
        for (i, body) in sys.bodies.iter().enumerate() {
            for (j, other) in sys.bodies.iter().enumerate() {
                // Excluded by index, coincident bodies are still distinct
                if i == j {
                    continue;
                }
                if let Some(a) = body.gravity_from(other, self.g, self.min_distance) {
                    out[i] += a;
                }
            }
        }
    }
}

impl Body {
    /// Acceleration `self` feels towards `other`
    ///
    /// The force `G * m_self * m_other / dist^2` acts along the line between
    /// the centres; dividing by `m_self` gives the acceleration. Returns
    /// `None` when the centres are closer than `min_distance`.
    pub fn gravity_from(&self, other: &Body, g: f64, min_distance: f64) -> Option<NVec2> {
        let r = other.position - self.position;
        let dist = r.norm();
        if dist < min_distance || dist == 0.0 {
            return None;
        }

        let force = g * self.mass() * other.mass() / (dist * dist);
        let angle = r.y.atan2(r.x);
        Some(NVec2::new(angle.cos(), angle.sin()) * (force / self.mass()))
    }
}
