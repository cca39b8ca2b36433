//! Pairwise collision detection and response
//!
//! Touching or overlapping circles are pushed apart along the line between
//! their centres and then exchange speeds. Candidate pairs come either from
//! the [`SpatialGrid`] neighbourhood or from a plain all-pairs scan.

use crate::simulation::grid::SpatialGrid;
use crate::simulation::states::{Body, NVec2};

/// Counters from one collision pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionStats {
    pub candidate_pairs: usize, // distinct pairs handed to the narrow phase
    pub collisions: usize, // pairs that were touching and got resolved
}

impl Body {
    /// Separate and exchange velocities with `other` if the two touch
    ///
    /// The exchange is taken in the frame of the left-hand body (the lower
    /// one when both share an x), so `a.resolve_collision(b)` and
    /// `b.resolve_collision(a)` produce identical states. Returns `false`
    /// when the bodies do not touch, or when their centres are closer than
    /// `min_distance` and no collision normal exists.
    pub fn resolve_collision(&mut self, other: &mut Body, separation: f64, min_distance: f64) -> bool {
        let d = other.position - self.position;
        if d.x < 0.0 || (d.x == 0.0 && d.y < 0.0) {
            return other.collide_from_left(self, separation, min_distance);
        }
        self.collide_from_left(other, separation, min_distance)
    }

    /// Collision response with `other` to the right of (or directly above) `self`
    fn collide_from_left(&mut self, other: &mut Body, separation: f64, min_distance: f64) -> bool {
        let d = other.position - self.position;
        let dist = d.norm();
        if dist > self.radius() + other.radius() {
            return false;
        }
        if dist < min_distance || dist == 0.0 {
            return false;
        }

        // Push apart by a fraction of the penetration plus one unit of slack
        let overlap = separation * (self.radius() + other.radius() - dist + 1.0);
        let normal = -d / dist; // from other towards self
        self.position += normal * overlap;
        other.position -= normal * overlap;

        // Still overlapping but already moving apart: separation only, or the
        // exchange would turn the pair back into each other next step
        if (other.velocity - self.velocity).dot(&d) >= 0.0 {
            return true;
        }

        let angle = d.y.atan2(d.x);
        let self_speed = self.speed();
        let other_speed = other.speed();
        let self_direction = self.velocity.y.atan2(self.velocity.x);
        let other_direction = other.velocity.y.atan2(other.velocity.x);

        self.velocity = rotated(other_speed, other_direction - angle);
        other.velocity = rotated(self_speed, self_direction - angle);
        true
    }
}

fn rotated(speed: f64, angle: f64) -> NVec2 {
    NVec2::new(speed * angle.cos(), speed * angle.sin())
}

/// Two distinct bodies borrowed mutably at once
fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> (&mut Body, &mut Body) {
    debug_assert_ne!(i, j, "a body cannot collide with itself");
    if i < j {
        let (head, tail) = bodies.split_at_mut(j);
        (&mut head[i], &mut tail[0])
    } else {
        let (head, tail) = bodies.split_at_mut(i);
        (&mut tail[0], &mut head[j])
    }
}

/// Resolve the collision between `bodies[i]` and `bodies[j]`
pub fn resolve_pair(bodies: &mut [Body], i: usize, j: usize, separation: f64, min_distance: f64) -> bool {
    let (a, b) = pair_mut(bodies, i, j);
    a.resolve_collision(b, separation, min_distance)
}

/// Narrow phase over the 3x3 neighbourhood of every body
///
/// The grid must have been rebuilt from the bodies' current cells. Every
/// unordered pair is handled once, from its lower index: the neighbourhood
/// relation over cached cells is symmetric and the response does not depend
/// on which body asks, so the higher index would only repeat the pair.
pub fn resolve_with_grid(bodies: &mut [Body], grid: &SpatialGrid, separation: f64, min_distance: f64) -> CollisionStats {
    let mut stats = CollisionStats::default();
    for i in 0..bodies.len() {
        let cell = bodies[i].cell();
        for j in grid.neighbors_of(cell) {
            if j <= i {
                continue;
            }
            stats.candidate_pairs += 1;
            if resolve_pair(bodies, i, j, separation, min_distance) {
                stats.collisions += 1;
            }
        }
    }
    stats
}

/// Narrow phase over every unordered pair, no broad phase
pub fn resolve_all_pairs(bodies: &mut [Body], separation: f64, min_distance: f64) -> CollisionStats {
    let mut stats = CollisionStats::default();
    let n = bodies.len();
    for i in 0..n {
        for j in (i + 1)..n {
            stats.candidate_pairs += 1;
            if resolve_pair(bodies, i, j, separation, min_distance) {
                stats.collisions += 1;
            }
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::states::Color;

    fn body(x: f64, y: f64, vx: f64, vy: f64) -> Body {
        Body::new(NVec2::new(x, y), 5.0, Color::default()).with_velocity(NVec2::new(vx, vy))
    }

    #[test]
    fn pair_mut_returns_requested_order() {
        let mut bodies = vec![body(0.0, 0.0, 0.0, 0.0), body(1.0, 0.0, 0.0, 0.0)];
        let (a, b) = pair_mut(&mut bodies, 1, 0);
        assert_eq!(a.position.x, 1.0);
        assert_eq!(b.position.x, 0.0);
    }

    #[test]
    fn apart_bodies_are_untouched() {
        let mut a = body(100.0, 100.0, 1.0, 0.0);
        let mut b = body(120.0, 100.0, -1.0, 0.0);
        assert!(!a.resolve_collision(&mut b, 0.1, 1e-9));
        assert_eq!(a.position, NVec2::new(100.0, 100.0));
        assert_eq!(b.velocity, NVec2::new(-1.0, 0.0));
    }

    #[test]
    fn coincident_bodies_are_skipped() {
        let mut a = body(50.0, 50.0, 1.0, 0.0);
        let mut b = body(50.0, 50.0, 0.0, 1.0);
        assert!(!a.resolve_collision(&mut b, 0.1, 1e-9));
        assert!(a.velocity.iter().all(|v| v.is_finite()));
        assert!(a.position.iter().all(|p| p.is_finite()));
    }

    #[test]
    fn right_hand_receiver_still_swaps_head_on() {
        let mut right = body(110.0, 100.0, -1.0, 0.0);
        let mut left = body(100.0, 100.0, 1.0, 0.0);
        assert!(right.resolve_collision(&mut left, 0.1, 1e-9));
        assert!((right.velocity - NVec2::new(1.0, 0.0)).norm() < 1e-12);
        assert!((left.velocity - NVec2::new(-1.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn separating_overlap_only_pushes_apart() {
        let mut a = body(100.0, 100.0, -1.0, 0.0);
        let mut b = body(108.0, 100.0, 1.0, 0.0);
        assert!(a.resolve_collision(&mut b, 0.1, 1e-9));
        assert_eq!(a.velocity, NVec2::new(-1.0, 0.0));
        assert_eq!(b.velocity, NVec2::new(1.0, 0.0));
        assert!(b.position.x - a.position.x > 8.0);
    }

    #[test]
    fn separation_is_symmetric_about_the_midpoint() {
        let mut a = body(100.0, 100.0, 0.0, 0.0);
        let mut b = body(106.0, 108.0, 0.0, 0.0);
        let mid_before = (a.position + b.position) / 2.0;
        assert!(a.resolve_collision(&mut b, 0.2, 1e-9));
        let mid_after = (a.position + b.position) / 2.0;
        assert!((mid_after - mid_before).norm() < 1e-12);
    }

    #[test]
    fn grid_pass_handles_each_pair_once() {
        use crate::simulation::engine::Arena;

        let arena = Arena::new(700.0, 500.0, 70, 50);
        let mut bodies = vec![body(100.0, 100.0, 1.0, 0.0), body(109.0, 100.0, -1.0, 0.0)];
        for b in &mut bodies {
            b.locate(&arena);
        }
        let mut grid = SpatialGrid::new(arena);
        grid.rebuild(&bodies);

        let stats = resolve_with_grid(&mut bodies, &grid, 0.1, 1e-9);
        assert_eq!(stats, CollisionStats { candidate_pairs: 1, collisions: 1 });
        assert!((bodies[0].velocity - NVec2::new(-1.0, 0.0)).norm() < 1e-12);
        assert!((bodies[1].velocity - NVec2::new(1.0, 0.0)).norm() < 1e-12);
    }
}
