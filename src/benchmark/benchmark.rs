use std::time::Instant;

use crate::simulation::collision;
use crate::simulation::engine::{Arena, Engine};
use crate::simulation::grid::SpatialGrid;
use crate::simulation::params::Parameters;
use crate::simulation::scenario::Scenario;
use crate::simulation::states::{Body, Color, NVec2};

/// Arena wide enough that the default radius keeps a sparse population
fn bench_arena(n: usize) -> Arena {
    // grow the arena with n so density stays roughly constant
    let side = 40.0 * (n as f64).sqrt().max(10.0);
    let columns = (side / 10.0) as u32;
    Arena::new(side, side, columns, columns)
}

/// Helper to build `n` bodies at deterministic positions, no rand needed
fn make_bodies(n: usize, arena: &Arena) -> Vec<Body> {
    let radius = 5.0;
    (0..n)
        .map(|i| {
            let i_f = i as f64;
            let x = radius + (0.5 + 0.5 * (i_f * 0.37).sin()) * (arena.width - 2.0 * radius);
            let y = radius + (0.5 + 0.5 * (i_f * 0.13).cos()) * (arena.height - 2.0 * radius);
            Body::new(NVec2::new(x, y), radius, Color::new(0, 0, 255))
                .with_velocity(NVec2::new((i_f * 0.7).cos(), (i_f * 0.3).sin()))
        })
        .collect()
}

fn make_scenario(n: usize, grid: bool) -> Scenario {
    let arena = bench_arena(n);
    let bodies = make_bodies(n, &arena);
    Scenario::from_parts(Engine { grid, arena }, Parameters::default(), bodies)
}

/// Time the collision pass alone, grid against all pairs
pub fn bench_broad_phase() {
    let ns = [200, 400, 800, 1600, 3200, 6400];

    for n in ns {
        let arena = bench_arena(n);
        let mut bodies = make_bodies(n, &arena);
        for b in bodies.iter_mut() {
            b.locate(&arena);
        }
        let params = Parameters::default();

        // Time grid rebuild + neighbourhood scan
        let mut grid_bodies = bodies.clone();
        let mut grid = SpatialGrid::new(arena);
        let t0 = Instant::now();
        grid.rebuild(&grid_bodies);
        let grid_stats = collision::resolve_with_grid(&mut grid_bodies, &grid, params.separation, params.min_distance);
        let dt_grid = t0.elapsed().as_secs_f64();

        // Time all-pairs scan
        let t1 = Instant::now();
        let all_stats = collision::resolve_all_pairs(&mut bodies, params.separation, params.min_distance);
        let dt_all = t1.elapsed().as_secs_f64();

        println!(
            "N = {n:5}, grid = {:8.6} s ({} pairs), all-pairs = {:8.6} s ({} pairs)",
            dt_grid, grid_stats.candidate_pairs, dt_all, all_stats.candidate_pairs
        );
    }
}

/// Time full steps for a range of n
pub fn bench_step() {
    let ns = [100, 200, 400, 800, 1600];
    let steps = 5; // number of steps per model

    for n in ns {
        let mut with_grid = make_scenario(n, true);
        let mut all_pairs = make_scenario(n, false);

        // Warm-up
        with_grid.step();
        all_pairs.step();

        let t0 = Instant::now();
        for _ in 0..steps {
            with_grid.step();
        }
        let grid_per_step = t0.elapsed().as_secs_f64() / steps as f64;

        let t1 = Instant::now();
        for _ in 0..steps {
            all_pairs.step();
        }
        let all_per_step = t1.elapsed().as_secs_f64() / steps as f64;

        println!("N = {:5}, grid step = {:8.6} s,   all-pairs step = {:8.6} s", n, grid_per_step, all_per_step);
    }
}

/// Step cost per n as CSV
/// Paste output directly into excel to graph
pub fn bench_step_curve() {
    println!("N,grid_ms,all_pairs_ms");

    for n in (100..=2000).step_by(100) {
        // Small n: average over a few steps to smooth noise
        let steps = if n <= 500 { 5 } else { 1 };

        let mut with_grid = make_scenario(n, true);
        let t0 = Instant::now();
        for _ in 0..steps {
            with_grid.step();
        }
        let ms_grid = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        let mut all_pairs = make_scenario(n, false);
        let t1 = Instant::now();
        for _ in 0..steps {
            all_pairs.step();
        }
        let ms_all = t1.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        println!("{},{:.6},{:.6}", n, ms_grid, ms_all);
    }
}
