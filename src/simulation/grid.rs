//! Uniform grid broad phase
//!
//! The arena is split into `columns x rows` cells and every body index is
//! bucketed by its cached cell. The grid carries one cell of padding on each
//! side, so a 3x3 neighbourhood around any real cell is always in bounds.
//! It only stores indices into `System::bodies` and is rebuilt every step.

use crate::simulation::engine::Arena;
use crate::simulation::states::Body;

#[derive(Debug, Clone)]
pub struct SpatialGrid {
    arena: Arena,
    stride: usize, // padded columns, columns + 2
    cells: Vec<Vec<usize>>, // (columns + 2) * (rows + 2), row-major
}

impl SpatialGrid {
    pub fn new(arena: Arena) -> Self {
        let stride = arena.columns as usize + 2;
        let padded_rows = arena.rows as usize + 2;
        Self {
            arena,
            stride,
            cells: vec![Vec::new(); stride * padded_rows],
        }
    }

    /// Flat index of the padded slot holding `cell`
    ///
    /// Walls keep every body inside the arena, so a cell more than one step
    /// outside the real range means the step routine broke its invariant.
    fn slot(&self, cell: (i32, i32)) -> usize {
        let columns = self.arena.columns as i32;
        let rows = self.arena.rows as i32;
        debug_assert!(
            (-1..=columns).contains(&cell.0) && (-1..=rows).contains(&cell.1),
            "cell {:?} outside the padded {}x{} grid",
            cell,
            columns,
            rows
        );
        let x = cell.0.clamp(0, columns - 1) + 1;
        let y = cell.1.clamp(0, rows - 1) + 1;
        y as usize * self.stride + x as usize
    }

    /// Empty every cell, keeping allocations
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.clear();
        }
    }

    pub fn insert(&mut self, index: usize, cell: (i32, i32)) {
        let slot = self.slot(cell);
        self.cells[slot].push(index);
    }

    /// Re-bucket every body by its cached cell
    pub fn rebuild(&mut self, bodies: &[Body]) {
        self.clear();
        for (index, body) in bodies.iter().enumerate() {
            self.insert(index, body.cell());
        }
    }

    /// Every index stored in the 3x3 block centred on `cell`
    ///
    /// The centre cell is included, so the caller receives the queried body
    /// itself among the candidates and must skip it.
    pub fn neighbors_of(&self, cell: (i32, i32)) -> impl Iterator<Item = usize> + '_ {
        let centre = self.slot(cell);
        let stride = self.stride;
        [centre - stride, centre, centre + stride]
            .into_iter()
            .flat_map(move |row| self.cells[row - 1..=row + 1].iter())
            .flat_map(|cell| cell.iter().copied())
    }

    /// Indices stored in exactly `cell`
    pub fn cell_contents(&self, cell: (i32, i32)) -> &[usize] {
        &self.cells[self.slot(cell)]
    }

    /// Number of non-empty cells
    pub fn occupied_cells(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    /// Total number of stored indices
    pub fn len(&self) -> usize {
        self.cells.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Vec::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::states::{Color, NVec2};

    fn arena() -> Arena {
        Arena::new(700.0, 500.0, 70, 50)
    }

    fn body_at(x: f64, y: f64) -> Body {
        let mut b = Body::new(NVec2::new(x, y), 5.0, Color::default());
        b.locate(&arena());
        b
    }

    #[test]
    fn padded_layout_matches_resolution() {
        let grid = SpatialGrid::new(arena());
        assert_eq!(grid.cells.len(), 72 * 52);
        assert!(grid.is_empty());
    }

    #[test]
    fn corner_cells_query_without_overflow() {
        let bodies = vec![body_at(5.0, 5.0), body_at(695.0, 495.0)];
        let mut grid = SpatialGrid::new(arena());
        grid.rebuild(&bodies);

        let first: Vec<usize> = grid.neighbors_of(bodies[0].cell()).collect();
        let last: Vec<usize> = grid.neighbors_of(bodies[1].cell()).collect();
        assert_eq!(first, vec![0]);
        assert_eq!(last, vec![1]);
    }

    #[test]
    fn far_wall_position_clamps_into_last_cell() {
        // x == width lands one past the last column, inside the padding
        let mut grid = SpatialGrid::new(arena());
        grid.insert(0, arena().cell_of(&NVec2::new(700.0, 500.0)));
        assert_eq!(grid.cell_contents((69, 49)), &[0]);
    }

    #[test]
    fn rebuild_discards_previous_assignment() {
        let mut bodies = vec![body_at(15.0, 15.0)];
        let mut grid = SpatialGrid::new(arena());
        grid.rebuild(&bodies);
        assert_eq!(grid.cell_contents((1, 1)), &[0]);

        bodies[0].position = NVec2::new(305.0, 205.0);
        bodies[0].locate(&arena());
        grid.rebuild(&bodies);
        assert!(grid.cell_contents((1, 1)).is_empty());
        assert_eq!(grid.cell_contents((30, 20)), &[0]);
        assert_eq!(grid.len(), 1);
        assert_eq!(grid.occupied_cells(), 1);
    }
}
