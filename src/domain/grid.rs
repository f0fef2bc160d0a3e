use rand::Rng;
use thiserror::Error;

use super::{Cell, Color, Position, Rule};

/// Moore neighborhood offsets `(dx, dy)`, radius 1.
pub const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
];

/// Color used when a grid is built without a random source.
const PLAIN_TILE_COLOR: Color = Color::rgba(255, 255, 255, 255);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("grid dimensions must be non-zero, got {cols} cols x {rows} rows")]
    EmptyDimension { cols: usize, rows: usize },
}

/// Grid owns every cell of the torus in a flat row-major arena.
///
/// Exactly one cell exists per `(x, y)`; dimensions are fixed at construction.
#[derive(Clone, Debug)]
pub struct Grid {
    cols: usize,
    rows: usize,
    cells: Vec<Cell>,
}

/// Bring a coordinate that is at most one step outside `[0, dim)` back in range.
///
/// Only valid for radius-1 offsets. A wider neighborhood needs a real modulo.
#[inline]
fn wrap(coord: isize, dim: usize) -> usize {
    debug_assert!(coord >= -1 && coord <= dim as isize);
    if coord < 0 {
        dim - 1
    } else if coord as usize >= dim {
        0
    } else {
        coord as usize
    }
}

impl Grid {
    /// Create a grid with all cells dead and a plain tile color
    pub fn new(cols: usize, rows: usize) -> Result<Self, GridError> {
        Self::build(cols, rows, |_| (PLAIN_TILE_COLOR, false))
    }

    /// Create a grid with all cells dead and a random light color per cell
    pub fn colored<R: Rng>(cols: usize, rows: usize, rng: &mut R) -> Result<Self, GridError> {
        Self::build(cols, rows, |_| (Color::random_light(rng), false))
    }

    /// Create a grid where each cell is alive independently with probability `alive_rate`.
    ///
    /// The rate is clamped to `0.0..=1.0`; NaN counts as `0.0`. Cells are visited row-major; each draws its color first, then its state.
    pub fn random<R: Rng>(
        cols: usize,
        rows: usize,
        alive_rate: f64,
        rng: &mut R,
    ) -> Result<Self, GridError> {
        let alive_rate = if alive_rate.is_nan() { 0.0 } else { alive_rate.clamp(0.0, 1.0) };
        Self::build(cols, rows, |_| {
            let color = Color::random_light(rng);
            let alive = rng.random_bool(alive_rate);
            (color, alive)
        })
    }

    fn build(
        cols: usize,
        rows: usize,
        mut init: impl FnMut(Position) -> (Color, bool),
    ) -> Result<Self, GridError> {
        if cols == 0 || rows == 0 {
            return Err(GridError::EmptyDimension { cols, rows });
        }

        let cells = (0..rows)
            .flat_map(|y| (0..cols).map(move |x| Position::new(x, y)))
            .map(|position| {
                let (color, alive) = init(position);
                Cell::new(position, color, alive)
            })
            .collect();

        Ok(Self { cols, rows, cells })
    }

    /// Grid dimensions as `(cols, rows)`
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    /// Number of cells, `cols * rows`
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Convert 2D coordinates to the arena index
    pub const fn index_of(&self, x: usize, y: usize) -> usize {
        x + y * self.cols
    }

    /// Convert an arena index back to coordinates
    pub const fn position_of(&self, index: usize) -> Position {
        Position::new(index % self.cols, index / self.cols)
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.cols && y < self.rows
    }

    /// Get cell at position (with bounds checking)
    pub fn cell(&self, x: usize, y: usize) -> Option<&Cell> {
        self.contains(x, y).then(|| &self.cells[self.index_of(x, y)])
    }

    pub fn is_alive(&self, x: usize, y: usize) -> bool {
        self.cell(x, y).is_some_and(Cell::is_alive)
    }

    /// Set the committed state of a cell. Used for seeding before the first tick;
    /// out-of-range coordinates are ignored.
    pub fn set_alive(&mut self, x: usize, y: usize, alive: bool) {
        if self.contains(x, y) {
            let idx = self.index_of(x, y);
            self.cells[idx].seed(alive);
        }
    }

    /// The 8 wrapped Moore-neighborhood coordinates of `(x, y)`, in
    /// [`NEIGHBOR_OFFSETS`] order.
    ///
    /// # Panics
    /// If `(x, y)` is outside the grid. Use [`Grid::contains`] first for untrusted input.
    pub fn neighbor_positions(&self, x: usize, y: usize) -> [Position; 8] {
        assert!(
            self.contains(x, y),
            "({x}, {y}) is outside a {}x{} grid",
            self.cols,
            self.rows
        );
        NEIGHBOR_OFFSETS.map(|(dx, dy)| {
            Position::new(
                wrap(x as isize + dx, self.cols),
                wrap(y as isize + dy, self.rows),
            )
        })
    }

    /// The 8 wrapped neighbors of `(x, y)`. On a 1-wide axis a neighbor may be the cell itself.
    ///
    /// # Panics
    /// If `(x, y)` is outside the grid.
    pub fn neighbors_of(&self, x: usize, y: usize) -> [&Cell; 8] {
        self.neighbor_positions(x, y)
            .map(|p| &self.cells[self.index_of(p.x, p.y)])
    }

    /// Count live neighbors using toroidal wrapping
    pub fn count_alive_neighbors(&self, x: usize, y: usize) -> u8 {
        self.neighbors_of(x, y)
            .iter()
            .filter(|cell| cell.is_alive())
            .count() as u8
    }

    /// Iterate over all cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.cells.iter()
    }

    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// Positions of every live cell, row-major
    pub fn alive_positions(&self) -> Vec<Position> {
        self.cells
            .iter()
            .filter(|cell| cell.is_alive())
            .map(Cell::position)
            .collect()
    }

    /// Next state of the cell at `index`, read only from committed values.
    pub(crate) fn next_state_at(&self, index: usize, rule: &dyn Rule) -> bool {
        let Position { x, y } = self.position_of(index);
        rule.next_state(self.cells[index].is_alive(), self.count_alive_neighbors(x, y))
    }

    pub(crate) fn stage(&mut self, index: usize, alive_next: bool) {
        self.cells[index].stage(alive_next);
    }

    /// Promote every staged value. Returns the number of live cells afterwards.
    pub(crate) fn commit(&mut self) -> usize {
        self.cells
            .iter_mut()
            .map(Cell::commit)
            .filter(|&alive| alive)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_rejects_empty_dimensions() {
        assert_eq!(Grid::new(0, 5).unwrap_err(), GridError::EmptyDimension { cols: 0, rows: 5 });
        assert!(Grid::new(5, 0).is_err());
    }

    #[test]
    fn test_row_major_layout() {
        let grid = Grid::new(4, 3).unwrap();
        assert_eq!(grid.cell_count(), 12);
        for (idx, cell) in grid.cells().enumerate() {
            assert_eq!(grid.position_of(idx), cell.position());
            assert_eq!(grid.index_of(cell.position().x, cell.position().y), idx);
        }
        assert_eq!(grid.position_of(5), Position::new(1, 1));
    }

    #[test]
    fn test_corner_wraps_to_opposite_corner() {
        let grid = Grid::new(5, 4).unwrap();
        let neighbors = grid.neighbor_positions(0, 0);
        assert_eq!(neighbors[0], Position::new(4, 3));
        assert!(neighbors.contains(&Position::new(1, 1)));
        assert!(neighbors.contains(&Position::new(4, 0)));
        assert!(neighbors.contains(&Position::new(0, 3)));

        let neighbors = grid.neighbor_positions(4, 3);
        assert!(neighbors.contains(&Position::new(0, 0)));
        assert!(neighbors.contains(&Position::new(3, 2)));
    }

    #[test]
    fn test_count_alive_neighbors_across_edges() {
        let mut grid = Grid::new(5, 5).unwrap();
        grid.set_alive(4, 4, true);
        grid.set_alive(4, 0, true);
        grid.set_alive(0, 4, true);
        assert_eq!(grid.count_alive_neighbors(0, 0), 3);
        // the cell itself is never counted on a wide grid
        assert_eq!(grid.count_alive_neighbors(4, 4), 2);
    }

    #[test]
    fn test_single_cell_grid_counts_itself() {
        let mut grid = Grid::new(1, 1).unwrap();
        assert_eq!(grid.count_alive_neighbors(0, 0), 0);
        grid.set_alive(0, 0, true);
        assert!(grid.neighbor_positions(0, 0).iter().all(|p| *p == Position::new(0, 0)));
        assert_eq!(grid.count_alive_neighbors(0, 0), 8);
    }

    #[test]
    fn test_set_alive_out_of_range_is_ignored() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.set_alive(3, 0, true);
        grid.set_alive(0, 3, true);
        assert_eq!(grid.alive_count(), 0);
        assert!(grid.cell(3, 0).is_none());
    }

    #[test]
    fn test_random_grid_is_reproducible() {
        let a = Grid::random(20, 15, 0.3, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = Grid::random(20, 15, 0.3, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a.alive_positions(), b.alive_positions());
        assert!(a.cells().zip(b.cells()).all(|(x, y)| x.color() == y.color()));
    }

    #[test]
    fn test_random_grid_extremes() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(Grid::random(10, 10, 0.0, &mut rng).unwrap().alive_count(), 0);
        assert_eq!(Grid::random(10, 10, 1.0, &mut rng).unwrap().alive_count(), 100);
    }

    #[test]
    fn test_random_grid_tolerates_out_of_range_rates() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(Grid::random(6, 6, f64::NAN, &mut rng).unwrap().alive_count(), 0);
        assert_eq!(Grid::random(6, 6, -0.5, &mut rng).unwrap().alive_count(), 0);
        assert_eq!(Grid::random(6, 6, 7.0, &mut rng).unwrap().alive_count(), 36);
    }

    #[test]
    #[should_panic(expected = "outside a 4x3 grid")]
    fn test_neighbor_positions_rejects_out_of_range() {
        let grid = Grid::new(4, 3).unwrap();
        grid.neighbor_positions(4, 0);
    }

    #[test]
    #[should_panic(expected = "outside a 4x3 grid")]
    fn test_neighbors_of_rejects_out_of_range() {
        let grid = Grid::new(4, 3).unwrap();
        grid.neighbors_of(0, 3);
    }

    proptest! {
        #[test]
        fn prop_neighbors_are_in_range_and_adjacent(
            cols in 1usize..40,
            rows in 1usize..40,
            seed in any::<u64>(),
        ) {
            let grid = Grid::new(cols, rows).unwrap();
            let mut rng = StdRng::seed_from_u64(seed);
            let x = rng.random_range(0..cols);
            let y = rng.random_range(0..rows);

            let neighbors = grid.neighbor_positions(x, y);
            prop_assert_eq!(neighbors.len(), 8);
            for (p, (dx, dy)) in neighbors.iter().zip(NEIGHBOR_OFFSETS) {
                prop_assert!(p.x < cols && p.y < rows);
                prop_assert_eq!(p.x, (x as isize + dx).rem_euclid(cols as isize) as usize);
                prop_assert_eq!(p.y, (y as isize + dy).rem_euclid(rows as isize) as usize);
            }
        }

        #[test]
        fn prop_count_matches_neighbor_states(
            cols in 1usize..16,
            rows in 1usize..16,
            seed in any::<u64>(),
        ) {
            let grid = Grid::random(cols, rows, 0.5, &mut StdRng::seed_from_u64(seed)).unwrap();
            for cell in grid.cells() {
                let Position { x, y } = cell.position();
                let count = grid.count_alive_neighbors(x, y);
                prop_assert!(count <= 8);
                let expected = grid
                    .neighbor_positions(x, y)
                    .iter()
                    .filter(|p| grid.is_alive(p.x, p.y))
                    .count() as u8;
                prop_assert_eq!(count, expected);
            }
        }
    }
}
