//! Cell grid and its lifecycle: init, randomize, point mutation

use rand::Rng;

use crate::core::types::{Boundary, Cell, Probability};

/// Rectangular board of cells, stored row-major
///
/// Dimensions are fixed at creation and are at least 1x1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    data: Vec<Cell>,
}

impl Grid {
    /// All-dead board
    pub fn new(width: usize, height: usize) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            data: vec![Cell::Dead; width * height],
        }
    }

    /// Board where every cell is independently alive with probability 0.5
    pub fn random<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Self {
        let mut grid = Self::new(width, height);
        for cell in grid.data.iter_mut() {
            *cell = Cell::from(rng.gen_bool(0.5));
        }
        grid
    }

    /// Build a board from text rows; `#`, `O`, `*` and `1` are alive
    ///
    /// Short rows are padded with dead cells.
    pub fn from_rows(rows: &[&str]) -> Self {
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let mut grid = Self::new(width, rows.len());
        for (row, line) in rows.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                if matches!(ch, '#' | 'O' | '*' | '1') {
                    grid.set(row, col, Cell::Alive);
                }
            }
        }
        grid
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell at (row, col); out-of-range reads are dead
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Cell {
        if row < self.height && col < self.width {
            self.data[row * self.width + col]
        } else {
            Cell::Dead
        }
    }

    /// Write a cell at (row, col); out-of-range writes are ignored
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: Cell) {
        if row < self.height && col < self.width {
            self.data[row * self.width + col] = value;
        }
    }

    /// Clamp chat coordinates onto the board, returning (row, col)
    ///
    /// `x` is the column and `y` the row.
    pub fn clamp_coords(&self, x: i64, y: i64) -> (usize, usize) {
        let col = x.clamp(0, self.width as i64 - 1) as usize;
        let row = y.clamp(0, self.height as i64 - 1) as usize;
        (row, col)
    }

    /// Direct single-cell write with clamped coordinates
    ///
    /// Returns the (row, col) actually written.
    pub fn set_cell(&mut self, x: i64, y: i64, value: Cell) -> (usize, usize) {
        let (row, col) = self.clamp_coords(x, y);
        self.set(row, col, value);
        (row, col)
    }

    /// Independently, with `probability`, set each cell to `target`
    ///
    /// Cells that are not picked keep their state.
    pub fn randomize<R: Rng + ?Sized>(
        &mut self,
        probability: Probability,
        target: Cell,
        rng: &mut R,
    ) {
        let p = probability.get();
        if p <= 0.0 {
            return;
        }
        for cell in self.data.iter_mut() {
            if rng.gen_bool(p) {
                *cell = target;
            }
        }
    }

    /// Replace every cell: alive with `probability`, dead otherwise
    pub fn reset_with_density<R: Rng + ?Sized>(&mut self, probability: Probability, rng: &mut R) {
        let p = probability.get();
        for cell in self.data.iter_mut() {
            *cell = Cell::from(rng.gen_bool(p));
        }
    }

    /// Number of live cells
    pub fn population(&self) -> usize {
        self.data.iter().filter(|c| c.is_alive()).count()
    }

    /// Sum of the 3x3 block around (row, col), excluding the center
    pub fn neighbor_count(&self, row: usize, col: usize, boundary: Boundary) -> u8 {
        let mut count = 0u8;
        for dr in -1i64..=1 {
            for dc in -1i64..=1 {
                if dr == 0 && dc == 0 {
                    continue;
                }
                let r = row as i64 + dr;
                let c = col as i64 + dc;
                let cell = match boundary {
                    Boundary::Toroidal => {
                        let r = r.rem_euclid(self.height as i64) as usize;
                        let c = c.rem_euclid(self.width as i64) as usize;
                        self.data[r * self.width + c]
                    }
                    Boundary::Dead => {
                        if r < 0 || c < 0 {
                            Cell::Dead
                        } else {
                            self.get(r as usize, c as usize)
                        }
                    }
                };
                count += cell.value();
            }
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    #[test]
    fn test_new_is_dead() {
        let grid = Grid::new(4, 3);
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn test_zero_dimensions_bumped() {
        let grid = Grid::new(0, 0);
        assert_eq!((grid.width(), grid.height()), (1, 1));
    }

    #[test]
    fn test_random_is_roughly_half() {
        let grid = Grid::random(100, 100, &mut rng());
        let pop = grid.population();
        assert!(pop > 4000 && pop < 6000, "population {} not near half", pop);
    }

    #[test]
    fn test_randomize_full_probability() {
        let mut grid = Grid::new(10, 5);
        grid.randomize(Probability::ONE, Cell::Alive, &mut rng());
        assert_eq!(grid.population(), 50);
    }

    #[test]
    fn test_randomize_zero_probability_leaves_grid() {
        let mut grid = Grid::random(10, 5, &mut rng());
        let before = grid.clone();
        grid.randomize(Probability::ZERO, Cell::Dead, &mut rng());
        assert_eq!(grid, before);
    }

    #[test]
    fn test_randomize_only_moves_toward_target() {
        let mut grid = Grid::random(20, 20, &mut rng());
        let before = grid.population();
        grid.randomize(Probability::new(0.3), Cell::Dead, &mut rng());
        assert!(grid.population() <= before);
    }

    #[test]
    fn test_reset_with_density_extremes() {
        let mut grid = Grid::random(8, 8, &mut rng());
        grid.reset_with_density(Probability::ZERO, &mut rng());
        assert_eq!(grid.population(), 0);
        grid.reset_with_density(Probability::ONE, &mut rng());
        assert_eq!(grid.population(), 64);
    }

    #[test]
    fn test_set_cell_clamps() {
        let mut grid = Grid::new(5, 4);
        assert_eq!(grid.set_cell(5, 0, Cell::Alive), (0, 4));
        assert_eq!(grid.set_cell(-3, 100, Cell::Alive), (3, 0));
        assert!(grid.get(0, 4).is_alive());
        assert!(grid.get(3, 0).is_alive());
        assert_eq!(grid.population(), 2);
    }

    #[test]
    fn test_from_rows() {
        let grid = Grid::from_rows(&[".#.", "..#", "###"]);
        assert_eq!(grid.population(), 5);
        assert!(grid.get(0, 1).is_alive());
        assert!(grid.get(1, 2).is_alive());
        assert!((0..3).all(|col| grid.get(2, col).is_alive()));
        assert!(!grid.get(0, 0).is_alive());
    }

    #[test]
    fn test_neighbor_count_interior() {
        let grid = Grid::from_rows(&["###", "###", "###"]);
        assert_eq!(grid.neighbor_count(1, 1, Boundary::Dead), 8);
        assert_eq!(grid.neighbor_count(0, 0, Boundary::Dead), 3);
    }

    #[test]
    fn test_neighbor_count_wraps_both_edges() {
        let grid = Grid::from_rows(&["#...", "....", "....", "...#"]);
        // (0,0) and (3,3) are diagonal neighbors across the corner
        assert_eq!(grid.neighbor_count(0, 0, Boundary::Toroidal), 1);
        assert_eq!(grid.neighbor_count(3, 3, Boundary::Toroidal), 1);
        assert_eq!(grid.neighbor_count(0, 0, Boundary::Dead), 0);
        assert_eq!(grid.neighbor_count(3, 3, Boundary::Dead), 0);
    }
}
