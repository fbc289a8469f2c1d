//! Rule laboratory: the board as a matrix of rule experiments
//!
//! Zones are square, `height / 8` cells on a side, and the same size is used
//! for both axes. On a board twice as wide as it is tall that gives 8 rows
//! of zones by 16 columns.
//!
//! - The row zone picks the birth count: a dead cell is born on exactly
//!   `row_zone` neighbors.
//! - Column zones 0..=7 explore survival over two counts,
//!   `[col_zone, col_zone + 1]`.
//! - Column zones 8 and up explore survival over three counts,
//!   `[col_zone - 8, col_zone - 6]`.

use crate::core::types::Cell;
use crate::spatial::Grid;

/// Number of zone rows on the board
pub const ROW_ZONES: usize = 8;

/// Column zones with index above this use the three-count survival window
pub const LAST_NARROW_ZONE: usize = 7;

/// Maps cells to zones for a given board
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneLayout {
    zone_size: f64,
}

impl ZoneLayout {
    pub fn for_grid(grid: &Grid) -> Self {
        Self::for_height(grid.height())
    }

    pub fn for_height(height: usize) -> Self {
        Self {
            zone_size: height as f64 / ROW_ZONES as f64,
        }
    }

    /// Zone index along one axis
    #[inline]
    pub fn zone_index(&self, index: usize) -> usize {
        (index as f64 / self.zone_size) as usize
    }

    /// (row zone, column zone) of a cell
    #[inline]
    pub fn zone_of(&self, row: usize, col: usize) -> (usize, usize) {
        (self.zone_index(row), self.zone_index(col))
    }

    /// True when `index` is the first row/column of a zone other than zone 0
    pub fn starts_zone(&self, index: usize) -> bool {
        index > 0 && self.zone_index(index) != self.zone_index(index - 1)
    }

    /// Rule tested by the zone containing (row, col)
    pub fn rule_at(&self, row: usize, col: usize) -> ZoneRule {
        let (row_zone, col_zone) = self.zone_of(row, col);
        ZoneRule::for_zone(row_zone, col_zone)
    }
}

/// Thresholds tested by one zone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneRule {
    pub survive_min: usize,
    pub survive_max: usize,
    pub born: usize,
}

impl ZoneRule {
    pub fn for_zone(row_zone: usize, col_zone: usize) -> Self {
        let (survive_min, survive_max) = if col_zone > LAST_NARROW_ZONE {
            let base = col_zone - (LAST_NARROW_ZONE + 1);
            (base, base + 2)
        } else {
            (col_zone, col_zone + 1)
        };
        Self {
            survive_min,
            survive_max,
            born: row_zone,
        }
    }

    #[inline]
    pub fn next_cell(&self, cell: Cell, neighbors: u8) -> Cell {
        let n = neighbors as usize;
        let alive = match cell {
            Cell::Alive => (self.survive_min..=self.survive_max).contains(&n),
            Cell::Dead => n == self.born,
        };
        Cell::from(alive)
    }

    /// Survival window as shown on the board legend, e.g. `2-3`
    pub fn survive_window(&self) -> String {
        format!("{}-{}", self.survive_min, self.survive_max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_layout_on_default_board() {
        let layout = ZoneLayout::for_height(176);
        assert_eq!(layout.zone_of(0, 0), (0, 0));
        assert_eq!(layout.zone_of(21, 21), (0, 0));
        assert_eq!(layout.zone_of(22, 22), (1, 1));
        assert_eq!(layout.zone_of(175, 351), (7, 15));
    }

    #[test]
    fn test_column_zone_uses_height() {
        // 16 wide, 8 tall: zones are one cell on a side on both axes
        let layout = ZoneLayout::for_height(8);
        assert_eq!(layout.zone_of(3, 12), (3, 12));
    }

    #[test]
    fn test_starts_zone() {
        let layout = ZoneLayout::for_height(16);
        assert!(!layout.starts_zone(0));
        assert!(!layout.starts_zone(1));
        assert!(layout.starts_zone(2));
        assert!(layout.starts_zone(4));
        assert!(!layout.starts_zone(5));
    }

    #[test]
    fn test_narrow_half_thresholds() {
        let rule = ZoneRule::for_zone(3, 2);
        assert_eq!((rule.survive_min, rule.survive_max, rule.born), (2, 3, 3));
        assert_eq!(rule.next_cell(Cell::Alive, 2), Cell::Alive);
        assert_eq!(rule.next_cell(Cell::Alive, 3), Cell::Alive);
        assert_eq!(rule.next_cell(Cell::Alive, 4), Cell::Dead);
        assert_eq!(rule.next_cell(Cell::Dead, 3), Cell::Alive);
        assert_eq!(rule.next_cell(Cell::Dead, 2), Cell::Dead);
    }

    #[test]
    fn test_wide_half_thresholds() {
        let rule = ZoneRule::for_zone(0, 9);
        assert_eq!((rule.survive_min, rule.survive_max, rule.born), (1, 3, 0));
        assert_eq!(rule.next_cell(Cell::Alive, 1), Cell::Alive);
        assert_eq!(rule.next_cell(Cell::Alive, 3), Cell::Alive);
        assert_eq!(rule.next_cell(Cell::Alive, 0), Cell::Dead);
        // Birth on zero neighbors in the top zone row
        assert_eq!(rule.next_cell(Cell::Dead, 0), Cell::Alive);
    }

    #[test]
    fn test_survive_window() {
        assert_eq!(ZoneRule::for_zone(7, 15).survive_window(), "7-9");
        assert_eq!(ZoneRule::for_zone(0, 0).survive_window(), "0-1");
        assert_eq!(ZoneRule::for_zone(0, 7).survive_window(), "7-8");
    }
}
