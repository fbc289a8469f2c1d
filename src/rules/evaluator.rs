//! Next-generation computation

use crate::core::types::{Boundary, GameMode};
use crate::rules::laboratory::ZoneLayout;
use crate::rules::spec::RuleSpec;
use crate::spatial::Grid;

/// Computes generations under a fixed boundary policy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuleEvaluator {
    pub boundary: Boundary,
}

impl RuleEvaluator {
    pub fn new(boundary: Boundary) -> Self {
        Self { boundary }
    }

    /// Next generation of `grid`; the input is not modified
    pub fn step(&self, grid: &Grid, mode: GameMode, rule: &RuleSpec) -> Grid {
        let mut next = Grid::new(grid.width(), grid.height());
        let layout = ZoneLayout::for_grid(grid);

        for row in 0..grid.height() {
            for col in 0..grid.width() {
                let cell = grid.get(row, col);
                let neighbors = grid.neighbor_count(row, col, self.boundary);
                let value = match mode {
                    GameMode::Classic => rule.next_cell(cell, neighbors),
                    GameMode::Laboratory => layout.rule_at(row, col).next_cell(cell, neighbors),
                };
                next.set(row, col, value);
            }
        }

        next
    }

    /// Like [`step`](Self::step), but a paused clock yields an unchanged copy
    pub fn advance(&self, grid: &Grid, mode: GameMode, rule: &RuleSpec, paused: bool) -> Grid {
        if paused {
            grid.clone()
        } else {
            self.step(grid, mode, rule)
        }
    }
}
