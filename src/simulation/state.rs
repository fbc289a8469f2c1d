//! The single simulation state shared by commands and ticks

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::core::config::SimulationConfig;
use crate::core::types::{Cell, GameMode, Probability};
use crate::rules::RuleSpec;
use crate::simulation::clock::SimulationClock;
use crate::spatial::Grid;

/// Everything a tick reads and a command writes
///
/// Owned by exactly one task; see [`crate::simulation::driver`].
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub grid: Grid,
    pub mode: GameMode,
    pub rule: RuleSpec,
    pub clock: SimulationClock,
    rng: ChaCha8Rng,
}

impl SimulationState {
    /// Fresh state with a 50/50 random board
    pub fn new(width: usize, height: usize, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let grid = Grid::random(width, height, &mut rng);
        Self::assemble(grid, rng)
    }

    /// State around an existing board (patterns, tests)
    pub fn with_grid(grid: Grid, seed: u64) -> Self {
        Self::assemble(grid, ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_config(config: &SimulationConfig, seed: u64) -> Self {
        let mut state = Self::new(config.width, config.height, seed);
        state.rule = RuleSpec::parse(&config.rule);
        state.mode = config.mode;
        state
    }

    fn assemble(grid: Grid, rng: ChaCha8Rng) -> Self {
        Self {
            grid,
            mode: GameMode::Classic,
            rule: RuleSpec::conway(),
            clock: SimulationClock::new(),
            rng,
        }
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.clock.is_paused()
    }

    /// Set each cell to `target` with the given probability
    pub fn randomize(&mut self, probability: Probability, target: Cell) {
        self.grid.randomize(probability, target, &mut self.rng);
    }

    /// Refill the board at the given density
    pub fn reset_with_density(&mut self, probability: Probability) {
        self.grid.reset_with_density(probability, &mut self.rng);
        self.clock.reset_generation();
    }

    /// Replace the board with a fresh 50/50 one of the same size
    pub fn reseed_grid(&mut self) {
        self.grid = Grid::random(self.grid.width(), self.grid.height(), &mut self.rng);
        self.clock.reset_generation();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_defaults() {
        let state = SimulationState::new(20, 10, 1);
        assert_eq!(state.mode, GameMode::Classic);
        assert_eq!(state.rule, RuleSpec::conway());
        assert!(!state.is_paused());
        assert_eq!(state.grid.width(), 20);
        assert_eq!(state.grid.height(), 10);
        assert!(state.grid.population() > 0);
    }

    #[test]
    fn test_same_seed_same_board() {
        let a = SimulationState::new(30, 30, 99);
        let b = SimulationState::new(30, 30, 99);
        assert_eq!(a.grid, b.grid);
    }

    #[test]
    fn test_from_config_uses_rule() {
        let config = SimulationConfig {
            width: 8,
            height: 4,
            rule: "B36S23".into(),
            ..SimulationConfig::default()
        };
        let state = SimulationState::from_config(&config, 5);
        assert_eq!(state.rule.to_string(), "B36S23");
        assert_eq!((state.grid.width(), state.grid.height()), (8, 4));
    }

    #[test]
    fn test_configured_start_is_laboratory() {
        let state = SimulationState::from_config(&SimulationConfig::default(), 5);
        assert_eq!(state.mode, GameMode::Laboratory);

        let config = SimulationConfig {
            mode: GameMode::Classic,
            ..SimulationConfig::default()
        };
        assert_eq!(SimulationState::from_config(&config, 5).mode, GameMode::Classic);
    }

    #[test]
    fn test_reseed_keeps_dimensions() {
        let mut state = SimulationState::with_grid(Grid::new(7, 3), 3);
        state.reseed_grid();
        assert_eq!((state.grid.width(), state.grid.height()), (7, 3));
    }
}
