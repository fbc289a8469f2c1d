//! Tick system - advances the board one step
//!
//! A tick always happens; whether it produces a new generation depends on
//! the clock phase.

use crate::core::types::{GameMode, Tick};
use crate::rules::RuleEvaluator;
use crate::simulation::state::SimulationState;

/// What a tick did, for logging and renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub tick: Tick,
    pub generation: u64,
    pub advanced: bool,
    pub mode: GameMode,
    pub population: usize,
}

/// Run one simulation tick
pub fn run_simulation_tick(state: &mut SimulationState, evaluator: &RuleEvaluator) -> TickReport {
    let paused = state.is_paused();
    state.grid = evaluator.advance(&state.grid, state.mode, &state.rule, paused);
    state.clock.record_tick(!paused);

    let report = TickReport {
        tick: state.clock.ticks(),
        generation: state.clock.generation(),
        advanced: !paused,
        mode: state.mode,
        population: state.grid.population(),
    };

    tracing::trace!(
        tick = report.tick,
        generation = report.generation,
        population = report.population,
        paused,
        "tick"
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Boundary;
    use crate::spatial::Grid;

    fn blinker_state() -> SimulationState {
        SimulationState::with_grid(
            Grid::from_rows(&[".....", "..#..", "..#..", "..#..", "....."]),
            0,
        )
    }

    #[test]
    fn test_tick_advances_generation() {
        let mut state = blinker_state();
        let report = run_simulation_tick(&mut state, &RuleEvaluator::new(Boundary::Toroidal));
        assert!(report.advanced);
        assert_eq!(report.tick, 1);
        assert_eq!(report.generation, 1);
        assert_eq!(report.population, 3);
        assert!(state.grid.get(2, 1).is_alive());
    }

    #[test]
    fn test_paused_tick_keeps_grid() {
        let mut state = blinker_state();
        let before = state.grid.clone();
        state.clock.toggle_pause();
        let report = run_simulation_tick(&mut state, &RuleEvaluator::default());
        assert!(!report.advanced);
        assert_eq!(report.tick, 1);
        assert_eq!(report.generation, 0);
        assert_eq!(state.grid, before);
    }
}
