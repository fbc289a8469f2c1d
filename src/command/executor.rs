//! Command execution - applies typed commands to the simulation state

use crate::command::parser::Command;
use crate::command::perturbation::Perturbation;
use crate::core::types::Cell;
use crate::simulation::clock::ClockPhase;
use crate::simulation::state::SimulationState;

/// Applies commands and perturbations to a [`SimulationState`]
pub struct CommandExecutor;

impl CommandExecutor {
    /// Apply one command in full
    pub fn execute(state: &mut SimulationState, command: &Command) -> ExecutionResult {
        let summary = match *command {
            Command::ToggleMode => {
                state.mode = state.mode.toggled();
                format!("mode is now {}", state.mode.label())
            }
            Command::TogglePause => match state.clock.toggle_pause() {
                ClockPhase::Paused => "paused".to_string(),
                ClockPhase::Running => "resumed".to_string(),
            },
            Command::SetRule(rule) => {
                state.rule = rule;
                format!("rule is now {}", rule)
            }
            Command::ResetWithDensity(p) => {
                state.reset_with_density(p);
                format!("reset at density {:.2}", p.get())
            }
            Command::BirthBurst(p) => {
                state.randomize(p, Cell::Alive);
                format!("birth burst {:.2}", p.get())
            }
            Command::DeathBurst(p) => {
                state.randomize(p, Cell::Dead);
                format!("death burst {:.2}", p.get())
            }
            Command::SetCell { x, y } => {
                let (row, col) = state.grid.set_cell(x, y, Cell::Alive);
                format!("set cell at column {}, row {}", col, row)
            }
            Command::ClearCell { x, y } => {
                let (row, col) = state.grid.set_cell(x, y, Cell::Dead);
                format!("cleared cell at column {}, row {}", col, row)
            }
        };

        tracing::info!("Command {:?}: {}", command, summary);

        ExecutionResult { summary }
    }

    /// Apply a local perturbation
    pub fn perturb(state: &mut SimulationState, perturbation: Perturbation) -> ExecutionResult {
        let summary = match perturbation.burst() {
            Some((p, target)) => {
                state.randomize(p, target);
                format!("{:?}: {:?} with probability {:.2}", perturbation, target, p.get())
            }
            None => {
                state.reseed_grid();
                "board reseeded".to_string()
            }
        };

        tracing::info!("{}", summary);

        ExecutionResult { summary }
    }
}

/// Result of executing a command
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    pub summary: String,
}
