//! Rendering sinks
//!
//! Sinks receive a read-only [`Frame`] once per tick. They never modify
//! simulation state.

pub mod colors;
pub mod terminal;

use crate::core::error::Result;
use crate::core::types::{GameMode, Tick};
use crate::rules::RuleSpec;
use crate::simulation::state::SimulationState;
use crate::spatial::Grid;

pub use colors::Rgb;
pub use terminal::TerminalRenderer;

/// Snapshot of what a tick produced
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub grid: &'a Grid,
    pub mode: GameMode,
    pub rule: &'a RuleSpec,
    pub tick: Tick,
    pub generation: u64,
    pub paused: bool,
}

impl<'a> Frame<'a> {
    pub fn capture(state: &'a SimulationState) -> Self {
        Self {
            grid: &state.grid,
            mode: state.mode,
            rule: &state.rule,
            tick: state.clock.ticks(),
            generation: state.clock.generation(),
            paused: state.is_paused(),
        }
    }

    /// One-line summary shown by renderers
    pub fn status_line(&self) -> String {
        let rule = match self.mode {
            GameMode::Classic => self.rule.to_string(),
            GameMode::Laboratory => "zones (survive across, born down)".to_string(),
        };
        format!(
            "{} | {} | gen {} | pop {}{}",
            self.mode.label(),
            rule,
            self.generation,
            self.grid.population(),
            if self.paused { " | PAUSED" } else { "" }
        )
    }
}

pub trait RenderSink {
    fn render(&mut self, frame: &Frame<'_>) -> Result<()>;

    /// Called once when the simulation stops
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Headless sink: logs a status line every `every` ticks
#[derive(Debug, Clone)]
pub struct LogSink {
    every: u64,
}

impl LogSink {
    pub fn new(every: u64) -> Self {
        Self { every: every.max(1) }
    }
}

impl RenderSink for LogSink {
    fn render(&mut self, frame: &Frame<'_>) -> Result<()> {
        if frame.tick % self.every == 0 {
            tracing::info!("tick {}: {}", frame.tick, frame.status_line());
        }
        Ok(())
    }
}
