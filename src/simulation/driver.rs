//! Simulation driver - one task owns the state
//!
//! Commands and ticks both arrive here, so a command is always applied in
//! full before the next tick reads the board. Feeds push into an unbounded
//! channel and never wait on the simulation.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior};

use crate::command::{Command, CommandExecutor, ExecutionResult, Perturbation};
use crate::core::error::Result;
use crate::core::types::Tick;
use crate::render::{Frame, RenderSink};
use crate::rules::RuleEvaluator;
use crate::simulation::state::SimulationState;
use crate::simulation::tick::{run_simulation_tick, TickReport};

/// Events delivered to the driver
#[derive(Debug, Clone, PartialEq)]
pub enum SimEvent {
    Command(Command),
    Perturb(Perturbation),
    Shutdown,
}

pub type EventSender = mpsc::UnboundedSender<SimEvent>;
pub type EventReceiver = mpsc::UnboundedReceiver<SimEvent>;

pub fn event_channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}

pub struct Driver {
    state: SimulationState,
    evaluator: RuleEvaluator,
    tick_interval: Duration,
    max_ticks: Option<Tick>,
}

impl Driver {
    pub fn new(state: SimulationState, evaluator: RuleEvaluator, tick_interval: Duration) -> Self {
        Self {
            state,
            evaluator,
            tick_interval,
            max_ticks: None,
        }
    }

    /// Stop on its own after this many ticks
    pub fn with_max_ticks(mut self, max_ticks: Option<Tick>) -> Self {
        self.max_ticks = max_ticks;
        self
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Apply one event; returns `None` when the event asks to stop
    pub fn handle_event(&mut self, event: SimEvent) -> Option<ExecutionResult> {
        match event {
            SimEvent::Command(command) => Some(CommandExecutor::execute(&mut self.state, &command)),
            SimEvent::Perturb(p) => Some(CommandExecutor::perturb(&mut self.state, p)),
            SimEvent::Shutdown => None,
        }
    }

    /// Advance one tick and hand the frame to `sink`
    pub fn tick<S: RenderSink + ?Sized>(&mut self, sink: &mut S) -> Result<TickReport> {
        let report = run_simulation_tick(&mut self.state, &self.evaluator);
        sink.render(&Frame::capture(&self.state))?;
        Ok(report)
    }

    fn limit_reached(&self) -> bool {
        self.max_ticks
            .is_some_and(|max| self.state.clock.ticks() >= max)
    }

    /// Run until `Shutdown`, until every sender is gone, or until the tick limit
    ///
    /// Returns the final state.
    pub async fn run<S: RenderSink + ?Sized>(
        mut self,
        mut events: EventReceiver,
        sink: &mut S,
    ) -> Result<SimulationState> {
        tracing::info!(
            "Simulation running: {}x{}, tick every {:?}",
            self.state.grid.width(),
            self.state.grid.height(),
            self.tick_interval
        );

        // The first generation is shown right away, later ones on the interval
        self.tick(sink)?;
        if self.limit_reached() {
            tracing::info!("Tick limit reached");
            sink.finish()?;
            return Ok(self.state);
        }

        let start = Instant::now() + self.tick_interval;
        let mut interval = tokio::time::interval_at(start, self.tick_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = interval.tick() => {
                    self.tick(sink)?;
                    if self.limit_reached() {
                        tracing::info!("Tick limit reached");
                        break;
                    }
                }
                event = events.recv() => match event {
                    Some(event) => {
                        if self.handle_event(event).is_none() {
                            tracing::info!("Shutdown requested");
                            break;
                        }
                    }
                    None => {
                        tracing::info!("All command feeds closed");
                        break;
                    }
                },
            }
        }

        sink.finish()?;
        Ok(self.state)
    }
}
