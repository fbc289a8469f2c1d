//! Run/pause state machine and tick bookkeeping

use crate::core::types::Tick;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClockPhase {
    #[default]
    Running,
    Paused,
}

/// Tracks whether generations advance, and how many ticks have elapsed
///
/// Ticks keep coming while paused so commands stay responsive; only
/// `generation` stops moving.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimulationClock {
    phase: ClockPhase,
    ticks: Tick,
    generation: u64,
}

impl SimulationClock {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.phase == ClockPhase::Paused
    }

    /// Flip between running and paused, returning the new phase
    pub fn toggle_pause(&mut self) -> ClockPhase {
        self.phase = match self.phase {
            ClockPhase::Running => ClockPhase::Paused,
            ClockPhase::Paused => ClockPhase::Running,
        };
        self.phase
    }

    /// Record one tick; `advanced` is whether the grid moved a generation
    pub fn record_tick(&mut self, advanced: bool) {
        self.ticks += 1;
        if advanced {
            self.generation += 1;
        }
    }

    /// Restart generation counting after the board is replaced
    pub fn reset_generation(&mut self) {
        self.generation = 0;
    }

    #[inline]
    pub fn ticks(&self) -> Tick {
        self.ticks
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_running() {
        let clock = SimulationClock::new();
        assert!(!clock.is_paused());
        assert_eq!(clock.ticks(), 0);
        assert_eq!(clock.generation(), 0);
    }

    #[test]
    fn test_toggle_pause() {
        let mut clock = SimulationClock::new();
        assert_eq!(clock.toggle_pause(), ClockPhase::Paused);
        assert!(clock.is_paused());
        assert_eq!(clock.toggle_pause(), ClockPhase::Running);
        assert!(!clock.is_paused());
    }

    #[test]
    fn test_paused_ticks_do_not_advance_generation() {
        let mut clock = SimulationClock::new();
        clock.record_tick(true);
        clock.record_tick(false);
        clock.record_tick(false);
        assert_eq!(clock.ticks(), 3);
        assert_eq!(clock.generation(), 1);
        clock.reset_generation();
        assert_eq!(clock.generation(), 0);
        assert_eq!(clock.ticks(), 3);
    }
}
