//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Simulation tick counter
pub type Tick = u64;

/// State of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Cell {
    #[default]
    Dead = 0,
    Alive = 1,
}

impl Cell {
    #[inline]
    pub fn is_alive(self) -> bool {
        matches!(self, Cell::Alive)
    }

    /// Numeric value used when summing neighborhoods
    #[inline]
    pub fn value(self) -> u8 {
        self as u8
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        if alive {
            Cell::Alive
        } else {
            Cell::Dead
        }
    }
}

/// How the board is evaluated each generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// One rule applied uniformly to the whole board
    #[default]
    Classic,
    /// Board split into zones, each testing its own survive/born thresholds
    Laboratory,
}

impl GameMode {
    pub fn toggled(self) -> Self {
        match self {
            GameMode::Classic => GameMode::Laboratory,
            GameMode::Laboratory => GameMode::Classic,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GameMode::Classic => "classic",
            GameMode::Laboratory => "laboratory",
        }
    }
}

/// What lies beyond the edge of the board when counting neighbors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Boundary {
    /// Opposite edges are joined (torus)
    #[default]
    Toroidal,
    /// Cells outside the board count as dead
    Dead,
}

/// Probability normalized into [0, 1]
///
/// NaN maps to 0.0 so the value is always safe to hand to an RNG.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Probability(f64);

impl Probability {
    pub const ZERO: Probability = Probability(0.0);
    pub const ONE: Probability = Probability(1.0);

    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            Self(0.0)
        } else {
            Self(value.clamp(0.0, 1.0))
        }
    }

    /// Parse chat input, falling back to 0.0 on anything unparsable
    pub fn parse_lenient(token: &str) -> Self {
        Self::new(token.trim().parse::<f64>().unwrap_or(0.0))
    }

    #[inline]
    pub fn get(self) -> f64 {
        self.0
    }
}
