//! Local, key-triggered board perturbations with fixed strengths

use crate::core::types::{Cell, Probability};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Perturbation {
    Death,
    HyperDeath,
    Extinction,
    Live,
    Bloom,
    Panspermia,
    /// Fresh 50/50 board
    Reset,
}

impl Perturbation {
    pub const ALL: [Perturbation; 7] = [
        Perturbation::Death,
        Perturbation::HyperDeath,
        Perturbation::Extinction,
        Perturbation::Live,
        Perturbation::Bloom,
        Perturbation::Panspermia,
        Perturbation::Reset,
    ];

    /// Probability and target state, or `None` for a full reset
    pub fn burst(self) -> Option<(Probability, Cell)> {
        let (p, target) = match self {
            Perturbation::Death => (1.0 / 50.0, Cell::Dead),
            Perturbation::HyperDeath => (1.0 / 4.0, Cell::Dead),
            Perturbation::Extinction => (1.0, Cell::Dead),
            Perturbation::Live => (1.0 / 100.0, Cell::Alive),
            Perturbation::Bloom => (1.0 / 5.0, Cell::Alive),
            Perturbation::Panspermia => (1.0, Cell::Alive),
            Perturbation::Reset => return None,
        };
        Some((Probability::new(p), target))
    }

    /// Key that triggers this perturbation
    pub fn key(self) -> char {
        match self {
            Perturbation::Death => 'd',
            Perturbation::HyperDeath => 'h',
            Perturbation::Extinction => 'x',
            Perturbation::Live => 'l',
            Perturbation::Bloom => 'b',
            Perturbation::Panspermia => 'p',
            Perturbation::Reset => 'r',
        }
    }

    pub fn from_key(key: char) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.key() == key)
    }
}
