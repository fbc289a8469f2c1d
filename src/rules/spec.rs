//! Birth/survival rule strings (`B3S23` notation)

use std::fmt;

use crate::core::types::Cell;

/// Largest meaningful neighbor count in a Moore neighborhood
pub const MAX_NEIGHBORS: u8 = 8;

/// Set of neighbor counts 0..=8, stored as a bitmask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NeighborSet(u16);

impl NeighborSet {
    pub const EMPTY: NeighborSet = NeighborSet(0);

    /// Build a set; counts above 8 are ignored
    pub fn from_counts(counts: &[u8]) -> Self {
        let mut set = Self::EMPTY;
        for &n in counts {
            set.insert(n);
        }
        set
    }

    /// Add a count; returns false (and leaves the set alone) if it is above 8
    pub fn insert(&mut self, n: u8) -> bool {
        if n > MAX_NEIGHBORS {
            return false;
        }
        self.0 |= 1 << n;
        true
    }

    #[inline]
    pub fn contains(self, n: u8) -> bool {
        n <= MAX_NEIGHBORS && self.0 & (1 << n) != 0
    }

    pub fn iter(self) -> impl Iterator<Item = u8> {
        (0..=MAX_NEIGHBORS).filter(move |&n| self.contains(n))
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// Uniform rule: which counts give birth and which keep a cell alive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RuleSpec {
    pub born: NeighborSet,
    pub survive: NeighborSet,
}

impl Default for RuleSpec {
    fn default() -> Self {
        Self::conway()
    }
}

impl RuleSpec {
    /// Conway's Life, B3/S23
    pub fn conway() -> Self {
        Self {
            born: NeighborSet::from_counts(&[3]),
            survive: NeighborSet::from_counts(&[2, 3]),
        }
    }

    /// Parse `B<digits>S<digits>`
    ///
    /// Never fails: a string that does not start with `B` or has no `S`
    /// yields Conway's rule, and stray characters inside either part are
    /// skipped with a warning.
    pub fn parse(input: &str) -> Self {
        let Some(rest) = input.strip_prefix('B') else {
            tracing::warn!("Rule {:?} does not start with 'B', using B3S23", input);
            return Self::conway();
        };
        let Some((born_part, survive_part)) = rest.split_once('S') else {
            tracing::warn!("Rule {:?} has no 'S' separator, using B3S23", input);
            return Self::conway();
        };

        Self {
            born: parse_counts(born_part, input),
            survive: parse_counts(survive_part, input),
        }
    }

    /// Next state of a cell with `neighbors` live neighbors
    #[inline]
    pub fn next_cell(&self, cell: Cell, neighbors: u8) -> Cell {
        let alive = match cell {
            Cell::Alive => self.survive.contains(neighbors),
            Cell::Dead => self.born.contains(neighbors),
        };
        Cell::from(alive)
    }
}

fn parse_counts(part: &str, whole: &str) -> NeighborSet {
    let mut set = NeighborSet::EMPTY;
    for ch in part.chars() {
        match ch.to_digit(10) {
            Some(d) => {
                if !set.insert(d as u8) {
                    tracing::warn!("Ignoring neighbor count {} in rule {:?}", d, whole);
                }
            }
            None => tracing::warn!("Skipping non-digit {:?} in rule {:?}", ch, whole),
        }
    }
    set
}

impl fmt::Display for RuleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "B")?;
        for n in self.born.iter() {
            write!(f, "{}", n)?;
        }
        write!(f, "S")?;
        for n in self.survive.iter() {
            write!(f, "{}", n)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(set: NeighborSet) -> Vec<u8> {
        set.iter().collect()
    }

    #[test]
    fn test_parse_conway() {
        let rule = RuleSpec::parse("B3S23");
        assert_eq!(counts(rule.born), vec![3]);
        assert_eq!(counts(rule.survive), vec![2, 3]);
    }

    #[test]
    fn test_parse_garbage_falls_back() {
        assert_eq!(RuleSpec::parse("garbage"), RuleSpec::conway());
        assert_eq!(RuleSpec::parse("B36"), RuleSpec::conway());
        assert_eq!(RuleSpec::parse(""), RuleSpec::conway());
        assert_eq!(RuleSpec::parse("b3s23"), RuleSpec::conway());
    }

    #[test]
    fn test_parse_skips_non_digits() {
        let rule = RuleSpec::parse("B3x6S2/3");
        assert_eq!(counts(rule.born), vec![3, 6]);
        assert_eq!(counts(rule.survive), vec![2, 3]);
    }

    #[test]
    fn test_parse_ignores_nine() {
        let rule = RuleSpec::parse("B39S9");
        assert_eq!(counts(rule.born), vec![3]);
        assert!(rule.survive.is_empty());
    }

    #[test]
    fn test_parse_empty_parts() {
        let rule = RuleSpec::parse("BS");
        assert!(rule.born.is_empty());
        assert!(rule.survive.is_empty());
    }

    #[test]
    fn test_display() {
        assert_eq!(RuleSpec::conway().to_string(), "B3S23");
        assert_eq!(RuleSpec::parse("B6336S32").to_string(), "B36S23");
    }

    #[test]
    fn test_next_cell() {
        let rule = RuleSpec::conway();
        assert_eq!(rule.next_cell(Cell::Dead, 3), Cell::Alive);
        assert_eq!(rule.next_cell(Cell::Dead, 2), Cell::Dead);
        assert_eq!(rule.next_cell(Cell::Alive, 2), Cell::Alive);
        assert_eq!(rule.next_cell(Cell::Alive, 4), Cell::Dead);
        assert_eq!(rule.next_cell(Cell::Dead, 0), Cell::Dead);
    }
}
