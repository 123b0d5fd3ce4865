use crate::position::Position;
use crate::unit::{Unit, Variant};
use crate::unit_sequence::UnitSequence;
use std::fmt;

/// A pattern under construction: its units and where it occurs.
///
/// Motives are plain values. Growing one produces a new motive and
/// leaves the inputs untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Motive {
    pub sequence: Vec<Unit>,
    pub positions: Vec<Position>,
}

impl Motive {
    pub fn new(sequence: Vec<Unit>, positions: Vec<Position>) -> Self {
        Self {
            sequence,
            positions,
        }
    }

    /// Number of occurrences.
    #[inline]
    pub fn frequency(&self) -> usize {
        self.positions.len()
    }

    /// Number of units in the pattern.
    #[inline]
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    pub fn units(&self) -> UnitSequence<'_> {
        UnitSequence::new(&self.sequence)
    }

    /// Identity names of the pattern, e.g. `["2", "2", "-3"]`.
    pub fn names(&self) -> Vec<String> {
        self.sequence.iter().map(Unit::name).collect()
    }

    pub fn has_breaks(&self) -> bool {
        self.units().has_breaks()
    }

    /// Returns true if at least one occurrence lies in the original run.
    pub fn occurs_in_original(&self) -> bool {
        self.positions
            .iter()
            .any(|position| position.variant == Variant::Original)
    }
}

impl fmt::Display for Motive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}],{},[", self.names().join(", "), self.frequency())?;
        for (i, position) in self.positions.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", position)?;
        }
        f.write_str("]")
    }
}
