use crate::position::Position;

/// A list of positions kept free of duplicate occurrences.
///
/// Duplicates are detected with [`Position::is_same_position`], not with
/// structural equality, so an occurrence found once in the original run
/// and again in a transformed run is stored only once. The first copy
/// seen wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionSequence {
    positions: Vec<Position>,
}

impl PositionSequence {
    /// Builds a sequence from `positions`, dropping later duplicates.
    pub fn new(positions: Vec<Position>) -> Self {
        let mut sequence = Self {
            positions: Vec::with_capacity(positions.len()),
        };
        sequence.extend(positions);
        sequence
    }

    /// Inserts `position` unless an equivalent occurrence is present.
    ///
    /// Returns true if it was inserted.
    pub fn insert(&mut self, position: Position) -> bool {
        if self.contains(&position) {
            return false;
        }
        self.positions.push(position);
        true
    }

    /// Returns true if an equivalent occurrence is present.
    pub fn contains(&self, position: &Position) -> bool {
        self.positions
            .iter()
            .any(|existing| existing.is_same_position(position))
    }

    /// Set-union with `other`; positions of `self` keep their order and
    /// new ones are appended in `other`'s order.
    pub fn merge(&mut self, other: PositionSequence) {
        self.extend(other.positions);
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Position> {
        self.positions.iter()
    }

    pub fn into_vec(self) -> Vec<Position> {
        self.positions
    }
}

impl Extend<Position> for PositionSequence {
    fn extend<I: IntoIterator<Item = Position>>(&mut self, iter: I) {
        for position in iter {
            self.insert(position);
        }
    }
}

impl From<Vec<Position>> for PositionSequence {
    fn from(positions: Vec<Position>) -> Self {
        Self::new(positions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::{Origin, Scope, Variant};
    use std::sync::Arc;

    fn at(start: usize, note: i32) -> Position {
        let origin = Origin::new(Arc::new(Scope::new("piece", "partId", "0")), 0, note);
        Position::new(start, 3, origin, Variant::Original)
    }

    #[test]
    fn test_constructor_with_one_entry() {
        let sequence = PositionSequence::new(vec![at(0, 0)]);
        assert_eq!(sequence.len(), 1);
    }

    #[test]
    fn test_constructor_with_multiple_same_entries() {
        let sequence = PositionSequence::new(vec![at(0, 0), at(0, 0), at(0, 0)]);
        assert_eq!(sequence.len(), 1);
    }

    #[test]
    fn test_merge_with_same_position() {
        let mut sequence = PositionSequence::new(vec![at(0, 0)]);
        sequence.merge(PositionSequence::new(vec![at(0, 0)]));
        assert_eq!(sequence.len(), 1);
    }

    #[test]
    fn test_merge_with_different_position() {
        let mut sequence = PositionSequence::new(vec![at(0, 0)]);
        sequence.merge(PositionSequence::new(vec![at(3, 3)]));

        assert_eq!(sequence.len(), 2);
        let starts: Vec<_> = sequence.iter().map(|p| p.start).collect();
        assert_eq!(starts, vec![0, 3]);
    }

    #[test]
    fn test_merge_keeps_first_copy() {
        let original = at(0, 5);
        let mut inverted = at(30, 5);
        inverted.variant = Variant::Inverted;

        let mut sequence = PositionSequence::new(vec![original.clone()]);
        sequence.merge(PositionSequence::new(vec![inverted]));

        assert_eq!(sequence.into_vec(), vec![original]);
    }
}
