use crate::unit::{Origin, Variant};
use std::fmt;

/// One occurrence of a motive inside a token stream.
///
/// `start` and `length` are stream indices; `origin` and `variant` are
/// copied from the unit at `start`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub start: usize,
    pub length: usize,
    pub origin: Origin,
    pub variant: Variant,
}

impl Position {
    pub fn new(start: usize, length: usize, origin: Origin, variant: Variant) -> Self {
        Self {
            start,
            length,
            origin,
            variant,
        }
    }

    /// First stream index after this occurrence.
    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.length
    }

    /// Returns true if both positions describe the same occurrence in the
    /// source, regardless of which variant run they were found in.
    ///
    /// A mirrored run reads the source backwards, so a mirrored
    /// occurrence is anchored at the note where the forward occurrence
    /// ends. Divider positions never match anything.
    pub fn is_same_position(&self, other: &Position) -> bool {
        if self.length != other.length
            || self.variant == Variant::Outside
            || other.variant == Variant::Outside
            || !self.origin.same_scope(&other.origin)
        {
            return false;
        }

        let span = self.length as i64 - 1;
        let own = i64::from(self.origin.note);
        let theirs = i64::from(other.origin.note);

        match (
            self.variant == Variant::Mirrored,
            other.variant == Variant::Mirrored,
        ) {
            (true, false) => own == theirs + span,
            (false, true) => theirs == own + span,
            _ => own == theirs,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::Scope;
    use std::sync::Arc;

    fn at(start: usize, length: usize, note: i32, variant: Variant) -> Position {
        let origin = Origin::new(Arc::new(Scope::new("piece", "partId", "0")), 0, note);
        Position::new(start, length, origin, variant)
    }

    #[test]
    fn test_same_note_same_position() {
        let a = at(0, 3, 0, Variant::Original);
        let b = at(0, 3, 0, Variant::Original);
        assert!(a.is_same_position(&b));
    }

    #[test]
    fn test_different_length_differs() {
        let a = at(0, 3, 0, Variant::Original);
        let b = at(0, 2, 0, Variant::Original);
        assert!(!a.is_same_position(&b));
    }

    #[test]
    fn test_inverted_twin_is_same() {
        // Inverted run lives further down the stream but points at the same note
        let a = at(0, 3, 4, Variant::Original);
        let b = at(20, 3, 4, Variant::Inverted);
        assert!(a.is_same_position(&b));
        assert!(b.is_same_position(&a));
    }

    #[test]
    fn test_mirrored_anchor_shift() {
        // Forward occurrence covers notes 2..=4, mirrored starts at note 4
        let forward = at(2, 3, 2, Variant::Original);
        let mirrored = at(40, 3, 4, Variant::Mirrored);
        assert!(forward.is_same_position(&mirrored));
        assert!(mirrored.is_same_position(&forward));

        let wrong = at(40, 3, 2, Variant::Mirrored);
        assert!(!forward.is_same_position(&wrong));
    }

    #[test]
    fn test_both_mirrored_compare_notes() {
        let a = at(40, 3, 4, Variant::Mirrored);
        let b = at(41, 3, 4, Variant::Mirrored);
        assert!(a.is_same_position(&b));
    }

    #[test]
    fn test_outside_never_matches() {
        let a = at(5, 1, -1, Variant::Outside);
        let b = at(5, 1, -1, Variant::Outside);
        assert!(!a.is_same_position(&b));
    }

    #[test]
    fn test_different_scope_differs() {
        let a = at(0, 2, 0, Variant::Original);
        let other = Origin::new(Arc::new(Scope::new("piece", "partId", "1")), 0, 0);
        let b = Position::new(0, 2, other, Variant::Original);
        assert!(!a.is_same_position(&b));
    }
}
