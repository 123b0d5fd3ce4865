use std::fmt;
use std::sync::Arc;

/// The kind of a break token.
///
/// Breaks take part in growth so that an interval run cannot silently
/// step over a rest, but they are never reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BreakKind {
    /// A note followed by a rest.
    NoteBefore,
    /// A rest followed by a note.
    NoteAfter,
    /// A rest followed by another rest.
    RestBefore,
    /// Synthetic separator between concatenated variant runs.
    Divider,
}

impl BreakKind {
    /// The identity name of this break kind.
    pub fn tag(&self) -> &'static str {
        match self {
            BreakKind::NoteBefore => "NOTE_BEFORE",
            BreakKind::NoteAfter => "NOTE_AFTER",
            BreakKind::RestBefore => "REST_BEFORE",
            BreakKind::Divider => "DIVIDER",
        }
    }
}

/// Which symmetry transform produced a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Variant {
    Original,
    Inverted,
    Mirrored,
    /// Synthetic divider; never matches anything across a growth step.
    Outside,
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Variant::Original => "ORIGINAL",
            Variant::Inverted => "INVERTED",
            Variant::Mirrored => "MIRRORED",
            Variant::Outside => "OUTSIDE",
        };
        f.write_str(name)
    }
}

/// The token payload of a unit.
///
/// Closed sum with exactly two kinds. Two tokens are equal exactly when
/// their identity names are equal, so `Token` doubles as the identity key
/// for grouping and sequence comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Token {
    /// A signed interval step.
    Interval(i32),
    /// A rest boundary or divider.
    Break(BreakKind),
}

impl Token {
    /// Returns the inverted token.
    ///
    /// Interval numbering has no zero step, so the unison `1` inverts to
    /// itself rather than to `-1`.
    pub fn inverted(self) -> Token {
        match self {
            Token::Interval(1) => Token::Interval(1),
            Token::Interval(value) => Token::Interval(-value),
            Token::Break(kind) => Token::Break(kind),
        }
    }

    /// Returns true for break tokens.
    pub fn is_break(&self) -> bool {
        matches!(self, Token::Break(_))
    }

    /// Returns the identity name of this token.
    pub fn name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Interval(value) => write!(f, "{}", value),
            Token::Break(kind) => f.write_str(kind.tag()),
        }
    }
}

/// A (piece, part, voice) scope that one token stream belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scope {
    pub piece: String,
    pub part: String,
    pub voice: String,
}

impl Scope {
    pub fn new(piece: impl Into<String>, part: impl Into<String>, voice: impl Into<String>) -> Self {
        Self {
            piece: piece.into(),
            part: part.into(),
            voice: voice.into(),
        }
    }

    /// The scope assigned to synthetic dividers.
    pub fn outside() -> Self {
        Self::new("noWork", "noWork", "noWork")
    }
}

/// Opaque source location of a unit.
///
/// Only compared for identity; the scope is shared so that cloning an
/// origin never copies the scope strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Origin {
    pub scope: Arc<Scope>,
    pub measure: i32,
    pub note: i32,
}

impl Origin {
    pub fn new(scope: Arc<Scope>, measure: i32, note: i32) -> Self {
        Self {
            scope,
            measure,
            note,
        }
    }

    /// The origin carried by divider units.
    pub fn outside() -> Self {
        Self::new(Arc::new(Scope::outside()), -1, -1)
    }

    /// Returns true if both origins lie in the same piece, part and voice.
    pub fn same_scope(&self, other: &Origin) -> bool {
        Arc::ptr_eq(&self.scope, &other.scope) || self.scope == other.scope
    }
}

/// An immutable token with its origin and variant tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unit {
    token: Token,
    origin: Origin,
    variant: Variant,
}

impl Unit {
    pub fn new(token: Token, origin: Origin, variant: Variant) -> Self {
        Self {
            token,
            origin,
            variant,
        }
    }

    /// Creates an `Original` interval unit.
    pub fn interval(value: i32, origin: Origin) -> Self {
        Self::new(Token::Interval(value), origin, Variant::Original)
    }

    /// Creates an `Original` break unit.
    pub fn rest(kind: BreakKind, origin: Origin) -> Self {
        Self::new(Token::Break(kind), origin, Variant::Original)
    }

    /// Creates a divider unit tagged `Outside`.
    pub fn divider(origin: Origin) -> Self {
        Self::new(Token::Break(BreakKind::Divider), origin, Variant::Outside)
    }

    pub fn token(&self) -> Token {
        self.token
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// The identity name, e.g. `"-3"` or `"REST_BEFORE"`.
    pub fn name(&self) -> String {
        self.token.name()
    }

    pub fn is_break(&self) -> bool {
        self.token.is_break()
    }

    /// Returns the inverted copy, tagged `Inverted`.
    pub fn inverted(&self) -> Unit {
        Unit::new(self.token.inverted(), self.origin.clone(), Variant::Inverted)
    }

    /// Returns the mirrored copy, tagged `Mirrored`. The value is kept;
    /// reversal happens at the sequence level.
    pub fn mirrored(&self) -> Unit {
        Unit::new(self.token, self.origin.clone(), Variant::Mirrored)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin(note: i32) -> Origin {
        Origin::new(Arc::new(Scope::new("piece", "P1", "1")), 0, note)
    }

    #[test]
    fn test_interval_names() {
        assert_eq!(Unit::interval(2, origin(0)).name(), "2");
        assert_eq!(Unit::interval(-5, origin(0)).name(), "-5");
        assert_eq!(Unit::rest(BreakKind::NoteBefore, origin(0)).name(), "NOTE_BEFORE");
        assert_eq!(Unit::divider(Origin::outside()).name(), "DIVIDER");
    }

    #[test]
    fn test_inversion_negates() {
        let unit = Unit::interval(3, origin(4));
        let inverted = unit.inverted();

        assert_eq!(inverted.token(), Token::Interval(-3));
        assert_eq!(inverted.variant(), Variant::Inverted);
        assert_eq!(inverted.origin(), unit.origin());
        // Source is untouched
        assert_eq!(unit.token(), Token::Interval(3));
        assert_eq!(unit.variant(), Variant::Original);
    }

    #[test]
    fn test_unison_inverts_to_itself() {
        assert_eq!(Token::Interval(1).inverted(), Token::Interval(1));
        assert_eq!(Token::Interval(-1).inverted(), Token::Interval(1));
    }

    #[test]
    fn test_break_transforms_keep_kind() {
        let unit = Unit::rest(BreakKind::RestBefore, origin(1));
        assert_eq!(unit.inverted().token(), Token::Break(BreakKind::RestBefore));
        assert_eq!(unit.mirrored().token(), Token::Break(BreakKind::RestBefore));
        assert_eq!(unit.mirrored().variant(), Variant::Mirrored);
    }

    #[test]
    fn test_same_scope() {
        let a = origin(0);
        let b = Origin::new(Arc::new(Scope::new("piece", "P1", "1")), 3, 9);
        let c = Origin::new(Arc::new(Scope::new("piece", "P2", "1")), 0, 0);

        assert!(a.same_scope(&b));
        assert!(!a.same_scope(&c));
    }
}
