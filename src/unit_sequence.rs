use crate::unit::{Token, Unit};
use std::fmt;

/// Read-only view of an ordered run of units with the symmetry
/// transforms applied to it.
#[derive(Debug, Clone, Copy)]
pub struct UnitSequence<'a> {
    units: &'a [Unit],
}

impl<'a> UnitSequence<'a> {
    pub fn new(units: &'a [Unit]) -> Self {
        Self { units }
    }

    pub fn units(&self) -> &'a [Unit] {
        self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Every unit inverted, order kept.
    pub fn inverted(&self) -> Vec<Unit> {
        self.units.iter().map(Unit::inverted).collect()
    }

    /// Every unit tagged mirrored, order reversed.
    pub fn mirrored(&self) -> Vec<Unit> {
        self.units.iter().rev().map(Unit::mirrored).collect()
    }

    /// Inversion followed by mirroring. Units end up tagged `Mirrored`.
    pub fn mirrored_and_inverted(&self) -> Vec<Unit> {
        self.units
            .iter()
            .rev()
            .map(|unit| unit.inverted().mirrored())
            .collect()
    }

    /// Returns true if both sequences have the same identity names at
    /// every index. Origins and variant tags are ignored.
    pub fn has_equal_intervals(&self, other: &UnitSequence<'_>) -> bool {
        self.len() == other.len()
            && self
                .units
                .iter()
                .zip(other.units)
                .all(|(a, b)| a.token() == b.token())
    }

    /// Returns true if this sequence equals `other` inverted, mirrored,
    /// or mirrored and inverted.
    ///
    /// Compares token by token without materializing the transforms.
    pub fn is_equal_mirrored_or_inverted(&self, other: &UnitSequence<'_>) -> bool {
        if self.len() != other.len() {
            return false;
        }

        let own = self.units;
        let theirs = other.units;
        let n = own.len();

        let inverted = (0..n).all(|i| own[i].token() == theirs[i].token().inverted());
        let mirrored = || (0..n).all(|i| own[i].token() == theirs[n - 1 - i].token());
        let mirrored_inverted =
            || (0..n).all(|i| own[i].token() == theirs[n - 1 - i].token().inverted());

        inverted || mirrored() || mirrored_inverted()
    }

    pub fn tokens(&self) -> Vec<Token> {
        self.units.iter().map(Unit::token).collect()
    }

    /// Returns true if any unit is a break.
    pub fn has_breaks(&self) -> bool {
        self.units.iter().any(Unit::is_break)
    }
}

/// The four symmetry relations a sequence can have to a canonical one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SequenceType {
    Original,
    Inverted,
    Mirrored,
    MirroredInverted,
}

impl SequenceType {
    pub const ALL: [SequenceType; 4] = [
        SequenceType::Original,
        SequenceType::Inverted,
        SequenceType::Mirrored,
        SequenceType::MirroredInverted,
    ];
}

impl fmt::Display for SequenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SequenceType::Original => "ORIGINAL",
            SequenceType::Inverted => "INVERTED",
            SequenceType::Mirrored => "MIRRORED",
            SequenceType::MirroredInverted => "MIRRORED_INVERTED",
        };
        f.write_str(name)
    }
}

/// The four transforms of a defining token sequence, computed once.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntervalClasses {
    original: Vec<Token>,
    inverted: Vec<Token>,
    mirrored: Vec<Token>,
    mirrored_inverted: Vec<Token>,
}

impl IntervalClasses {
    pub fn from_tokens(original: Vec<Token>) -> Self {
        let inverted: Vec<Token> = original.iter().map(|t| t.inverted()).collect();
        let mirrored: Vec<Token> = original.iter().rev().copied().collect();
        let mirrored_inverted: Vec<Token> = inverted.iter().rev().copied().collect();

        Self {
            original,
            inverted,
            mirrored,
            mirrored_inverted,
        }
    }

    pub fn from_units(units: &[Unit]) -> Self {
        Self::from_tokens(UnitSequence::new(units).tokens())
    }

    pub fn get(&self, sequence_type: SequenceType) -> &[Token] {
        match sequence_type {
            SequenceType::Original => &self.original,
            SequenceType::Inverted => &self.inverted,
            SequenceType::Mirrored => &self.mirrored,
            SequenceType::MirroredInverted => &self.mirrored_inverted,
        }
    }

    pub fn original(&self) -> &[Token] {
        &self.original
    }

    /// Returns the first transform, in `SequenceType::ALL` order, whose
    /// tokens equal `tokens`.
    pub fn find(&self, tokens: &[Token]) -> Option<SequenceType> {
        SequenceType::ALL
            .into_iter()
            .find(|&sequence_type| self.get(sequence_type) == tokens)
    }

    /// Identity names of one transform, e.g. `["2", "-3"]`.
    pub fn names(&self, sequence_type: SequenceType) -> Vec<String> {
        self.get(sequence_type).iter().map(Token::name).collect()
    }
}
