use crate::motive::Motive;
use crate::position::Position;
use crate::unit::Token;
use crate::unit_sequence::{IntervalClasses, SequenceType};
use ahash::AHashMap as HashMap;
use log::debug;
use slotmap::{new_key_type, SlotMap};
use std::collections::{BTreeMap, BTreeSet};

new_key_type! {
    /// Stable handle of a [`ResultMotive`] inside a [`MotiveList`].
    pub struct ResultKey;
}

/// Occurrences of one voice.
pub type VoicePositions = BTreeMap<String, Vec<Position>>;
/// Occurrences of one part, by voice.
pub type PartPositions = BTreeMap<String, VoicePositions>;
/// Occurrences of one piece, by part and voice.
pub type PiecePositions = BTreeMap<String, PartPositions>;

/// One distinct pattern, up to inversion and mirroring, with all of its
/// occurrences.
///
/// Occurrences are keyed by the transform under which they were found,
/// then by piece, part and voice.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResultMotive {
    intervals: IntervalClasses,
    positions: BTreeMap<SequenceType, PiecePositions>,
}

impl ResultMotive {
    pub fn new(intervals: IntervalClasses) -> Self {
        Self {
            intervals,
            positions: BTreeMap::new(),
        }
    }

    pub fn intervals(&self) -> &IntervalClasses {
        &self.intervals
    }

    /// Identity names of the pattern under `sequence_type`.
    pub fn names(&self, sequence_type: SequenceType) -> Vec<String> {
        self.intervals.names(sequence_type)
    }

    pub fn positions(&self) -> &BTreeMap<SequenceType, PiecePositions> {
        &self.positions
    }

    /// Occurrences in one bucket; empty if the bucket does not exist.
    pub fn positions_in(
        &self,
        sequence_type: SequenceType,
        piece: &str,
        part: &str,
        voice: &str,
    ) -> &[Position] {
        self.positions
            .get(&sequence_type)
            .and_then(|pieces| pieces.get(piece))
            .and_then(|parts| parts.get(part))
            .and_then(|voices| voices.get(voice))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Appends occurrences to a bucket, creating it if needed.
    pub fn add_positions<I>(
        &mut self,
        sequence_type: SequenceType,
        piece: &str,
        part: &str,
        voice: &str,
        positions: I,
    ) where
        I: IntoIterator<Item = Position>,
    {
        self.positions
            .entry(sequence_type)
            .or_default()
            .entry(piece.to_owned())
            .or_default()
            .entry(part.to_owned())
            .or_default()
            .entry(voice.to_owned())
            .or_default()
            .extend(positions);
    }

    /// Number of occurrences under `sequence_type`, or under all of them
    /// when `None`.
    pub fn frequency(&self, sequence_type: Option<SequenceType>) -> usize {
        self.positions
            .iter()
            .filter(|(key, _)| sequence_type.map_or(true, |wanted| **key == wanted))
            .map(|(_, pieces)| count_piece_positions(pieces.values()))
            .sum()
    }

    /// Number of occurrences per piece, over all transforms.
    pub fn frequency_per_piece(&self) -> BTreeMap<String, usize> {
        let mut frequencies = BTreeMap::new();
        for pieces in self.positions.values() {
            for (piece, parts) in pieces {
                *frequencies.entry(piece.clone()).or_insert(0) +=
                    count_piece_positions(std::iter::once(parts));
            }
        }
        frequencies
    }

    /// Drops occurrences that start inside an earlier kept occurrence of
    /// the same voice.
    ///
    /// All transforms of one voice are considered together, ordered by
    /// start. Buckets left empty are removed.
    pub fn remove_overlapping_positions(&mut self) {
        let mut by_voice: BTreeMap<(String, String, String), Vec<(SequenceType, Position)>> =
            BTreeMap::new();

        for (sequence_type, pieces) in std::mem::take(&mut self.positions) {
            for (piece, parts) in pieces {
                for (part, voices) in parts {
                    for (voice, positions) in voices {
                        by_voice
                            .entry((piece.clone(), part.clone(), voice))
                            .or_default()
                            .extend(positions.into_iter().map(|p| (sequence_type, p)));
                    }
                }
            }
        }

        for ((piece, part, voice), mut entries) in by_voice {
            entries.sort_by_key(|(_, position)| position.start);

            let mut kept: Vec<(SequenceType, Position)> = Vec::with_capacity(entries.len());
            for (sequence_type, position) in entries {
                let overlaps = kept
                    .last()
                    .is_some_and(|(_, prev)| position.start.abs_diff(prev.start) < prev.length);
                if !overlaps {
                    kept.push((sequence_type, position));
                }
            }

            for (sequence_type, position) in kept {
                self.add_positions(sequence_type, &piece, &part, &voice, [position]);
            }
        }
    }
}

fn count_piece_positions<'a>(parts: impl Iterator<Item = &'a PartPositions>) -> usize {
    parts
        .flat_map(|voices| voices.values())
        .flat_map(|positions| positions.values())
        .map(Vec::len)
        .sum()
}

/// Ordered collection of [`ResultMotive`]s, built up scope by scope.
///
/// Entries live in an arena and are never removed. A lookup table maps
/// every transform of every entry to that entry, so adding a candidate
/// does not scan the list.
#[derive(Debug, Clone, Default)]
pub struct MotiveList {
    motives: SlotMap<ResultKey, ResultMotive>,
    order: Vec<ResultKey>,
    index: HashMap<Vec<Token>, (ResultKey, SequenceType)>,
}

impl MotiveList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds motives discovered in one scope into the list.
    ///
    /// A motive whose sequence is a transform of an existing entry is
    /// filed under that entry and transform; otherwise it starts a new
    /// entry with its sequence as the original.
    pub fn add<I>(&mut self, candidates: I, piece: &str, part: &str, voice: &str)
    where
        I: IntoIterator<Item = Motive>,
    {
        let mut created = 0usize;
        let mut appended = 0usize;

        for candidate in candidates {
            let tokens = candidate.units().tokens();

            let (key, sequence_type) = match self.index.get(&tokens) {
                Some(&found) => {
                    appended += 1;
                    found
                }
                None => {
                    created += 1;
                    (self.insert(IntervalClasses::from_tokens(tokens)), SequenceType::Original)
                }
            };

            self.motives[key].add_positions(sequence_type, piece, part, voice, candidate.positions);
        }

        debug!(
            "{}/{}/{}: {} new motives, {} added to existing",
            piece, part, voice, created, appended
        );
    }

    fn insert(&mut self, intervals: IntervalClasses) -> ResultKey {
        let transforms: Vec<(SequenceType, Vec<Token>)> = SequenceType::ALL
            .into_iter()
            .map(|sequence_type| (sequence_type, intervals.get(sequence_type).to_vec()))
            .collect();

        let key = self.motives.insert(ResultMotive::new(intervals));
        self.order.push(key);

        for (sequence_type, tokens) in transforms {
            self.index.entry(tokens).or_insert((key, sequence_type));
        }
        key
    }

    pub fn get(&self, key: ResultKey) -> Option<&ResultMotive> {
        self.motives.get(key)
    }

    /// Finds the entry containing `tokens` under any transform.
    pub fn find(&self, tokens: &[Token]) -> Option<(&ResultMotive, SequenceType)> {
        self.index
            .get(tokens)
            .map(|&(key, sequence_type)| (&self.motives[key], sequence_type))
    }

    /// Entries in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &ResultMotive> + '_ {
        self.order.iter().map(move |&key| &self.motives[key])
    }

    pub fn keys(&self) -> impl Iterator<Item = ResultKey> + '_ {
        self.order.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Every piece with at least one occurrence.
    pub fn pieces(&self) -> BTreeSet<&str> {
        self.iter()
            .flat_map(|motive| motive.positions.values())
            .flat_map(|pieces| pieces.keys())
            .map(String::as_str)
            .collect()
    }

    /// Applies [`ResultMotive::remove_overlapping_positions`] to every
    /// entry.
    pub fn remove_overlapping_positions(&mut self) {
        for motive in self.motives.values_mut() {
            motive.remove_overlapping_positions();
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for MotiveList {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}
