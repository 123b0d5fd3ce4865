use crate::motive::Motive;
use crate::position_sequence::PositionSequence;
use std::mem;

/// Drops every motive whose sequence contains a break.
pub fn remove_motives_with_breaks(motives: Vec<Motive>) -> Vec<Motive> {
    motives
        .into_iter()
        .filter(|motive| !motive.has_breaks())
        .collect()
}

/// Drops every motive without an occurrence in the original run.
pub fn remove_motives_only_in_transformed(motives: Vec<Motive>) -> Vec<Motive> {
    motives
        .into_iter()
        .filter(Motive::occurs_in_original)
        .collect()
}

/// Folds motives whose sequences are inversions or mirrors of each other
/// into one entry.
///
/// Each incoming motive is compared with the entries kept so far, in
/// order. On the first match the two are united: the one with an
/// occurrence in the original run provides the sequence, and the existing
/// entry wins when both or neither have one. Occurrences are unioned
/// without duplicates. Motives matching nothing are kept as new entries,
/// with duplicate occurrences of their own removed.
///
/// Quadratic in the number of distinct sequences.
pub fn merge_inverted_and_mirrored(motives: Vec<Motive>) -> Vec<Motive> {
    let mut unique_motives: Vec<Motive> = Vec::new();

    for motive in motives {
        let matched = unique_motives.iter().position(|unique_motive| {
            motive
                .units()
                .is_equal_mirrored_or_inverted(&unique_motive.units())
        });

        match matched {
            Some(index) => fold_into(&mut unique_motives[index], motive),
            None => unique_motives.push(deduplicated(motive)),
        }
    }

    unique_motives
}

/// A motive equal to its own transform finds each occurrence in both runs.
fn deduplicated(motive: Motive) -> Motive {
    let positions = PositionSequence::new(motive.positions);
    Motive::new(motive.sequence, positions.into_vec())
}

fn fold_into(existing: &mut Motive, incoming: Motive) {
    let incoming_is_canonical = incoming.occurs_in_original() && !existing.occurs_in_original();

    let current = mem::take(existing);
    let (canonical, other) = if incoming_is_canonical {
        (incoming, current)
    } else {
        (current, incoming)
    };

    let mut positions = PositionSequence::new(canonical.positions);
    positions.merge(PositionSequence::new(other.positions));

    *existing = Motive::new(canonical.sequence, positions.into_vec());
}
