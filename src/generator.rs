use crate::config::GeneratorConfig;
use crate::error::ConfigError;
use crate::folding::{
    merge_inverted_and_mirrored, remove_motives_only_in_transformed, remove_motives_with_breaks,
};
use crate::motive::Motive;
use crate::position::Position;
use crate::unit::{Token, Unit, Variant};
use ahash::AHashMap as HashMap;
use log::{debug, info, trace};
use rayon::prelude::*;

/// Occurrence count above which the extension search of one merge is
/// spread over the rayon pool.
const PARALLEL_POSITIONS_THRESHOLD: usize = 512;

/// Grows recurring patterns in a token stream.
///
/// Starting from length-1 motives anchored in the original run, every
/// iteration extends each surviving motive by one unit, keeps the
/// extensions that still occur often enough and collects those long
/// enough to report. Patterns grow by exactly one unit per iteration and
/// anything longer than `max_num_sequences` is dropped, so the loop runs
/// at most `max_num_sequences` times.
///
/// # Example
///
/// ```
/// use motive_search::{GeneratorConfig, MotiveGenerator, StreamBuilder, VariantOptions, Scope, Token};
///
/// let config = GeneratorConfig {
///     min_frequency: 1,
///     max_gap: 0,
///     max_length: 3,
///     min_num_sequences: 3,
///     max_num_sequences: 3,
///     variants: VariantOptions::NONE,
/// };
/// let generator = MotiveGenerator::new(config).unwrap();
///
/// let tokens = [Token::Interval(2), Token::Interval(2), Token::Interval(2)];
/// let stream = StreamBuilder::from_config(&config)
///     .build_from_tokens(Scope::new("piece", "P1", "1"), tokens);
///
/// let motives = generator.generate_motives(&stream.units);
/// assert_eq!(motives.len(), 1);
/// assert_eq!(motives[0].names(), vec!["2", "2", "2"]);
/// ```
#[derive(Debug, Clone)]
pub struct MotiveGenerator {
    config: GeneratorConfig,
}

impl MotiveGenerator {
    /// Creates a generator, rejecting invalid bounds up front.
    pub fn new(config: GeneratorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Runs the growth loop, drops motives containing breaks and folds
    /// symmetry-equivalent motives together.
    ///
    /// When both transformed runs are searched, motives found only in
    /// transformed runs are dropped as well.
    pub fn discover_motives(&self, stream: &[Unit]) -> Vec<Motive> {
        let mut motives = remove_motives_with_breaks(self.generate_motives(stream));

        if self.config.variants.any() {
            motives = merge_inverted_and_mirrored(motives);
        }
        if self.config.variants.all() {
            motives = remove_motives_only_in_transformed(motives);
        }

        info!(
            "discovered {} motives in a stream of {} units",
            motives.len(),
            stream.len()
        );
        motives
    }

    /// Runs the growth loop and returns every motive between
    /// `min_num_sequences` and `max_num_sequences` units long that occurs
    /// at least `min_frequency` times.
    ///
    /// Motives are returned in the order they were produced: shorter
    /// before longer, and within one length by parent then candidate
    /// order.
    pub fn generate_motives(&self, stream: &[Unit]) -> Vec<Motive> {
        let basic_motives = self.get_basic_motives(stream);
        let mut frontier = self.get_initial_motives(&basic_motives);
        let mut motives_of_all_iterations = Vec::new();
        let mut iteration = 0;

        while !frontier.is_empty() {
            iteration += 1;

            let mut new_motives = Vec::new();
            for motive in &frontier {
                for candidate in self.generate_candidate_extensions(&basic_motives, motive) {
                    if let Some(merged) = self.merge_motives(motive, candidate) {
                        new_motives.push(merged);
                    }
                }
            }

            frontier = self.filter_motives(new_motives);
            debug_assert!(
                frontier.iter().all(|motive| motive.len() == iteration + 1),
                "Every motive should grow by exactly one unit per iteration"
            );
            motives_of_all_iterations.extend(
                frontier
                    .iter()
                    .filter(|motive| motive.len() >= self.config.min_num_sequences)
                    .cloned(),
            );

            debug!(
                "iteration {}: {} motives survive, {} collected",
                iteration,
                frontier.len(),
                motives_of_all_iterations.len()
            );
        }

        motives_of_all_iterations
    }

    /// Groups stream indices by token into length-1 motives, in order of
    /// first appearance.
    ///
    /// Each motive's sequence holds the first unit seen for its token.
    pub fn get_basic_motives(&self, stream: &[Unit]) -> Vec<Motive> {
        let mut slots: HashMap<Token, usize> = HashMap::default();
        let mut motives: Vec<Motive> = Vec::new();

        for (index, unit) in stream.iter().enumerate() {
            let slot = *slots.entry(unit.token()).or_insert_with(|| {
                motives.push(Motive::new(vec![unit.clone()], Vec::new()));
                motives.len() - 1
            });

            motives[slot].positions.push(Position::new(
                index,
                1,
                unit.origin().clone(),
                unit.variant(),
            ));
        }

        motives
    }

    /// Seeds for the first iteration: basic motives whose unit comes from
    /// the original run and that occur often enough to grow.
    pub fn get_initial_motives(&self, basic_motives: &[Motive]) -> Vec<Motive> {
        basic_motives
            .iter()
            .filter(|motive| {
                motive
                    .sequence
                    .iter()
                    .all(|unit| unit.variant() == Variant::Original)
                    && motive.frequency() >= self.config.min_frequency
            })
            .cloned()
            .collect()
    }

    /// End of the `min_frequency`-th occurrence of `motive`.
    ///
    /// Returns `None` if the motive occurs fewer times than that.
    pub fn get_frequent_position(&self, motive: &Motive) -> Option<usize> {
        motive
            .positions
            .get(self.config.min_frequency - 1)
            .map(Position::end)
    }

    /// Basic motives that still have an occurrence at or after the
    /// frequent position of `motive`.
    ///
    /// Anything else cannot extend `motive` often enough again.
    pub fn generate_candidate_extensions<'a>(
        &self,
        basic_motives: &'a [Motive],
        motive: &Motive,
    ) -> Vec<&'a Motive> {
        let Some(frequent_position) = self.get_frequent_position(motive) else {
            return Vec::new();
        };

        let candidates: Vec<&Motive> = basic_motives
            .iter()
            .filter(|basic| {
                basic
                    .positions
                    .iter()
                    .any(|position| position.start >= frequent_position)
            })
            .collect();

        trace!(
            "{} of {} basic motives can extend from {}",
            candidates.len(),
            basic_motives.len(),
            frequent_position
        );
        candidates
    }

    /// Extends every occurrence of `motive` by the first fitting
    /// occurrence of `candidate`.
    ///
    /// Returns `None` if no occurrence could be extended. Occurrences that
    /// cannot be extended are dropped, so the result never occurs more
    /// often than `motive`.
    pub fn merge_motives(&self, motive: &Motive, candidate: &Motive) -> Option<Motive> {
        debug_assert!(
            candidate
                .positions
                .windows(2)
                .all(|pair| pair[0].start < pair[1].start),
            "Candidate positions should be in stream order"
        );

        let positions: Vec<Position> = if motive.positions.len() >= PARALLEL_POSITIONS_THRESHOLD {
            motive
                .positions
                .par_iter()
                .filter_map(|position| self.process_positions(position, &candidate.positions))
                .collect()
        } else {
            motive
                .positions
                .iter()
                .filter_map(|position| self.process_positions(position, &candidate.positions))
                .collect()
        };

        if positions.is_empty() {
            return None;
        }

        let mut sequence = Vec::with_capacity(motive.len() + candidate.len());
        sequence.extend_from_slice(&motive.sequence);
        sequence.extend_from_slice(&candidate.sequence);

        Some(Motive::new(sequence, positions))
    }

    /// Extends one occurrence by the first candidate occurrence that lies
    /// in the same variant run, starts at or after its end, leaves a gap of
    /// at most `max_gap` and keeps the total span within `max_length`.
    pub fn process_positions(
        &self,
        position: &Position,
        candidates: &[Position],
    ) -> Option<Position> {
        let end = position.end();

        candidates
            .iter()
            .find(|candidate| {
                candidate.variant == position.variant
                    && candidate.start >= end
                    && candidate.start - end <= self.config.max_gap
                    && candidate.end() - position.start <= self.config.max_length
            })
            .map(|candidate| {
                Position::new(
                    position.start,
                    candidate.end() - position.start,
                    position.origin.clone(),
                    position.variant,
                )
            })
    }

    /// Keeps motives that occur often enough and are not too long.
    pub fn filter_motives(&self, motives: Vec<Motive>) -> Vec<Motive> {
        motives
            .into_iter()
            .filter(|motive| {
                motive.frequency() >= self.config.min_frequency
                    && motive.len() <= self.config.max_num_sequences
            })
            .collect()
    }
}
