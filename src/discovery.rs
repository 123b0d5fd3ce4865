use crate::generator::MotiveGenerator;
use crate::motive::Motive;
use crate::result::MotiveList;
use crate::stream::ScopeStream;
use log::info;
use rayon::prelude::*;

impl MotiveGenerator {
    /// Discovers motives in every scope and aggregates them into one
    /// [`MotiveList`].
    ///
    /// Scopes are searched in parallel; each search only reads its own
    /// stream. Results are then added to the list one scope at a time in
    /// input order, so the outcome does not depend on scheduling.
    pub fn discover_scopes(&self, streams: &[ScopeStream]) -> MotiveList {
        let discovered: Vec<Vec<Motive>> = streams
            .par_iter()
            .map(|stream| self.discover_motives(&stream.units))
            .collect();

        let mut list = MotiveList::new();
        for (stream, motives) in streams.iter().zip(discovered) {
            let scope = &stream.scope;
            list.add(motives, &scope.piece, &scope.part, &scope.voice);
        }

        info!(
            "aggregated {} distinct motives from {} scopes",
            list.len(),
            streams.len()
        );
        list
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{GeneratorConfig, VariantOptions};
    use crate::generator::MotiveGenerator;
    use crate::stream::StreamBuilder;
    use crate::unit::{Scope, Token};
    use crate::unit_sequence::SequenceType;

    fn config(variants: VariantOptions) -> GeneratorConfig {
        GeneratorConfig {
            min_frequency: 1,
            max_gap: 0,
            max_length: 3,
            min_num_sequences: 3,
            max_num_sequences: 3,
            variants,
        }
    }

    fn tokens(values: &[i32]) -> Vec<Token> {
        values.iter().map(|&v| Token::Interval(v)).collect()
    }

    #[test]
    fn test_same_motive_in_two_pieces() {
        let config = config(VariantOptions::NONE);
        let generator = MotiveGenerator::new(config).unwrap();
        let builder = StreamBuilder::from_config(&config);

        let streams = vec![
            builder.build_from_tokens(Scope::new("a", "P1", "1"), tokens(&[2, 2, 2])),
            builder.build_from_tokens(Scope::new("b", "P1", "1"), tokens(&[2, 2, 2])),
        ];

        let list = generator.discover_scopes(&streams);
        assert_eq!(list.len(), 1);

        let entry = list.iter().next().unwrap();
        assert_eq!(entry.names(SequenceType::Original), vec!["2", "2", "2"]);
        assert_eq!(entry.frequency(None), 2);
        assert_eq!(entry.positions_in(SequenceType::Original, "a", "P1", "1").len(), 1);
        assert_eq!(entry.positions_in(SequenceType::Original, "b", "P1", "1").len(), 1);
    }

    #[test]
    fn test_same_motive_inverted_in_second_piece() {
        let config = config(VariantOptions::NONE);
        let generator = MotiveGenerator::new(config).unwrap();
        let builder = StreamBuilder::from_config(&config);

        let streams = vec![
            builder.build_from_tokens(Scope::new("a", "P1", "1"), tokens(&[2, 3, 4])),
            builder.build_from_tokens(Scope::new("b", "P1", "1"), tokens(&[-2, -3, -4])),
        ];

        let list = generator.discover_scopes(&streams);
        assert_eq!(list.len(), 1);

        let entry = list.iter().next().unwrap();
        assert_eq!(entry.frequency(Some(SequenceType::Original)), 1);
        assert_eq!(entry.frequency(Some(SequenceType::Inverted)), 1);
    }

    #[test]
    fn test_variants_fold_within_scope() {
        let config = config(VariantOptions::ALL);
        let generator = MotiveGenerator::new(config).unwrap();
        let builder = StreamBuilder::from_config(&config);

        // 2 3 4 then its mirror-inversion -4 -3 -2 later in the same voice
        let streams = vec![builder.build_from_tokens(
            Scope::new("a", "P1", "1"),
            tokens(&[2, 3, 4, 5, -4, -3, -2]),
        )];

        let list = generator.discover_scopes(&streams);
        let entry = list
            .iter()
            .find(|entry| entry.names(SequenceType::Original) == vec!["2", "3", "4"])
            .unwrap();

        // Two occurrences in the voice, each seen once forward and once in
        // a transformed run, counted once each
        assert_eq!(entry.frequency(None), 2);
    }

    #[test]
    fn test_no_scopes() {
        let config = config(VariantOptions::ALL);
        let generator = MotiveGenerator::new(config).unwrap();
        assert!(generator.discover_scopes(&[]).is_empty());
    }
}
