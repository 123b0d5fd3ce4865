use crate::config::{GeneratorConfig, VariantOptions};
use crate::unit::{Origin, Scope, Token, Unit, Variant};
use crate::unit_sequence::UnitSequence;
use std::sync::Arc;

/// The searchable token stream of one (piece, part, voice) scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeStream {
    pub scope: Arc<Scope>,
    pub units: Vec<Unit>,
}

/// Concatenates a scope's original units with its transformed copies.
///
/// Layout of a built stream:
///
/// ```text
/// original | divider x (max_gap + 1) | inverted | divider x (max_gap + 1) | mirrored + inverted
/// ```
///
/// Each transformed run is present only when enabled. A divider run one
/// longer than `max_gap` keeps every growth step inside one run.
#[derive(Debug, Clone, Copy)]
pub struct StreamBuilder {
    max_gap: usize,
    variants: VariantOptions,
}

impl StreamBuilder {
    pub fn new(max_gap: usize, variants: VariantOptions) -> Self {
        Self { max_gap, variants }
    }

    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self::new(config.max_gap, config.variants)
    }

    /// Builds the stream for `original`, whose units must all be tagged
    /// `Original`.
    pub fn build(&self, original: &[Unit]) -> Vec<Unit> {
        let sequence = UnitSequence::new(original);
        let mut stream = original.to_vec();

        if self.variants.with_inverted {
            self.append_with_dividers(&mut stream, sequence.inverted());
        }
        if self.variants.with_mirrored {
            self.append_with_dividers(&mut stream, sequence.mirrored_and_inverted());
        }

        stream
    }

    /// Builds a scope stream from bare tokens.
    ///
    /// The unit at index `i` gets note index `i` in measure 0.
    pub fn build_from_tokens<I>(&self, scope: Scope, tokens: I) -> ScopeStream
    where
        I: IntoIterator<Item = Token>,
    {
        let scope = Arc::new(scope);
        let original: Vec<Unit> = tokens
            .into_iter()
            .enumerate()
            .map(|(note, token)| {
                Unit::new(token, Origin::new(scope.clone(), 0, note as i32), Variant::Original)
            })
            .collect();

        ScopeStream {
            units: self.build(&original),
            scope,
        }
    }

    fn append_with_dividers(&self, stream: &mut Vec<Unit>, run: Vec<Unit>) {
        if run.is_empty() {
            return;
        }

        let outside = Origin::outside();
        stream.extend((0..=self.max_gap).map(|_| Unit::divider(outside.clone())));
        stream.extend(run);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(values: &[i32]) -> Vec<Token> {
        values.iter().map(|&v| Token::Interval(v)).collect()
    }

    fn names(units: &[Unit]) -> Vec<String> {
        units.iter().map(Unit::name).collect()
    }

    #[test]
    fn test_original_only() {
        let builder = StreamBuilder::new(2, VariantOptions::NONE);
        let stream = builder.build_from_tokens(Scope::new("piece", "P1", "1"), tokens(&[2, -3]));

        assert_eq!(names(&stream.units), vec!["2", "-3"]);
        assert_eq!(stream.units[1].origin().note, 1);
        assert_eq!(stream.units[1].origin().scope, stream.scope);
    }

    #[test]
    fn test_all_variants_layout() {
        let builder = StreamBuilder::new(1, VariantOptions::ALL);
        let stream = builder.build_from_tokens(Scope::new("piece", "P1", "1"), tokens(&[2, -3]));

        assert_eq!(
            names(&stream.units),
            vec!["2", "-3", "DIVIDER", "DIVIDER", "-2", "3", "DIVIDER", "DIVIDER", "3", "-2"]
        );

        let variants: Vec<_> = stream.units.iter().map(Unit::variant).collect();
        assert_eq!(
            variants,
            vec![
                Variant::Original,
                Variant::Original,
                Variant::Outside,
                Variant::Outside,
                Variant::Inverted,
                Variant::Inverted,
                Variant::Outside,
                Variant::Outside,
                Variant::Mirrored,
                Variant::Mirrored,
            ]
        );

        // The mirrored run starts at the last source note
        assert_eq!(stream.units[8].origin().note, 1);
    }

    #[test]
    fn test_mirrored_only() {
        let builder = StreamBuilder::new(0, VariantOptions {
            with_inverted: false,
            with_mirrored: true,
        });
        let stream = builder.build_from_tokens(Scope::new("piece", "P1", "1"), tokens(&[2, 4]));

        assert_eq!(names(&stream.units), vec!["2", "4", "DIVIDER", "-4", "-2"]);
    }

    #[test]
    fn test_empty_original_has_no_dividers() {
        let builder = StreamBuilder::new(3, VariantOptions::ALL);
        assert!(builder.build(&[]).is_empty());
    }
}
