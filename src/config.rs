use crate::error::ConfigError;

/// Which transformed copies of each stream are searched alongside the
/// original.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VariantOptions {
    /// Append the inverted run.
    pub with_inverted: bool,
    /// Append the mirrored-and-inverted run.
    pub with_mirrored: bool,
}

impl VariantOptions {
    pub const NONE: VariantOptions = VariantOptions {
        with_inverted: false,
        with_mirrored: false,
    };

    pub const ALL: VariantOptions = VariantOptions {
        with_inverted: true,
        with_mirrored: true,
    };

    /// Returns true if any transformed run is searched.
    pub fn any(&self) -> bool {
        self.with_inverted || self.with_mirrored
    }

    /// Returns true if every transformed run is searched.
    pub fn all(&self) -> bool {
        self.with_inverted && self.with_mirrored
    }
}

/// Parameters of a discovery run. Every field is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeneratorConfig {
    /// Minimum number of occurrences a motive needs to keep growing.
    pub min_frequency: usize,
    /// Maximum number of stream units skipped between two pattern units.
    pub max_gap: usize,
    /// Maximum stream span of one occurrence, gaps included.
    pub max_length: usize,
    /// Shortest pattern, in units, that is reported.
    pub min_num_sequences: usize,
    /// Longest pattern, in units, that is grown.
    pub max_num_sequences: usize,
    pub variants: VariantOptions,
}

impl GeneratorConfig {
    /// Checks the parameter bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_frequency == 0 {
            return Err(ConfigError::ZeroMinFrequency);
        }
        if self.max_length == 0 {
            return Err(ConfigError::ZeroMaxLength);
        }
        if self.min_num_sequences == 0 {
            return Err(ConfigError::ZeroMinNumSequences);
        }
        if self.max_num_sequences < self.min_num_sequences {
            return Err(ConfigError::SequenceBoundsInverted {
                min: self.min_num_sequences,
                max: self.max_num_sequences,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GeneratorConfig {
        GeneratorConfig {
            min_frequency: 1,
            max_gap: 0,
            max_length: 3,
            min_num_sequences: 3,
            max_num_sequences: 3,
            variants: VariantOptions::NONE,
        }
    }

    #[test]
    fn test_valid() {
        assert_eq!(config().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_zero_bounds() {
        let zero_frequency = GeneratorConfig {
            min_frequency: 0,
            ..config()
        };
        assert_eq!(zero_frequency.validate(), Err(ConfigError::ZeroMinFrequency));

        let zero_length = GeneratorConfig {
            max_length: 0,
            ..config()
        };
        assert_eq!(zero_length.validate(), Err(ConfigError::ZeroMaxLength));

        let zero_sequences = GeneratorConfig {
            min_num_sequences: 0,
            max_num_sequences: 0,
            ..config()
        };
        assert_eq!(
            zero_sequences.validate(),
            Err(ConfigError::ZeroMinNumSequences)
        );
    }

    #[test]
    fn test_rejects_inverted_sequence_bounds() {
        let inverted = GeneratorConfig {
            min_num_sequences: 4,
            max_num_sequences: 2,
            ..config()
        };
        assert_eq!(
            inverted.validate(),
            Err(ConfigError::SequenceBoundsInverted { min: 4, max: 2 })
        );
    }

    #[test]
    fn test_variant_options() {
        assert!(!VariantOptions::NONE.any());
        assert!(VariantOptions::ALL.all());
        let inverted_only = VariantOptions {
            with_inverted: true,
            with_mirrored: false,
        };
        assert!(inverted_only.any());
        assert!(!inverted_only.all());
    }
}
