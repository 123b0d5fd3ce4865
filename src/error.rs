use thiserror::Error;

/// Rejected generator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("min_frequency must be at least 1")]
    ZeroMinFrequency,

    #[error("max_length must be at least 1")]
    ZeroMaxLength,

    #[error("min_num_sequences must be at least 1")]
    ZeroMinNumSequences,

    #[error("max_num_sequences ({max}) is smaller than min_num_sequences ({min})")]
    SequenceBoundsInverted { min: usize, max: usize },
}
