//! # Motive Search - Recurring Pattern Discovery
//!
//! Finds recurring sub-sequences ("motives") in token streams, optionally
//! searching inverted and mirrored copies of every stream at the same
//! time, and reports each distinct pattern once together with all of its
//! occurrences.
//!
//! Discovery works in three stages:
//! 1. **Growth**: length-1 motives are extended one unit per iteration,
//!    bounded by gap, span and length limits, keeping only those that
//!    occur often enough
//! 2. **Cleanup**: motives containing breaks are dropped
//! 3. **Folding**: motives that are inversions or mirrors of each other
//!    are merged, counting each source occurrence once
//!
//! ## Example
//!
//! ```
//! use motive_search::{
//!     GeneratorConfig, MotiveGenerator, Scope, SequenceType, StreamBuilder, Token, VariantOptions,
//! };
//!
//! let config = GeneratorConfig {
//!     min_frequency: 2,
//!     max_gap: 0,
//!     max_length: 3,
//!     min_num_sequences: 3,
//!     max_num_sequences: 3,
//!     variants: VariantOptions::NONE,
//! };
//! let generator = MotiveGenerator::new(config).unwrap();
//! let builder = StreamBuilder::from_config(&config);
//!
//! let intervals = [2, 2, -3, 5, 2, 2, -3].map(Token::Interval);
//! let streams = vec![builder.build_from_tokens(Scope::new("piece", "P1", "1"), intervals)];
//!
//! let motives = generator.discover_scopes(&streams);
//! let first = motives.iter().next().unwrap();
//! assert_eq!(first.names(SequenceType::Original), vec!["2", "2", "-3"]);
//! assert_eq!(first.frequency(None), 2);
//! ```
//!
//! ## Concurrency
//!
//! Scopes are searched in parallel with rayon, and so is the extension
//! search for motives with many occurrences. Results are deterministic.

mod config;
mod discovery;
mod error;
mod folding;
mod generator;
mod motive;
mod position;
mod position_sequence;
mod result;
mod stream;
mod unit;
mod unit_sequence;


pub use config::{GeneratorConfig, VariantOptions};
pub use error::ConfigError;
pub use folding::{
    merge_inverted_and_mirrored, remove_motives_only_in_transformed, remove_motives_with_breaks,
};
pub use generator::MotiveGenerator;
pub use motive::Motive;
pub use position::Position;
pub use position_sequence::PositionSequence;
pub use result::{
    MotiveList, PartPositions, PiecePositions, ResultKey, ResultMotive, VoicePositions,
};
pub use stream::{ScopeStream, StreamBuilder};
pub use unit::{BreakKind, Origin, Scope, Token, Unit, Variant};
pub use unit_sequence::{IntervalClasses, SequenceType, UnitSequence};
