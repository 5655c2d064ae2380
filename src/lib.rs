//! rowmatch is a library for deduplicating rows of a tabular dataset by
//! fuzzy-matching a chosen text field. Non-Latin-script values are
//! normalized into a Latin-script form before comparison, and rows are
//! grouped into match clusters for reporting.

// Module declarations
pub mod error;
pub mod config;
pub mod parser;
pub mod normalize;
pub mod matcher;
pub mod report;
pub mod types;

// Re-exports
pub use error::{Error, Result};
pub use config::{MatchConfig, SimilarityMetric};
pub use matcher::{ClusterAssigner, SimilarityAlgorithm};
pub use normalize::{Normalizer, ScriptDetector, MyMemoryTranslator, Translate};
pub use types::{Row, Table};
