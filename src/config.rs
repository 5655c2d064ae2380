// src/config.rs

use clap::ValueEnum;
use serde::{Serialize, Deserialize};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum SimilarityMetric {
    /// Indel ratio over the raw strings.
    Ratio,
    /// Indel ratio over lowercased, alphabetically sorted tokens.
    TokenSort,
    /// Jaro-Winkler similarity scaled to 0-100.
    JaroWinkler,
}

impl SimilarityMetric {
    pub fn as_str(&self) -> &'static str {
        match self {
            SimilarityMetric::Ratio => "ratio",
            SimilarityMetric::TokenSort => "token-sort",
            SimilarityMetric::JaroWinkler => "jaro-winkler",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim_matches('"').to_lowercase().as_str() {
            "ratio" => Some(Self::Ratio),
            "token-sort" | "token_sort" => Some(Self::TokenSort),
            "jaro-winkler" | "jaro_winkler" => Some(Self::JaroWinkler),
            _ => None,
        }
    }
}

impl Default for SimilarityMetric {
    fn default() -> Self {
        Self::TokenSort
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Header name of the column compared for similarity.
    pub match_field: String,
    /// Header name of the column emitted in the report.
    pub display_field: String,
    /// Minimum similarity score (exclusive) for two rows to share a cluster.
    pub threshold: u32,
    pub metric: SimilarityMetric,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            match_field: "Address".to_string(),
            display_field: "Name".to_string(),
            threshold: 70,
            metric: SimilarityMetric::default(),
        }
    }
}

impl MatchConfig {
    pub fn validate(&self) -> Result<()> {
        if self.match_field.trim().is_empty() {
            return Err(Error::config("Matching field name cannot be empty"));
        }
        if self.display_field.trim().is_empty() {
            return Err(Error::config("Display field name cannot be empty"));
        }
        // Threshold 100 would prevent rows from matching themselves, so no
        // row could ever claim a cluster.
        if self.threshold == 0 || self.threshold >= 100 {
            return Err(Error::config(format!(
                "Threshold must be strictly between 0 and 100, got {}",
                self.threshold
            )));
        }
        Ok(())
    }
}
