use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::SimilarityMetric;

static TOKEN_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\pL\pN]+").unwrap());

/// The SimilarityAlgorithm trait defines the interface for comparing two
/// strings. All scores are integers between 0 (completely different) and
/// 100 (identical), and every implementation is symmetric in its arguments.
pub trait SimilarityAlgorithm {
    /// Returns the type of similarity metric this algorithm implements
    fn name(&self) -> SimilarityMetric;

    /// Compares two strings and returns their similarity score
    fn score(&self, a: &str, b: &str) -> u32;
}

/// Creates the algorithm selected by the configuration.
pub fn algorithm_for(metric: SimilarityMetric) -> Box<dyn SimilarityAlgorithm> {
    match metric {
        SimilarityMetric::Ratio => Box::new(RatioMatcher),
        SimilarityMetric::TokenSort => Box::new(TokenSortMatcher),
        SimilarityMetric::JaroWinkler => Box::new(JaroWinklerMatcher),
    }
}

/// Indel ratio over the raw strings, without any token preprocessing.
pub struct RatioMatcher;

impl SimilarityAlgorithm for RatioMatcher {
    fn name(&self) -> SimilarityMetric {
        SimilarityMetric::Ratio
    }

    fn score(&self, a: &str, b: &str) -> u32 {
        indel_ratio(a, b)
    }
}

/// Word-order-insensitive matcher: both strings are lowercased, split on
/// non-alphanumeric runs, and their tokens sorted before scoring, so
/// "Main St 12" and "12 Main St" compare as identical.
pub struct TokenSortMatcher;

impl SimilarityAlgorithm for TokenSortMatcher {
    fn name(&self) -> SimilarityMetric {
        SimilarityMetric::TokenSort
    }

    fn score(&self, a: &str, b: &str) -> u32 {
        indel_ratio(&sort_tokens(a), &sort_tokens(b))
    }
}

/// Jaro-Winkler similarity scaled to the 0-100 range.
pub struct JaroWinklerMatcher;

impl SimilarityAlgorithm for JaroWinklerMatcher {
    fn name(&self) -> SimilarityMetric {
        SimilarityMetric::JaroWinkler
    }

    fn score(&self, a: &str, b: &str) -> u32 {
        (strsim::jaro_winkler(a, b) * 100.0).round() as u32
    }
}

fn sort_tokens(text: &str) -> String {
    let lowered = text.to_lowercase();
    let mut tokens: Vec<&str> = TOKEN_SPLIT
        .split(&lowered)
        .filter(|token| !token.is_empty())
        .collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Ratio of shared content between two strings:
/// `100 * (lensum - dist) / lensum`, where `dist` is the edit distance
/// counting insertions and deletions only (substitutions cost two). Equal
/// strings score 100 exactly; two empty strings are equal and also score
/// 100, so every value matches itself regardless of content.
fn indel_ratio(a: &str, b: &str) -> u32 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let lensum = a.len() + b.len();
    if lensum == 0 {
        return 100;
    }
    // dist = lensum - 2 * LCS, so the ratio reduces to 2 * LCS / lensum.
    let shared = 2 * lcs_length(&a, &b);
    (100.0 * shared as f64 / lensum as f64).round() as u32
}

// Longest common subsequence length with a rolling two-row table.
fn lcs_length(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
        curr[0] = 0;
    }
    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_algorithms() -> Vec<Box<dyn SimilarityAlgorithm>> {
        vec![
            Box::new(RatioMatcher),
            Box::new(TokenSortMatcher),
            Box::new(JaroWinklerMatcher),
        ]
    }

    #[test]
    fn identical_strings_score_100() {
        for algorithm in all_algorithms() {
            assert_eq!(
                algorithm.score("Yulin Rd, Xuhui District, Shanghai", "Yulin Rd, Xuhui District, Shanghai"),
                100,
                "metric {}",
                algorithm.name().as_str()
            );
        }
    }

    #[test]
    fn scores_are_symmetric() {
        let pairs = [
            ("Alice K", "Alice Kate"),
            ("12 Main St", "Main St 12"),
            ("北京市海淀区", "东城区"),
            ("", "something"),
        ];
        for algorithm in all_algorithms() {
            for (a, b) in pairs {
                assert_eq!(
                    algorithm.score(a, b),
                    algorithm.score(b, a),
                    "metric {} asymmetric on {:?}/{:?}",
                    algorithm.name().as_str(),
                    a,
                    b
                );
            }
        }
    }

    #[test]
    fn token_order_is_ignored_by_token_sort() {
        let matcher = TokenSortMatcher;
        assert_eq!(matcher.score("fuzzy wuzzy was a bear", "wuzzy fuzzy bear was a"), 100);
        assert_eq!(matcher.score("12 Main St", "Main St 12"), 100);
    }

    #[test]
    fn token_sort_ignores_case_and_punctuation() {
        let matcher = TokenSortMatcher;
        assert_eq!(matcher.score("New-York", "new york"), 100);
    }

    #[test]
    fn token_sort_reproduces_known_ratio_values() {
        // Sorted token strings "alice k" and "alice kate" share seven
        // characters: 2 * 7 / 17 rounds to 82.
        assert_eq!(TokenSortMatcher.score("Alice K", "Alice Kate"), 82);
        assert_eq!(TokenSortMatcher.score("Alice", "Charlie"), 67);
    }

    #[test]
    fn disjoint_scripts_score_zero() {
        let matcher = TokenSortMatcher;
        assert_eq!(
            matcher.score("Yulin Rd, Xuhui District, Shanghai", "北京市海淀区"),
            0
        );
    }

    #[test]
    fn both_empty_strings_are_identical() {
        assert_eq!(RatioMatcher.score("", ""), 100);
        assert_eq!(TokenSortMatcher.score("", ""), 100);
    }

    #[test]
    fn empty_against_non_empty_scores_zero() {
        assert_eq!(RatioMatcher.score("", "Alice"), 0);
        assert_eq!(TokenSortMatcher.score("", "Alice"), 0);
    }

    #[test]
    fn ratio_is_case_sensitive_but_token_sort_is_not() {
        assert!(RatioMatcher.score("ALICE", "alice") < 100);
        assert_eq!(TokenSortMatcher.score("ALICE", "alice"), 100);
    }

    #[test]
    fn jaro_winkler_scales_to_percent() {
        assert_eq!(JaroWinklerMatcher.score("duplicate", "duplicate"), 100);
        assert_eq!(JaroWinklerMatcher.score("abc", "xyz"), 0);
    }
}
