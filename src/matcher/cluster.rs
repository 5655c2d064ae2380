// src/matcher/cluster.rs

use ahash::{AHashMap, AHashSet};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};

use crate::config::MatchConfig;
use crate::matcher::algorithms::{algorithm_for, SimilarityAlgorithm};
use crate::types::Table;

/// Groups rows into clusters with a greedy single pass over the table.
///
/// Rows are visited in ascending position order. The first not-yet-assigned
/// row claims a cluster identified by its own position and pulls in every
/// other unassigned row whose comparison value scores strictly above the
/// threshold. A row matches itself with score 100, and the threshold is
/// validated below 100, so every row ends up in exactly one cluster; rows
/// with no partners form singletons.
///
/// The outcome depends on row order: near the threshold boundary, a
/// reordered input can cluster differently because earlier rows claim
/// candidates first. Comparisons are O(n²) in the number of rows, which is
/// fine for the small-to-medium tables this tool targets.
pub struct ClusterAssigner {
    algorithm: Box<dyn SimilarityAlgorithm>,
    threshold: u32,
}

impl ClusterAssigner {
    pub fn new(config: &MatchConfig) -> Self {
        Self {
            algorithm: algorithm_for(config.metric),
            threshold: config.threshold,
        }
    }

    /// Finds the positions of all candidates scoring strictly above the
    /// threshold against `value`. Returns an empty list when nothing
    /// qualifies.
    pub fn find_matches(&self, value: &str, candidates: &[(usize, &str)]) -> Vec<usize> {
        let mut matches = Vec::new();
        for &(position, candidate) in candidates {
            let score = self.algorithm.score(value, candidate);
            if score > self.threshold {
                matches.push(position);
            }
        }
        matches
    }

    /// Runs the greedy pass and returns the complete position-to-cluster
    /// mapping. The table is left untouched; use [`apply_clusters`] to
    /// write the mapping back onto the rows.
    pub fn assign(&self, table: &Table) -> AHashMap<usize, usize> {
        let mut assigned: AHashMap<usize, usize> = AHashMap::with_capacity(table.len());

        let progress = ProgressBar::new(table.len() as u64);
        if let Ok(style) =
            ProgressStyle::with_template("[{elapsed_precise}] {bar:40} {pos}/{len} rows")
        {
            progress.set_style(style);
        }

        for row in table.rows() {
            progress.inc(1);
            if assigned.contains_key(&row.position) {
                continue;
            }

            let pool: Vec<(usize, &str)> = table
                .rows()
                .iter()
                .filter(|candidate| !assigned.contains_key(&candidate.position))
                .map(|candidate| (candidate.position, candidate.comparison_key()))
                .collect();

            let matches = self.find_matches(row.comparison_key(), &pool);
            debug!("Row {} claimed {} row(s)", row.position, matches.len());
            for position in matches {
                assigned.insert(position, row.position);
            }
        }
        progress.finish_and_clear();

        let clusters: AHashSet<usize> = assigned.values().copied().collect();
        info!(
            "Assigned {} rows to {} cluster(s)",
            assigned.len(),
            clusters.len()
        );
        assigned
    }
}

/// Writes a cluster mapping back onto the table rows.
pub fn apply_clusters(table: &mut Table, assigned: &AHashMap<usize, usize>) {
    for row in table.rows_mut() {
        row.cluster = assigned.get(&row.position).copied();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Row;

    fn table_from(values: &[&str]) -> Table {
        let rows = values
            .iter()
            .enumerate()
            .map(|(position, value)| {
                Row::new(position, value.to_string(), format!("row{}", position))
            })
            .collect();
        Table::new(rows)
    }

    fn assigner(threshold: u32) -> ClusterAssigner {
        ClusterAssigner::new(&MatchConfig {
            threshold,
            ..MatchConfig::default()
        })
    }

    fn assignments(table: &Table, assigned: &AHashMap<usize, usize>) -> Vec<usize> {
        table
            .rows()
            .iter()
            .map(|row| assigned[&row.position])
            .collect()
    }

    #[test]
    fn partially_identical_rows_share_a_cluster() {
        let table = table_from(&["Alice K", "Bob", "Alice Kate"]);
        let assigned = assigner(70).assign(&table);
        assert_eq!(assignments(&table, &assigned), vec![0, 1, 0]);
    }

    #[test]
    fn distinct_rows_form_singleton_clusters() {
        let table = table_from(&["Alice", "Bob", "Charlie"]);
        let assigned = assigner(70).assign(&table);
        assert_eq!(assignments(&table, &assigned), vec![0, 1, 2]);
    }

    #[test]
    fn identical_rows_share_a_cluster() {
        let table = table_from(&["Alice", "Bob", "Alice"]);
        let assigned = assigner(70).assign(&table);
        assert_eq!(assignments(&table, &assigned), vec![0, 1, 0]);
    }

    #[test]
    fn single_row_forms_its_own_cluster() {
        let table = table_from(&["Alice"]);
        let assigned = assigner(70).assign(&table);
        assert_eq!(assignments(&table, &assigned), vec![0]);
    }

    #[test]
    fn empty_table_produces_no_clusters() {
        let table = table_from(&[]);
        let assigned = assigner(70).assign(&table);
        assert!(assigned.is_empty());
    }

    #[test]
    fn every_position_is_assigned_exactly_once() {
        let table = table_from(&[
            "12 Main St",
            "Main St 12",
            "34 Elm Rd",
            "",
            "Haidian District, Beijing",
            "34 Elm Road",
            "",
        ]);
        let assigned = assigner(70).assign(&table);

        assert_eq!(assigned.len(), table.len());
        for row in table.rows() {
            assert!(assigned.contains_key(&row.position));
        }
    }

    #[test]
    fn empty_values_match_each_other() {
        let table = table_from(&["", "Alice", ""]);
        let assigned = assigner(70).assign(&table);
        assert_eq!(assignments(&table, &assigned), vec![0, 1, 0]);
    }

    #[test]
    fn row_order_changes_clusters_near_the_boundary() {
        // sim(a, b) == sim(b, c) == 80, sim(a, c) == 50 with threshold 70.
        let a = "xxxxxxxx";
        let b = "xxxxxxxxyyyy";
        let c = "xxxxyyyy";

        // a claims b; c is left to form its own cluster.
        let table = table_from(&[a, b, c]);
        let assigned = assigner(70).assign(&table);
        assert_eq!(assignments(&table, &assigned), vec![0, 0, 2]);

        // b first claims both a and c: one cluster.
        let table = table_from(&[b, a, c]);
        let assigned = assigner(70).assign(&table);
        assert_eq!(assignments(&table, &assigned), vec![0, 0, 0]);
    }

    #[test]
    fn low_scoring_rows_are_revisited_as_later_candidates() {
        // "Bob" scores below threshold against row 0 but still claims its
        // own cluster when its turn comes.
        let table = table_from(&["Alice Kate", "Bob", "Alice K"]);
        let assigned = assigner(70).assign(&table);
        assert_eq!(assigned[&1], 1);
    }

    #[test]
    fn find_matches_returns_empty_when_nothing_qualifies() {
        let candidates = vec![(0usize, "Bob"), (1usize, "Charlie")];
        let matches = assigner(70).find_matches("Alice", &candidates);
        assert!(matches.is_empty());
    }

    #[test]
    fn find_matches_uses_a_strict_threshold() {
        // "abc"/"abcd" scores 2*3/7 = 86; at threshold 86 the comparison
        // must not qualify.
        let candidates = vec![(0usize, "abcd")];
        assert!(assigner(86).find_matches("abc", &candidates).is_empty());
        assert_eq!(assigner(85).find_matches("abc", &candidates), vec![0]);
    }

    #[test]
    fn apply_clusters_writes_ids_onto_rows() {
        let mut table = table_from(&["Alice K", "Bob", "Alice Kate"]);
        let assigned = assigner(70).assign(&table);
        apply_clusters(&mut table, &assigned);

        let clusters: Vec<Option<usize>> =
            table.rows().iter().map(|row| row.cluster).collect();
        assert_eq!(clusters, vec![Some(0), Some(1), Some(0)]);
    }

    #[test]
    fn clustering_compares_normalized_values_when_present() {
        let mut rows = vec![
            Row::new(0, "北京市海淀区".to_string(), "hq".to_string()),
            Row::new(1, "Haidian District, Beijing".to_string(), "branch".to_string()),
        ];
        rows[0].normalized = Some("Haidian District, Beijing".to_string());
        rows[1].normalized = Some("Haidian District, Beijing".to_string());
        let table = Table::new(rows);

        let assigned = assigner(70).assign(&table);
        assert_eq!(assignments(&table, &assigned), vec![0, 0]);
    }
}
