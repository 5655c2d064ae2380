use serde::{Serialize, Deserialize};

/// A single record of the input table. The position is the row's index in
/// the source file and stays stable through normalization and clustering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub position: usize,
    pub match_value: String,
    pub display_value: String,
    /// Latin-script form of `match_value`, filled by the normalizer.
    pub normalized: Option<String>,
    /// Position of the row that claimed this row's cluster.
    pub cluster: Option<usize>,
}

impl Row {
    pub fn new(position: usize, match_value: String, display_value: String) -> Self {
        Self {
            position,
            match_value,
            display_value,
            normalized: None,
            cluster: None,
        }
    }

    /// The value rows are compared on: the normalized form when present,
    /// otherwise the raw matching-field value.
    pub fn comparison_key(&self) -> &str {
        self.normalized.as_deref().unwrap_or(&self.match_value)
    }
}

/// An ordered sequence of rows with unique, ascending positions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    pub fn new(rows: Vec<Row>) -> Self {
        debug_assert!(
            rows.windows(2).all(|pair| pair[0].position < pair[1].position),
            "row positions must be unique and ascending"
        );
        Self { rows }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [Row] {
        &mut self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
