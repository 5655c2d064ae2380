pub mod script;
pub mod translate;

// Re-export the main types
pub use script::ScriptDetector;
pub use translate::{MyMemoryTranslator, Translate, DISTINCT_LANGUAGES_SENTINEL};

use log::{debug, warn};
use crate::types::Table;

/// Rewrites matching-field values into a script-neutral comparable form.
///
/// Latin-script values pass through unchanged, which makes normalization
/// idempotent. Non-Latin values are translated; when the service cannot
/// pick a language pair (the distinct-languages sentinel) or fails
/// outright, the original value is kept so a bad translation never drops
/// a row from matching.
pub struct Normalizer<T: Translate> {
    detector: ScriptDetector,
    translator: T,
}

impl<T: Translate> Normalizer<T> {
    pub fn new(detector: ScriptDetector, translator: T) -> Self {
        Self {
            detector,
            translator,
        }
    }

    pub fn normalize(&self, value: &str) -> String {
        if self.detector.is_latin(value) {
            return value.to_string();
        }

        match self.translator.translate(value) {
            Ok(translated) => {
                if translated
                    .to_uppercase()
                    .contains(DISTINCT_LANGUAGES_SENTINEL)
                {
                    debug!(
                        "Translator could not pick a language pair for {:?}, keeping original",
                        value
                    );
                    value.to_string()
                } else {
                    translated
                }
            }
            Err(e) => {
                warn!(
                    "Translation failed for {:?}, keeping original value: {}",
                    value, e
                );
                value.to_string()
            }
        }
    }

    /// Fills the derived normalized column, one row at a time in row order.
    pub fn normalize_table(&self, table: &mut Table) {
        for row in table.rows_mut() {
            let normalized = self.normalize(&row.match_value);
            debug!(
                "Row {}: normalized {:?} to {:?}",
                row.position, row.match_value, normalized
            );
            row.normalized = Some(normalized);
        }
    }
}
