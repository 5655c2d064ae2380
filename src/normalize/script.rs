// src/normalize/script.rs

/// Detects whether a value is written entirely in Latin script.
///
/// Only alphabetic characters are inspected; digits, punctuation, and
/// whitespace are ignored, so "12 Main St." and purely numeric values
/// count as Latin (and need no translation).
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptDetector;

impl ScriptDetector {
    pub fn new() -> Self {
        Self
    }

    pub fn is_latin(&self, text: &str) -> bool {
        text.chars()
            .filter(|c| c.is_alphabetic())
            .all(is_latin_char)
    }
}

// Unicode blocks that make up the Latin script, from Basic Latin through
// the extended blocks used for Vietnamese and phonetic alphabets.
fn is_latin_char(c: char) -> bool {
    matches!(
        u32::from(c),
        0x0041..=0x005A | 0x0061..=0x007A   // Basic Latin letters
        | 0x00C0..=0x00FF                    // Latin-1 Supplement
        | 0x0100..=0x017F                    // Latin Extended-A
        | 0x0180..=0x024F                    // Latin Extended-B
        | 0x0250..=0x02AF                    // IPA Extensions
        | 0x1E00..=0x1EFF                    // Latin Extended Additional
        | 0x2C60..=0x2C7F                    // Latin Extended-C
        | 0xA720..=0xA7FF                    // Latin Extended-D
        | 0xAB30..=0xAB6F                    // Latin Extended-E
        | 0xFB00..=0xFB06                    // Latin ligatures
        | 0xFF21..=0xFF3A | 0xFF41..=0xFF5A  // Fullwidth Latin
    )
}
