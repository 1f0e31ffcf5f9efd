//! Phonetic encoding
//!
//! Column values and queries are reduced to a pair of spelling-insensitive
//! codes. The phonetic index is keyed by both codes joined with
//! [`CODE_SEPARATOR`], so `"Smith"` and `"Smyth"` share the key `SM0;XMT`.

use serde::{Deserialize, Serialize};

/// Separator between the primary and alternate code in a phonetic key.
pub const CODE_SEPARATOR: char = ';';

/// Primary and alternate phonetic codes for one string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhoneticCodes {
    pub primary: String,
    pub alternate: String,
}

impl PhoneticCodes {
    pub fn new(primary: impl Into<String>, alternate: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            alternate: alternate.into(),
        }
    }

    /// Render the phonetic index key: `primary;alternate`.
    pub fn key(&self) -> String {
        let mut key = String::with_capacity(self.primary.len() + self.alternate.len() + 1);
        key.push_str(&self.primary);
        key.push(CODE_SEPARATOR);
        key.push_str(&self.alternate);
        key
    }

    /// Non-empty codes, primary first. Empty codes carry no signal and
    /// would match every key by containment.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        [self.primary.as_str(), self.alternate.as_str()]
            .into_iter()
            .filter(|code| !code.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_empty() && self.alternate.is_empty()
    }
}

/// Maps a string to its phonetic codes. Must be deterministic and pure.
pub trait PhoneticEncoder: Send + Sync {
    fn encode(&self, value: &str) -> PhoneticCodes;
}

impl<F> PhoneticEncoder for F
where
    F: Fn(&str) -> PhoneticCodes + Send + Sync,
{
    fn encode(&self, value: &str) -> PhoneticCodes {
        self(value)
    }
}

/// Double Metaphone encoder backed by `rphonetic`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DoubleMetaphoneEncoder;

impl PhoneticEncoder for DoubleMetaphoneEncoder {
    fn encode(&self, value: &str) -> PhoneticCodes {
        // Double Metaphone only works reliably with ASCII
        let ascii: String = value
            .chars()
            .filter(char::is_ascii)
            .map(|c| c.to_ascii_uppercase())
            .collect();
        if ascii.trim().is_empty() {
            return PhoneticCodes::default();
        }

        let encoder = rphonetic::DoubleMetaphone::default();
        let result = encoder.double_metaphone(&ascii);
        let primary: String = result.primary().into();
        let alternate: String = result.alternate().into();
        PhoneticCodes { primary, alternate }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_format() {
        assert_eq!(PhoneticCodes::new("SM0", "XMT").key(), "SM0;XMT");
        assert_eq!(PhoneticCodes::new("SM0", "").key(), "SM0;");
    }

    #[test]
    fn test_codes_skip_empty() {
        let codes = PhoneticCodes::new("", "XMT");
        assert_eq!(codes.codes().collect::<Vec<_>>(), vec!["XMT"]);
        assert!(PhoneticCodes::default().is_empty());
    }

    #[test]
    fn test_spelling_variants_share_codes() {
        let encoder = DoubleMetaphoneEncoder;
        assert_eq!(encoder.encode("Smith"), encoder.encode("Smyth"));
    }

    #[test]
    fn test_encoding_ignores_case() {
        let encoder = DoubleMetaphoneEncoder;
        assert_eq!(encoder.encode("smith"), encoder.encode("SMITH"));
    }

    #[test]
    fn test_empty_and_non_ascii_input() {
        let encoder = DoubleMetaphoneEncoder;
        assert!(encoder.encode("").is_empty());
        assert!(encoder.encode("日本").is_empty());
    }

    #[test]
    fn test_closure_encoder() {
        let encoder = |value: &str| PhoneticCodes::new(value.to_uppercase(), "");
        assert_eq!(encoder.encode("abc").key(), "ABC;");
    }
}
