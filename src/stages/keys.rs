//! Key normalization and target selection.
//!
//! Normalizing uppercases a token's key and leaves its value alone. Selection
//! keeps a token when its key *contains* the target string anywhere, not only
//! at the start. Which of the two runs first is a [`KeyOrder`]:
//!
//! | order                   | `element06=12` with target `ELEMENT` |
//! |-------------------------|--------------------------------------|
//! | `NormalizeThenFilter`   | kept, as `ELEMENT06`                 |
//! | `FilterThenNormalize`   | dropped (case-sensitive match)       |

use crate::stages::tokenize::Token;
use serde::{Deserialize, Serialize};

/// A token whose key has been uppercased.
///
/// Only [`normalize_key`] builds one, and deserialization goes through the
/// same path, so the key is always uppercase. The type does not know the
/// target: containing it holds for entries that came out of
/// [`KeyOrder::admit`], which is the only way the status pipeline selects them.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Token")]
pub struct Entry {
    key: String,
    value: String,
}

impl Entry {
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub fn into_parts(self) -> (String, String) {
        (self.key, self.value)
    }
}

impl From<Token> for Entry {
    fn from(token: Token) -> Self {
        normalize_key(token)
    }
}

/// Uppercase the key; the value is carried over unchanged.
#[must_use]
pub fn normalize_key(token: Token) -> Entry {
    Entry {
        key: token.key.to_uppercase(),
        value: token.value,
    }
}

/// Substring containment, case-sensitive.
#[must_use]
pub fn matches_target(key: &str, target: &str) -> bool {
    key.contains(target)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyOrder {
    /// Uppercase first, then match against the uppercased target.
    /// Matching is case-insensitive.
    #[default]
    NormalizeThenFilter,
    /// Match the original key against the target as written, then uppercase
    /// the survivors.
    FilterThenNormalize,
}

impl KeyOrder {
    /// Run normalization and selection on one token in this order.
    ///
    /// ```
    /// use linebeam::stages::keys::KeyOrder;
    /// use linebeam::stages::tokenize::Token;
    ///
    /// let lower = Token::new("element06", "12");
    /// let kept = KeyOrder::NormalizeThenFilter.admit(lower.clone(), "ELEMENT").unwrap();
    /// assert_eq!(kept.key(), "ELEMENT06");
    /// assert!(KeyOrder::FilterThenNormalize.admit(lower, "ELEMENT").is_none());
    /// ```
    #[must_use]
    pub fn admit(self, token: Token, target: &str) -> Option<Entry> {
        match self {
            Self::NormalizeThenFilter => {
                let entry = normalize_key(token);
                matches_target(&entry.key, &target.to_uppercase()).then_some(entry)
            }
            Self::FilterThenNormalize => {
                matches_target(&token.key, target).then(|| normalize_key(token))
            }
        }
    }
}
