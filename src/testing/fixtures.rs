//! Record fixtures.

use crate::stages::keys::{Entry, normalize_key};
use crate::stages::tokenize::Token;

/// Mixed record file: blank first and last lines, one line without `=`, two
/// non-element keys and one lowercase element key. Selected values sum to 44.
pub const SAMPLE_RECORDS: &str = "\nELEMENT01=3\nELEMENT04=4\ndiscarded:incorrect\nELEMENT03=1\nfoo=4\nelement06=12\nELEMENT07=12\nbar=3\nELEMENT02=12\n";

/// Status line for [`SAMPLE_RECORDS`] under the default configuration.
pub const SAMPLE_STATUS: &str = "[44%] Running...";

/// Build entries from `(key, value)` pairs, normalizing each key.
#[must_use]
pub fn entries(pairs: &[(&str, &str)]) -> Vec<Entry> {
    pairs
        .iter()
        .map(|(k, v)| normalize_key(Token::new(*k, *v)))
        .collect()
}

/// Six element entries, one of whose values is not an integer.
///
/// ```
/// use linebeam::testing::corrupted_entries;
///
/// assert_eq!(corrupted_entries().len(), 6);
/// ```
#[must_use]
pub fn corrupted_entries() -> Vec<Entry> {
    entries(&[
        ("ELEMENT01", "3"),
        ("ELEMENT04", "4"),
        ("ELEMENT03", "1"),
        ("ELEMENT06", "not an integer"),
        ("ELEMENT07", "12"),
        ("ELEMENT02", "12"),
    ])
}

/// [`corrupted_entries`] rendered back into record lines.
#[must_use]
pub fn corrupted_records() -> String {
    corrupted_entries()
        .into_iter()
        .map(|e| {
            let (key, value) = e.into_parts();
            Token::new(key, value).rejoin('=')
        })
        .collect::<Vec<_>>()
        .join("\n")
}
