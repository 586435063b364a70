//! Line tokenization.
//!
//! A line becomes a [`Token`] when it contains the delimiter. The split happens
//! at the **first** occurrence only, so a value may itself contain the
//! delimiter: `a=b=c` tokenizes to key `a`, value `b=c`. Lines without the
//! delimiter (including empty lines) tokenize to `None` and are dropped by the
//! caller's `filter_map`.

use serde::{Deserialize, Serialize};

/// A raw `(key, value)` pair split from one line. Casing is untouched.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub key: String,
    pub value: String,
}

impl Token {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Join key and value back together. For any line that contained the
    /// delimiter, `tokenize(line, d)?.rejoin(d) == line`.
    #[must_use]
    pub fn rejoin(&self, delimiter: char) -> String {
        let mut line = String::with_capacity(self.key.len() + self.value.len() + delimiter.len_utf8());
        line.push_str(&self.key);
        line.push(delimiter);
        line.push_str(&self.value);
        line
    }
}

/// Split `line` on the first `delimiter`, or return `None` when it has none.
///
/// ```
/// use linebeam::stages::tokenize::{tokenize, Token};
///
/// assert_eq!(tokenize("ELEMENT01=3", '='), Some(Token::new("ELEMENT01", "3")));
/// assert_eq!(tokenize("a=b=c", '='), Some(Token::new("a", "b=c")));
/// assert_eq!(tokenize("discarded:incorrect", '='), None);
/// ```
#[must_use]
pub fn tokenize(line: &str, delimiter: char) -> Option<Token> {
    let (key, value) = line.split_once(delimiter)?;
    Some(Token::new(key, value))
}
