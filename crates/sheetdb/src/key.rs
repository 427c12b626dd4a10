//! Record keys.
//!
//! A key identifies one logical record for its whole lifetime, independent of
//! the row it currently occupies. Numeric ids are base-62 encoded to keep keys
//! short; any other id is used verbatim.
//!
//! Keys live in three disjoint namespaces:
//!
//! | Namespace | Form |
//! |-----------|------|
//! | numeric   | base-62 digits, no leading `0` |
//! | header    | exactly [`HEADER_KEY`] |
//! | text      | the id itself, prefixed with [`ESCAPE`] when it would read as one of the above or already starts with [`ESCAPE`] |

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Digits of the numeric key encoding, indexed by value.
const ALPHABET: &[u8; 62] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

const BASE: u64 = 62;

/// Name of the field a key is derived from.
pub const ID_FIELD: &str = "id";

/// Key bound to the header row when one is written. Never produced by [`encode`].
pub const HEADER_KEY: &str = "#head";

/// Prefix marking a text id that would otherwise collide with another key.
pub const ESCAPE: char = '~';

/// Durable identifier of a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordKey(String);

impl RecordKey {
    /// Wraps an already-derived key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The key reserved for the header row.
    #[must_use]
    pub fn header() -> Self {
        Self(HEADER_KEY.to_string())
    }

    /// Key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

/// Base-62 encodes an integer.
#[must_use]
pub fn encode_number(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::with_capacity(11);
    while n > 0 {
        digits.push(ALPHABET[(n % BASE) as usize]);
        n /= BASE;
    }
    digits.reverse();
    // Alphabet is ASCII.
    digits.into_iter().map(char::from).collect()
}

/// Reverses [`encode_number`]. Returns `None` for text that is not a valid
/// encoding or overflows `u64`.
#[must_use]
pub fn decode(key: &str) -> Option<u64> {
    if key.is_empty() || (key.len() > 1 && key.starts_with('0')) {
        return None;
    }
    key.bytes().try_fold(0u64, |acc, byte| {
        let digit = ALPHABET.iter().position(|&c| c == byte)? as u64;
        acc.checked_mul(BASE)?.checked_add(digit)
    })
}

/// Derives the key for an `id` value.
///
/// Unsigned integers (`0` included) and all-digit strings without a leading
/// zero that fit in `u64` are encoded. Absent, `null`, boolean and empty ids
/// yield no key. Anything else is used as text: `"user-7"` stays `user-7`,
/// but `"a"` becomes `~a` since `a` is the encoding of `10`.
#[must_use]
pub fn encode(id: Option<&Value>) -> Option<RecordKey> {
    let key = match id? {
        Value::Null | Value::Bool(_) => return None,
        Value::Number(n) => match n.as_u64() {
            Some(n) => encode_number(n),
            // Floats like 1e20 print as base-62 digits.
            None => escape_text(&n.to_string()),
        },
        Value::String(s) if s.is_empty() => return None,
        Value::String(s) => match parse_digits(s) {
            Some(n) => encode_number(n),
            None => escape_text(s),
        },
        other @ (Value::Array(_) | Value::Object(_)) => other.to_string(),
    };
    Some(RecordKey(key))
}

fn escape_text(text: &str) -> String {
    if decode(text).is_some() || text == HEADER_KEY || text.starts_with(ESCAPE) {
        format!("{ESCAPE}{text}")
    } else {
        text.to_string()
    }
}

fn parse_digits(s: &str) -> Option<u64> {
    // "007" stays verbatim so it cannot collide with the number 7.
    if s.bytes().all(|b| b.is_ascii_digit()) && (s.len() == 1 || !s.starts_with('0')) {
        s.parse().ok()
    } else {
        None
    }
}

#[cfg(test)]
#[path = "key_tests.rs"]
mod tests;
