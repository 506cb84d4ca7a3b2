//! # Ledger Keys
//!
//! Canonical encoding for derived (composite) keys.
//!
//! A composite key is `SEP type SEP part1 SEP part2 ... SEP` with
//! `SEP = U+0000`. No segment may contain the separator, so decoding is
//! unambiguous and two distinct `(type, parts)` tuples never collide. Keys
//! starting with the separator are reserved for composite keys and are never
//! returned by plain range queries.

use thiserror::Error;

/// Segment separator for composite keys.
pub const KEY_SEPARATOR: char = '\u{0}';

/// Key validation errors.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum KeyError {
    /// Simple key was empty.
    #[error("key must not be empty")]
    EmptyKey,

    /// Composite object type was empty.
    #[error("composite key object type must not be empty")]
    EmptyObjectType,

    /// A segment contained the reserved separator.
    #[error("key segment {0:?} contains the reserved separator U+0000")]
    ContainsSeparator(String),

    /// Decoding a key that is not composite.
    #[error("key {0:?} is not a composite key")]
    NotComposite(String),
}

/// Build a composite key from an object type and its component parts.
pub fn composite_key(object_type: &str, parts: &[&str]) -> Result<String, KeyError> {
    if object_type.is_empty() {
        return Err(KeyError::EmptyObjectType);
    }
    check_segment(object_type)?;

    let capacity = 2 + object_type.len() + parts.iter().map(|p| p.len() + 1).sum::<usize>();
    let mut key = String::with_capacity(capacity);
    key.push(KEY_SEPARATOR);
    key.push_str(object_type);
    key.push(KEY_SEPARATOR);
    for part in parts {
        check_segment(part)?;
        key.push_str(part);
        key.push(KEY_SEPARATOR);
    }
    Ok(key)
}

/// Split a composite key back into `(object_type, parts)`.
pub fn split_composite_key(key: &str) -> Result<(String, Vec<String>), KeyError> {
    let inner = key
        .strip_prefix(KEY_SEPARATOR)
        .and_then(|rest| rest.strip_suffix(KEY_SEPARATOR))
        .ok_or_else(|| KeyError::NotComposite(key.to_string()))?;

    let mut segments = inner.split(KEY_SEPARATOR).map(str::to_string);
    let object_type = segments
        .next()
        .filter(|t| !t.is_empty())
        .ok_or_else(|| KeyError::NotComposite(key.to_string()))?;
    Ok((object_type, segments.collect()))
}

/// Whether `key` lives in the composite namespace.
pub fn is_composite_key(key: &str) -> bool {
    key.starts_with(KEY_SEPARATOR)
}

/// Validate a plain (non-derived) key such as an asset id.
pub fn validate_simple_key(key: &str) -> Result<(), KeyError> {
    if key.is_empty() {
        return Err(KeyError::EmptyKey);
    }
    check_segment(key)
}

fn check_segment(segment: &str) -> Result<(), KeyError> {
    if segment.contains(KEY_SEPARATOR) {
        return Err(KeyError::ContainsSeparator(segment.to_string()));
    }
    Ok(())
}
