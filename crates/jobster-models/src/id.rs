//! Record identifier format and generation.
//!
//! The document store assigns every record a 24-character lowercase-hex
//! identifier. Anything else is a malformed id and is rejected before it
//! reaches the store.

use std::fmt;

use thiserror::Error;
use uuid::Uuid;

/// Length of a store-assigned record id.
pub const ID_LEN: usize = 24;

/// Error returned when a string does not have the record id shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed record id: {0:?}")]
pub struct IdError(pub String);

/// Generate a new record id: 24 lowercase hex characters.
pub fn generate() -> String {
    use fmt::Write;

    let bytes = Uuid::new_v4().into_bytes();
    let mut out = String::with_capacity(ID_LEN);
    for b in &bytes[..ID_LEN / 2] {
        // Writing to a String cannot fail.
        let _ = write!(out, "{b:02x}");
    }
    out
}

/// Check whether a string has the record id shape.
pub fn is_valid(s: &str) -> bool {
    s.len() == ID_LEN && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}
