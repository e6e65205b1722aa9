//! User account models (authenticated variant only).

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

use crate::id::{self, IdError};

/// Unique identifier for a user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Parse an id supplied by a client or token claim.
    pub fn parse(s: &str) -> Result<Self, IdError> {
        if id::is_valid(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(IdError(s.to_string()))
        }
    }

    /// Wrap an id that came out of the store.
    pub fn from_store(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted user account.
///
/// The password hash lives in the store but is never serialized into a
/// response body.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct User {
    /// Store-assigned id
    pub id: UserId,

    pub name: String,

    /// Unique across users
    pub email: String,

    /// Bcrypt hash of the signup password
    #[serde(skip_serializing)]
    pub password_hash: String,

    pub phone_number: String,

    pub gender: String,

    pub date_of_birth: String,

    pub membership_status: String,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

/// Signup payload. Every field is required.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, JsonSchema)]
pub struct Signup {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,

    #[validate(email(message = "email must be a valid address"))]
    pub email: String,

    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,

    #[validate(length(min = 1, message = "phone_number is required"))]
    pub phone_number: String,

    #[validate(length(min = 1, message = "gender is required"))]
    pub gender: String,

    #[validate(length(min = 1, message = "date_of_birth is required"))]
    pub date_of_birth: String,

    #[validate(length(min = 1, message = "membership_status is required"))]
    pub membership_status: String,
}
