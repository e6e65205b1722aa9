//! Job listing models.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

use crate::id::{self, IdError};

/// Unique identifier for a job listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    /// Parse an id supplied by a client, rejecting anything that does not
    /// have the store-assigned 24-hex shape.
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

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Company contact details nested in a job listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    /// Company name
    #[validate(length(min = 1, message = "company.name is required"))]
    pub name: String,

    /// Contact email address
    #[validate(length(min = 1, message = "company.contactEmail is required"))]
    pub contact_email: String,

    /// Contact phone number
    #[validate(length(min = 1, message = "company.contactPhone is required"))]
    pub contact_phone: String,
}

/// A persisted job listing.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Job {
    /// Store-assigned id, immutable after insert
    pub id: JobId,

    /// Listing title
    pub title: String,

    /// Free-form employment type label
    #[serde(rename = "type")]
    pub job_type: String,

    /// Listing description
    pub description: String,

    /// Hiring company
    pub company: Company,

    /// When the record was created
    pub created_at: DateTime<Utc>,

    /// When the record was last updated
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a job listing. All fields are required.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, JsonSchema)]
pub struct JobDraft {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,

    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "type is required"))]
    pub job_type: String,

    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,

    #[validate(nested)]
    pub company: Company,
}

/// Partial update for a job listing.
///
/// Only supplied fields overwrite stored ones (shallow merge); omitted
/// fields keep their prior values. `company` replaces the whole nested
/// record when present.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct JobPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub job_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<Company>,
}

impl JobPatch {
    /// True when no fields were supplied.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.job_type.is_none()
            && self.description.is_none()
            && self.company.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn draft() -> JobDraft {
        JobDraft {
            title: "Web Developer".to_string(),
            job_type: "Part-Time".to_string(),
            description: "Come work with us!".to_string(),
            company: Company {
                name: "Test Company".to_string(),
                contact_email: "test@test.com".to_string(),
                contact_phone: "1234567890".to_string(),
            },
        }
    }

    #[test]
    fn job_id_round_trip() {
        let raw = crate::id::generate();
        let id = JobId::parse(&raw).unwrap();
        assert_eq!(id.as_str(), raw);
        assert_eq!(id.to_string(), raw);
    }

    #[test]
    fn job_id_rejects_malformed() {
        assert!(JobId::parse("123").is_err());
        assert!(JobId::parse("not-a-hex-id-at-all-here").is_err());
    }

    #[test]
    fn draft_validates() {
        assert!(draft().validate().is_ok());

        let mut missing_title = draft();
        missing_title.title.clear();
        assert!(missing_title.validate().is_err());

        let mut missing_contact = draft();
        missing_contact.company.contact_email.clear();
        assert!(missing_contact.validate().is_err());
    }

    #[test]
    fn company_uses_camel_case_keys() {
        let json = serde_json::to_value(draft().company).unwrap();
        assert!(json.get("contactEmail").is_some());
        assert!(json.get("contactPhone").is_some());
        assert!(json.get("contact_email").is_none());
    }

    #[test]
    fn draft_uses_type_key() {
        let json = serde_json::to_value(draft()).unwrap();
        assert_eq!(json["type"], "Part-Time");
    }

    #[test]
    fn patch_detects_empty() {
        assert!(JobPatch::default().is_empty());
        let patch = JobPatch {
            title: Some("Updated".to_string()),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
