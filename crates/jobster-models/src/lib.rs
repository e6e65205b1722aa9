//! Shared data models for the Jobster backend.
//!
//! This crate provides Serde-serializable types for:
//! - Job listings and their nested company records
//! - Users and the signup payload
//! - Record identifiers and their format rules

pub mod id;
pub mod job;
pub mod user;

// Re-export common types
pub use id::IdError;
pub use job::{Company, Job, JobDraft, JobId, JobPatch};
pub use user::{Signup, User, UserId};
