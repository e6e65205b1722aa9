//! Document store for the Jobster backend.
//!
//! This crate provides:
//! - A collection/document engine with store-assigned record ids
//! - Typed repositories for job listings and users
//! - Shallow-merge updates and field-match lookups
//!
//! The engine is process-local; a single writer lock per store serializes
//! conflicting writes, so handlers never coordinate access themselves.

pub mod error;
pub mod job_repo;
pub mod store;
pub mod user_repo;

pub use error::{StoreError, StoreResult};
pub use job_repo::JobRepository;
pub use store::{Document, DocumentStore};
pub use user_repo::UserRepository;
