//! Axum HTTP API server.
//!
//! This crate provides:
//! - REST routes for the job-listing resource under `/api/jobs`
//! - Optional bearer-token guard (HS256) with `/api/users/signup`
//! - Store access via injected repositories

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use auth::{AuthUser, TokenService};
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
