//! User signup handler (authenticated variant only).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use tracing::info;
use validator::Validate;

use jobster_models::Signup;

use crate::error::{ApiError, ApiResult};
use crate::handlers::jobs::parse_payload;
use crate::state::AppState;

/// Signup response: the issued token plus user identifiers.
#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub token: String,
    pub email: String,
    pub id: String,
}

/// POST /api/users/signup
///
/// Returns:
/// - 201: token bound to the created user
/// - 400: missing/invalid fields or duplicate email
pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> ApiResult<(StatusCode, Json<SignupResponse>)> {
    let payload: Signup = parse_payload(body)?;
    payload
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let password_hash = state.tokens.hash_password(&payload.password)?;

    // Duplicate email surfaces as StoreError::AlreadyExists -> 400.
    let user = state.users.create(&payload, &password_hash).await?;
    let token = state.tokens.issue(&user)?;

    info!(id = %user.id, email = %user.email, "user signed up");

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            token,
            email: user.email,
            id: user.id.to_string(),
        }),
    ))
}
