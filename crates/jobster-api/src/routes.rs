//! API routes.

use axum::routing::{get, post};
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;

use crate::handlers::health;
use crate::handlers::jobs::{create_job, delete_job, get_job, list_jobs, update_job};
use crate::handlers::users::signup;
use crate::middleware::{cors_layer, request_logging, require_auth};
use crate::state::AppState;

/// Create the API router.
///
/// `config.require_auth` selects the variant: when set, every `/api/jobs`
/// route sits behind the bearer-token guard and `/api/users/signup` is
/// mounted; when unset the job routes are fully open and there is no
/// signup surface.
pub fn create_router(state: AppState) -> Router {
    let job_routes = Router::new()
        .route("/jobs", get(list_jobs).post(create_job))
        .route(
            "/jobs/:id",
            get(get_job).put(update_job).delete(delete_job),
        );

    let api_routes = if state.config.require_auth {
        let guarded = job_routes.layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ));
        guarded.route("/users/signup", post(signup))
    } else {
        job_routes
    };

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health))
        .layer(RequestBodyLimitLayer::new(state.config.max_body_size))
        .layer(axum::middleware::from_fn(request_logging))
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}
