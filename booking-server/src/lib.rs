//! Booking HTTP Server - quoting API for the booking engine
//!
//! Serves a health check, the booking form schema and price quotes. The
//! schema and quote routes sit behind the shared-secret credential gate.

pub mod api;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod probe;
pub mod state;
pub mod tracing;

pub use api::{FormSchemaResponse, HealthResponse, QuoteResponse};
pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Build the application router
///
/// `/health` and `/metrics` are public; everything under `/api` goes through
/// [`middleware::require_auth`].
pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/api/form-schema", get(handlers::form_schema))
        .route("/api/quote", post(handlers::quote))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::require_auth,
        ));

    Router::new()
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .merge(protected)
        .with_state(state)
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
