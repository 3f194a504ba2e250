//! Credential gate middleware for protected routes

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{Query, Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use booking_core::Credentials;
use serde::Deserialize;
use tracing::warn;

/// Header carrying the secret directly
pub const API_KEY_HEADER: &str = "x-api-key";

/// Query parameter carrying the secret
#[derive(Debug, Default, Deserialize)]
struct ApiKeyQuery {
    api_key: Option<String>,
}

fn header_str<'a>(headers: &'a HeaderMap, name: impl axum::http::header::AsHeaderName) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

/// Reject the request with 401 unless the gate accepts its credentials
pub async fn require_auth(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !state.gate.is_open() {
        // A query string that fails to parse simply carries no key
        let query = Query::<ApiKeyQuery>::try_from_uri(request.uri())
            .map(|Query(q)| q)
            .unwrap_or_default();

        let headers = request.headers();
        let credentials = Credentials {
            authorization: header_str(headers, AUTHORIZATION),
            api_key_header: header_str(headers, API_KEY_HEADER),
            api_key_query: query.api_key.as_deref(),
        };

        if let Err(e) = state.gate.check(&credentials) {
            warn!(
                method = %request.method(),
                path = %request.uri().path(),
                "Rejected request without valid credentials"
            );
            crate::metrics::record_auth_rejection();
            return Err(e.into());
        }
    }

    Ok(next.run(request).await)
}
