//! HTTP request handlers

use crate::api::{FormSchemaParams, FormSchemaResponse, HealthResponse, QuoteResponse};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    http::{header::CONTENT_TYPE, HeaderMap},
    Json,
};
use booking_core::{FormSchema, QuoteRequest};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Health check. Always 200; datastore trouble is reported in the body.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let start = Instant::now();
    let ping = state.probe.ping().await;
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    let db_error = match ping {
        Ok(()) => {
            debug!("Datastore reachable ({:.2}ms)", elapsed_ms);
            None
        }
        Err(e) => {
            warn!("Datastore unreachable after {:.2}ms: {}", elapsed_ms, e);
            Some(e.to_string())
        }
    };
    crate::metrics::record_health_check(db_error.is_none());

    Json(HealthResponse {
        ok: true,
        db: db_error.is_none(),
        db_error,
        uptime: state.uptime_seconds(),
    })
}

/// Static booking form description
pub async fn form_schema(
    params: Result<Query<FormSchemaParams>, QueryRejection>,
) -> ApiResult<Json<FormSchemaResponse>> {
    let Query(params) = params.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let schema = FormSchema::for_tenant(params.tenant.as_deref(), params.booking_type.as_deref());
    debug!(tenant = %schema.tenant, booking_type = %schema.booking_type, "Form schema served");

    Ok(Json(schema.into()))
}

/// Whether the request declares a JSON body (`application/json`, any parameters)
fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}

/// Price a booking request. A body without a JSON content type is not read,
/// and an empty body is an empty request.
pub async fn quote(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Json<QuoteResponse>> {
    let request = if is_json(&headers) {
        QuoteRequest::from_slice(&body)?
    } else {
        debug!("Quote body ignored: not declared as JSON");
        QuoteRequest::default()
    };

    if state.debug {
        debug!("Quote request: {:?}", request);
    }

    let quote = state.calculator.quote(request);
    crate::metrics::record_quote(&quote.inputs.vehicle, quote.total);

    info!(
        "Quote: tenant={} type={} vehicle={} km={} -> {} {:.2}",
        quote.tenant,
        quote.booking_type,
        quote.inputs.vehicle,
        quote.inputs.km,
        quote.currency,
        quote.total
    );

    Ok(Json(quote.into()))
}

/// Prometheus metrics endpoint
pub async fn metrics() -> String {
    crate::metrics::get_prometheus_metrics()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(content_type: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        headers
    }

    #[test]
    fn test_json_content_types() {
        assert!(is_json(&headers("application/json")));
        assert!(is_json(&headers("application/json; charset=utf-8")));
        assert!(is_json(&headers("Application/JSON")));

        assert!(!is_json(&headers("text/plain")));
        assert!(!is_json(&headers("application/x-www-form-urlencoded")));
        assert!(!is_json(&HeaderMap::new()));
    }
}
