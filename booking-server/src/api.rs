//! API request and response types

use booking_core::{FormSchema, Quote};
use serde::{Deserialize, Serialize};

/// Query parameters of `GET /api/form-schema`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FormSchemaParams {
    /// Tenant identifier
    pub tenant: Option<String>,

    /// Booking type
    pub booking_type: Option<String>,
}

/// Form schema response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormSchemaResponse {
    pub ok: bool,

    #[serde(flatten)]
    pub schema: FormSchema,
}

/// Quote response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteResponse {
    pub ok: bool,

    #[serde(flatten)]
    pub quote: Quote,
}

/// Health check response
///
/// `ok` describes the service itself and stays `true` when the datastore is
/// down; datastore reachability is reported separately in `db`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service is up
    pub ok: bool,

    /// Datastore answered the probe
    pub db: bool,

    /// Probe failure message when `db` is false
    pub db_error: Option<String>,

    /// Uptime in seconds
    pub uptime: f64,
}

impl From<FormSchema> for FormSchemaResponse {
    fn from(schema: FormSchema) -> Self {
        Self { ok: true, schema }
    }
}

impl From<Quote> for QuoteResponse {
    fn from(quote: Quote) -> Self {
        Self { ok: true, quote }
    }
}
