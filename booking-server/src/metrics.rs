//! Prometheus metrics for the booking server

use booking_core::VehicleClass;
use metrics::{counter, describe_counter, describe_histogram, histogram};
use std::sync::OnceLock;

/// Initialize all metric descriptions
pub fn init_metrics() {
    describe_counter!("booking_quotes_total", "Total number of quotes computed");
    describe_counter!(
        "booking_auth_rejections_total",
        "Requests rejected by the credential gate"
    );
    describe_counter!("booking_health_checks_total", "Health checks by datastore outcome");
    describe_histogram!("booking_quote_total_aud", "Quoted totals in AUD");
}

/// Record a computed quote
pub fn record_quote(vehicle: &str, total: f64) {
    // Unknown codes are client-controlled; collapse them to bound label cardinality
    let class = VehicleClass::from_code(vehicle)
        .map(|class| class.code())
        .unwrap_or("other");

    counter!("booking_quotes_total", "vehicle" => class).increment(1);
    histogram!("booking_quote_total_aud").record(total);
}

/// Record a credential gate rejection
pub fn record_auth_rejection() {
    counter!("booking_auth_rejections_total").increment(1);
}

/// Record a health check outcome
pub fn record_health_check(db_ok: bool) {
    let db = if db_ok { "up" } else { "down" };
    counter!("booking_health_checks_total", "db" => db).increment(1);
}

static PROMETHEUS_HANDLE: OnceLock<metrics_exporter_prometheus::PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder as the global metrics recorder
pub fn init_prometheus() -> anyhow::Result<()> {
    let handle = metrics_exporter_prometheus::PrometheusBuilder::new().install_recorder()?;
    PROMETHEUS_HANDLE
        .set(handle)
        .map_err(|_| anyhow::anyhow!("Prometheus recorder already installed"))?;
    Ok(())
}

/// Render metrics in Prometheus text format
pub fn get_prometheus_metrics() -> String {
    PROMETHEUS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Prometheus metrics not initialized\n".to_string())
}
