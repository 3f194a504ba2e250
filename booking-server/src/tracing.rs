//! Log and trace subscriber setup for the booking server

use crate::config::ServerConfig;
use opentelemetry::KeyValue;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{
    runtime,
    trace::{self, RandomIdGenerator, Sampler},
    Resource,
};
use std::time::Duration;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Deadline for a single span export
const EXPORT_TIMEOUT: Duration = Duration::from_secs(3);

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str = "info,booking=debug,tower_http=info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Console-only logging
pub fn init_console_logging() -> anyhow::Result<()> {
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(env_filter())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Build a batching OTLP tracer for the configured collector
pub fn init_telemetry(
    service_name: &str,
    config: &ServerConfig,
) -> anyhow::Result<opentelemetry_sdk::trace::Tracer> {
    let exporter = opentelemetry_otlp::new_exporter()
        .tonic()
        .with_endpoint(config.otlp_endpoint.clone())
        .with_timeout(EXPORT_TIMEOUT);

    let trace_config = trace::config()
        .with_sampler(sampler_from_arg(config.traces_sampler_arg.as_deref()))
        .with_id_generator(RandomIdGenerator::default())
        .with_resource(Resource::new([
            KeyValue::new("service.name", service_name.to_string()),
            KeyValue::new("service.version", booking_core::VERSION),
        ]));

    let tracer = opentelemetry_otlp::new_pipeline()
        .tracing()
        .with_exporter(exporter)
        .with_trace_config(trace_config)
        .install_batch(runtime::Tokio)?;

    Ok(tracer)
}

/// Sampler for a ratio argument; unparsable or absent means sample everything
pub fn sampler_from_arg(arg: Option<&str>) -> Sampler {
    let rate = arg
        .and_then(|s| s.trim().parse::<f64>().ok())
        .unwrap_or(1.0);

    if rate >= 1.0 {
        Sampler::AlwaysOn
    } else if rate <= 0.0 {
        Sampler::AlwaysOff
    } else {
        Sampler::TraceIdRatioBased(rate)
    }
}

/// Console logging plus OTLP export
pub fn init_tracing_stack(service_name: &str, config: &ServerConfig) -> anyhow::Result<()> {
    let tracer = init_telemetry(service_name, config)?;

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_thread_ids(true)
        .with_thread_names(true);

    Registry::default()
        .with(env_filter())
        .with(fmt_layer)
        .with(OpenTelemetryLayer::new(tracer))
        .try_init()?;

    Ok(())
}

/// Flush pending spans
pub fn shutdown_telemetry() {
    opentelemetry::global::shutdown_tracer_provider();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sampler_defaults_to_always_on() {
        assert!(matches!(sampler_from_arg(None), Sampler::AlwaysOn));
        assert!(matches!(sampler_from_arg(Some("invalid")), Sampler::AlwaysOn));
    }

    #[test]
    fn test_sampler_boundaries() {
        assert!(matches!(sampler_from_arg(Some("1.0")), Sampler::AlwaysOn));
        assert!(matches!(sampler_from_arg(Some("2.0")), Sampler::AlwaysOn));
        assert!(matches!(sampler_from_arg(Some("0.0")), Sampler::AlwaysOff));
        assert!(matches!(sampler_from_arg(Some("-0.5")), Sampler::AlwaysOff));
        assert!(matches!(
            sampler_from_arg(Some("0.25")),
            Sampler::TraceIdRatioBased(_)
        ));
    }

    #[test]
    fn test_shutdown_telemetry() {
        shutdown_telemetry();
    }
}
