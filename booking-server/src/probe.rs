//! Datastore reachability probe backing `/health`

use crate::config::DatabaseConfig;
use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::debug;

/// Upper bound on waiting for a pooled connection during a probe
pub const PROBE_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Something whose reachability `/health` reports
#[async_trait]
pub trait HealthProbe: Send + Sync {
    /// Run a no-op round trip; the error text is reported verbatim
    async fn ping(&self) -> anyhow::Result<()>;
}

/// Postgres probe issuing `select 1`
pub struct PgProbe {
    pool: PgPool,
}

impl PgProbe {
    /// Build a lazily connected pool. Nothing is dialled until the first ping,
    /// so startup never fails on an unreachable datastore.
    pub fn connect_lazy(config: &DatabaseConfig) -> Self {
        let pool = PgPoolOptions::new()
            .max_connections(2)
            .acquire_timeout(PROBE_ACQUIRE_TIMEOUT)
            .connect_lazy_with(config.connect_options());

        Self { pool }
    }
}

#[async_trait]
impl HealthProbe for PgProbe {
    async fn ping(&self) -> anyhow::Result<()> {
        sqlx::query("select 1").execute(&self.pool).await?;
        debug!("Datastore ping succeeded");
        Ok(())
    }
}

/// Probe with a fixed outcome, for running without a datastore
#[derive(Debug, Clone, Default)]
pub struct FixedProbe {
    error: Option<String>,
}

impl FixedProbe {
    /// Probe that always succeeds
    pub fn reachable() -> Self {
        Self { error: None }
    }

    /// Probe that always fails with the given message
    pub fn unreachable(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
        }
    }
}

#[async_trait]
impl HealthProbe for FixedProbe {
    async fn ping(&self) -> anyhow::Result<()> {
        match &self.error {
            Some(message) => Err(anyhow::anyhow!("{}", message)),
            None => Ok(()),
        }
    }
}
