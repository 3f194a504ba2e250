//! Application state

use crate::probe::HealthProbe;
use booking_core::{AuthGate, QuoteCalculator};
use std::sync::Arc;
use std::time::Instant;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Credential gate for protected routes
    pub gate: Arc<AuthGate>,

    /// Quote calculator
    pub calculator: QuoteCalculator,

    /// Datastore probe reported by `/health`
    pub probe: Arc<dyn HealthProbe>,

    /// Server start time
    pub start_time: Instant,

    /// Debug mode flag
    pub debug: bool,
}

impl AppState {
    /// Create new application state
    pub fn new(gate: AuthGate, probe: Arc<dyn HealthProbe>) -> Self {
        Self {
            gate: Arc::new(gate),
            calculator: QuoteCalculator::new(),
            probe,
            start_time: Instant::now(),
            debug: false,
        }
    }

    /// Create application state with debug mode
    pub fn with_debug(gate: AuthGate, probe: Arc<dyn HealthProbe>, debug: bool) -> Self {
        Self {
            debug,
            ..Self::new(gate, probe)
        }
    }

    /// Get uptime in seconds
    pub fn uptime_seconds(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }
}
