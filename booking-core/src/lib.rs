//! Booking Core - credential gate and quote calculator for the booking engine
//!
//! This crate holds the request-independent pieces of the booking engine:
//! the shared-secret [`AuthGate`], the fixed-formula [`QuoteCalculator`] and
//! the static [`FormSchema`] served to booking forms.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod auth;
pub mod error;
pub mod quote;
pub mod schema;
pub mod vehicle;

pub use auth::{AuthGate, Credentials};
pub use error::{BookingError, Result};
pub use quote::{Breakdown, Pricing, Quote, QuoteCalculator, QuoteInputs, QuoteRequest};
pub use schema::FormSchema;
pub use vehicle::VehicleClass;

/// Tenant used when a request does not name one
pub const DEFAULT_TENANT: &str = "all-limos";

/// Booking type used when a request does not name one
pub const DEFAULT_BOOKING_TYPE: &str = "general";

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(VERSION.contains('.'));
    }
}
