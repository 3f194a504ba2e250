//! Fixed-formula quote calculation
//!
//! A quote is `round((base + km * per_km) * multiplier, 2)` where the
//! multiplier depends only on the vehicle class. Every field of the request is
//! optional and defaulted independently. Any well-formed JSON is a valid
//! request: fields of the wrong type fall back to their defaults instead of
//! failing the request.

use crate::error::{BookingError, Result};
use crate::vehicle::VehicleClass;
use crate::{DEFAULT_BOOKING_TYPE, DEFAULT_TENANT};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

/// Currency every quote is priced in
pub const CURRENCY: &str = "AUD";

/// Distance assumed when the request carries no usable distance hint
pub const DEFAULT_DISTANCE_KM: f64 = 10.0;

/// Passenger count assumed when the request carries no usable count
pub const DEFAULT_PAX: u32 = 1;

/// Quote request as received on the wire
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    /// Tenant identifier
    #[serde(default, deserialize_with = "lenient_string")]
    pub tenant: Option<String>,
    /// Booking type, e.g. "general" or "airport"
    #[serde(default, deserialize_with = "lenient_string")]
    pub booking_type: Option<String>,
    /// Route description, echoed back unmodified
    pub route: Option<Value>,
    /// Passenger count, as a number or numeric string
    pub pax: Option<Value>,
    /// Vehicle class code
    #[serde(default, deserialize_with = "lenient_string")]
    pub vehicle: Option<String>,
    /// Pricing hints supplied by the client; anything but an object is ignored
    #[serde(default, deserialize_with = "lenient_hints")]
    pub hints: Option<Hints>,
}

/// Client-supplied pricing hints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hints {
    /// Trip distance in kilometres, as a number or numeric string
    pub distance_km: Option<Value>,
}

fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn lenient_hints<'de, D>(deserializer: D) -> std::result::Result<Option<Hints>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Object(map) => Some(Hints {
            distance_km: map.get("distance_km").cloned(),
        }),
        _ => None,
    })
}

impl QuoteRequest {
    /// Parse a request body. Only text that is not JSON is rejected; an empty
    /// body or any JSON value other than an object is an empty request.
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        let value: Value = serde_json::from_slice(body)
            .map_err(|e| BookingError::InvalidInput(format!("Invalid JSON: {}", e)))?;

        match value {
            Value::Object(_) => Self::deserialize(value)
                .map_err(|e| BookingError::InvalidInput(format!("Invalid request: {}", e))),
            _ => Ok(Self::default()),
        }
    }

    /// Set the vehicle class code
    pub fn with_vehicle(mut self, vehicle: impl Into<String>) -> Self {
        self.vehicle = Some(vehicle.into());
        self
    }

    /// Set the distance hint
    pub fn with_distance_km(mut self, km: f64) -> Self {
        self.hints
            .get_or_insert_with(Hints::default)
            .distance_km = Some(Value::from(km));
        self
    }

    /// Resolved distance in kilometres
    pub fn distance_km(&self) -> f64 {
        let hint = self.hints.as_ref().and_then(|h| h.distance_km.as_ref());
        parse_non_negative(hint).unwrap_or(DEFAULT_DISTANCE_KM)
    }

    /// Resolved passenger count
    pub fn pax(&self) -> u32 {
        parse_count(self.pax.as_ref()).unwrap_or(DEFAULT_PAX)
    }
}

/// Accept a finite, non-negative number given as a JSON number or numeric string
pub fn parse_non_negative(value: Option<&Value>) -> Option<f64> {
    let n = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;

    (n.is_finite() && n >= 0.0).then_some(n)
}

/// Accept a whole, non-negative count given as a JSON number or numeric string
pub fn parse_count(value: Option<&Value>) -> Option<u32> {
    let n = parse_non_negative(value)?;
    if n.fract() != 0.0 || n > u32::MAX as f64 {
        return None;
    }
    Some(n as u32)
}

/// Round to whole cents, ties to even
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Fixed pricing constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pricing {
    /// Flat fee per booking
    pub base: f64,
    /// Rate per kilometre
    pub per_km: f64,
}

impl Default for Pricing {
    fn default() -> Self {
        Self {
            base: 30.0,
            per_km: 3.0,
        }
    }
}

/// Normalized inputs echoed back with a quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteInputs {
    /// Route, unmodified
    pub route: Value,
    /// Passenger count
    pub pax: u32,
    /// Vehicle class code as requested
    pub vehicle: String,
    /// Resolved distance in kilometres
    pub km: f64,
}

/// Every figure that contributes to a quote total
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Breakdown {
    /// Flat fee
    pub base: f64,
    /// Rate per kilometre
    #[serde(rename = "perKm")]
    pub per_km: f64,
    /// Distance in kilometres
    pub km: f64,
    /// Vehicle class multiplier
    #[serde(rename = "vehicleAdj")]
    pub vehicle_adj: f64,
}

impl Breakdown {
    /// Fare before the vehicle multiplier
    pub fn raw(&self) -> f64 {
        self.base + self.km * self.per_km
    }

    /// Total in whole cents
    pub fn total(&self) -> f64 {
        round_cents(self.raw() * self.vehicle_adj)
    }
}

/// Computed quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Tenant identifier
    pub tenant: String,
    /// Booking type
    pub booking_type: String,
    /// Normalized inputs
    pub inputs: QuoteInputs,
    /// ISO 4217 currency code
    pub currency: String,
    /// Price breakdown
    pub breakdown: Breakdown,
    /// Total price
    pub total: f64,
}

/// Stateless quote calculator
#[derive(Debug, Clone, Copy, Default)]
pub struct QuoteCalculator {
    pricing: Pricing,
}

impl QuoteCalculator {
    /// Create a calculator with the standard pricing
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a calculator with custom pricing
    pub fn with_pricing(pricing: Pricing) -> Self {
        Self { pricing }
    }

    /// Pricing constants in use
    pub fn pricing(&self) -> Pricing {
        self.pricing
    }

    /// Price a request
    pub fn quote(&self, request: QuoteRequest) -> Quote {
        let km = request.distance_km();
        let pax = request.pax();
        let QuoteRequest {
            tenant,
            booking_type,
            route,
            vehicle,
            ..
        } = request;

        let vehicle = vehicle.unwrap_or_else(|| VehicleClass::Sedan.code().to_string());
        let mut breakdown = Breakdown {
            base: self.pricing.base,
            per_km: self.pricing.per_km,
            km,
            vehicle_adj: VehicleClass::multiplier_for(&vehicle),
        };
        if !breakdown.total().is_finite() {
            debug!(km, "Distance overflows the fare, using default");
            breakdown.km = DEFAULT_DISTANCE_KM;
        }
        let total = breakdown.total();
        let km = breakdown.km;

        debug!(vehicle = %vehicle, km, total, "Quote computed");

        Quote {
            tenant: tenant.unwrap_or_else(|| DEFAULT_TENANT.to_string()),
            booking_type: booking_type.unwrap_or_else(|| DEFAULT_BOOKING_TYPE.to_string()),
            inputs: QuoteInputs {
                route: route.unwrap_or_else(|| Value::Object(Default::default())),
                pax,
                vehicle,
                km,
            },
            currency: CURRENCY.to_string(),
            breakdown,
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn quote(body: Value) -> Quote {
        let request: QuoteRequest = serde_json::from_value(body).unwrap();
        QuoteCalculator::new().quote(request)
    }

    #[test]
    fn test_reference_quotes() {
        assert_eq!(quote(json!({"vehicle": "sedan", "hints": {"distance_km": 10}})).total, 60.0);
        assert_eq!(quote(json!({"vehicle": "suv", "hints": {"distance_km": 10}})).total, 72.0);
        assert_eq!(quote(json!({"vehicle": "van", "hints": {"distance_km": 0}})).total, 40.5);
    }

    #[test]
    fn test_defaults() {
        let q = quote(json!({}));
        assert_eq!(q.tenant, "all-limos");
        assert_eq!(q.booking_type, "general");
        assert_eq!(q.inputs.vehicle, "sedan");
        assert_eq!(q.inputs.pax, 1);
        assert_eq!(q.inputs.route, json!({}));
        assert_eq!(q.inputs.km, 10.0);
        assert_eq!(q.currency, "AUD");
        assert_eq!(q.total, 60.0);
    }

    #[test]
    fn test_missing_distance_matches_ten() {
        let omitted = quote(json!({"vehicle": "van"}));
        let explicit = quote(json!({"vehicle": "van", "hints": {"distance_km": 10}}));
        assert_eq!(omitted.total, explicit.total);
        assert_eq!(omitted.breakdown, explicit.breakdown);
    }

    #[test]
    fn test_malformed_distance_falls_back() {
        for hint in [json!(""), json!("abc"), json!(null), json!(-5), json!([1]), json!({})] {
            let q = quote(json!({"hints": {"distance_km": hint}}));
            assert_eq!(q.inputs.km, DEFAULT_DISTANCE_KM, "hint {:?}", hint);
        }
    }

    #[test]
    fn test_numeric_string_distance() {
        let q = quote(json!({"hints": {"distance_km": " 12.5 "}}));
        assert_eq!(q.inputs.km, 12.5);
        assert_eq!(q.total, 67.5);
    }

    #[test]
    fn test_unknown_vehicle_prices_as_sedan() {
        let q = quote(json!({"vehicle": "Van", "hints": {"distance_km": 10}}));
        assert_eq!(q.inputs.vehicle, "Van");
        assert_eq!(q.breakdown.vehicle_adj, 1.0);
        assert_eq!(q.total, 60.0);
    }

    #[test]
    fn test_route_passthrough() {
        let route = json!({"pickup": "SYD", "dropoff": {"lat": -33.86, "lng": 151.2}});
        let q = quote(json!({"route": route.clone()}));
        assert_eq!(q.inputs.route, route);
    }

    #[test]
    fn test_pax_parsing() {
        assert_eq!(quote(json!({"pax": 4})).inputs.pax, 4);
        assert_eq!(quote(json!({"pax": "3"})).inputs.pax, 3);
        assert_eq!(quote(json!({"pax": 2.5})).inputs.pax, DEFAULT_PAX);
        assert_eq!(quote(json!({"pax": "many"})).inputs.pax, DEFAULT_PAX);
    }

    #[test]
    fn test_round_cents_ties_to_even() {
        // 12.5 and 37.5 cents are exact in binary, so these are true ties
        assert_eq!(round_cents(0.125), 0.12);
        assert_eq!(round_cents(0.375), 0.38);
        assert_eq!(round_cents(1.234), 1.23);
        assert_eq!(round_cents(1.236), 1.24);
    }

    #[test]
    fn test_breakdown_serialization_keys() {
        let q = quote(json!({"vehicle": "suv"}));
        let value = serde_json::to_value(&q).unwrap();
        assert_eq!(value["breakdown"]["perKm"], json!(3.0));
        assert_eq!(value["breakdown"]["vehicleAdj"], json!(1.2));
        assert_eq!(value["inputs"]["km"], json!(10.0));
    }

    #[test]
    fn test_from_slice() {
        assert_eq!(QuoteRequest::from_slice(b"").unwrap(), QuoteRequest::default());
        assert_eq!(QuoteRequest::from_slice(b"  \n").unwrap(), QuoteRequest::default());
        assert_eq!(QuoteRequest::from_slice(b"null").unwrap(), QuoteRequest::default());

        let request = QuoteRequest::from_slice(br#"{"vehicle":"van"}"#).unwrap();
        assert_eq!(request.vehicle.as_deref(), Some("van"));

        assert!(matches!(
            QuoteRequest::from_slice(b"{invalid}"),
            Err(BookingError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_mistyped_fields_fall_back() {
        let request = QuoteRequest::from_slice(br#"{"vehicle":5,"hints":{"distance_km":10}}"#).unwrap();
        let q = QuoteCalculator::new().quote(request);
        assert_eq!(q.inputs.vehicle, "sedan");
        assert_eq!(q.breakdown.vehicle_adj, 1.0);
        assert_eq!(q.total, 60.0);

        let request = QuoteRequest::from_slice(br#"{"tenant":42,"booking_type":["x"]}"#).unwrap();
        let q = QuoteCalculator::new().quote(request);
        assert_eq!(q.tenant, "all-limos");
        assert_eq!(q.booking_type, "general");

        let bodies: [&[u8]; 3] = [br#"{"hints":"x"}"#, br#"{"hints":[]}"#, br#"{"hints":7}"#];
        for body in bodies {
            let request = QuoteRequest::from_slice(body).unwrap();
            assert_eq!(request.hints, None);
            assert_eq!(request.distance_km(), DEFAULT_DISTANCE_KM);
        }
    }

    #[test]
    fn test_non_object_body_is_empty_request() {
        let bodies: [&[u8]; 5] = [b"[]", b"[1, 2]", b"\"van\"", b"42", b"true"];
        for body in bodies {
            assert_eq!(QuoteRequest::from_slice(body).unwrap(), QuoteRequest::default());
        }
    }

    #[test]
    fn test_overflowing_distance_falls_back() {
        let q = quote(json!({"vehicle": "van", "hints": {"distance_km": 1e308}}));
        assert_eq!(q.inputs.km, DEFAULT_DISTANCE_KM);
        assert_eq!(q.breakdown.km, DEFAULT_DISTANCE_KM);
        assert_eq!(q.total, 81.0);
        assert!(serde_json::to_value(&q).unwrap()["total"].is_number());
    }

    #[test]
    fn test_builder_helpers() {
        let request = QuoteRequest::default().with_vehicle("suv").with_distance_km(20.0);
        assert_eq!(request.distance_km(), 20.0);
        assert_eq!(QuoteCalculator::new().quote(request).total, 108.0);
    }
}
