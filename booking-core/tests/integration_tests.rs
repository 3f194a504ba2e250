//! Integration tests for the booking core
//!
//! Exercises the gate and the calculator together the way a request handler
//! uses them: credentials first, then pricing.

use booking_core::{
    AuthGate, BookingError, Credentials, FormSchema, QuoteCalculator, QuoteRequest, VehicleClass,
};
use proptest::prelude::*;
use serde_json::json;

fn gated_quote(gate: &AuthGate, credentials: Credentials<'_>, body: &[u8]) -> Result<f64, BookingError> {
    gate.check(&credentials)?;
    let request = QuoteRequest::from_slice(body)?;
    Ok(QuoteCalculator::new().quote(request).total)
}

#[test]
fn test_open_gate_quotes_without_credentials() {
    let gate = AuthGate::open();
    let total = gated_quote(&gate, Credentials::new(), br#"{"vehicle":"suv"}"#).unwrap();
    assert_eq!(total, 72.0);
}

#[test]
fn test_closed_gate_requires_secret() {
    let gate = AuthGate::new(Some("topsecret".to_string()));
    let body = br#"{"vehicle":"van","hints":{"distance_km":0}}"#;

    assert_eq!(
        gated_quote(&gate, Credentials::new(), body),
        Err(BookingError::Unauthorized)
    );
    assert_eq!(
        gated_quote(&gate, Credentials::new().authorization("Bearer topsecret"), body),
        Ok(40.5)
    );
}

#[test]
fn test_invalid_body_after_gate() {
    let gate = AuthGate::open();
    let err = gated_quote(&gate, Credentials::new(), b"{not json").unwrap_err();
    assert!(matches!(err, BookingError::InvalidInput(_)));
}

#[test]
fn test_schema_vehicles_are_quotable() {
    let schema = FormSchema::for_tenant(None, None);
    let calculator = QuoteCalculator::new();

    for option in schema.vehicles {
        let class = VehicleClass::from_code(&option.code).expect("schema lists a known class");
        let quote = calculator.quote(QuoteRequest::default().with_vehicle(option.code.clone()));
        assert_eq!(quote.breakdown.vehicle_adj, class.multiplier());
    }
}

#[test]
fn test_quote_json_shape() {
    let quote = QuoteCalculator::new().quote(QuoteRequest::default());
    let value = serde_json::to_value(&quote).unwrap();

    assert_eq!(value["tenant"], json!("all-limos"));
    assert_eq!(value["booking_type"], json!("general"));
    assert_eq!(value["currency"], json!("AUD"));
    for key in ["route", "pax", "vehicle", "km"] {
        assert!(value["inputs"].get(key).is_some(), "missing inputs.{}", key);
    }
    for key in ["base", "perKm", "km", "vehicleAdj"] {
        assert!(value["breakdown"].get(key).is_some(), "missing breakdown.{}", key);
    }
}

proptest! {
    #[test]
    fn prop_total_derives_from_breakdown(
        km in 0.0f64..10_000.0,
        vehicle in prop_oneof![
            Just("sedan".to_string()),
            Just("suv".to_string()),
            Just("van".to_string()),
            "[a-z]{0,8}",
        ],
    ) {
        let request = QuoteRequest::default().with_vehicle(vehicle).with_distance_km(km);
        let quote = QuoteCalculator::new().quote(request);

        let b = quote.breakdown;
        let expected = ((b.base + b.km * b.per_km) * b.vehicle_adj * 100.0).round_ties_even() / 100.0;
        prop_assert_eq!(quote.total, expected);
        prop_assert_eq!(quote.breakdown.km, km);
    }

    #[test]
    fn prop_quote_is_deterministic(km in 0.0f64..1_000.0, pax in 0u32..60) {
        let body = json!({"vehicle": "van", "pax": pax, "hints": {"distance_km": km}});
        let first = QuoteCalculator::new().quote(serde_json::from_value(body.clone()).unwrap());
        let second = QuoteCalculator::new().quote(serde_json::from_value(body).unwrap());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_gate_accepts_only_exact_secret(secret in "[A-Za-z0-9]{1,16}", other in "[A-Za-z0-9 ]{0,17}") {
        let gate = AuthGate::new(Some(secret.clone()));
        let accepted = gate.check(&Credentials::new().api_key_header(&other)).is_ok();
        prop_assert_eq!(accepted, other == secret);
    }
}
