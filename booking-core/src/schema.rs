//! Static booking form description

use crate::vehicle::VehicleClass;
use crate::{DEFAULT_BOOKING_TYPE, DEFAULT_TENANT};
use serde::{Deserialize, Serialize};

/// Group of form fields rendered together
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSection {
    /// Section identifier
    pub id: String,
    /// Field names in display order
    pub fields: Vec<String>,
}

/// Selectable vehicle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleOption {
    /// Vehicle class code accepted by the quote endpoint
    pub code: String,
    /// Display label
    pub label: String,
    /// Seats including the driver's
    pub seats_total: u32,
}

/// Optional add-on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extra {
    /// Extra code
    pub code: String,
    /// Display label
    pub label: String,
    /// Price in AUD
    pub price: f64,
}

/// Form description for one tenant and booking type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSchema {
    /// Tenant identifier
    pub tenant: String,
    /// Booking type
    pub booking_type: String,
    /// Form sections
    pub sections: Vec<FormSection>,
    /// Vehicle choices
    pub vehicles: Vec<VehicleOption>,
    /// Optional extras
    pub extras: Vec<Extra>,
}

impl FormSchema {
    /// Build the form description. Absent or empty parameters take the defaults;
    /// they never change the form itself.
    pub fn for_tenant(tenant: Option<&str>, booking_type: Option<&str>) -> Self {
        let tenant = non_empty(tenant).unwrap_or(DEFAULT_TENANT);
        let booking_type = non_empty(booking_type).unwrap_or(DEFAULT_BOOKING_TYPE);

        Self {
            tenant: tenant.to_string(),
            booking_type: booking_type.to_string(),
            sections: vec![
                section("basics", &["pickup", "dropoff", "date", "time", "pax", "luggage"]),
                section("vehicle", &["vehicle"]),
            ],
            vehicles: VehicleClass::ALL
                .iter()
                .map(|class| VehicleOption {
                    code: class.code().to_string(),
                    label: class.label().to_string(),
                    seats_total: class.seats_total(),
                })
                .collect(),
            extras: vec![Extra {
                code: "water".to_string(),
                label: "Bottled Water".to_string(),
                price: 0.0,
            }],
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn section(id: &str, fields: &[&str]) -> FormSection {
    FormSection {
        id: id.to_string(),
        fields: fields.iter().map(|f| f.to_string()).collect(),
    }
}
