//! Vehicle classes offered by the booking form

use serde::{Deserialize, Serialize};

/// Vehicle class with a price multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleClass {
    /// Four-seat sedan
    Sedan,
    /// Six-seat SUV
    Suv,
    /// Seven-seat van
    Van,
}

impl VehicleClass {
    /// All classes in form display order
    pub const ALL: [VehicleClass; 3] = [VehicleClass::Sedan, VehicleClass::Suv, VehicleClass::Van];

    /// Look up a class by its exact code. Matching is case-sensitive.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "sedan" => Some(VehicleClass::Sedan),
            "suv" => Some(VehicleClass::Suv),
            "van" => Some(VehicleClass::Van),
            _ => None,
        }
    }

    /// Wire code
    pub fn code(&self) -> &'static str {
        match self {
            VehicleClass::Sedan => "sedan",
            VehicleClass::Suv => "suv",
            VehicleClass::Van => "van",
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            VehicleClass::Sedan => "Sedan",
            VehicleClass::Suv => "SUV",
            VehicleClass::Van => "Van",
        }
    }

    /// Total seats including the driver's
    pub fn seats_total(&self) -> u32 {
        match self {
            VehicleClass::Sedan => 4,
            VehicleClass::Suv => 6,
            VehicleClass::Van => 7,
        }
    }

    /// Price multiplier applied to the raw fare
    pub fn multiplier(&self) -> f64 {
        match self {
            VehicleClass::Sedan => 1.0,
            VehicleClass::Suv => 1.2,
            VehicleClass::Van => 1.35,
        }
    }

    /// Multiplier for an arbitrary vehicle code; unknown codes price as a sedan
    pub fn multiplier_for(code: &str) -> f64 {
        Self::from_code(code)
            .unwrap_or(VehicleClass::Sedan)
            .multiplier()
    }
}

impl std::fmt::Display for VehicleClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
