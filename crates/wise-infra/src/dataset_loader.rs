//! Fleet dataset bundle loader (TOML)
//!
//! A bundle carries trips and maintenance records in one file:
//!
//! ```toml
//! [[trips]]
//! vehicle = "ATEGO 3030"
//! departure_date = "2024-01-08"
//! # ...
//!
//! [[maintenance]]
//! date = "2024-01-11"
//! category = "MANUTENCAO"
//! # ...
//! ```
//!
//! Dates are quoted `YYYY-MM-DD` strings. Either table may be absent.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use wise_domain::model::{MaintenanceRecord, TripRecord};
use wise_types::{Error, Result};

#[derive(Debug, Default, Deserialize)]
struct FleetDatasetFile {
    #[serde(default)]
    trips: Vec<TripRecord>,
    #[serde(default)]
    maintenance: Vec<MaintenanceRecord>,
}

/// Trips and maintenance parsed from a TOML bundle
#[derive(Debug, Default)]
pub struct FleetDatasetLoader {
    trips: Vec<TripRecord>,
    maintenance: Vec<MaintenanceRecord>,
}

impl FleetDatasetLoader {
    /// Load a dataset bundle from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::DatasetLoader(format!(
                "Failed to read dataset file {}: {}",
                path.display(),
                e
            ))
        })?;

        Self::load_from_str(&content)
    }

    /// Load a dataset bundle from TOML text
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let file: FleetDatasetFile = toml::from_str(toml_content)
            .map_err(|e| Error::DatasetLoader(format!("Failed to parse dataset TOML: {}", e)))?;

        for trip in &file.trips {
            validate_trip(trip)?;
        }
        for record in &file.maintenance {
            if !record.cost.is_finite() {
                return Err(Error::DatasetLoader(format!(
                    "Invalid cost for {} on {}: {}",
                    record.vehicle, record.date, record.cost
                )));
            }
        }

        Ok(Self {
            trips: file.trips,
            maintenance: file.maintenance,
        })
    }

    pub fn trips(&self) -> &[TripRecord] {
        &self.trips
    }

    pub fn maintenance(&self) -> &[MaintenanceRecord] {
        &self.maintenance
    }

    pub fn has_trips(&self) -> bool {
        !self.trips.is_empty()
    }

    pub fn has_maintenance(&self) -> bool {
        !self.maintenance.is_empty()
    }
}

/// Distance and diesel volume must be finite and non-negative, every other
/// amount finite.
fn validate_trip(trip: &TripRecord) -> Result<()> {
    let invalid = |field: &str, value: f64| {
        Error::DatasetLoader(format!(
            "Invalid {} for {} departing {}: {}",
            field, trip.vehicle, trip.departure_date, value
        ))
    };

    for (field, value) in [
        ("total_km", trip.total_km),
        ("total_diesel_liters", trip.total_diesel_liters),
    ] {
        if !(value.is_finite() && value >= 0.0) {
            return Err(invalid(field, value));
        }
    }

    for (field, value) in [
        ("fuel_cost", trip.fuel_cost),
        ("maintenance_cost", trip.maintenance_cost),
        ("driver_daily", trip.driver_daily),
        ("total_expenses", trip.total_expenses),
        ("km_difference", trip.km_difference),
        ("avg_km_l", trip.avg_km_l),
    ] {
        if !value.is_finite() {
            return Err(invalid(field, value));
        }
    }

    Ok(())
}
