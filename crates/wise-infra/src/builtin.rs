//! Built-in demonstration dataset
//!
//! Used when no CSV or TOML source is configured, so every command works
//! out of the box.

use wise_domain::model::{MaintenanceRecord, TripRecord};

use crate::csv_loader::{parse_maintenance, parse_trips, CsvLoaderError};

const TRIPS_CSV: &str = include_str!("../data/trips.csv");
const MAINTENANCE_CSV: &str = include_str!("../data/maintenance.csv");

/// Trips of the demonstration fleet, in recorded order
pub fn builtin_trips() -> Result<Vec<TripRecord>, CsvLoaderError> {
    parse_trips(TRIPS_CSV)
}

/// Maintenance history of the demonstration fleet
pub fn builtin_maintenance() -> Result<Vec<MaintenanceRecord>, CsvLoaderError> {
    parse_maintenance(MAINTENANCE_CSV)
}
