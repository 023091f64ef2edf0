//! Repository over the built-in demonstration dataset

use wise_domain::model::{MaintenanceRecord, TripRecord};
use wise_domain::repository::{MaintenanceRepository, TripRepository};
use wise_types::Error;

use crate::builtin::{builtin_maintenance, builtin_trips};

/// Serves the embedded demonstration fleet
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinRepository;

impl BuiltinRepository {
    pub fn new() -> Self {
        Self
    }
}

impl TripRepository for BuiltinRepository {
    fn find_all(&self) -> Result<Vec<TripRecord>, Error> {
        builtin_trips().map_err(|e| Error::CsvLoader(e.to_string()))
    }
}

impl MaintenanceRepository for BuiltinRepository {
    fn find_all(&self) -> Result<Vec<MaintenanceRecord>, Error> {
        builtin_maintenance().map_err(|e| Error::CsvLoader(e.to_string()))
    }
}
