//! Repository trait definitions for fleet data sources

use crate::model::{MaintenanceRecord, TripRecord};
use wise_types::Error;

/// Source of trip records
pub trait TripRepository {
    /// Load all trips in their recorded order
    fn find_all(&self) -> Result<Vec<TripRecord>, Error>;
}

/// Source of maintenance history
pub trait MaintenanceRepository {
    /// Load all maintenance records in their recorded order
    fn find_all(&self) -> Result<Vec<MaintenanceRecord>, Error>;
}
