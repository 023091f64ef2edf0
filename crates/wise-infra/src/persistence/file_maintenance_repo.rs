//! File-based implementation of MaintenanceRepository

use std::path::Path;

use wise_domain::model::MaintenanceRecord;
use wise_domain::repository::MaintenanceRepository;
use wise_types::Error;

use crate::csv_loader::load_maintenance;

/// File-based maintenance repository (CSV)
pub struct FileMaintenanceRepository {
    records: Vec<MaintenanceRecord>,
}

impl FileMaintenanceRepository {
    /// Create a new repository from a CSV file path
    pub fn new(csv_path: &Path) -> Result<Self, Error> {
        if !csv_path.exists() {
            return Err(Error::FileNotFound(csv_path.display().to_string()));
        }
        let records = load_maintenance(csv_path).map_err(|e| Error::CsvLoader(e.to_string()))?;
        tracing::debug!(path = %csv_path.display(), count = records.len(), "loaded maintenance");
        Ok(Self { records })
    }
}

impl MaintenanceRepository for FileMaintenanceRepository {
    fn find_all(&self) -> Result<Vec<MaintenanceRecord>, Error> {
        Ok(self.records.clone())
    }
}
