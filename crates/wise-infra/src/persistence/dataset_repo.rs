//! TOML bundle repository, serving both trips and maintenance

use std::path::PathBuf;

use wise_domain::model::{MaintenanceRecord, TripRecord};
use wise_domain::repository::{MaintenanceRepository, TripRepository};
use wise_types::Error;

use crate::dataset_loader::FleetDatasetLoader;

/// File-based fleet dataset repository (TOML)
pub struct DatasetRepository {
    toml_path: PathBuf,
    loader: FleetDatasetLoader,
}

impl DatasetRepository {
    /// Create a new repository from a TOML file path
    pub fn new(toml_path: PathBuf) -> Result<Self, Error> {
        if !toml_path.exists() {
            return Err(Error::FileNotFound(toml_path.display().to_string()));
        }
        let loader = FleetDatasetLoader::load_from_file(&toml_path)?;
        Ok(Self { toml_path, loader })
    }

    /// Get the TOML path
    pub fn toml_path(&self) -> &PathBuf {
        &self.toml_path
    }

    pub fn has_trips(&self) -> bool {
        self.loader.has_trips()
    }

    pub fn has_maintenance(&self) -> bool {
        self.loader.has_maintenance()
    }
}

impl TripRepository for DatasetRepository {
    fn find_all(&self) -> Result<Vec<TripRecord>, Error> {
        Ok(self.loader.trips().to_vec())
    }
}

impl MaintenanceRepository for DatasetRepository {
    fn find_all(&self) -> Result<Vec<MaintenanceRecord>, Error> {
        Ok(self.loader.maintenance().to_vec())
    }
}
