//! Fleet data loading
//!
//! Each collection is resolved on its own: an explicit CSV sheet wins, then
//! the TOML dataset bundle, then the built-in demonstration fleet.

use std::fmt;
use std::path::PathBuf;

use tracing::{info, warn};
use wise_domain::model::{MaintenanceRecord, TripRecord};
use wise_domain::repository::{MaintenanceRepository, TripRepository};
use wise_infra::persistence::{
    BuiltinRepository, DatasetRepository, FileMaintenanceRepository, FileTripRepository,
};
use wise_types::Result;

use crate::config::Config;

/// Where trip and maintenance data should be read from
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataSources {
    pub trips_csv: Option<PathBuf>,
    pub maintenance_csv: Option<PathBuf>,
    pub dataset_toml: Option<PathBuf>,
}

impl DataSources {
    pub fn from_config(config: &Config) -> Self {
        Self {
            trips_csv: config.trips_csv.clone(),
            maintenance_csv: config.maintenance_csv.clone(),
            dataset_toml: config.dataset_toml.clone(),
        }
    }

    /// Replace configured paths with those given on the command line
    pub fn with_overrides(
        mut self,
        trips_csv: Option<PathBuf>,
        maintenance_csv: Option<PathBuf>,
        dataset_toml: Option<PathBuf>,
    ) -> Self {
        if trips_csv.is_some() {
            self.trips_csv = trips_csv;
        }
        if maintenance_csv.is_some() {
            self.maintenance_csv = maintenance_csv;
        }
        if dataset_toml.is_some() {
            self.dataset_toml = dataset_toml;
        }
        self
    }
}

/// Origin of a loaded collection
#[derive(Debug, Clone, PartialEq)]
pub enum DataOrigin {
    Csv(PathBuf),
    Dataset(PathBuf),
    Builtin,
}

impl fmt::Display for DataOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataOrigin::Csv(path) => write!(f, "CSV {}", path.display()),
            DataOrigin::Dataset(path) => write!(f, "dataset {}", path.display()),
            DataOrigin::Builtin => write!(f, "built-in sample"),
        }
    }
}

/// Immutable snapshot of the fleet history for one run
#[derive(Debug, Clone)]
pub struct FleetData {
    pub trips: Vec<TripRecord>,
    pub maintenance: Vec<MaintenanceRecord>,
    pub trips_origin: DataOrigin,
    pub maintenance_origin: DataOrigin,
}

impl FleetData {
    pub fn new(trips: Vec<TripRecord>, maintenance: Vec<MaintenanceRecord>) -> Self {
        Self {
            trips,
            maintenance,
            trips_origin: DataOrigin::Builtin,
            maintenance_origin: DataOrigin::Builtin,
        }
    }
}

/// Open the dataset bundle only when some collection will be read from it
fn open_dataset_repo(sources: &DataSources) -> Result<Option<DatasetRepository>> {
    if sources.trips_csv.is_some() && sources.maintenance_csv.is_some() {
        return Ok(None);
    }
    sources
        .dataset_toml
        .as_ref()
        .map(|path| DatasetRepository::new(path.clone()))
        .transpose()
}

/// Load trips and maintenance history from the configured sources
pub fn load_fleet_data(sources: &DataSources) -> Result<FleetData> {
    let dataset = open_dataset_repo(sources)?;
    let builtin = BuiltinRepository::new();

    let (trips, trips_origin) = match (&sources.trips_csv, &dataset) {
        (Some(path), _) => {
            let repo = FileTripRepository::new(path)?;
            (repo.find_all()?, DataOrigin::Csv(path.clone()))
        }
        (None, Some(repo)) => {
            if !repo.has_trips() {
                warn!(path = %repo.toml_path().display(), "dataset bundle has no trips");
            }
            (
                TripRepository::find_all(repo)?,
                DataOrigin::Dataset(repo.toml_path().clone()),
            )
        }
        (None, None) => (TripRepository::find_all(&builtin)?, DataOrigin::Builtin),
    };

    let (maintenance, maintenance_origin) = match (&sources.maintenance_csv, &dataset) {
        (Some(path), _) => {
            let repo = FileMaintenanceRepository::new(path)?;
            (repo.find_all()?, DataOrigin::Csv(path.clone()))
        }
        (None, Some(repo)) => {
            if !repo.has_maintenance() {
                warn!(path = %repo.toml_path().display(), "dataset bundle has no maintenance records");
            }
            (
                MaintenanceRepository::find_all(repo)?,
                DataOrigin::Dataset(repo.toml_path().clone()),
            )
        }
        (None, None) => (
            MaintenanceRepository::find_all(&builtin)?,
            DataOrigin::Builtin,
        ),
    };

    info!(
        trips = trips.len(),
        trips_origin = %trips_origin,
        maintenance = maintenance.len(),
        maintenance_origin = %maintenance_origin,
        "fleet data loaded"
    );

    Ok(FleetData {
        trips,
        maintenance,
        trips_origin,
        maintenance_origin,
    })
}
