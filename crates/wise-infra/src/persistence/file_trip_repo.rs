//! File-based implementation of TripRepository

use std::path::Path;

use wise_domain::model::TripRecord;
use wise_domain::repository::TripRepository;
use wise_types::Error;

use crate::csv_loader::load_trips;

/// File-based trip repository (CSV)
pub struct FileTripRepository {
    trips: Vec<TripRecord>,
}

impl FileTripRepository {
    /// Create a new repository from a CSV file path
    pub fn new(csv_path: &Path) -> Result<Self, Error> {
        if !csv_path.exists() {
            return Err(Error::FileNotFound(csv_path.display().to_string()));
        }
        let trips = load_trips(csv_path).map_err(|e| Error::CsvLoader(e.to_string()))?;
        tracing::debug!(path = %csv_path.display(), count = trips.len(), "loaded trips");
        Ok(Self { trips })
    }
}

impl TripRepository for FileTripRepository {
    fn find_all(&self) -> Result<Vec<TripRecord>, Error> {
        Ok(self.trips.clone())
    }
}
