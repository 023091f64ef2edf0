//! Persistence implementations
//!
//! File-backed and built-in implementations of the domain repository traits.

mod builtin_repo;
mod dataset_repo;
mod file_maintenance_repo;
mod file_trip_repo;

pub use builtin_repo::BuiltinRepository;
pub use dataset_repo::DatasetRepository;
pub use file_maintenance_repo::FileMaintenanceRepository;
pub use file_trip_repo::FileTripRepository;
