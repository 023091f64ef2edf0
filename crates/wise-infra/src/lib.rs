//! Infrastructure layer - loaders and repository implementations

pub mod builtin;
pub mod csv_loader;
pub mod dataset_loader;
pub mod persistence;
