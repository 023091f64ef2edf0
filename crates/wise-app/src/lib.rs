//! Application service layer - config, data loading, dashboard, session, export

pub mod app;
pub mod config;
pub mod export;
pub mod repository;
