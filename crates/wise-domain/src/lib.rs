//! Fleet domain: trip and maintenance models, aggregation and route simulation

pub mod model;
pub mod repository;
pub mod service;
