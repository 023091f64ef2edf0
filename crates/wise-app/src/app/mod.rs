//! Use cases consumed by the presentation layer

pub mod dashboard_service;
pub mod session;

pub use dashboard_service::{FleetDashboard, OverviewSnapshot};
pub use session::{RouteForm, Session, ViewState};
