//! Domain model types

pub mod maintenance;
pub mod route_plan;
pub mod trip;

pub use maintenance::{MaintenanceCategory, MaintenanceRecord};
pub use route_plan::{RoutePlan, RouteRequest, WeatherRisk};
pub use trip::TripRecord;
