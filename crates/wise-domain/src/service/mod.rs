//! Domain services

pub mod driver_scoring;
pub mod fleet_stats;
pub mod maintenance_history;
pub mod route_simulator;
mod util;

pub use driver_scoring::{
    aggregate_by_driver, driver_score, generate_driver_report, AttentionPoint, DriverStats,
    ScoreBand,
};
pub use fleet_stats::{
    aggregate, aggregate_by_vehicle, generate_fleet_report, EfficiencyBand, GlobalStats,
    VehicleStats, FLEET_TARGET_KM_L,
};
pub use maintenance_history::{filter_maintenance, generate_maintenance_report};
pub use route_simulator::{
    estimate_travel_time, historical_efficiency, simulate_route, FixedSource, RandomSource,
    SimulationSource, SimulatorSettings,
};
pub use util::{format_brl, group_thousands, round_to};
