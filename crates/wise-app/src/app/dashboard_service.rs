//! Dashboard Service - fleet overview, driver ranking and route planning
//!
//! Aggregates are computed once when the dashboard is built. The underlying
//! data never changes during a run, so every view reads the same snapshot.

use serde::Serialize;
use tracing::debug;
use wise_domain::model::{MaintenanceCategory, MaintenanceRecord, RoutePlan, RouteRequest};
use wise_domain::service::{
    aggregate, aggregate_by_driver, aggregate_by_vehicle, filter_maintenance, simulate_route,
    DriverStats, GlobalStats, SimulationSource, SimulatorSettings, VehicleStats,
};
use wise_types::Result;

use crate::repository::FleetData;

/// KPI cards plus the per-vehicle table, as shown on the overview
#[derive(Debug, Serialize)]
pub struct OverviewSnapshot<'a> {
    pub kpis: &'a GlobalStats,
    pub vehicles: &'a [VehicleStats],
}

/// Memoized aggregates over one fleet dataset
#[derive(Debug)]
pub struct FleetDashboard {
    data: FleetData,
    global: GlobalStats,
    vehicles: Vec<VehicleStats>,
    drivers: Vec<DriverStats>,
}

impl FleetDashboard {
    pub fn new(data: FleetData) -> Self {
        let global = aggregate(&data.trips);
        let vehicles = aggregate_by_vehicle(&data.trips);
        let drivers = aggregate_by_driver(&data.trips);
        debug!(
            trips = global.trip_count,
            vehicles = vehicles.len(),
            drivers = drivers.len(),
            "dashboard aggregates computed"
        );
        Self {
            data,
            global,
            vehicles,
            drivers,
        }
    }

    pub fn data(&self) -> &FleetData {
        &self.data
    }

    pub fn overview(&self) -> &GlobalStats {
        &self.global
    }

    pub fn vehicles(&self) -> &[VehicleStats] {
        &self.vehicles
    }

    /// Drivers ranked by score, best first
    pub fn drivers(&self) -> &[DriverStats] {
        &self.drivers
    }

    pub fn snapshot(&self) -> OverviewSnapshot<'_> {
        OverviewSnapshot {
            kpis: &self.global,
            vehicles: &self.vehicles,
        }
    }

    /// Distinct vehicle names in order of first appearance
    pub fn vehicle_list(&self) -> Vec<&str> {
        self.vehicles.iter().map(|v| v.name.as_str()).collect()
    }

    pub fn maintenance(
        &self,
        vehicle: Option<&str>,
        category: Option<MaintenanceCategory>,
    ) -> Vec<MaintenanceRecord> {
        filter_maintenance(&self.data.maintenance, vehicle, category)
    }

    pub fn simulate<S: SimulationSource + ?Sized>(
        &self,
        request: &RouteRequest,
        settings: &SimulatorSettings,
        source: &mut S,
    ) -> Result<RoutePlan> {
        simulate_route(request, &self.data.trips, settings, source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wise_domain::model::WeatherRisk;
    use wise_domain::service::FixedSource;
    use wise_infra::builtin::{builtin_maintenance, builtin_trips};
    use wise_types::Error;

    fn dashboard() -> FleetDashboard {
        FleetDashboard::new(FleetData::new(
            builtin_trips().unwrap(),
            builtin_maintenance().unwrap(),
        ))
    }

    #[test]
    fn test_overview_matches_builtin_fleet() {
        let dash = dashboard();
        assert_eq!(dash.overview().trip_count, 14);
        assert_eq!(
            dash.vehicle_list(),
            vec!["ATEGO 3030", "ACCELO 1017", "ATEGO 1719", "AXOR 2544"]
        );
        assert_eq!(dash.drivers().len(), 5);

        let ranked: Vec<u8> = dash.drivers().iter().map(|d| d.score).collect();
        assert!(ranked.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_snapshot_serializes() {
        let dash = dashboard();
        let json = serde_json::to_value(dash.snapshot()).unwrap();
        assert_eq!(json["kpis"]["trip_count"], 14);
        assert_eq!(json["vehicles"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_maintenance_filter() {
        let dash = dashboard();
        assert_eq!(dash.maintenance(None, None).len(), 7);
        assert_eq!(dash.maintenance(Some("ATEGO 3030"), None).len(), 3);
        assert_eq!(
            dash.maintenance(None, Some(MaintenanceCategory::Diversas)).len(),
            3
        );
    }

    #[test]
    fn test_simulate_uses_vehicle_history() {
        let dash = dashboard();
        let request = RouteRequest {
            origin: "Curitiba".to_string(),
            destination: "São Paulo".to_string(),
            date: "2024-03-01".to_string(),
            vehicle: Some("ACCELO 1017".to_string()),
        };
        let mut source = FixedSource {
            distance_km: 440,
            weather_risk: WeatherRisk::Low,
        };
        let plan = dash
            .simulate(&request, &SimulatorSettings::default(), &mut source)
            .unwrap();
        // 440 km over 98 L of history
        assert!((plan.historical_efficiency - 440.0 / 98.0).abs() < 0.01);
        assert!((plan.estimated_liters - 98.0).abs() < 0.5);

        let missing = RouteRequest {
            vehicle: None,
            ..request
        };
        assert!(matches!(
            dash.simulate(&missing, &SimulatorSettings::default(), &mut source),
            Err(Error::MissingVehicleSelection)
        ));
    }
}
