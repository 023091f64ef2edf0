//! Fleet-wide KPIs and per-vehicle aggregation

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::util::{format_brl, group_thousands, round_to, truncate_str};
use crate::model::TripRecord;

/// Fleet fuel-efficiency target (km/L)
pub const FLEET_TARGET_KM_L: f64 = 3.5;

/// Global KPIs over the whole trip dataset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalStats {
    pub trip_count: usize,
    pub total_spent: f64,
    pub total_km: f64,
    pub total_diesel_liters: f64,
    pub avg_km_l: f64,
    pub avg_cost_per_km: f64,
}

/// Whether a vehicle meets the fleet efficiency target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EfficiencyBand {
    Good,
    Critical,
}

impl EfficiencyBand {
    pub fn from_efficiency(km_l: f64) -> Self {
        if km_l >= FLEET_TARGET_KM_L {
            EfficiencyBand::Good
        } else {
            EfficiencyBand::Critical
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EfficiencyBand::Good => "Bom",
            EfficiencyBand::Critical => "Crítico",
        }
    }
}

/// Accumulated figures for one vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleStats {
    pub name: String,
    pub km: f64,
    pub cost: f64,
    pub liters: f64,
    pub trips: u32,
    /// km/L rounded to 2 decimals, 0 when no diesel was recorded
    pub efficiency: f64,
}

impl VehicleStats {
    pub fn band(&self) -> EfficiencyBand {
        EfficiencyBand::from_efficiency(self.efficiency)
    }
}

/// Compute global KPIs in a single pass.
///
/// Ratios fall back to 0 when their denominator is 0, so an empty dataset
/// yields all-zero stats.
pub fn aggregate(trips: &[TripRecord]) -> GlobalStats {
    let mut stats = GlobalStats::default();
    for trip in trips {
        stats.trip_count += 1;
        stats.total_spent += trip.total_expenses;
        stats.total_km += trip.total_km;
        stats.total_diesel_liters += trip.total_diesel_liters;
    }

    stats.avg_km_l = if stats.total_diesel_liters > 0.0 {
        stats.total_km / stats.total_diesel_liters
    } else {
        0.0
    };
    stats.avg_cost_per_km = if stats.total_km > 0.0 {
        stats.total_spent / stats.total_km
    } else {
        0.0
    };
    stats
}

/// Group trips by vehicle, in order of first appearance
pub fn aggregate_by_vehicle(trips: &[TripRecord]) -> Vec<VehicleStats> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut vehicles: Vec<VehicleStats> = Vec::new();

    for trip in trips {
        let slot = *index.entry(trip.vehicle.as_str()).or_insert_with(|| {
            vehicles.push(VehicleStats {
                name: trip.vehicle.clone(),
                km: 0.0,
                cost: 0.0,
                liters: 0.0,
                trips: 0,
                efficiency: 0.0,
            });
            vehicles.len() - 1
        });
        let v = &mut vehicles[slot];
        v.km += trip.total_km;
        v.cost += trip.total_expenses;
        v.liters += trip.total_diesel_liters;
        v.trips += 1;
    }

    for v in &mut vehicles {
        v.efficiency = if v.liters > 0.0 {
            round_to(v.km / v.liters, 2)
        } else {
            0.0
        };
    }
    vehicles
}

pub fn generate_fleet_report(global: &GlobalStats, vehicles: &[VehicleStats]) -> String {
    let mut report = String::new();
    report.push_str("==================================================\n");
    report.push_str("        Torre de Controle (Supply Chain)          \n");
    report.push_str("        Fleet Overview                            \n");
    report.push_str("==================================================\n\n");
    report.push_str("【Indicadores / KPIs】\n");
    report.push_str(&format!("  Viagens / Trips:              {}\n", global.trip_count));
    report.push_str(&format!(
        "  Despesa total / Total spent:  {}\n",
        format_brl(global.total_spent)
    ));
    report.push_str(&format!(
        "  KM rodados / Total km:        {} km\n",
        group_thousands(global.total_km.max(0.0).round() as u64)
    ));
    report.push_str(&format!(
        "  Média consumo / Avg km/L:     {:.2} km/L (meta > {:.1})\n",
        global.avg_km_l, FLEET_TARGET_KM_L
    ));
    report.push_str(&format!(
        "  Custo por KM / Cost per km:   {}\n\n",
        format_brl(global.avg_cost_per_km)
    ));

    if vehicles.is_empty() {
        report.push_str("【Sem viagens / No trips recorded】\n\n");
    } else {
        report.push_str("【Veículos / Vehicles】\n");
        report.push_str("-".repeat(72).as_str());
        report.push('\n');
        report.push_str(&format!(
            "{:<18} {:>6} {:>10} {:>16} {:>9} {:>8}\n",
            "Vehicle", "Trips", "KM", "Cost", "KM/L", "Status"
        ));
        report.push_str("-".repeat(72).as_str());
        report.push('\n');
        for v in vehicles {
            report.push_str(&format!(
                "{:<18} {:>6} {:>10} {:>16} {:>9.2} {:>8}\n",
                truncate_str(&v.name, 17),
                v.trips,
                group_thousands(v.km.max(0.0).round() as u64),
                format_brl(v.cost),
                v.efficiency,
                v.band().label()
            ));
        }
        report.push('\n');
    }

    report.push_str("==================================================\n");
    report
}
