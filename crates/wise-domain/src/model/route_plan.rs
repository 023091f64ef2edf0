//! Route planner input and simulated output

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Efficiency below which a planned vehicle is flagged for preventive maintenance
pub const MAINTENANCE_REVIEW_KM_L: f64 = 3.2;

/// Weather risk category attached to a simulated route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherRisk {
    Low,
    High,
}

impl WeatherRisk {
    pub fn label(&self) -> &'static str {
        match self {
            WeatherRisk::Low => "Baixo",
            WeatherRisk::High => "Alto",
        }
    }

    pub fn label_en(&self) -> &'static str {
        match self {
            WeatherRisk::Low => "Low",
            WeatherRisk::High => "High",
        }
    }
}

/// Parameters filled in on the route planner form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteRequest {
    pub origin: String,
    pub destination: String,
    /// Free-form, never validated
    pub date: String,
    pub vehicle: Option<String>,
}

impl RouteRequest {
    /// Selected vehicle, ignoring blank selections
    pub fn selected_vehicle(&self) -> Option<&str> {
        self.vehicle
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }
}

/// Simulated cost/time/risk estimate for a hypothetical trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePlan {
    pub origin: String,
    pub destination: String,
    pub date: String,
    pub vehicle: String,
    pub distance_km: u32,
    pub estimated_fuel_cost: f64,
    pub estimated_liters: f64,
    pub estimated_time: String,
    pub historical_efficiency: f64,
    pub weather_risk: WeatherRisk,
    /// kg CO2
    pub carbon_footprint: f64,
}

impl RoutePlan {
    /// True when the vehicle's history suggests above-average consumption
    pub fn needs_maintenance_review(&self) -> bool {
        self.historical_efficiency < MAINTENANCE_REVIEW_KM_L
    }

    /// Trip date rendered as dd/mm/yyyy when it parses as an ISO date
    pub fn display_date(&self) -> String {
        let raw = self.date.trim();
        if raw.is_empty() {
            return "Não informada".to_string();
        }
        match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(date) => date.format("%d/%m/%Y").to_string(),
            Err(_) => raw.to_string(),
        }
    }
}
