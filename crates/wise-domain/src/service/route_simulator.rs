//! Route cost simulation
//!
//! Produces a synthetic estimate for a hypothetical trip from the chosen
//! vehicle's historical efficiency. Distance and weather risk come from a
//! [`SimulationSource`], so callers decide between real randomness and a
//! fixed replay.

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use wise_types::{ConfigError, Error, Result};

use crate::model::{RoutePlan, RouteRequest, TripRecord, WeatherRisk};

/// Simulation constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatorSettings {
    /// Currency units per liter of diesel
    #[serde(default = "default_diesel_price")]
    pub diesel_price: f64,

    /// Effective average speed used for the travel time (km/h)
    #[serde(default = "default_average_speed")]
    pub average_speed_kmh: f64,

    /// km/L assumed for vehicles with no fuel history
    #[serde(default = "default_efficiency")]
    pub default_efficiency: f64,

    /// kg CO2 emitted per liter of diesel
    #[serde(default = "default_emission_factor")]
    pub emission_factor: f64,

    #[serde(default = "default_min_distance")]
    pub min_distance_km: u32,

    #[serde(default = "default_max_distance")]
    pub max_distance_km: u32,

    /// Probability that a simulated route is flagged with high weather risk
    #[serde(default = "default_high_risk_probability")]
    pub high_risk_probability: f64,
}

fn default_diesel_price() -> f64 {
    6.29
}

fn default_average_speed() -> f64 {
    70.0
}

fn default_efficiency() -> f64 {
    3.5
}

fn default_emission_factor() -> f64 {
    2.68
}

fn default_min_distance() -> u32 {
    300
}

fn default_max_distance() -> u32 {
    799
}

fn default_high_risk_probability() -> f64 {
    0.3
}

impl Default for SimulatorSettings {
    fn default() -> Self {
        Self {
            diesel_price: default_diesel_price(),
            average_speed_kmh: default_average_speed(),
            default_efficiency: default_efficiency(),
            emission_factor: default_emission_factor(),
            min_distance_km: default_min_distance(),
            max_distance_km: default_max_distance(),
            high_risk_probability: default_high_risk_probability(),
        }
    }
}

impl SimulatorSettings {
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        let positive = [
            ("diesel_price", self.diesel_price),
            ("average_speed_kmh", self.average_speed_kmh),
            ("default_efficiency", self.default_efficiency),
            ("emission_factor", self.emission_factor),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be a positive number (got {})",
                    name, value
                )));
            }
        }
        if self.min_distance_km > self.max_distance_km {
            return Err(ConfigError::Invalid(format!(
                "min_distance_km ({}) exceeds max_distance_km ({})",
                self.min_distance_km, self.max_distance_km
            )));
        }
        if !(0.0..=1.0).contains(&self.high_risk_probability) {
            return Err(ConfigError::Invalid(format!(
                "high_risk_probability must be within 0..=1 (got {})",
                self.high_risk_probability
            )));
        }
        Ok(())
    }
}

/// Source of the simulated (non-historical) route figures
pub trait SimulationSource {
    /// Uniform integer distance in `min_km..=max_km`
    fn distance_km(&mut self, min_km: u32, max_km: u32) -> u32;

    /// `High` with the given probability, `Low` otherwise
    fn weather_risk(&mut self, high_probability: f64) -> WeatherRisk;
}

/// Random draws backed by any `rand` generator
pub struct RandomSource<R> {
    rng: R,
}

impl<R: Rng> RandomSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomSource<ThreadRng> {
    pub fn from_thread_rng() -> Self {
        Self::new(rand::thread_rng())
    }
}

impl RandomSource<StdRng> {
    /// Reproducible draws for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> SimulationSource for RandomSource<R> {
    fn distance_km(&mut self, min_km: u32, max_km: u32) -> u32 {
        if min_km >= max_km {
            return min_km;
        }
        self.rng.gen_range(min_km..=max_km)
    }

    fn weather_risk(&mut self, high_probability: f64) -> WeatherRisk {
        if self.rng.gen::<f64>() < high_probability {
            WeatherRisk::High
        } else {
            WeatherRisk::Low
        }
    }
}

/// Replays fixed figures regardless of the configured ranges
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedSource {
    pub distance_km: u32,
    pub weather_risk: WeatherRisk,
}

impl SimulationSource for FixedSource {
    fn distance_km(&mut self, _min_km: u32, _max_km: u32) -> u32 {
        self.distance_km
    }

    fn weather_risk(&mut self, _high_probability: f64) -> WeatherRisk {
        self.weather_risk
    }
}

/// km/L over every recorded trip of `vehicle`, or `default_km_l` when the
/// vehicle has no diesel on record
pub fn historical_efficiency(vehicle: &str, trips: &[TripRecord], default_km_l: f64) -> f64 {
    let (km, liters) = trips
        .iter()
        .filter(|t| t.vehicle == vehicle)
        .fold((0.0, 0.0), |(km, liters), t| {
            (km + t.total_km, liters + t.total_diesel_liters)
        });

    if liters > 0.0 {
        km / liters
    } else {
        default_km_l
    }
}

/// Coarse "{h}h {m}m" travel time.
///
/// Minutes are `(distance mod speed) * 0.6`, which approximates rather than
/// converts the remainder.
pub fn estimate_travel_time(distance_km: u32, average_speed_kmh: f64) -> String {
    let distance = f64::from(distance_km);
    let hours = (distance / average_speed_kmh).floor();
    let minutes = ((distance % average_speed_kmh) * 0.6).floor();
    format!("{}h {}m", hours as u64, minutes as u64)
}

/// Simulate a route for the vehicle selected in `request`.
///
/// Fails with [`Error::MissingVehicleSelection`] when no vehicle is selected;
/// every other input is accepted as-is.
pub fn simulate_route<S>(
    request: &RouteRequest,
    trips: &[TripRecord],
    settings: &SimulatorSettings,
    source: &mut S,
) -> Result<RoutePlan>
where
    S: SimulationSource + ?Sized,
{
    let vehicle = request
        .selected_vehicle()
        .ok_or(Error::MissingVehicleSelection)?;

    let efficiency = historical_efficiency(vehicle, trips, settings.default_efficiency);
    let distance_km = source.distance_km(settings.min_distance_km, settings.max_distance_km);
    let estimated_liters = f64::from(distance_km) / efficiency;

    Ok(RoutePlan {
        origin: request.origin.clone(),
        destination: request.destination.clone(),
        date: request.date.clone(),
        vehicle: vehicle.to_string(),
        distance_km,
        estimated_fuel_cost: estimated_liters * settings.diesel_price,
        estimated_liters,
        estimated_time: estimate_travel_time(distance_km, settings.average_speed_kmh),
        historical_efficiency: efficiency,
        weather_risk: source.weather_risk(settings.high_risk_probability),
        carbon_footprint: estimated_liters * settings.emission_factor,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn trip(vehicle: &str, km: f64, liters: f64) -> TripRecord {
        TripRecord {
            vehicle: vehicle.to_string(),
            driver: "Marcos Oliveira".to_string(),
            departure_date: NaiveDate::from_ymd_opt(2024, 4, 2).unwrap(),
            arrival_date: NaiveDate::from_ymd_opt(2024, 4, 3).unwrap(),
            destination: "Londrina".to_string(),
            fuel_cost: 0.0,
            maintenance_cost: 0.0,
            driver_daily: 0.0,
            total_expenses: 0.0,
            total_km: km,
            km_difference: 0.0,
            total_diesel_liters: liters,
            avg_km_l: 0.0,
        }
    }

    fn request(vehicle: Option<&str>) -> RouteRequest {
        RouteRequest {
            origin: "Curitiba".to_string(),
            destination: "São Paulo".to_string(),
            date: "2024-06-10".to_string(),
            vehicle: vehicle.map(str::to_string),
        }
    }

    #[test]
    fn test_missing_vehicle_produces_no_plan() {
        let mut source = FixedSource { distance_km: 400, weather_risk: WeatherRisk::Low };
        let settings = SimulatorSettings::default();

        let result = simulate_route(&request(None), &[], &settings, &mut source);
        assert!(matches!(result, Err(Error::MissingVehicleSelection)));

        let result = simulate_route(&request(Some("  ")), &[], &settings, &mut source);
        assert!(matches!(result, Err(Error::MissingVehicleSelection)));
    }

    #[test]
    fn test_fixed_source_exact_plan() {
        let trips = vec![
            trip("ATEGO 1719", 300.0, 75.0),
            trip("ATEGO 1719", 100.0, 25.0),
            trip("ATEGO 3030", 900.0, 400.0),
        ];
        let mut source = FixedSource { distance_km: 400, weather_risk: WeatherRisk::High };
        let plan = simulate_route(
            &request(Some("ATEGO 1719")),
            &trips,
            &SimulatorSettings::default(),
            &mut source,
        )
        .unwrap();

        assert_eq!(plan.vehicle, "ATEGO 1719");
        assert_eq!(plan.distance_km, 400);
        assert!((plan.historical_efficiency - 4.0).abs() < 1e-9);
        assert!((plan.estimated_liters - 100.0).abs() < 1e-9);
        assert!((plan.estimated_fuel_cost - 629.0).abs() < 1e-9);
        assert!((plan.carbon_footprint - 268.0).abs() < 1e-9);
        assert_eq!(plan.estimated_time, "5h 30m");
        assert_eq!(plan.weather_risk, WeatherRisk::High);
        assert_eq!(plan.origin, "Curitiba");
        assert_eq!(plan.date, "2024-06-10");
    }

    #[test]
    fn test_unknown_vehicle_uses_default_efficiency() {
        let trips = vec![trip("ATEGO 3030", 900.0, 400.0)];
        let mut source = FixedSource { distance_km: 700, weather_risk: WeatherRisk::Low };
        let plan = simulate_route(
            &request(Some("VOLVO FH 540")),
            &trips,
            &SimulatorSettings::default(),
            &mut source,
        )
        .unwrap();

        assert_eq!(plan.historical_efficiency, 3.5);
        assert!((plan.estimated_liters - 200.0).abs() < 1e-9);
        assert_eq!(plan.estimated_time, "10h 0m");
    }

    #[test]
    fn test_zero_liters_history_uses_default_efficiency() {
        let trips = vec![trip("ACCELO 1017", 150.0, 0.0)];
        assert_eq!(historical_efficiency("ACCELO 1017", &trips, 3.5), 3.5);
    }

    #[test]
    fn test_travel_time_approximation() {
        assert_eq!(estimate_travel_time(300, 70.0), "4h 12m");
        assert_eq!(estimate_travel_time(799, 70.0), "11h 17m");
        assert_eq!(estimate_travel_time(69, 70.0), "0h 41m");
    }

    #[test]
    fn test_random_source_stays_in_range() {
        let settings = SimulatorSettings::default();
        let mut source = RandomSource::seeded(42);
        for _ in 0..500 {
            let d = source.distance_km(settings.min_distance_km, settings.max_distance_km);
            assert!((300..=799).contains(&d));
        }
    }

    #[test]
    fn test_random_source_is_reproducible_with_seed() {
        let trips = vec![trip("AXOR 2544", 1200.0, 380.0)];
        let settings = SimulatorSettings::default();
        let req = request(Some("AXOR 2544"));

        let a = simulate_route(&req, &trips, &settings, &mut RandomSource::seeded(7)).unwrap();
        let b = simulate_route(&req, &trips, &settings, &mut RandomSource::seeded(7)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_weather_risk_extremes() {
        let mut source = RandomSource::seeded(1);
        for _ in 0..50 {
            assert_eq!(source.weather_risk(0.0), WeatherRisk::Low);
            assert_eq!(source.weather_risk(1.0), WeatherRisk::High);
        }
    }

    #[test]
    fn test_degenerate_distance_range() {
        let mut source = RandomSource::seeded(3);
        assert_eq!(source.distance_km(500, 500), 500);
    }

    #[test]
    fn test_settings_validation() {
        assert!(SimulatorSettings::default().validate().is_ok());

        let settings = SimulatorSettings { diesel_price: 0.0, ..Default::default() };
        assert!(matches!(settings.validate(), Err(ConfigError::Invalid(_))));

        let settings = SimulatorSettings {
            min_distance_km: 900,
            max_distance_km: 300,
            ..Default::default()
        };
        assert!(settings.validate().is_err());

        let settings = SimulatorSettings { high_risk_probability: 1.5, ..Default::default() };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_settings_defaults_fill_missing_fields() {
        let settings: SimulatorSettings =
            serde_json::from_str(r#"{ "diesel_price": 5.99 }"#).unwrap();
        assert_eq!(settings.diesel_price, 5.99);
        assert_eq!(settings.average_speed_kmh, 70.0);
        assert_eq!(settings.max_distance_km, 799);
    }
}
