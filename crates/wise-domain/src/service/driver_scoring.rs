//! Per-driver aggregation and performance scoring

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::util::{format_brl, group_thousands, round_to, truncate_str};
use crate::model::TripRecord;

const BASE_SCORE: i32 = 10;
const LOW_EFFICIENCY_KM_L: f64 = 3.0;
const TARGET_EFFICIENCY_KM_L: f64 = 3.5;
const SCORE_DEVIATION_KM: f64 = 50.0;
const ATTENTION_DEVIATION_KM: f64 = 100.0;

/// Accumulated figures and score for one driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverStats {
    pub name: String,
    pub total_km: f64,
    pub total_liters: f64,
    pub total_cost: f64,
    /// Rounded to 2 decimals
    pub avg_km_l: f64,
    /// Rounded to 1 decimal
    pub avg_km_diff: f64,
    /// Rounded to 2 decimals
    pub cost_per_km: f64,
    pub trips: u32,
    /// 0..=10
    pub score: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    Excellent,
    Regular,
    Poor,
}

impl ScoreBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            8.. => ScoreBand::Excellent,
            6..=7 => ScoreBand::Regular,
            _ => ScoreBand::Poor,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "Excelente",
            ScoreBand::Regular => "Regular",
            ScoreBand::Poor => "Crítico",
        }
    }
}

/// Reason a driver is flagged on the fleet view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttentionPoint {
    HighFuelConsumption,
    HighRouteDeviation,
}

impl AttentionPoint {
    pub fn label(&self) -> &'static str {
        match self {
            AttentionPoint::HighFuelConsumption => "Consumo de combustível elevado",
            AttentionPoint::HighRouteDeviation => "Alto desvio de rota planejada",
        }
    }
}

impl DriverStats {
    pub fn band(&self) -> ScoreBand {
        ScoreBand::from_score(self.score)
    }

    /// Only drivers below the excellent band get attention points
    pub fn attention_points(&self) -> Vec<AttentionPoint> {
        let mut points = Vec::new();
        if self.band() == ScoreBand::Excellent {
            return points;
        }
        if self.avg_km_l < TARGET_EFFICIENCY_KM_L {
            points.push(AttentionPoint::HighFuelConsumption);
        }
        if self.avg_km_diff.abs() > ATTENTION_DEVIATION_KM {
            points.push(AttentionPoint::HighRouteDeviation);
        }
        points
    }
}

/// Score a driver from fuel efficiency and average route deviation.
///
/// Both efficiency penalties apply below 3.0 km/L, so the score drops by 4
/// there and by 1 between 3.0 and 3.5.
pub fn driver_score(avg_km_l: f64, avg_km_diff: f64) -> u8 {
    let mut score = BASE_SCORE;
    if avg_km_l < LOW_EFFICIENCY_KM_L {
        score -= 3;
    }
    if avg_km_l < TARGET_EFFICIENCY_KM_L {
        score -= 1;
    }
    if avg_km_diff.abs() > SCORE_DEVIATION_KM {
        score -= 2;
    }
    score.max(0) as u8
}

#[derive(Default)]
struct DriverAccumulator {
    km: f64,
    liters: f64,
    cost: f64,
    km_diff_sum: f64,
    trips: u32,
}

/// Group trips by driver and rank them by score (highest first).
///
/// The sort is stable: drivers with equal scores keep first-seen order.
pub fn aggregate_by_driver(trips: &[TripRecord]) -> Vec<DriverStats> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, DriverAccumulator)> = Vec::new();

    for trip in trips {
        let slot = *index.entry(trip.driver.as_str()).or_insert_with(|| {
            groups.push((trip.driver.as_str(), DriverAccumulator::default()));
            groups.len() - 1
        });
        let acc = &mut groups[slot].1;
        acc.km += trip.total_km;
        acc.liters += trip.total_diesel_liters;
        acc.cost += trip.total_expenses;
        acc.km_diff_sum += trip.km_difference;
        acc.trips += 1;
    }

    let mut drivers: Vec<DriverStats> = groups
        .into_iter()
        .map(|(name, acc)| {
            let avg_km_l = if acc.liters > 0.0 { acc.km / acc.liters } else { 0.0 };
            let avg_km_diff = acc.km_diff_sum / f64::from(acc.trips);
            let cost_per_km = if acc.km > 0.0 { acc.cost / acc.km } else { 0.0 };

            DriverStats {
                name: name.to_string(),
                total_km: acc.km,
                total_liters: acc.liters,
                total_cost: acc.cost,
                avg_km_l: round_to(avg_km_l, 2),
                avg_km_diff: round_to(avg_km_diff, 1),
                cost_per_km: round_to(cost_per_km, 2),
                trips: acc.trips,
                score: driver_score(avg_km_l, avg_km_diff),
            }
        })
        .collect();

    drivers.sort_by(|a, b| b.score.cmp(&a.score));
    drivers
}

pub fn generate_driver_report(drivers: &[DriverStats]) -> String {
    let mut report = String::new();
    report.push_str("==================================================\n");
    report.push_str("        Desempenho dos Motoristas                 \n");
    report.push_str("        Driver Performance                        \n");
    report.push_str("==================================================\n\n");

    if drivers.is_empty() {
        report.push_str("【Sem motoristas / No drivers】\n\n");
        report.push_str("==================================================\n");
        return report;
    }

    report.push_str("-".repeat(78).as_str());
    report.push('\n');
    report.push_str(&format!(
        "{:<20} {:>6} {:>5} {:>10} {:>7} {:>10} {:>14}\n",
        "Driver", "Score", "Trips", "KM", "KM/L", "Deviation", "Cost/KM"
    ));
    report.push_str("-".repeat(78).as_str());
    report.push('\n');
    for d in drivers {
        report.push_str(&format!(
            "{:<20} {:>6} {:>5} {:>10} {:>7.2} {:>+10.1} {:>14}\n",
            truncate_str(&d.name, 19),
            d.score,
            d.trips,
            group_thousands(d.total_km.max(0.0).round() as u64),
            d.avg_km_l,
            d.avg_km_diff,
            format_brl(d.cost_per_km)
        ));
    }
    report.push('\n');

    let flagged: Vec<&DriverStats> = drivers
        .iter()
        .filter(|d| !d.attention_points().is_empty())
        .collect();
    if flagged.is_empty() {
        report.push_str("【Pontos de atenção / Attention points】\n");
        report.push_str("  Nenhum motorista sinalizado.\n");
        report.push_str("  No drivers flagged.\n\n");
    } else {
        report.push_str("【Pontos de atenção / Attention points】\n");
        for d in flagged {
            let labels: Vec<&str> = d.attention_points().iter().map(|p| p.label()).collect();
            report.push_str(&format!(
                "  {} ({}): {}\n",
                d.name,
                d.band().label(),
                labels.join("; ")
            ));
        }
        report.push('\n');
    }

    report.push_str("==================================================\n");
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn trip(driver: &str, km: f64, liters: f64, km_diff: f64, expenses: f64) -> TripRecord {
        TripRecord {
            vehicle: "ATEGO 1719".to_string(),
            driver: driver.to_string(),
            departure_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            arrival_date: NaiveDate::from_ymd_opt(2024, 2, 2).unwrap(),
            destination: "Ponta Grossa".to_string(),
            fuel_cost: expenses,
            maintenance_cost: 0.0,
            driver_daily: 0.0,
            total_expenses: expenses,
            total_km: km,
            km_difference: km_diff,
            total_diesel_liters: liters,
            avg_km_l: 0.0,
        }
    }

    #[test]
    fn test_both_efficiency_penalties_apply() {
        assert_eq!(driver_score(2.5, 10.0), 6);
    }

    #[test]
    fn test_only_deviation_penalty() {
        assert_eq!(driver_score(4.0, 120.0), 8);
        assert_eq!(driver_score(4.0, -120.0), 8);
    }

    #[test]
    fn test_score_table() {
        assert_eq!(driver_score(3.6, 0.0), 10);
        assert_eq!(driver_score(3.5, 50.0), 10);
        assert_eq!(driver_score(3.2, 0.0), 9);
        assert_eq!(driver_score(2.9, 51.0), 4);
        assert_eq!(driver_score(0.0, 500.0), 4);
    }

    #[test]
    fn test_score_bounds_and_monotonicity() {
        let efficiencies = [0.0, 1.0, 2.99, 3.0, 3.49, 3.5, 4.2, 9.0];
        let deviations = [-300.0, -50.1, 0.0, 50.0, 50.1, 300.0];
        for &dev in &deviations {
            let mut previous = 0;
            for &eff in &efficiencies {
                let score = driver_score(eff, dev);
                assert!(score <= 10);
                assert!(score >= previous, "score fell as efficiency rose");
                previous = score;
            }
            assert!(driver_score(2.0, dev) < driver_score(3.6, dev));
        }
    }

    #[test]
    fn test_aggregate_scenarios_through_trips() {
        // 250 km / 100 L = 2.5 km/L, deviation 10
        // 400 km / 100 L = 4.0 km/L, deviation 120
        let trips = vec![
            trip("João Pereira", 250.0, 100.0, 10.0, 1000.0),
            trip("Ana Souza", 400.0, 100.0, 120.0, 1200.0),
        ];
        let drivers = aggregate_by_driver(&trips);
        assert_eq!(drivers.len(), 2);
        assert_eq!(drivers[0].name, "Ana Souza");
        assert_eq!(drivers[0].score, 8);
        assert_eq!(drivers[1].name, "João Pereira");
        assert_eq!(drivers[1].score, 6);
        assert_eq!(drivers[1].avg_km_l, 2.5);
        assert_eq!(drivers[1].cost_per_km, 4.0);
    }

    #[test]
    fn test_averages_and_rounding() {
        let trips = vec![
            trip("Carlos Silva", 300.0, 90.0, 12.0, 900.0),
            trip("Carlos Silva", 200.0, 60.0, -5.0, 700.0),
            trip("Carlos Silva", 100.0, 30.0, 8.0, 400.0),
        ];
        let drivers = aggregate_by_driver(&trips);
        let d = &drivers[0];
        assert_eq!(d.trips, 3);
        assert_eq!(d.total_km, 600.0);
        assert_eq!(d.avg_km_l, 3.33);
        assert_eq!(d.avg_km_diff, 5.0);
        assert_eq!(d.cost_per_km, 3.33);
        assert_eq!(d.score, 9);
    }

    #[test]
    fn test_zero_liters_and_zero_km_are_guarded() {
        let drivers = aggregate_by_driver(&[trip("Pedro Lima", 0.0, 0.0, 0.0, 350.0)]);
        let d = &drivers[0];
        assert_eq!(d.avg_km_l, 0.0);
        assert_eq!(d.cost_per_km, 0.0);
        assert!(d.cost_per_km.is_finite());
        assert_eq!(d.score, 6);
    }

    #[test]
    fn test_sorted_descending_and_stable() {
        let trips = vec![
            trip("Motorista A", 280.0, 100.0, 0.0, 1.0),
            trip("Motorista B", 400.0, 100.0, 0.0, 1.0),
            trip("Motorista C", 270.0, 100.0, 0.0, 1.0),
            trip("Motorista D", 410.0, 100.0, 0.0, 1.0),
        ];
        let drivers = aggregate_by_driver(&trips);
        let names: Vec<&str> = drivers.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Motorista B", "Motorista D", "Motorista A", "Motorista C"]);
        assert!(drivers.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_attention_points() {
        let mut d = aggregate_by_driver(&[trip("Rafael Costa", 310.0, 100.0, 150.0, 900.0)])
            .remove(0);
        assert_eq!(d.score, 7);
        assert_eq!(d.band(), ScoreBand::Regular);
        assert_eq!(
            d.attention_points(),
            vec![AttentionPoint::HighFuelConsumption, AttentionPoint::HighRouteDeviation]
        );

        // Deviation between 50 and 100 costs points but is not flagged
        d.avg_km_l = 4.0;
        d.avg_km_diff = 80.0;
        d.score = driver_score(d.avg_km_l, d.avg_km_diff);
        assert_eq!(d.score, 8);
        assert!(d.attention_points().is_empty());
    }

    #[test]
    fn test_score_band() {
        assert_eq!(ScoreBand::from_score(10), ScoreBand::Excellent);
        assert_eq!(ScoreBand::from_score(8), ScoreBand::Excellent);
        assert_eq!(ScoreBand::from_score(6), ScoreBand::Regular);
        assert_eq!(ScoreBand::from_score(5), ScoreBand::Poor);
    }

    #[test]
    fn test_generate_report() {
        let trips = vec![
            trip("João Pereira", 250.0, 100.0, 10.0, 1000.0),
            trip("Ana Souza", 400.0, 100.0, 120.0, 1200.0),
        ];
        let report = generate_driver_report(&aggregate_by_driver(&trips));
        assert!(report.contains("Driver Performance"));
        assert!(report.contains("Ana Souza"));
        assert!(report.contains("Consumo de combustível elevado"));
    }
}
