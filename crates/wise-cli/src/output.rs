//! Output formatting module

use serde::Serialize;
use wise_app::app::{FleetDashboard, ViewState};
use wise_domain::model::{MaintenanceRecord, RoutePlan};
use wise_domain::service::{
    format_brl, generate_driver_report, generate_fleet_report, generate_maintenance_report,
    DriverStats,
};
use wise_types::{OutputFormat, Result};

/// Route plan plus the figures the planner view derives from it
#[derive(Serialize)]
struct RoutePlanView<'a> {
    #[serde(flatten)]
    plan: &'a RoutePlan,
    needs_maintenance_review: bool,
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    println!("{}", content);
    Ok(())
}

/// Screen heading for table output; JSON output stays a single document
pub fn print_view_title(output_format: OutputFormat, view: ViewState) {
    if output_format == OutputFormat::Table {
        println!("{}", view_title(view));
    }
}

fn view_title(view: ViewState) -> String {
    let title = format!("{} / {}", view.label(), view.label_en());
    format!("{}\n{}", title, "#".repeat(title.chars().count()))
}

pub fn output_overview(output_format: OutputFormat, dashboard: &FleetDashboard) -> Result<()> {
    match output_format {
        OutputFormat::Json => print_json(&dashboard.snapshot()),
        OutputFormat::Table => {
            println!(
                "{}",
                generate_fleet_report(dashboard.overview(), dashboard.vehicles())
            );
            Ok(())
        }
    }
}

pub fn output_vehicles(output_format: OutputFormat, vehicles: &[&str]) -> Result<()> {
    match output_format {
        OutputFormat::Json => print_json(vehicles),
        OutputFormat::Table => {
            println!("\nVeículos / Vehicles");
            println!("===================");
            if vehicles.is_empty() {
                println!("(none)");
            }
            for (i, name) in vehicles.iter().enumerate() {
                println!("{:>3}. {}", i + 1, name);
            }
            Ok(())
        }
    }
}

pub fn output_drivers(output_format: OutputFormat, drivers: &[DriverStats]) -> Result<()> {
    match output_format {
        OutputFormat::Json => print_json(drivers),
        OutputFormat::Table => {
            println!("{}", generate_driver_report(drivers));
            Ok(())
        }
    }
}

pub fn output_maintenance(output_format: OutputFormat, records: &[MaintenanceRecord]) -> Result<()> {
    match output_format {
        OutputFormat::Json => print_json(records),
        OutputFormat::Table => {
            println!("{}", generate_maintenance_report(records));
            Ok(())
        }
    }
}

pub fn output_route_plan(output_format: OutputFormat, plan: &RoutePlan) -> Result<()> {
    match output_format {
        OutputFormat::Json => print_json(&RoutePlanView {
            plan,
            needs_maintenance_review: plan.needs_maintenance_review(),
        }),
        OutputFormat::Table => {
            print!("{}", format_route_plan(plan));
            Ok(())
        }
    }
}

fn format_route_plan(plan: &RoutePlan) -> String {
    let mut out = String::new();
    out.push_str("\nPlano de Rota / Route Plan\n");
    out.push_str("==========================\n");
    out.push_str(&format!(
        "Rota:             {} → {}\n",
        plan.origin, plan.destination
    ));
    out.push_str(&format!("Data:             {}\n", plan.display_date()));
    out.push_str(&format!("Veículo:          {}\n", plan.vehicle));
    out.push_str(&format!("Distância:        {} km\n", plan.distance_km));
    out.push_str(&format!("Tempo estimado:   {}\n", plan.estimated_time));
    out.push_str(&format!("Diesel:           {:.1} L\n", plan.estimated_liters));
    out.push_str(&format!(
        "Custo estimado:   {}\n",
        format_brl(plan.estimated_fuel_cost)
    ));
    out.push_str(&format!(
        "Média histórica:  {:.2} km/L\n",
        plan.historical_efficiency
    ));
    out.push_str(&format!(
        "Risco climático:  {} ({})\n",
        plan.weather_risk.label(),
        plan.weather_risk.label_en()
    ));
    out.push_str(&format!(
        "Pegada de CO2:    {:.1} kg\n",
        plan.carbon_footprint
    ));

    if plan.needs_maintenance_review() {
        out.push_str("\n! Consumo histórico elevado: agendar revisão preventiva antes da viagem.\n");
        out.push_str("  High historical consumption: schedule a preventive check before departure.\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use wise_domain::model::WeatherRisk;

    fn plan(efficiency: f64) -> RoutePlan {
        RoutePlan {
            origin: "Curitiba".to_string(),
            destination: "São Paulo".to_string(),
            date: "2024-03-05".to_string(),
            vehicle: "ATEGO 3030".to_string(),
            distance_km: 400,
            estimated_fuel_cost: 629.0,
            estimated_liters: 100.0,
            estimated_time: "5h 42m".to_string(),
            historical_efficiency: efficiency,
            weather_risk: WeatherRisk::High,
            carbon_footprint: 268.0,
        }
    }

    #[test]
    fn test_format_route_plan() {
        let text = format_route_plan(&plan(4.0));
        assert!(text.contains("Curitiba → São Paulo"));
        assert!(text.contains("05/03/2024"));
        assert!(text.contains("R$ 629,00"));
        assert!(text.contains("Alto (High)"));
        assert!(text.contains("268.0 kg"));
        assert!(!text.contains("preventive"));
    }

    #[test]
    fn test_low_efficiency_flags_review() {
        let text = format_route_plan(&plan(2.81));
        assert!(text.contains("preventive"));
    }

    #[test]
    fn test_view_title() {
        let title = view_title(ViewState::Maintenance);
        let mut lines = title.lines();
        assert_eq!(lines.next(), Some("Frota e Motoristas / Fleet & Drivers"));
        assert_eq!(lines.next().map(|l| l.len()), Some(36));
    }

    #[test]
    fn test_json_view_flattens_plan() {
        let p = plan(2.81);
        let view = RoutePlanView {
            plan: &p,
            needs_maintenance_review: p.needs_maintenance_review(),
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["distance_km"], 400);
        assert_eq!(json["weather_risk"], "high");
        assert_eq!(json["needs_maintenance_review"], true);
    }
}
