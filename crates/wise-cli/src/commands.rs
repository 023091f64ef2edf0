//! Command handlers

use std::path::PathBuf;

use tracing::debug;
use wise_app::app::{FleetDashboard, Session, ViewState};
use wise_app::config::Config;
use wise_app::export::export_to_excel;
use wise_app::repository::{load_fleet_data, DataSources};
use wise_domain::model::MaintenanceCategory;
use wise_domain::service::RandomSource;
use wise_types::{OutputFormat, Result};

use crate::cli::{Cli, Commands, ConfigArgs, ViewCommand};
use crate::output::{
    output_drivers, output_maintenance, output_overview, output_route_plan, output_vehicles,
    print_view_title,
};

pub fn execute(cli: Cli) -> Result<()> {
    let Cli {
        command,
        format,
        trips,
        maintenance,
        dataset,
        verbose: _,
    } = cli;

    // A broken config file must not block a reset
    if let Commands::Config(ConfigArgs { reset: true, .. }) = command {
        return reset_config();
    }

    let config = Config::load()?;
    let output_format = format.unwrap_or(config.output_format);
    let sources = DataSources::from_config(&config).with_overrides(trips, maintenance, dataset);

    match command {
        Commands::View(view) => {
            let dashboard = FleetDashboard::new(load_fleet_data(&sources)?);
            run_view(view, &config, &dashboard, output_format)
        }

        Commands::Export { output } => {
            let dashboard = FleetDashboard::new(load_fleet_data(&sources)?);
            cmd_export(&dashboard, output)
        }

        Commands::Config(args) => cmd_config(config, args),
    }
}

/// Screen a view command renders
fn target_view(command: &ViewCommand) -> ViewState {
    match command {
        ViewCommand::Overview => ViewState::Dashboard,
        ViewCommand::Vehicles | ViewCommand::Simulate { .. } => ViewState::RoutePlanner,
        ViewCommand::Drivers | ViewCommand::Maintenance { .. } => ViewState::Maintenance,
    }
}

fn run_view(
    command: ViewCommand,
    config: &Config,
    dashboard: &FleetDashboard,
    output_format: OutputFormat,
) -> Result<()> {
    let mut session = Session::new();
    session.select_view(target_view(&command));
    print_view_title(output_format, session.view());

    match command {
        ViewCommand::Overview => output_overview(output_format, dashboard),

        ViewCommand::Vehicles => output_vehicles(output_format, &dashboard.vehicle_list()),

        ViewCommand::Simulate {
            vehicle,
            origin,
            destination,
            date,
            seed,
        } => {
            let form = session.form_mut();
            form.vehicle = vehicle;
            form.origin = origin;
            form.destination = destination;
            form.date = date;

            let plan = match seed {
                Some(seed) => {
                    debug!(seed, "seeded route simulation");
                    session.simulate(
                        dashboard,
                        &config.simulator,
                        &mut RandomSource::seeded(seed),
                    )?
                }
                None => session.simulate(
                    dashboard,
                    &config.simulator,
                    &mut RandomSource::from_thread_rng(),
                )?,
            };
            output_route_plan(output_format, plan)
        }

        ViewCommand::Drivers => output_drivers(output_format, dashboard.drivers()),

        ViewCommand::Maintenance { vehicle, category } => {
            let records = dashboard.maintenance(
                vehicle.as_deref(),
                category.map(MaintenanceCategory::from),
            );
            output_maintenance(output_format, &records)
        }
    }
}

fn cmd_export(dashboard: &FleetDashboard, output: PathBuf) -> Result<()> {
    export_to_excel(dashboard, &output)?;
    println!("Exported to: {}", output.display());
    Ok(())
}

fn reset_config() -> Result<()> {
    let config = Config::default();
    config.save()?;
    println!("Configuration reset to defaults");
    println!("\n{}", config);
    Ok(())
}

fn cmd_config(mut config: Config, changes: ConfigArgs) -> Result<()> {
    let modified = apply_config_changes(&mut config, &changes);

    if modified {
        config.save()?;
        println!("Configuration saved");
    }

    if changes.show || !modified {
        println!("{}", config);
    }

    Ok(())
}

fn apply_config_changes(config: &mut Config, changes: &ConfigArgs) -> bool {
    let mut modified = false;

    if changes.clear_sources {
        config.trips_csv = None;
        config.maintenance_csv = None;
        config.dataset_toml = None;
        modified = true;
    }

    if let Some(output_format) = changes.set_output {
        config.output_format = output_format;
        modified = true;
    }

    if let Some(ref path) = changes.set_trips {
        config.trips_csv = Some(path.clone());
        modified = true;
    }

    if let Some(ref path) = changes.set_maintenance {
        config.maintenance_csv = Some(path.clone());
        modified = true;
    }

    if let Some(ref path) = changes.set_dataset {
        config.dataset_toml = Some(path.clone());
        modified = true;
    }

    if let Some(price) = changes.set_diesel_price {
        config.simulator.diesel_price = price;
        modified = true;
    }

    if let Some(speed) = changes.set_average_speed {
        config.simulator.average_speed_kmh = speed;
        modified = true;
    }

    modified
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_changes() -> ConfigArgs {
        ConfigArgs::default()
    }

    #[test]
    fn test_no_changes_leaves_config() {
        let mut config = Config::default();
        assert!(!apply_config_changes(&mut config, &no_changes()));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_apply_changes() {
        let mut config = Config::default();
        let changes = ConfigArgs {
            set_output: Some(OutputFormat::Json),
            set_trips: Some(PathBuf::from("viagens.csv")),
            set_diesel_price: Some(5.89),
            ..no_changes()
        };
        assert!(apply_config_changes(&mut config, &changes));
        assert_eq!(config.output_format, OutputFormat::Json);
        assert_eq!(config.trips_csv, Some(PathBuf::from("viagens.csv")));
        assert_eq!(config.simulator.diesel_price, 5.89);
    }

    #[test]
    fn test_clear_sources_then_set() {
        let mut config = Config::default();
        config.trips_csv = Some(PathBuf::from("old.csv"));
        config.maintenance_csv = Some(PathBuf::from("old_m.csv"));
        let changes = ConfigArgs {
            clear_sources: true,
            set_dataset: Some(PathBuf::from("fleet.toml")),
            ..no_changes()
        };
        apply_config_changes(&mut config, &changes);
        assert_eq!(config.trips_csv, None);
        assert_eq!(config.maintenance_csv, None);
        assert_eq!(config.dataset_toml, Some(PathBuf::from("fleet.toml")));
    }

    #[test]
    fn test_target_view() {
        assert_eq!(target_view(&ViewCommand::Overview), ViewState::Dashboard);
        assert_eq!(target_view(&ViewCommand::Vehicles), ViewState::RoutePlanner);
        assert_eq!(
            target_view(&ViewCommand::Maintenance {
                vehicle: None,
                category: None,
            }),
            ViewState::Maintenance
        );
    }
}
