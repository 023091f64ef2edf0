//! CLI definition using clap

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use wise_domain::model::MaintenanceCategory;
use wise_types::OutputFormat;

#[derive(Parser)]
#[command(name = "wise-routes")]
#[command(version)]
#[command(about = "Fleet logistics analytics: KPIs, driver ranking and route cost simulation")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Trip sheet (CSV). Overrides the configured source.
    #[arg(long, global = true)]
    pub trips: Option<PathBuf>,

    /// Maintenance sheet (CSV). Overrides the configured source.
    #[arg(long, global = true)]
    pub maintenance: Option<PathBuf>,

    /// Dataset bundle (TOML) with trips and maintenance tables
    #[arg(long, global = true)]
    pub dataset: Option<PathBuf>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

/// Maintenance category filter
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum CategoryArg {
    Diversas,
    Manutencao,
}

impl From<CategoryArg> for MaintenanceCategory {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Diversas => MaintenanceCategory::Diversas,
            CategoryArg::Manutencao => MaintenanceCategory::Manutencao,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(flatten)]
    View(ViewCommand),

    /// Export overview, vehicles, drivers and maintenance to Excel
    Export {
        /// Output Excel file path
        #[arg(long, short = 'o')]
        output: PathBuf,
    },

    /// Manage configuration
    Config(ConfigArgs),
}

/// Commands that render one screen of the dashboard
#[derive(Subcommand)]
pub enum ViewCommand {
    /// Fleet KPIs and per-vehicle efficiency
    Overview,

    /// List vehicles available for route planning
    Vehicles,

    /// Simulate cost, time and risk for a route
    Simulate {
        /// Vehicle to plan with (see `vehicles`)
        #[arg(long)]
        vehicle: Option<String>,

        #[arg(long, default_value = "Curitiba")]
        origin: String,

        #[arg(long, default_value = "São Paulo")]
        destination: String,

        /// Trip date (YYYY-MM-DD)
        #[arg(long, default_value = "")]
        date: String,

        /// Seed for a reproducible simulation
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Driver ranking by performance score
    Drivers,

    /// Maintenance history
    Maintenance {
        /// Only records for this vehicle
        #[arg(long)]
        vehicle: Option<String>,

        /// Only records of this category
        #[arg(long, value_enum)]
        category: Option<CategoryArg>,
    },
}

#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// Show current configuration
    #[arg(long)]
    pub show: bool,

    /// Set default output format
    #[arg(long)]
    pub set_output: Option<OutputFormat>,

    /// Set trip sheet path
    #[arg(long)]
    pub set_trips: Option<PathBuf>,

    /// Set maintenance sheet path
    #[arg(long)]
    pub set_maintenance: Option<PathBuf>,

    /// Set dataset bundle path
    #[arg(long)]
    pub set_dataset: Option<PathBuf>,

    /// Forget configured data sources and use the built-in sample
    #[arg(long)]
    pub clear_sources: bool,

    /// Set diesel price per liter
    #[arg(long)]
    pub set_diesel_price: Option<f64>,

    /// Set average speed (km/h) used for travel time
    #[arg(long)]
    pub set_average_speed: Option<f64>,

    /// Reset configuration to defaults
    #[arg(long)]
    pub reset: bool,
}
