//! Wise Routes - fleet logistics analytics
//!
//! KPIs, per-vehicle efficiency, driver ranking and route cost simulation
//! over a delivery fleet's trip and maintenance history.

mod cli;
mod commands;
mod logging;
mod output;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = commands::execute(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
