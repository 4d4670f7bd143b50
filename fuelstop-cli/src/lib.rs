//! Command-line interface for the fuel stop planner.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod plan;

pub use error::CliError;

use plan::{PlanArgs, run_plan};

const ARG_START: &str = "start";
const ARG_END: &str = "end";
const ARG_CATALOG: &str = "catalog";
const ARG_ORS_API_KEY: &str = "ors-api-key";
const ARG_ORS_GEOCODE_URL: &str = "ors-geocode-url";
const ARG_ORS_DIRECTIONS_URL: &str = "ors-directions-url";
const ARG_TIMEOUT_SECS: &str = "timeout-secs";
const ARG_DEVIATION_RADIUS: &str = "deviation-radius";
const ARG_MAX_RANGE: &str = "max-range";
const ARG_MPG: &str = "mpg";
const ARG_BATCH_SIZE: &str = "batch-size";
const ENV_START: &str = "FUELSTOP_CMDS_PLAN_START";
const ENV_END: &str = "FUELSTOP_CMDS_PLAN_END";
const ENV_CATALOG: &str = "FUELSTOP_CMDS_PLAN_CATALOG";
const ENV_ORS_API_KEY: &str = "FUELSTOP_CMDS_PLAN_ORS_API_KEY";

/// Run the fuelstop CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns [`CliError`] when arguments or configuration are invalid, when a
/// collaborator fails, or when the plan cannot be written to stdout.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Plan(args) => run_plan(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "fuelstop",
    about = "Plan cost-efficient fuel stops along a driving route",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Geocode two places, route between them and choose fuel stops.
    Plan(PlanArgs),
}

#[cfg(test)]
mod tests;
