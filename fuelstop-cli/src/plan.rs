//! Plan command implementation for the fuelstop CLI.

use std::io::Write;
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use fuelstop_core::{
    DEFAULT_DEVIATION_RADIUS_MILES, DEFAULT_MAX_RANGE_MILES, DEFAULT_MPG, FuelPlan, Geocoder,
    OptimizerSettings, PlannerSettings, RouteProvider, Station, plan_trip,
};
use fuelstop_data::catalog::CsvStationCatalog;
use fuelstop_data::fs::file_is_file;
use fuelstop_data::routing::{
    DEFAULT_DIRECTIONS_URL, DEFAULT_GEOCODE_URL, OpenRouteServiceClient, OpenRouteServiceConfig,
};
use log::{debug, info, warn};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_BATCH_SIZE, ARG_CATALOG, ARG_DEVIATION_RADIUS, ARG_END, ARG_MAX_RANGE, ARG_MPG,
    ARG_ORS_API_KEY, ARG_ORS_DIRECTIONS_URL, ARG_ORS_GEOCODE_URL, ARG_START, ARG_TIMEOUT_SECS,
    CliError, ENV_CATALOG, ENV_END, ENV_ORS_API_KEY, ENV_START,
};

/// Default request timeout for the route service, in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Geocode the start and end places with OpenRouteService, \
                 fetch the driving route between them and choose fuel stops \
                 from a CSV price list. The plan is written to stdout as JSON.",
    about = "Plan fuel stops between two places"
)]
#[ortho_config(prefix = "FUELSTOP")]
pub(crate) struct PlanArgs {
    /// Starting place, e.g. "Austin, TX".
    #[arg(long = ARG_START, value_name = "place")]
    #[serde(default)]
    pub(crate) start: Option<String>,
    /// Destination place.
    #[arg(long = ARG_END, value_name = "place")]
    #[serde(default)]
    pub(crate) end: Option<String>,
    /// Path to the CSV fuel price list.
    #[arg(long = ARG_CATALOG, value_name = "path")]
    #[serde(default)]
    pub(crate) catalog: Option<Utf8PathBuf>,
    /// API key for the routing service.
    #[arg(long = ARG_ORS_API_KEY, value_name = "key")]
    #[serde(default)]
    pub(crate) ors_api_key: Option<String>,
    /// Override the geocode search endpoint.
    #[arg(long = ARG_ORS_GEOCODE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) ors_geocode_url: Option<String>,
    /// Override the directions endpoint.
    #[arg(long = ARG_ORS_DIRECTIONS_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) ors_directions_url: Option<String>,
    /// Route service request timeout in seconds.
    #[arg(long = ARG_TIMEOUT_SECS, value_name = "seconds")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
    /// Maximum distance of a station from the route, in miles.
    #[arg(long = ARG_DEVIATION_RADIUS, value_name = "miles")]
    #[serde(default)]
    pub(crate) deviation_radius: Option<f64>,
    /// Distance the vehicle covers on a full tank, in miles.
    #[arg(long = ARG_MAX_RANGE, value_name = "miles")]
    #[serde(default)]
    pub(crate) max_range: Option<f64>,
    /// Fuel economy in miles per gallon.
    #[arg(long = ARG_MPG, value_name = "mpg")]
    #[serde(default)]
    pub(crate) mpg: Option<f64>,
    /// Query long routes in batches of this many points.
    #[arg(long = ARG_BATCH_SIZE, value_name = "points")]
    #[serde(default)]
    pub(crate) batch_size: Option<usize>,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlanConfig {
    pub(crate) start: String,
    pub(crate) end: String,
    pub(crate) catalog: Utf8PathBuf,
    pub(crate) ors_api_key: String,
    pub(crate) ors_geocode_url: String,
    pub(crate) ors_directions_url: String,
    pub(crate) timeout: Duration,
    pub(crate) settings: PlannerSettings,
}

impl PlanConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.catalog, ARG_CATALOG)
    }
}

fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::MissingSourceFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn require<T>(value: Option<T>, field: &'static str, env: &'static str) -> Result<T, CliError> {
    value.ok_or(CliError::MissingArgument { field, env })
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let start = require(args.start, ARG_START, ENV_START)?;
        let end = require(args.end, ARG_END, ENV_END)?;
        let catalog = require(args.catalog, ARG_CATALOG, ENV_CATALOG)?;
        let ors_api_key = require(args.ors_api_key, ARG_ORS_API_KEY, ENV_ORS_API_KEY)?;

        let settings = PlannerSettings {
            deviation_radius_miles: args
                .deviation_radius
                .unwrap_or(DEFAULT_DEVIATION_RADIUS_MILES),
            optimizer: OptimizerSettings {
                max_range_miles: args.max_range.unwrap_or(DEFAULT_MAX_RANGE_MILES),
                mpg: args.mpg.unwrap_or(DEFAULT_MPG),
            },
            batch_size: args.batch_size,
        };

        Ok(Self {
            start,
            end,
            catalog,
            ors_api_key,
            ors_geocode_url: args
                .ors_geocode_url
                .unwrap_or_else(|| DEFAULT_GEOCODE_URL.to_owned()),
            ors_directions_url: args
                .ors_directions_url
                .unwrap_or_else(|| DEFAULT_DIRECTIONS_URL.to_owned()),
            timeout: Duration::from_secs(args.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
            settings,
        })
    }
}

/// Geocoding and routing answered by one backend.
pub(crate) trait RouteService: Geocoder + RouteProvider {}

impl<T: Geocoder + RouteProvider> RouteService for T {}

/// Builds the route service for the current plan invocation.
pub(super) trait RouteServiceBuilder {
    fn build(&self, config: &PlanConfig) -> Result<Box<dyn RouteService>, CliError>;
}

pub(super) struct OpenRouteServiceBuilder;

impl RouteServiceBuilder for OpenRouteServiceBuilder {
    fn build(&self, config: &PlanConfig) -> Result<Box<dyn RouteService>, CliError> {
        let client_config = OpenRouteServiceConfig::new(config.ors_api_key.clone())
            .with_geocode_url(config.ors_geocode_url.clone())
            .with_directions_url(config.ors_directions_url.clone())
            .with_timeout(config.timeout);
        let client = OpenRouteServiceClient::with_config(client_config)
            .map_err(CliError::BuildRouteService)?;
        Ok(Box::new(client))
    }
}

pub(super) fn run_plan(args: PlanArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_plan_with(args, &OpenRouteServiceBuilder, &mut stdout)
}

pub(super) fn run_plan_with(
    args: PlanArgs,
    builder: &dyn RouteServiceBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let plan = execute_plan(&config, builder)?;
    write_plan(writer, &PlanOutput::from(plan))
}

pub(super) fn execute_plan(
    config: &PlanConfig,
    builder: &dyn RouteServiceBuilder,
) -> Result<FuelPlan, CliError> {
    let service = builder.build(config)?;
    let catalog = CsvStationCatalog::new(config.catalog.clone());
    let plan = plan_trip(
        &*service,
        &*service,
        &catalog,
        &config.start,
        &config.end,
        &config.settings,
    )?;

    info!(
        "Planned {} fuel stop(s) over {:.1} miles from {} to {}",
        plan.fuel_stops.len(),
        plan.total_distance_miles,
        config.start,
        config.end
    );
    if !plan.warnings.is_empty() {
        debug!("{} input(s) skipped while planning", plan.warnings.len());
    }
    if !plan.complete {
        warn!(
            "No station within {:.0} miles covers the rest of the {:.1} mile route; the plan is partial",
            config.settings.optimizer.max_range_miles, plan.total_distance_miles
        );
    }
    Ok(plan)
}

/// JSON document written by `fuelstop plan`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct PlanOutput {
    pub(crate) route: RouteOutput,
    pub(crate) fuel_stops: Vec<Station>,
}

/// Route section of [`PlanOutput`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct RouteOutput {
    /// Route points as `[longitude, latitude]`.
    pub(crate) coordinates: Vec<[f64; 2]>,
    /// Route length in miles, rounded to two decimals.
    pub(crate) total_distance: f64,
    /// Estimated fuel cost, rounded to cents.
    pub(crate) total_fuel_cost: f64,
}

impl From<FuelPlan> for PlanOutput {
    fn from(plan: FuelPlan) -> Self {
        Self {
            route: RouteOutput {
                coordinates: plan
                    .coordinates
                    .iter()
                    .map(|coord| [coord.x, coord.y])
                    .collect(),
                total_distance: round_cents(plan.total_distance_miles),
                total_fuel_cost: round_cents(plan.total_fuel_cost),
            },
            fuel_stops: plan.fuel_stops,
        }
    }
}

#[expect(clippy::float_arithmetic, reason = "rounding to two decimals")]
fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn write_plan(writer: &mut dyn Write, output: &PlanOutput) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(output).map_err(CliError::SerialisePlan)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WritePlanOutput)?;
    writer.write_all(b"\n").map_err(CliError::WritePlanOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}
