//! Focused unit tests covering plan CLI configuration and output.

use super::helpers::{CATALOG_CSV, StubRouteServiceBuilder, austin_to_waco_service, workspace, write_utf8};
use super::*;
use crate::plan::{
    PlanArgs, PlanConfig, PlanOutput, config_from_layers_for_test, execute_plan, run_plan_with,
};
use fuelstop_core::{FuelPlan, PlannerSettings, RouteProviderError, Station, TripError};
use fuelstop_data::routing::test_support::StubRouteService;
use geo::Coord;
use rstest::{fixture, rstest};
use std::time::Duration;

#[fixture]
fn complete_args() -> PlanArgs {
    PlanArgs {
        start: Some("Austin".to_owned()),
        end: Some("Waco".to_owned()),
        catalog: Some("fuel-prices.csv".into()),
        ors_api_key: Some("test-key".to_owned()),
        ..PlanArgs::default()
    }
}

#[rstest]
#[case::missing_start(ARG_START, ENV_START)]
#[case::missing_end(ARG_END, ENV_END)]
#[case::missing_catalog(ARG_CATALOG, ENV_CATALOG)]
#[case::missing_api_key(ARG_ORS_API_KEY, ENV_ORS_API_KEY)]
fn converting_without_required_fields_errors(
    complete_args: PlanArgs,
    #[case] field: &'static str,
    #[case] env_var: &'static str,
) {
    let mut args = complete_args;
    match field {
        ARG_START => args.start = None,
        ARG_END => args.end = None,
        ARG_CATALOG => args.catalog = None,
        _ => args.ors_api_key = None,
    }

    let err = PlanConfig::try_from(args).expect_err("missing field should error");
    match err {
        CliError::MissingArgument {
            field: missing,
            env,
        } => {
            assert_eq!(missing, field);
            assert_eq!(env, env_var);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn plan_config_applies_defaults(complete_args: PlanArgs) {
    let config = PlanConfig::try_from(complete_args).expect("config should build");

    assert_eq!(config.settings, PlannerSettings::default());
    assert_eq!(
        config.ors_geocode_url,
        "https://api.openrouteservice.org/geocode/search"
    );
    assert_eq!(
        config.ors_directions_url,
        "https://api.openrouteservice.org/v2/directions/driving-car"
    );
    assert_eq!(config.timeout, Duration::from_secs(30));
}

#[rstest]
fn plan_config_honours_vehicle_overrides(complete_args: PlanArgs) {
    let args = PlanArgs {
        deviation_radius: Some(2.5),
        max_range: Some(300.0),
        mpg: Some(6.5),
        batch_size: Some(250),
        timeout_secs: Some(5),
        ..complete_args
    };

    let config = PlanConfig::try_from(args).expect("config should build");

    assert_eq!(config.settings.deviation_radius_miles, 2.5);
    assert_eq!(config.settings.optimizer.max_range_miles, 300.0);
    assert_eq!(config.settings.optimizer.mpg, 6.5);
    assert_eq!(config.settings.batch_size, Some(250));
    assert_eq!(config.timeout, Duration::from_secs(5));
}

#[rstest]
fn validate_sources_reports_missing_catalog(complete_args: PlanArgs) {
    let (_tmp, root) = workspace();
    let mut config = PlanConfig::try_from(complete_args).expect("config should build");
    config.catalog = root.join("missing.csv");

    let err = config.validate_sources().expect_err("expected failure");
    match err {
        CliError::MissingSourceFile { field, path } => {
            assert_eq!(field, ARG_CATALOG);
            assert_eq!(path, root.join("missing.csv"));
        }
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[rstest]
fn validate_sources_rejects_directories(complete_args: PlanArgs) {
    let (_tmp, root) = workspace();
    let catalog = root.join("prices");
    std::fs::create_dir(catalog.as_std_path()).expect("catalog directory");
    let mut config = PlanConfig::try_from(complete_args).expect("config should build");
    config.catalog = catalog;

    let err = config.validate_sources().expect_err("expected failure");
    assert!(matches!(err, CliError::MissingSourceFile { .. }));
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "mpg": "plenty" }));

    let err = config_from_layers_for_test(composer.layers())
        .expect_err("invalid config layer should map to CliError::Configuration");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_honours_precedence() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "start": "Austin",
            "end": "Dallas",
            "catalog": "from-file.csv",
            "ors_api_key": "file-key",
            "mpg": 8.0,
        }),
        None,
    );
    composer.push_environment(json!({
        "ors_api_key": "env-key",
        "max_range": 350.0,
    }));
    composer.push_cli(json!({
        "end": "Waco",
    }));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.start, "Austin");
    assert_eq!(config.end, "Waco");
    assert_eq!(config.catalog, "from-file.csv");
    assert_eq!(config.ors_api_key, "env-key");
    assert_eq!(config.settings.optimizer.mpg, 8.0);
    assert_eq!(config.settings.optimizer.max_range_miles, 350.0);
}

#[rstest]
fn output_rounds_totals_and_orders_coordinates() {
    let plan = FuelPlan {
        coordinates: vec![Coord { x: -97.74, y: 30.27 }, Coord { x: -97.15, y: 31.55 }],
        total_distance_miles: 95.456,
        total_fuel_cost: 29.114_08,
        fuel_stops: vec![Station::new("TEMPLE", 31.1, -97.37, 3.05, "I-35")],
        candidate_count: 1,
        complete: false,
        warnings: Vec::new(),
    };

    let output = PlanOutput::from(plan);

    assert_eq!(output.route.coordinates, vec![[-97.74, 30.27], [-97.15, 31.55]]);
    assert_eq!(output.route.total_distance, 95.46);
    assert_eq!(output.route.total_fuel_cost, 29.11);
    assert_eq!(output.fuel_stops.len(), 1);
}

#[rstest]
fn execute_plan_surfaces_routing_failures(complete_args: PlanArgs) {
    let (_tmp, root) = workspace();
    let catalog = root.join("fuel-prices.csv");
    write_utf8(&catalog, CATALOG_CSV.as_bytes());
    let mut config = PlanConfig::try_from(complete_args).expect("config should build");
    config.catalog = catalog;
    let builder = StubRouteServiceBuilder {
        service: StubRouteService::with_error(RouteProviderError::EmptyRoute)
            .with_place("Austin", -97.74, 30.27)
            .with_place("Waco", -97.15, 31.55),
    };

    let err = execute_plan(&config, &builder).expect_err("routing fails");
    match err {
        CliError::Plan(TripError::Routing(RouteProviderError::EmptyRoute)) => {}
        other => panic!("expected routing failure, found {other:?}"),
    }
}

#[rstest]
fn run_plan_writes_pretty_json_with_trailing_newline(complete_args: PlanArgs) {
    let (_tmp, root) = workspace();
    let catalog = root.join("fuel-prices.csv");
    write_utf8(&catalog, CATALOG_CSV.as_bytes());
    let args = PlanArgs {
        catalog: Some(catalog),
        ..complete_args
    };
    let builder = StubRouteServiceBuilder {
        service: austin_to_waco_service(),
    };
    let mut buffer = Vec::new();

    run_plan_with(args, &builder, &mut buffer).expect("plan should succeed");

    let text = String::from_utf8(buffer).expect("utf-8 output");
    assert!(text.ends_with("}\n"));
    let output: PlanOutput = serde_json::from_str(&text).expect("JSON output");
    assert_eq!(output.fuel_stops.len(), 1);
}
