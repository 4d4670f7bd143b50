//! Test helpers for composing plan CLI fixtures.

use crate::plan::{PlanConfig, RouteService, RouteServiceBuilder};
use super::*;
use camino::{Utf8Path, Utf8PathBuf};
use fuelstop_core::Route;
use fuelstop_data::routing::test_support::StubRouteService;
use geo::Coord;
use std::fs;
use tempfile::TempDir;

/// Price list with one station on the Austin to Waco corridor and two off it.
pub(super) const CATALOG_CSV: &str = "\
OPIS Truckstop ID,Truckstop Name,Address,City,State,Rack ID,Retail Price,latitude,longitude
1,GEORGETOWN FUEL,\"I-35, EXIT 261\",Georgetown,TX,10,3.19,30.63,-97.68
2,TEMPLE TRUCK STOP,\"I-35, EXIT 301\",Temple,TX,10,3.05,31.10,-97.37
3,CORPUS CHRISTI PLAZA,I-37,Corpus Christi,TX,12,2.70,27.80,-97.40
";

pub(super) fn workspace() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path.as_std_path(), contents).expect("write fixture");
}

/// Route service that knows Austin and Waco and returns a three point route
/// through Temple.
pub(super) fn austin_to_waco_service() -> StubRouteService {
    let route = Route::new(
        vec![
            Coord { x: -97.74, y: 30.27 },
            Coord { x: -97.37, y: 31.10 },
            Coord { x: -97.15, y: 31.55 },
        ],
        95.456,
    );
    StubRouteService::with_route(route)
        .with_place("Austin", -97.74, 30.27)
        .with_place("Waco", -97.15, 31.55)
}

#[derive(Debug, Clone)]
pub(super) struct StubRouteServiceBuilder {
    pub(super) service: StubRouteService,
}

impl RouteServiceBuilder for StubRouteServiceBuilder {
    fn build(&self, _config: &PlanConfig) -> Result<Box<dyn RouteService>, CliError> {
        Ok(Box::new(self.service.clone()))
    }
}
