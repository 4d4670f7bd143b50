//! CSV-backed fuel station catalog.
//!
//! The catalog is a CSV file with a header row containing at least the
//! columns `Truckstop Name`, `latitude`, `longitude`, `Retail Price` and
//! `Address`. Extra columns are ignored. Rows whose fields cannot be parsed
//! are skipped with a warning and counted; positions are not range-checked
//! here because the proximity index reports unusable ones itself.

use std::io::Read;

use camino::{Utf8Path, Utf8PathBuf};
use csv::{ReaderBuilder, StringRecord, Trim};
use fuelstop_core::{CatalogError, Station, StationCatalog};
use log::{debug, warn};
use serde::Deserialize;

use crate::fs::open_utf8_file;

/// Header of the station name column.
pub const NAME_COLUMN: &str = "Truckstop Name";
/// Header of the latitude column.
pub const LATITUDE_COLUMN: &str = "latitude";
/// Header of the longitude column.
pub const LONGITUDE_COLUMN: &str = "longitude";
/// Header of the price column.
pub const PRICE_COLUMN: &str = "Retail Price";
/// Header of the address column.
pub const ADDRESS_COLUMN: &str = "Address";

const REQUIRED_COLUMNS: [&str; 5] = [
    NAME_COLUMN,
    LATITUDE_COLUMN,
    LONGITUDE_COLUMN,
    PRICE_COLUMN,
    ADDRESS_COLUMN,
];

#[derive(Debug, Deserialize)]
struct StationRecord {
    #[serde(rename = "Truckstop Name")]
    name: String,
    latitude: f64,
    longitude: f64,
    #[serde(rename = "Retail Price")]
    price: f64,
    #[serde(rename = "Address")]
    address: String,
}

impl From<StationRecord> for Station {
    fn from(record: StationRecord) -> Self {
        Self::new(
            record.name,
            record.latitude,
            record.longitude,
            record.price,
            record.address,
        )
    }
}

/// A data row that could not be turned into a station.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// One-based line number in the source, when known.
    pub line: Option<u64>,
    /// Why the row was rejected.
    pub reason: String,
}

/// Stations read from a catalog together with the rows that were skipped.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CatalogLoad {
    /// Parsed stations in file order.
    pub stations: Vec<Station>,
    /// Rejected rows in file order.
    pub skipped: Vec<SkippedRow>,
}

/// [`StationCatalog`] reading a CSV file on every load.
#[derive(Debug, Clone)]
pub struct CsvStationCatalog {
    path: Utf8PathBuf,
}

impl CsvStationCatalog {
    /// Create a catalog backed by the CSV file at `path`.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Read the file, returning parsed stations and skipped rows.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Read`] when the file cannot be opened or its
    /// header cannot be read, and [`CatalogError::MissingColumn`] when a
    /// required column is absent.
    pub fn load(&self) -> Result<CatalogLoad, CatalogError> {
        let file = open_utf8_file(&self.path).map_err(|err| CatalogError::Read {
            location: self.path.to_string(),
            message: err.to_string(),
        })?;
        read_catalog(file, self.path.as_str())
    }
}

impl StationCatalog for CsvStationCatalog {
    fn load_stations(&self) -> Result<Vec<Station>, CatalogError> {
        self.load().map(|load| load.stations)
    }
}

/// Parse a CSV catalog from any reader.
///
/// `location` names the source in errors and log messages.
///
/// # Errors
///
/// See [`CsvStationCatalog::load`].
///
/// # Examples
/// ```
/// use fuelstop_data::catalog::read_catalog;
///
/// let csv = "\
/// Truckstop Name,Address,City,State,Retail Price,latitude,longitude
/// PILOT #1,I-40 EXIT 75,Amarillo,TX,3.299,35.19,-101.83
/// BROKEN,SOMEWHERE,Nowhere,TX,n/a,35.0,-100.0
/// ";
/// let load = read_catalog(csv.as_bytes(), "inline")?;
///
/// assert_eq!(load.stations.len(), 1);
/// assert_eq!(load.skipped.len(), 1);
/// # Ok::<(), fuelstop_core::CatalogError>(())
/// ```
pub fn read_catalog<R: Read>(reader: R, location: &str) -> Result<CatalogLoad, CatalogError> {
    let mut parser = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let headers = parser
        .headers()
        .map_err(|err| CatalogError::Read {
            location: location.to_owned(),
            message: err.to_string(),
        })?
        .clone();
    require_columns(&headers, location)?;

    let mut load = CatalogLoad::default();
    for row in parser.records() {
        match row {
            Ok(record) => match record.deserialize::<StationRecord>(Some(&headers)) {
                Ok(parsed) => load.stations.push(parsed.into()),
                Err(err) => load.skip(record.position().map(csv::Position::line), &err, location),
            },
            Err(err) => load.skip(err.position().map(csv::Position::line), &err, location),
        }
    }

    debug!(
        "Loaded {} stations from {location}; skipped {} rows",
        load.stations.len(),
        load.skipped.len()
    );
    Ok(load)
}

fn require_columns(headers: &StringRecord, location: &str) -> Result<(), CatalogError> {
    REQUIRED_COLUMNS
        .iter()
        .find(|column| !headers.iter().any(|header| header == **column))
        .map_or(Ok(()), |column| {
            Err(CatalogError::MissingColumn {
                location: location.to_owned(),
                column: (*column).to_owned(),
            })
        })
}

impl CatalogLoad {
    fn skip(&mut self, line: Option<u64>, err: &csv::Error, location: &str) {
        let reason = err.to_string();
        let place = line.map_or_else(
            || location.to_owned(),
            |number| format!("{location}:{number}"),
        );
        warn!("Skipped station row at {place}: {reason}");
        self.skipped.push(SkippedRow { line, reason });
    }
}
