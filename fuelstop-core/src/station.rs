//! Priced fuel stations as loaded from a catalog.

use crate::{Coordinate, CoordinateError};

/// A priced fuel station from the catalog.
///
/// Positions are WGS84 degrees. The record is kept exactly as loaded; an
/// unusable position only shows up when [`Station::coordinate`] is asked for
/// it, which is how the proximity index decides to skip a station.
///
/// # Examples
/// ```
/// use fuelstop_core::Station;
///
/// let station = Station::new("PILOT #1", 35.2, -101.8, 3.29, "I-40, EXIT 75");
///
/// assert_eq!(station.name, "PILOT #1");
/// assert!(station.coordinate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Station {
    /// Display name of the station.
    pub name: String,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Retail price per gallon.
    pub price: f64,
    /// Street address.
    pub address: String,
}

impl Station {
    /// Construct a station record.
    pub fn new(
        name: impl Into<String>,
        latitude: f64,
        longitude: f64,
        price: f64,
        address: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
            price,
            address: address.into(),
        }
    }

    /// The station's position, if it is usable.
    ///
    /// # Errors
    ///
    /// Returns the [`CoordinateError`] describing a non-finite or
    /// out-of-range latitude/longitude.
    pub fn coordinate(&self) -> Result<Coordinate, CoordinateError> {
        Coordinate::new(self.longitude, self.latitude)
    }
}
