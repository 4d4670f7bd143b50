//! Validated WGS84 positions.
//!
//! Route providers hand back raw `[longitude, latitude]` arrays and catalogs
//! may carry garbage in their coordinate columns. [`Coordinate`] is the only
//! type the distance and grid code accepts, so anything that reaches them has
//! already been checked for finiteness and range.

use geo::Coord;
use log::warn;
use thiserror::Error;

use crate::{Warning, haversine_miles};

/// Valid latitude range in degrees.
pub const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);
/// Valid longitude range in degrees.
pub const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);

/// A finite, in-range `(longitude, latitude)` pair.
///
/// Stored as a [`geo::Coord`] with `x = longitude` and `y = latitude`.
///
/// # Examples
/// ```
/// use fuelstop_core::Coordinate;
///
/// let stop = Coordinate::new(-97.74, 30.27)?;
/// assert_eq!(stop.longitude(), -97.74);
/// assert_eq!(stop.latitude(), 30.27);
///
/// assert!(Coordinate::new(f64::NAN, 30.0).is_err());
/// assert!(Coordinate::new(-97.0, 91.0).is_err());
/// # Ok::<(), fuelstop_core::CoordinateError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate(Coord<f64>);

/// Reasons a raw position is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CoordinateError {
    /// The raw array had fewer than two components.
    #[error("expected [longitude, latitude], found {found} component(s)")]
    MissingComponent {
        /// Number of components present.
        found: usize,
    },
    /// A component was NaN or infinite.
    #[error("coordinate ({longitude}, {latitude}) is not finite")]
    NonFinite {
        /// Raw longitude.
        longitude: f64,
        /// Raw latitude.
        latitude: f64,
    },
    /// A component lay outside the WGS84 range.
    #[error("coordinate ({longitude}, {latitude}) is outside the valid range")]
    OutOfRange {
        /// Raw longitude.
        longitude: f64,
        /// Raw latitude.
        latitude: f64,
    },
}

impl Coordinate {
    /// Validate a longitude/latitude pair.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateError::NonFinite`] for NaN or infinite components
    /// and [`CoordinateError::OutOfRange`] when either component lies outside
    /// [`LONGITUDE_RANGE`] or [`LATITUDE_RANGE`].
    pub fn new(longitude: f64, latitude: f64) -> Result<Self, CoordinateError> {
        if !longitude.is_finite() || !latitude.is_finite() {
            return Err(CoordinateError::NonFinite {
                longitude,
                latitude,
            });
        }
        let lon_ok = (LONGITUDE_RANGE.0..=LONGITUDE_RANGE.1).contains(&longitude);
        let lat_ok = (LATITUDE_RANGE.0..=LATITUDE_RANGE.1).contains(&latitude);
        if !lon_ok || !lat_ok {
            return Err(CoordinateError::OutOfRange {
                longitude,
                latitude,
            });
        }
        Ok(Self(Coord {
            x: longitude,
            y: latitude,
        }))
    }

    /// Validate a raw `[longitude, latitude, ..]` array.
    ///
    /// Extra components such as elevation are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateError::MissingComponent`] when fewer than two
    /// components are present, otherwise the errors of [`Coordinate::new`].
    pub fn from_slice(raw: &[f64]) -> Result<Self, CoordinateError> {
        match raw {
            [longitude, latitude, ..] => Self::new(*longitude, *latitude),
            _ => Err(CoordinateError::MissingComponent { found: raw.len() }),
        }
    }

    /// Validate a [`geo::Coord`] in `x = longitude`, `y = latitude` order.
    ///
    /// # Errors
    ///
    /// See [`Coordinate::new`].
    pub fn from_coord(coord: Coord<f64>) -> Result<Self, CoordinateError> {
        Self::new(coord.x, coord.y)
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.0.x
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.0.y
    }

    /// The position as a [`geo::Coord`].
    #[must_use]
    pub const fn as_coord(&self) -> Coord<f64> {
        self.0
    }

    /// The position clamped into the WGS84 ranges.
    ///
    /// Validated coordinates are already in range, so this only matters for
    /// grid arithmetic performed on values derived from them.
    #[must_use]
    pub const fn clamped(&self) -> (f64, f64) {
        (
            self.0.x.clamp(LONGITUDE_RANGE.0, LONGITUDE_RANGE.1),
            self.0.y.clamp(LATITUDE_RANGE.0, LATITUDE_RANGE.1),
        )
    }

    /// Great-circle distance in miles to `other`.
    #[must_use]
    pub fn distance_miles(&self, other: &Self) -> f64 {
        haversine_miles(self.latitude(), self.longitude(), other.latitude(), other.longitude())
    }
}

impl From<Coordinate> for Coord<f64> {
    fn from(value: Coordinate) -> Self {
        value.0
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(value: Coordinate) -> Self {
        [value.0.x, value.0.y]
    }
}

/// Keep the valid positions of a raw route, reporting the rest.
///
/// The returned pairs carry the position's index in `raw` so that callers can
/// keep their own bookkeeping aligned with the input.
#[must_use]
pub fn validate_coordinates(raw: &[Coord<f64>]) -> (Vec<(usize, Coordinate)>, Vec<Warning>) {
    validate_coordinates_from(raw, 0)
}

/// [`validate_coordinates`] for a slice starting at `first_index` of a
/// longer route.
pub(crate) fn validate_coordinates_from(
    raw: &[Coord<f64>],
    first_index: usize,
) -> (Vec<(usize, Coordinate)>, Vec<Warning>) {
    let mut valid = Vec::with_capacity(raw.len());
    let mut warnings = Vec::new();
    for (index, coord) in (first_index..).zip(raw) {
        match Coordinate::from_coord(*coord) {
            Ok(coordinate) => valid.push((index, coordinate)),
            Err(reason) => {
                warn!("Skipped route coordinate {index}: {reason}");
                warnings.push(Warning::RouteCoordinate { index, reason });
            }
        }
    }
    (valid, warnings)
}
