//! Uniform lon/lat grid arithmetic.
//!
//! Cells are `cell_size` degrees square and keyed by the floor of
//! `longitude / cell_size` and `latitude / cell_size`. Nothing here knows
//! about stations; the index owns the buckets.

use std::collections::BTreeSet;
use std::f64::consts::FRAC_PI_2;

use crate::error::{PlanError, require_positive};
use crate::{Coordinate, EARTH_RADIUS_MILES, MILES_PER_DEGREE};

/// Relative slack on the longitude half-width, absorbing rounding in the
/// trigonometry.
const LONGITUDE_PAD: f64 = 1e-9;

/// Integer address of a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellKey {
    /// Column, `floor(longitude / cell_size)`.
    pub x: i64,
    /// Row, `floor(latitude / cell_size)`.
    pub y: i64,
}

impl CellKey {
    /// The cell containing `coordinate`.
    ///
    /// # Examples
    /// ```
    /// use fuelstop_core::{CellKey, Coordinate};
    ///
    /// let point = Coordinate::new(-97.5, 30.25)?;
    /// assert_eq!(CellKey::containing(&point, 0.5), CellKey { x: -195, y: 60 });
    /// # Ok::<(), fuelstop_core::CoordinateError>(())
    /// ```
    #[must_use]
    pub fn containing(coordinate: &Coordinate, cell_size: f64) -> Self {
        let (longitude, latitude) = coordinate.clamped();
        Self {
            x: floor_index(longitude, cell_size),
            y: floor_index(latitude, cell_size),
        }
    }
}

/// Grid cell size in degrees for a deviation radius in miles.
///
/// Roughly twice the radius expressed in degrees, so a query only ever
/// touches a handful of neighbouring cells.
///
/// # Errors
///
/// Returns [`PlanError::InvalidArgument`] unless the radius is finite and
/// positive.
///
/// # Examples
/// ```
/// use fuelstop_core::cell_size_for_radius;
///
/// let size = cell_size_for_radius(69.0)?;
/// assert!((size - 2.0).abs() < 1e-12);
/// # Ok::<(), fuelstop_core::PlanError>(())
/// ```
#[expect(clippy::float_arithmetic, reason = "degree conversion")]
pub fn cell_size_for_radius(radius_miles: f64) -> Result<f64, PlanError> {
    let radius = require_positive("deviation radius", radius_miles)?;
    Ok((radius / MILES_PER_DEGREE) * 2.0)
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_possible_truncation,
    reason = "grid indices are floored degree quotients; `as` saturates"
)]
fn floor_index(value: f64, cell_size: f64) -> i64 {
    (value / cell_size).floor() as i64
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_possible_truncation,
    reason = "grid indices are ceiled degree quotients; `as` saturates"
)]
fn ceil_index(value: f64, cell_size: f64) -> i64 {
    (value / cell_size).ceil() as i64
}

/// The block of cells a radius query around one point has to inspect.
///
/// Rows form one inclusive range. Columns form one range, or two when the
/// window wraps across the antimeridian.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CellWindow {
    rows: (i64, i64),
    columns: Vec<(i64, i64)>,
}

impl CellWindow {
    /// Window covering every cell that may hold a point within
    /// `radius_miles` of `point`.
    ///
    /// The latitude half-width is `radius / 69` degrees, slightly more than
    /// the true angular radius. The longitude half-width is the larger of
    /// that and the exact extent of the small circle around `point`,
    /// `asin(sin(d) / cos(latitude))`; it is the whole globe once the circle
    /// reaches a pole.
    #[expect(clippy::float_arithmetic, reason = "degree window arithmetic")]
    pub(crate) fn around(point: &Coordinate, radius_miles: f64, cell_size: f64) -> Self {
        let degree_radius = (radius_miles / MILES_PER_DEGREE).abs();
        let (longitude, latitude) = point.clamped();

        let rows = (
            floor_index(latitude - degree_radius, cell_size),
            ceil_index(latitude + degree_radius, cell_size),
        );

        let angular = (radius_miles / EARTH_RADIUS_MILES).abs();
        let latitude_rad = latitude.to_radians();
        let ratio = angular.sin() / latitude_rad.cos();
        let half_width = if latitude_rad.abs() + angular >= FRAC_PI_2 || ratio >= 1.0 {
            180.0
        } else {
            (ratio.asin().to_degrees() * (1.0 + LONGITUDE_PAD))
                .max(degree_radius)
                .min(180.0)
        };

        let columns = if half_width >= 180.0 {
            vec![(floor_index(-180.0, cell_size), ceil_index(180.0, cell_size))]
        } else {
            let west = longitude - half_width;
            let east = longitude + half_width;
            let mut spans = vec![(west.max(-180.0), east.min(180.0))];
            if west < -180.0 {
                spans.push((west + 360.0, 180.0));
            }
            if east > 180.0 {
                spans.push((-180.0, east - 360.0));
            }
            spans
                .into_iter()
                .map(|(low, high)| (floor_index(low, cell_size), ceil_index(high, cell_size)))
                .collect()
        };

        Self { rows, columns }
    }

    /// Whether `key` lies inside the window.
    pub(crate) fn contains(&self, key: CellKey) -> bool {
        (self.rows.0..=self.rows.1).contains(&key.y)
            && self
                .columns
                .iter()
                .any(|(low, high)| (*low..=*high).contains(&key.x))
    }

    /// Upper bound on the number of cells in the window.
    pub(crate) fn cell_count(&self) -> u128 {
        let rows = span_len(self.rows);
        self.columns
            .iter()
            .map(|span| span_len(*span).saturating_mul(rows))
            .fold(0_u128, u128::saturating_add)
    }

    /// Every cell in the window, in column-major order without repeats.
    pub(crate) fn keys(&self) -> Vec<CellKey> {
        let mut keys = BTreeSet::new();
        for (low, high) in &self.columns {
            for x in *low..=*high {
                for y in self.rows.0..=self.rows.1 {
                    keys.insert(CellKey { x, y });
                }
            }
        }
        keys.into_iter().collect()
    }
}

fn span_len((low, high): (i64, i64)) -> u128 {
    u128::try_from(i128::from(high) - i128::from(low) + 1).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn point(lon: f64, lat: f64) -> Coordinate {
        Coordinate::new(lon, lat).expect("valid test coordinate")
    }

    #[rstest]
    #[case(0.0)]
    #[case(-4.0)]
    #[case(f64::NAN)]
    fn cell_size_rejects_unusable_radius(#[case] radius: f64) {
        assert!(cell_size_for_radius(radius).is_err());
    }

    #[rstest]
    fn containing_floors_negative_values() {
        let key = CellKey::containing(&point(-0.1, -0.1), 1.0);
        assert_eq!(key, CellKey { x: -1, y: -1 });
    }

    #[rstest]
    fn equatorial_window_spans_floor_to_ceil() {
        // radius 69 miles -> 1 degree; cell size 1 degree.
        let window = CellWindow::around(&point(0.5, 0.5), 69.0, 1.0);
        assert_eq!(window.rows, (-1, 2));
        assert_eq!(window.columns.len(), 1);
        let (low, high) = window.columns.first().copied().expect("one span");
        assert!(low <= -1 && high >= 2);
        assert!(window.contains(CellKey { x: 0, y: 0 }));
        assert!(!window.contains(CellKey { x: 0, y: 3 }));
    }

    #[rstest]
    fn window_widens_with_latitude() {
        let equator = CellWindow::around(&point(0.0, 0.0), 69.0, 0.5);
        let north = CellWindow::around(&point(0.0, 60.0), 69.0, 0.5);
        assert!(north.cell_count() > equator.cell_count());
    }

    #[rstest]
    fn window_wraps_across_antimeridian() {
        let window = CellWindow::around(&point(179.9, 0.0), 69.0, 1.0);
        assert_eq!(window.columns.len(), 2);
        assert!(window.contains(CellKey { x: -180, y: 0 }));
        assert!(window.contains(CellKey { x: 179, y: 0 }));
    }

    #[rstest]
    fn polar_window_covers_every_longitude() {
        let window = CellWindow::around(&point(10.0, 89.9), 69.0, 10.0);
        assert!(window.contains(CellKey { x: -18, y: 8 }));
        assert!(window.contains(CellKey { x: 17, y: 8 }));
    }

    #[rstest]
    fn keys_are_unique_and_counted() {
        let window = CellWindow::around(&point(0.5, 0.5), 69.0, 1.0);
        let keys = window.keys();
        assert_eq!(u128::try_from(keys.len()).ok(), Some(window.cell_count()));
    }
}
