//! Grid-partitioned search for stations near a route.
//!
//! [`ProximityIndex`] buckets catalog stations into a uniform lon/lat grid
//! whose cell size follows from the deviation radius. A route query walks the
//! route, inspects only the cells around each point and confirms candidates
//! with the exact great-circle distance, so there are no false positives and
//! no false negatives relative to a brute-force scan.
//!
//! Unusable stations and route points are skipped, logged and collected as
//! [`Warning`]s; they never fail a query.

mod grid;

use std::collections::{HashMap, HashSet};

use geo::Coord;
use log::{debug, warn};

pub use grid::{CellKey, cell_size_for_radius};
use grid::CellWindow;

use crate::coordinate::validate_coordinates_from;
use crate::error::{PlanError, require_positive};
use crate::{Coordinate, Station, Warning};

/// Spatial index over a borrowed station catalog.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use fuelstop_core::{ProximityIndex, Station};
///
/// let stations = vec![
///     Station::new("On route", 30.00, -97.00, 3.10, "I-35 exit 1"),
///     Station::new("Far away", 35.00, -90.00, 2.90, "Elsewhere"),
/// ];
/// let index = ProximityIndex::build(&stations, 5.0)?;
///
/// let route = [Coord { x: -97.01, y: 30.00 }, Coord { x: -97.50, y: 30.50 }];
/// let matches = index.query_route(&route);
///
/// assert_eq!(matches.indices(), &[0]);
/// # Ok::<(), fuelstop_core::PlanError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ProximityIndex<'a> {
    stations: &'a [Station],
    positions: Vec<Option<Coordinate>>,
    cells: HashMap<CellKey, Vec<usize>>,
    radius_miles: f64,
    cell_size: f64,
    indexed: usize,
    warnings: Vec<Warning>,
}

impl<'a> ProximityIndex<'a> {
    /// Index `stations` for queries with the given deviation radius.
    ///
    /// The cell size is derived with [`cell_size_for_radius`].
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::InvalidArgument`] when the radius is not finite
    /// and positive.
    pub fn build(stations: &'a [Station], radius_miles: f64) -> Result<Self, PlanError> {
        let cell_size = cell_size_for_radius(radius_miles)?;
        Self::with_cell_size(stations, radius_miles, cell_size)
    }

    /// Index `stations` with an explicit cell size in degrees.
    ///
    /// Any positive cell size yields the same query results; it only changes
    /// how much work each query does.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::InvalidArgument`] when the radius or the cell
    /// size is not finite and positive.
    pub fn with_cell_size(
        stations: &'a [Station],
        radius_miles: f64,
        cell_size: f64,
    ) -> Result<Self, PlanError> {
        let radius = require_positive("deviation radius", radius_miles)?;
        let cell_degrees = require_positive("cell size", cell_size)?;

        let mut cells: HashMap<CellKey, Vec<usize>> = HashMap::new();
        let mut positions = Vec::with_capacity(stations.len());
        let mut warnings = Vec::new();
        for (index, station) in stations.iter().enumerate() {
            match station.coordinate() {
                Ok(coordinate) => {
                    cells
                        .entry(CellKey::containing(&coordinate, cell_degrees))
                        .or_default()
                        .push(index);
                    positions.push(Some(coordinate));
                }
                Err(reason) => {
                    warn!(
                        "Skipped station {index} ({}): {reason}",
                        station.name
                    );
                    warnings.push(Warning::Station {
                        index,
                        name: station.name.clone(),
                        reason,
                    });
                    positions.push(None);
                }
            }
        }

        let indexed = stations.len() - warnings.len();
        debug!(
            "Indexed {indexed} of {} stations into {} cells of {cell_degrees:.4} degrees",
            stations.len(),
            cells.len()
        );
        Ok(Self {
            stations,
            positions,
            cells,
            radius_miles: radius,
            cell_size: cell_degrees,
            indexed,
            warnings,
        })
    }

    /// The catalog this index was built over.
    #[must_use]
    pub const fn stations(&self) -> &'a [Station] {
        self.stations
    }

    /// Deviation radius in miles used by queries.
    #[must_use]
    pub const fn radius_miles(&self) -> f64 {
        self.radius_miles
    }

    /// Grid cell size in degrees.
    #[must_use]
    pub const fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Number of stations that made it into the grid.
    #[must_use]
    pub const fn indexed_len(&self) -> usize {
        self.indexed
    }

    /// Whether no station could be indexed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.indexed == 0
    }

    /// Stations skipped while building.
    #[must_use]
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// The cell `point` falls into.
    #[must_use]
    pub fn cell_for(&self, point: &Coordinate) -> CellKey {
        CellKey::containing(point, self.cell_size)
    }

    /// Catalog indices bucketed in `key`, empty for unoccupied cells.
    #[must_use]
    pub fn cell_members(&self, key: CellKey) -> &[usize] {
        self.cells.get(&key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Every cell that may hold a station within the radius of `point`.
    ///
    /// This over-approximates: exact membership is decided by distance.
    #[must_use]
    pub fn candidate_cells(&self, point: &Coordinate) -> Vec<CellKey> {
        CellWindow::around(point, self.radius_miles, self.cell_size).keys()
    }

    /// Stations within the deviation radius of any point on `route`.
    ///
    /// Unusable route points are skipped and reported in the result's
    /// warnings. Each station appears at most once, in the order it was
    /// first found walking the route.
    #[must_use]
    pub fn query_route(&self, route: &[Coord<f64>]) -> RouteMatches<'a> {
        self.query_slice(route, 0)
    }

    /// [`ProximityIndex::query_route`] over consecutive chunks of at most
    /// `batch_size` points, merging the per-chunk results.
    ///
    /// Chunking bounds the working set of a single pass and never changes
    /// the result.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::ZeroBatchSize`] when `batch_size` is zero.
    pub fn query_route_batched(
        &self,
        route: &[Coord<f64>],
        batch_size: usize,
    ) -> Result<RouteMatches<'a>, PlanError> {
        if batch_size == 0 {
            return Err(PlanError::ZeroBatchSize);
        }
        let mut merged = RouteMatches::empty(self.stations);
        for (chunk_index, chunk) in route.chunks(batch_size).enumerate() {
            let offset = chunk_index.saturating_mul(batch_size);
            merged.merge(self.query_slice(chunk, offset));
        }
        debug!(
            "Batched route query over {} points in chunks of {batch_size} matched {} stations",
            route.len(),
            merged.len()
        );
        Ok(merged)
    }

    fn query_slice(&self, route: &[Coord<f64>], offset: usize) -> RouteMatches<'a> {
        let (points, warnings) = validate_coordinates_from(route, offset);
        let mut matches = RouteMatches::empty(self.stations);
        matches.warnings = warnings;
        if self.is_empty() || points.is_empty() {
            return matches;
        }

        let mut found = HashSet::new();
        for (_, point) in &points {
            for key in self.window_cells(point) {
                for &index in self.cell_members(key) {
                    if found.contains(&index) {
                        continue;
                    }
                    if self.within_radius(index, point) {
                        found.insert(index);
                        matches.indices.push(index);
                    }
                }
            }
        }
        matches
    }

    /// Occupied cells inside the window around `point`.
    ///
    /// Small windows are enumerated directly; a window larger than the
    /// number of occupied cells is resolved by filtering the occupied ones.
    fn window_cells(&self, point: &Coordinate) -> Vec<CellKey> {
        let window = CellWindow::around(point, self.radius_miles, self.cell_size);
        let occupied = u128::try_from(self.cells.len()).unwrap_or(u128::MAX);
        if window.cell_count() <= occupied {
            window.keys()
        } else {
            let mut keys: Vec<CellKey> = self
                .cells
                .keys()
                .copied()
                .filter(|key| window.contains(*key))
                .collect();
            keys.sort_unstable();
            keys
        }
    }

    fn within_radius(&self, index: usize, point: &Coordinate) -> bool {
        self.positions
            .get(index)
            .copied()
            .flatten()
            .is_some_and(|position| position.distance_miles(point) <= self.radius_miles)
    }
}

/// Result of a route query: catalog indices plus skipped route points.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteMatches<'a> {
    stations: &'a [Station],
    indices: Vec<usize>,
    warnings: Vec<Warning>,
}

impl<'a> RouteMatches<'a> {
    const fn empty(stations: &'a [Station]) -> Self {
        Self {
            stations,
            indices: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Union `other` into `self`, keeping first-found order.
    fn merge(&mut self, other: Self) {
        let mut seen: HashSet<usize> = self.indices.iter().copied().collect();
        for index in other.indices {
            if seen.insert(index) {
                self.indices.push(index);
            }
        }
        self.warnings.extend(other.warnings);
    }

    /// Catalog indices of the matched stations.
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// The matched stations, borrowed from the catalog.
    #[must_use]
    pub fn stations(&self) -> Vec<&'a Station> {
        self.indices
            .iter()
            .filter_map(|index| self.stations.get(*index))
            .collect()
    }

    /// Whether the catalog station at `index` matched.
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    /// Number of matched stations.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether nothing matched.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Route points skipped during the query.
    #[must_use]
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }
}
