//! Driving routes returned by a route provider.
//!
//! A route is the polyline a vehicle follows plus the provider's reported
//! length. Points are kept raw so the proximity index can report the ones it
//! has to skip.

use geo::Coord;

use crate::Coordinate;

/// An ordered polyline with its total driving distance.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use fuelstop_core::Route;
///
/// let route = Route::new(
///     vec![Coord { x: -97.74, y: 30.27 }, Coord { x: -96.80, y: 32.78 }],
///     195.4,
/// );
///
/// assert_eq!(route.coordinates().len(), 2);
/// assert_eq!(route.total_distance_miles(), 195.4);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    coordinates: Vec<Coord<f64>>,
    total_distance_miles: f64,
}

impl Route {
    /// Construct a route from provider output.
    ///
    /// Points use `x = longitude`, `y = latitude`.
    #[must_use]
    pub const fn new(coordinates: Vec<Coord<f64>>, total_distance_miles: f64) -> Self {
        Self {
            coordinates,
            total_distance_miles,
        }
    }

    /// Construct a route with no points and zero length.
    ///
    /// # Examples
    /// ```
    /// use fuelstop_core::Route;
    ///
    /// let route = Route::empty();
    /// assert!(route.coordinates().is_empty());
    /// assert!(route.start().is_none());
    /// ```
    #[must_use]
    pub const fn empty() -> Self {
        Self::new(Vec::new(), 0.0)
    }

    /// Raw route points in travel order.
    #[must_use]
    pub fn coordinates(&self) -> &[Coord<f64>] {
        &self.coordinates
    }

    /// Total driving distance reported by the provider, in miles.
    #[must_use]
    pub const fn total_distance_miles(&self) -> f64 {
        self.total_distance_miles
    }

    /// The first usable point on the route, i.e. where the trip starts.
    #[must_use]
    pub fn start(&self) -> Option<Coordinate> {
        self.coordinates
            .iter()
            .find_map(|coord| Coordinate::from_coord(*coord).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_preserves_order() {
        let a = Coord { x: 0.0, y: 0.0 };
        let b = Coord { x: 1.0, y: 1.0 };
        let route = Route::new(vec![a, b], 97.6);
        assert_eq!(route.coordinates(), &[a, b]);
        assert_eq!(route.total_distance_miles(), 97.6);
    }

    #[test]
    fn start_skips_unusable_points() {
        let route = Route::new(
            vec![Coord { x: f64::NAN, y: 0.0 }, Coord { x: 2.0, y: 3.0 }],
            10.0,
        );
        let start = route.start().expect("second point is usable");
        assert_eq!(start.longitude(), 2.0);
    }
}
