//! Geocoder and route provider traits.

use crate::{Coordinate, Route};

use super::error::RouteProviderError;

/// Resolve free-form place text to a position.
///
/// # Examples
///
/// ```rust
/// use fuelstop_core::{Coordinate, Geocoder, RouteProviderError};
///
/// struct OnlyAustin;
///
/// impl Geocoder for OnlyAustin {
///     fn geocode(&self, query: &str) -> Result<Coordinate, RouteProviderError> {
///         if query.eq_ignore_ascii_case("austin, tx") {
///             Coordinate::new(-97.74, 30.27).map_err(|err| RouteProviderError::ParseError {
///                 message: err.to_string(),
///             })
///         } else {
///             Err(RouteProviderError::LocationNotFound { query: query.to_owned() })
///         }
///     }
/// }
///
/// assert!(OnlyAustin.geocode("Austin, TX").is_ok());
/// assert!(matches!(
///     OnlyAustin.geocode("Atlantis"),
///     Err(RouteProviderError::LocationNotFound { .. })
/// ));
/// ```
pub trait Geocoder {
    /// Return the best match for `query`.
    ///
    /// # Errors
    ///
    /// Implementations must return
    /// [`RouteProviderError::LocationNotFound`] when nothing matches, and
    /// another [`RouteProviderError`] when the lookup itself fails.
    fn geocode(&self, query: &str) -> Result<Coordinate, RouteProviderError>;
}

/// Fetch a driving route between two positions.
pub trait RouteProvider {
    /// Return the route from `start` to `end`.
    ///
    /// The route's points use `x = longitude`, `y = latitude` and its length
    /// is in miles.
    ///
    /// # Errors
    ///
    /// Implementations must return [`RouteProviderError::EmptyRoute`] when
    /// the service finds no route, and another [`RouteProviderError`] when
    /// the request fails.
    fn route(&self, start: &Coordinate, end: &Coordinate) -> Result<Route, RouteProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    use crate::test_support::{FixedGeocoder, StraightLineRouteProvider};

    #[rstest]
    fn fixed_geocoder_reports_unknown_places() {
        let geocoder = FixedGeocoder::default().with_place("Austin", -97.74, 30.27);
        assert!(geocoder.geocode("Austin").is_ok());
        let err = geocoder.geocode("Nowhere").expect_err("unknown place");
        assert_eq!(
            err,
            RouteProviderError::LocationNotFound {
                query: "Nowhere".to_owned()
            }
        );
    }

    #[rstest]
    fn straight_line_route_spans_both_endpoints() {
        let start = Coordinate::new(-97.74, 30.27).expect("valid start");
        let end = Coordinate::new(-96.80, 32.78).expect("valid end");
        let route = StraightLineRouteProvider::new(4)
            .route(&start, &end)
            .expect("straight line route");
        assert_eq!(route.coordinates().len(), 5);
        assert_eq!(route.coordinates().first(), Some(&start.as_coord()));
        assert_eq!(route.coordinates().last(), Some(&end.as_coord()));
        assert!((route.total_distance_miles() - start.distance_miles(&end)).abs() < 1e-9);
    }

    #[rstest]
    fn error_messages_name_the_request() {
        let err = RouteProviderError::HttpError {
            url: "https://api.example.com/v2/directions".to_owned(),
            status: 403,
            message: "forbidden".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "request to https://api.example.com/v2/directions failed with HTTP 403: forbidden"
        );
    }
}
