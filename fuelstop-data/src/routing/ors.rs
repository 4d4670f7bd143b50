//! `OpenRouteService` response types for the geocode search and directions
//! services.
//!
//! Both services answer with `GeoJSON` feature collections. Only the fields the
//! planner reads are modelled; everything else is ignored.
//!
//! See: <https://openrouteservice.org/dev/#/api-docs>

use serde::Deserialize;

/// Geocode search response.
#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    /// Matches ordered by relevance; empty when nothing matched.
    #[serde(default)]
    pub features: Vec<PointFeature>,
}

/// A geocoding match.
#[derive(Debug, Deserialize)]
pub struct PointFeature {
    /// Match position.
    pub geometry: PointGeometry,
}

/// `GeoJSON` point geometry as `[longitude, latitude]`.
#[derive(Debug, Deserialize)]
pub struct PointGeometry {
    /// Position components.
    pub coordinates: Vec<f64>,
}

/// Directions response in `GeoJSON` form.
#[derive(Debug, Deserialize)]
pub struct DirectionsResponse {
    /// Routes; the first one is used.
    #[serde(default)]
    pub features: Vec<RouteFeature>,
}

/// A single route.
#[derive(Debug, Deserialize)]
pub struct RouteFeature {
    /// Route polyline.
    pub geometry: LineGeometry,
    /// Route metadata.
    pub properties: RouteProperties,
}

/// `GeoJSON` line string; each position is `[longitude, latitude, ...]`.
#[derive(Debug, Deserialize)]
pub struct LineGeometry {
    /// Positions in travel order.
    pub coordinates: Vec<Vec<f64>>,
}

/// Route properties.
#[derive(Debug, Deserialize)]
pub struct RouteProperties {
    /// Length and duration of the whole route.
    pub summary: RouteSummary,
}

/// Route totals.
#[derive(Debug, Deserialize)]
pub struct RouteSummary {
    /// Route length in metres. Absent for zero-length routes.
    #[serde(default)]
    pub distance: f64,
}

/// Error body returned with non-success HTTP statuses.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    /// Error detail.
    pub error: ErrorBody,
}

/// Error detail. The service sends either a structured object or a bare
/// message string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ErrorBody {
    /// `{"code": 2010, "message": "..."}`
    Detailed {
        /// Numeric service error code.
        code: i64,
        /// Service-supplied message.
        #[serde(default)]
        message: String,
    },
    /// `"Access to this API has been disallowed"`
    Message(String),
}

impl ErrorBody {
    /// Split into the code and message reported by
    /// [`fuelstop_core::RouteProviderError::ServiceError`]. Bare messages
    /// carry no code of their own, so `status` stands in for it.
    #[must_use]
    pub fn into_parts(self, status: u16) -> (String, String) {
        match self {
            Self::Detailed { code, message } => (code.to_string(), message),
            Self::Message(message) => (status.to_string(), message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialise_geocode_response() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "geometry": {"type": "Point", "coordinates": [-97.743, 30.267]},
                    "properties": {"label": "Austin, TX, USA"}
                }
            ]
        }"#;

        let response: GeocodeResponse = serde_json::from_str(json).expect("should deserialise");

        let first = response.features.first().expect("one match");
        assert_eq!(first.geometry.coordinates, vec![-97.743, 30.267]);
    }

    #[test]
    fn deserialise_empty_geocode_response() {
        let json = r#"{"type": "FeatureCollection", "features": []}"#;

        let response: GeocodeResponse = serde_json::from_str(json).expect("should deserialise");

        assert!(response.features.is_empty());
    }

    #[test]
    fn deserialise_directions_response() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "geometry": {"coordinates": [[-97.74, 30.27], [-97.70, 30.40, 180.0]]},
                    "properties": {"summary": {"distance": 16093.44, "duration": 900.0}}
                }
            ]
        }"#;

        let response: DirectionsResponse =
            serde_json::from_str(json).expect("should deserialise");

        let route = response.features.first().expect("one route");
        assert_eq!(route.geometry.coordinates.len(), 2);
        assert_eq!(route.properties.summary.distance, 16093.44);
    }

    #[test]
    fn summary_without_distance_defaults_to_zero() {
        let json = r#"{
            "features": [
                {
                    "geometry": {"coordinates": [[-97.74, 30.27]]},
                    "properties": {"summary": {}}
                }
            ]
        }"#;

        let response: DirectionsResponse =
            serde_json::from_str(json).expect("should deserialise");

        let route = response.features.first().expect("one route");
        assert_eq!(route.properties.summary.distance, 0.0);
    }

    #[test]
    fn deserialise_structured_error() {
        let json = r#"{"error": {"code": 2010, "message": "Could not find routable point"}}"#;

        let response: ErrorResponse = serde_json::from_str(json).expect("should deserialise");

        assert_eq!(
            response.error.into_parts(404),
            (
                "2010".to_owned(),
                "Could not find routable point".to_owned()
            )
        );
    }

    #[test]
    fn deserialise_message_error() {
        let json = r#"{"error": "Access to this API has been disallowed"}"#;

        let response: ErrorResponse = serde_json::from_str(json).expect("should deserialise");

        assert_eq!(
            response.error.into_parts(403),
            (
                "403".to_owned(),
                "Access to this API has been disallowed".to_owned()
            )
        );
    }
}
