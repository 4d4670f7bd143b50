//! Non-fatal problems collected while indexing and querying.

use std::fmt;

use crate::CoordinateError;

/// An input item that was skipped instead of aborting the operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    /// A catalog station had an unusable position and was not indexed.
    Station {
        /// Position of the station in the catalog slice.
        index: usize,
        /// Station name, for log readability.
        name: String,
        /// Why the position was rejected.
        reason: CoordinateError,
    },
    /// A route point was unusable and was not queried.
    RouteCoordinate {
        /// Position of the point in the route.
        index: usize,
        /// Why the point was rejected.
        reason: CoordinateError,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Station {
                index,
                name,
                reason,
            } => write!(f, "skipped station {index} ({name}): {reason}"),
            Self::RouteCoordinate { index, reason } => {
                write!(f, "skipped route coordinate {index}: {reason}")
            }
        }
    }
}
