//! Read access to the fuel station catalog.
//!
//! The planner only needs the full list of priced stations; how they are
//! stored is up to the implementer. `fuelstop-data` reads them from CSV.

use thiserror::Error;

use crate::Station;

/// Errors from [`StationCatalog::load_stations`].
///
/// Individual malformed records are not errors: implementations skip and
/// report them. These variants cover a catalog that cannot be read at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The catalog source could not be opened or read.
    #[error("failed to read station catalog {location}: {message}")]
    Read {
        /// Path or other identifier of the catalog.
        location: String,
        /// Underlying error message.
        message: String,
    },
    /// The catalog lacks a field every record needs.
    #[error("station catalog {location} is missing column \"{column}\"")]
    MissingColumn {
        /// Path or other identifier of the catalog.
        location: String,
        /// Name of the absent column.
        column: String,
    },
}

/// A source of priced fuel stations.
///
/// # Examples
///
/// ```rust
/// use fuelstop_core::{CatalogError, Station, StationCatalog};
///
/// struct Fixed(Vec<Station>);
///
/// impl StationCatalog for Fixed {
///     fn load_stations(&self) -> Result<Vec<Station>, CatalogError> {
///         Ok(self.0.clone())
///     }
/// }
///
/// let catalog = Fixed(vec![Station::new("A", 35.0, -100.0, 3.1, "Exit 1")]);
/// assert_eq!(catalog.load_stations()?.len(), 1);
/// # Ok::<(), CatalogError>(())
/// ```
pub trait StationCatalog {
    /// Return every usable record in the catalog, in catalog order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when the catalog cannot be read or lacks a
    /// required column.
    fn load_stations(&self) -> Result<Vec<Station>, CatalogError>;
}
