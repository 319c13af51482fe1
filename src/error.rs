//! Error types for the orthant sampler.
//!
//! Two error families exist: [`ConfigError`] for malformed sampler
//! configuration (caught at build time by the config builder) and
//! [`DomainError`] for malformed generation inputs (caught before any
//! task is spawned). Everything else in the system is normal control
//! flow: an empty cell, an exhausted guide chain and a rejected draw
//! are all legitimate outcomes, not errors.

use thiserror::Error;

/// Sampler configuration error.
///
/// Returned by [`SamplerConfigBuilder::build`](crate::config::SamplerConfigBuilder::build)
/// when a parameter is outside its valid range.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// Grid unit outside the valid range, or one that does not split
    /// the domain into a whole number of cells.
    #[error("invalid grid unit {0}: must be finite, in [{min}, 1.0] and a reciprocal of a whole cell count", min = crate::config::MIN_GRID_UNIT)]
    InvalidGridUnit(f64),

    /// Points-per-cell count outside the valid range.
    #[error("invalid points per cell {0}: must be in [1, {max}]", max = crate::config::MAX_POINTS_PER_CELL)]
    InvalidPointsPerCell(usize),
}

/// Invalid sampling domain.
///
/// Surfaced synchronously by [`OrthantSampler::generate`](crate::OrthantSampler::generate)
/// before any cell task is spawned; no partial work occurs.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum DomainError {
    /// Radius is not a finite, strictly positive real.
    #[error("invalid radius {0}: must be finite and strictly positive")]
    InvalidRadius(f64),

    /// The dimension-name set is empty.
    #[error("dimension set is empty: at least one dimension is required")]
    EmptyDimensions,

    /// The center point supplies no value for a named dimension.
    #[error("center point is missing a value for dimension '{0}'")]
    MissingCenterCoordinate(String),

    /// The center point carries a NaN or infinite coordinate.
    #[error("center coordinate for dimension '{0}' is not finite")]
    NonFiniteCenterCoordinate(String),
}
