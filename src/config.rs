//! Sampler configuration.
//!
//! [`SamplerConfig`] lifts the two traversal constants (grid unit and
//! points per cell) into an explicit, validated configuration so the
//! coverage and deduplication properties can be exercised at multiple
//! grid resolutions. An optional seed makes the sampled output
//! reproducible: with a seed set, each cell draws from its own RNG
//! stream derived from the seed and the cell identifier, so the result
//! is independent of work-stealing schedule.

use crate::error::ConfigError;

/// Default fraction of the domain extent used as the grid step.
pub const DEFAULT_GRID_UNIT: f64 = 0.2;

/// Default number of candidate draws per grid cell.
pub const DEFAULT_POINTS_PER_CELL: usize = 10;

/// Smallest accepted grid unit (caps the grid at 1000 cells per dimension).
pub const MIN_GRID_UNIT: f64 = 1e-3;

/// Tolerance used to decide whether `1 / grid_unit` is an integer.
const RECIPROCAL_TOLERANCE: f64 = 1e-9;

/// Largest accepted points-per-cell count.
pub const MAX_POINTS_PER_CELL: usize = 1_000_000;

/// Immutable sampler configuration.
///
/// Use [`SamplerConfig::builder`] to construct instances; `Default`
/// yields the documented defaults (grid unit 0.2, 10 points per cell,
/// unseeded).
///
/// # Examples
///
/// ```rust
/// use orthant_sampler::SamplerConfig;
///
/// let config = SamplerConfig::builder()
///     .grid_unit(0.1)
///     .points_per_cell(100)
///     .seed(42)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.grid_unit(), 0.1);
/// assert_eq!(config.points_per_cell(), 100);
/// assert_eq!(config.seed(), Some(42));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SamplerConfig {
    /// Grid step as a fraction of the domain extent.
    grid_unit: f64,
    /// Candidate draws per grid cell.
    points_per_cell: usize,
    /// Optional seed for reproducible sampling.
    seed: Option<u64>,
}

impl SamplerConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> SamplerConfigBuilder {
        SamplerConfigBuilder::default()
    }

    /// Returns the grid step as a fraction of the domain extent.
    #[inline]
    pub fn grid_unit(&self) -> f64 {
        self.grid_unit
    }

    /// Returns the number of candidate draws per grid cell.
    #[inline]
    pub fn points_per_cell(&self) -> usize {
        self.points_per_cell
    }

    /// Returns the optional seed for reproducible sampling.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns the number of grid cells along each dimension.
    ///
    /// A grid unit of 0.2 partitions every axis into 5 cells.
    #[inline]
    pub fn cells_per_dimension(&self) -> u64 {
        (1.0 / self.grid_unit).round() as u64
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `grid_unit` is NaN, below [`MIN_GRID_UNIT`] or above 1.0
    /// - `grid_unit` does not partition the domain into a whole number
    ///   of cells (its reciprocal is not an integer)
    /// - `points_per_cell` is 0 or above [`MAX_POINTS_PER_CELL`]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.grid_unit.is_finite()
            || self.grid_unit < MIN_GRID_UNIT
            || self.grid_unit > 1.0
        {
            return Err(ConfigError::InvalidGridUnit(self.grid_unit));
        }
        // The grid arithmetic indexes cells as 1..=round(1/grid_unit);
        // a fractional reciprocal would either push the top cell past
        // the domain border or leave a slice of the domain uncovered.
        let cells = 1.0 / self.grid_unit;
        if (cells - cells.round()).abs() > RECIPROCAL_TOLERANCE {
            return Err(ConfigError::InvalidGridUnit(self.grid_unit));
        }
        if self.points_per_cell == 0 || self.points_per_cell > MAX_POINTS_PER_CELL {
            return Err(ConfigError::InvalidPointsPerCell(self.points_per_cell));
        }
        Ok(())
    }
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            grid_unit: DEFAULT_GRID_UNIT,
            points_per_cell: DEFAULT_POINTS_PER_CELL,
            seed: None,
        }
    }
}

/// Builder for [`SamplerConfig`].
///
/// Every field is optional; unset fields fall back to the documented
/// defaults. Validation happens once, at [`build`](Self::build).
///
/// # Examples
///
/// ```rust
/// use orthant_sampler::SamplerConfig;
///
/// let config = SamplerConfig::builder().build().unwrap();
/// assert_eq!(config.grid_unit(), 0.2);
/// assert_eq!(config.points_per_cell(), 10);
/// assert_eq!(config.seed(), None);
/// ```
#[derive(Clone, Debug, Default)]
pub struct SamplerConfigBuilder {
    grid_unit: Option<f64>,
    points_per_cell: Option<usize>,
    seed: Option<u64>,
}

impl SamplerConfigBuilder {
    /// Sets the grid step as a fraction of the domain extent.
    ///
    /// # Arguments
    ///
    /// * `grid_unit` - Fraction in [[`MIN_GRID_UNIT`], 1.0] whose
    ///   reciprocal is a whole number of cells (e.g. 0.5, 0.25, 0.2)
    #[inline]
    pub fn grid_unit(mut self, grid_unit: f64) -> Self {
        self.grid_unit = Some(grid_unit);
        self
    }

    /// Sets the number of candidate draws per grid cell.
    ///
    /// # Arguments
    ///
    /// * `points_per_cell` - Count in [1, [`MAX_POINTS_PER_CELL`]]
    #[inline]
    pub fn points_per_cell(mut self, points_per_cell: usize) -> Self {
        self.points_per_cell = Some(points_per_cell);
        self
    }

    /// Sets the seed for reproducible sampling.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any set parameter is outside its valid
    /// range.
    pub fn build(self) -> Result<SamplerConfig, ConfigError> {
        let config = SamplerConfig {
            grid_unit: self.grid_unit.unwrap_or(DEFAULT_GRID_UNIT),
            points_per_cell: self.points_per_cell.unwrap_or(DEFAULT_POINTS_PER_CELL),
            seed: self.seed,
        };
        config.validate()?;
        Ok(config)
    }
}
