//! Entry point: domain validation and root-task construction.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::debug;

use crate::config::SamplerConfig;
use crate::error::DomainError;
use crate::grid::{self, CellId};
use crate::space::{CellCoord, DomainBorder, Point, Shift};
use crate::task::{CellTask, TraversalContext};
use crate::visited::VisitedSet;

/// Grid-stratified rejection sampler over the non-negative orthant.
///
/// Partitions the hyper-cube of side `2 × radius` centered on the
/// caller's point into a regular grid, visits every cell exactly once
/// with a parallel recursive traversal, and draws a fixed number of
/// uniform points per cell, discarding candidates with any negative
/// coordinate.
///
/// # Examples
///
/// ```rust
/// use orthant_sampler::{OrthantSampler, Point, SamplerConfig};
///
/// let config = SamplerConfig::builder().seed(42).build().unwrap();
/// let sampler = OrthantSampler::new(config);
///
/// let center = Point::from_iter([("x", 5.0)]);
/// let points = sampler.generate(&["x"], 1.0, &center).unwrap();
///
/// assert!(points.iter().all(|p| {
///     let x = p.get("x").unwrap();
///     (4.0..6.0).contains(&x)
/// }));
/// ```
#[derive(Clone, Debug)]
pub struct OrthantSampler {
    config: SamplerConfig,
}

/// Outcome of one sampling run, point list plus the traversal audit.
///
/// The visited-cell audit is the deduplication record: each identifier
/// appears exactly once, and the set equals the full enumerable grid
/// regardless of seed or scheduling.
#[derive(Clone, Debug)]
pub struct SamplingReport {
    /// All accepted points, in the deterministic aggregation order.
    pub points: Vec<Point>,
    /// Sorted identifiers of every claimed cell.
    pub visited_cells: Vec<CellId>,
}

impl SamplingReport {
    /// Number of distinct cells visited by the run.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.visited_cells.len()
    }
}

impl OrthantSampler {
    /// Creates a sampler with the given configuration.
    pub fn new(config: SamplerConfig) -> Self {
        Self { config }
    }

    /// Creates a sampler with the default configuration
    /// (grid unit 0.2, 10 points per cell, unseeded).
    pub fn with_defaults() -> Self {
        Self::new(SamplerConfig::default())
    }

    /// Returns the sampler's configuration.
    #[inline]
    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Generates points for the domain of the given radius centered on
    /// `center`, over the named dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError`] before any task is spawned if the radius
    /// is not finite and positive, the dimension set is empty, or the
    /// center lacks a finite value for a named dimension.
    pub fn generate(
        &self,
        dimensions: &[&str],
        radius: f64,
        center: &Point,
    ) -> Result<Vec<Point>, DomainError> {
        self.generate_with_report(dimensions, radius, center)
            .map(|report| report.points)
    }

    /// Like [`generate`](Self::generate), additionally returning the
    /// visited-cell audit.
    pub fn generate_with_report(
        &self,
        dimensions: &[&str],
        radius: f64,
        center: &Point,
    ) -> Result<SamplingReport, DomainError> {
        let dimensions = validate_domain(dimensions, radius, center)?;
        let domain_size = 2.0 * radius;
        let grid_unit = self.config.grid_unit();
        let step = grid::grid_step(grid_unit, domain_size);

        debug!(
            dimensions = dimensions.len(),
            radius,
            cells_per_dimension = self.config.cells_per_dimension(),
            seeded = self.config.seed().is_some(),
            "starting grid traversal"
        );

        // The shift must cover exactly the sampled dimensions; a center
        // may carry extra coordinates that must not contribute offsets.
        let ctx = Arc::new(TraversalContext {
            shift: Shift::for_dimensions(center, radius, dimensions.iter().copied()),
            visited: VisitedSet::new(),
            config: self.config.clone(),
            domain_size,
        });

        // Root: the first grid cell nearest the origin corner, claimed
        // up front like every other cell.
        let root_cell = CellCoord::uniform(dimensions.iter().copied(), step);
        let root_claimed = ctx
            .visited
            .claim(grid::cell_id(&root_cell, domain_size, grid_unit));
        debug_assert!(root_claimed, "fresh visited set cannot hold the root cell");

        let border = DomainBorder::uniform(dimensions.iter().copied(), domain_size);
        let points = CellTask::new(root_cell, Some(border)).compute(&ctx);

        let visited_cells = ctx.visited.audit();
        debug!(
            points = points.len(),
            cells = visited_cells.len(),
            "grid traversal finished"
        );

        Ok(SamplingReport {
            points,
            visited_cells,
        })
    }
}

/// Generates points with the default configuration.
///
/// Convenience wrapper over [`OrthantSampler::with_defaults`].
///
/// # Errors
///
/// See [`OrthantSampler::generate`].
pub fn generate(
    dimensions: &[&str],
    radius: f64,
    center: &Point,
) -> Result<Vec<Point>, DomainError> {
    OrthantSampler::with_defaults().generate(dimensions, radius, center)
}

/// Validates the generation inputs and returns the deduplicated,
/// sorted dimension names.
fn validate_domain<'a>(
    dimensions: &[&'a str],
    radius: f64,
    center: &Point,
) -> Result<Vec<&'a str>, DomainError> {
    if !radius.is_finite() || radius <= 0.0 {
        return Err(DomainError::InvalidRadius(radius));
    }

    let names: BTreeSet<&str> = dimensions.iter().copied().collect();
    if names.is_empty() {
        return Err(DomainError::EmptyDimensions);
    }

    for name in &names {
        match center.get(name) {
            None => return Err(DomainError::MissingCenterCoordinate(name.to_string())),
            Some(value) if !value.is_finite() => {
                return Err(DomainError::NonFiniteCenterCoordinate(name.to_string()))
            }
            Some(_) => {}
        }
    }

    Ok(names.into_iter().collect())
}
