//! Per-cell random sampling with boundary rejection.
//!
//! Each cell task draws a fixed number of candidate points uniformly
//! from its own cell, applies the domain shift, and rejects a whole
//! candidate as soon as any shifted coordinate turns out negative.
//! Together with the exhaustive cell traversal this implements
//! rejection sampling restricted to the non-negative orthant of the
//! shifted hyper-cube.

use std::hash::{Hash, Hasher};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::grid::CellId;
use crate::space::{CellCoord, Point, Shift};

/// Per-cell random number generator.
///
/// Every cell task owns its own generator; no RNG state is ever shared
/// across tasks. With a configured seed the stream is derived from the
/// seed and the cell identifier, so a cell's samples are a pure
/// function of `(seed, cell)` and the overall output does not depend on
/// the work-stealing schedule. Without a seed the stream comes from OS
/// entropy.
///
/// # Examples
///
/// ```rust
/// use orthant_sampler::{grid, CellCoord, CellRng};
///
/// let id = grid::cell_id(&CellCoord::uniform(["x"], 0.4), 2.0, 0.2);
///
/// let mut a = CellRng::for_cell(Some(42), &id);
/// let mut b = CellRng::for_cell(Some(42), &id);
/// assert_eq!(a.uniform(0.0, 1.0), b.uniform(0.0, 1.0));
/// ```
pub struct CellRng {
    inner: StdRng,
}

impl CellRng {
    /// Creates the generator for one cell.
    pub fn for_cell(seed: Option<u64>, id: &CellId) -> Self {
        let inner = match seed {
            Some(seed) => {
                let mut hasher = std::collections::hash_map::DefaultHasher::new();
                seed.hash(&mut hasher);
                id.as_str().hash(&mut hasher);
                StdRng::seed_from_u64(hasher.finish())
            }
            None => StdRng::from_entropy(),
        };
        Self { inner }
    }

    /// Draws a uniform value from the half-open interval `[lo, hi)`.
    #[inline]
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        self.inner.gen_range(lo..hi)
    }
}

/// Samples up to `points_per_cell` points from one grid cell.
///
/// For every dimension the raw value is drawn uniformly from
/// `[upper - grid_step, upper)` and translated by the shift offset.
/// A candidate is dropped in its entirety the moment one shifted
/// coordinate is negative; the remaining dimensions are not drawn.
///
/// The cell and the shift must cover the same dimension set; root
/// construction guarantees this.
pub fn sample_cell(
    cell: &CellCoord,
    shift: &Shift,
    grid_step: f64,
    points_per_cell: usize,
    rng: &mut CellRng,
) -> Vec<Point> {
    let mut points = Vec::with_capacity(points_per_cell);

    for _ in 0..points_per_cell {
        let mut coords = Vec::with_capacity(cell.len());
        let mut non_negative = true;

        for ((dim, upper), (shift_dim, offset)) in cell.iter().zip(shift.iter()) {
            debug_assert_eq!(dim, shift_dim, "cell and shift dimension sets must match");
            let value = rng.uniform(upper - grid_step, upper) + offset;
            if value < 0.0 {
                non_negative = false;
                break;
            }
            coords.push((dim, value));
        }

        if non_negative {
            points.push(Point::from_iter(coords));
        }
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::cell_id;

    fn rng_for(cell: &CellCoord, seed: u64) -> CellRng {
        CellRng::for_cell(Some(seed), &cell_id(cell, 2.0, 0.2))
    }

    #[test]
    fn test_samples_stay_inside_shifted_cell() {
        // Cell [0.4, 0.8) per axis, shift +4.0: accepted values in [4.4, 4.8).
        let cell = CellCoord::uniform(["x", "y"], 0.8);
        let center = Point::from_iter([("x", 5.0), ("y", 5.0)]);
        let shift = Shift::from_center(&center, 1.0);
        let mut rng = rng_for(&cell, 1);

        let points = sample_cell(&cell, &shift, 0.4, 100, &mut rng);
        assert_eq!(points.len(), 100, "fully positive cell rejects nothing");
        for p in &points {
            for (_, v) in p.iter() {
                assert!((4.4..4.8).contains(&v), "value {v} outside shifted cell");
            }
        }
    }

    #[test]
    fn test_fully_negative_cell_rejects_everything() {
        // Cell [0.0, 0.4) shifted by -10: every draw is negative.
        let cell = CellCoord::uniform(["x"], 0.4);
        let center = Point::from_iter([("x", -9.0)]);
        let shift = Shift::from_center(&center, 1.0);
        let mut rng = rng_for(&cell, 2);

        let points = sample_cell(&cell, &shift, 0.4, 50, &mut rng);
        assert!(points.is_empty());
    }

    #[test]
    fn test_no_partial_points_emitted() {
        // "a" always yields an acceptable value, "b" always a negative
        // one. A rejected candidate must not leak its "a" coordinate as
        // a partial point: the result is empty, not one-dimensional.
        let cell = CellCoord::from_iter([("a", 2.0), ("b", 0.4)]);
        let center = Point::from_iter([("a", 5.0), ("b", -9.0)]);
        let shift = Shift::from_center(&center, 1.0);
        let mut rng = rng_for(&cell, 3);

        let points = sample_cell(&cell, &shift, 0.4, 200, &mut rng);
        assert!(points.is_empty());
    }

    #[test]
    fn test_seeded_reproducibility() {
        let cell = CellCoord::uniform(["x", "y"], 1.2);
        let center = Point::from_iter([("x", 3.0), ("y", 3.0)]);
        let shift = Shift::from_center(&center, 1.0);

        let a = sample_cell(&cell, &shift, 0.4, 25, &mut rng_for(&cell, 42));
        let b = sample_cell(&cell, &shift, 0.4, 25, &mut rng_for(&cell, 42));
        assert_eq!(a, b);

        let c = sample_cell(&cell, &shift, 0.4, 25, &mut rng_for(&cell, 43));
        assert_ne!(a, c, "different seeds should produce different draws");
    }

    #[test]
    fn test_distinct_cells_get_distinct_streams() {
        let center = Point::from_iter([("x", 3.0)]);
        let shift = Shift::from_center(&center, 1.0);

        let low = CellCoord::uniform(["x"], 0.4);
        let high = CellCoord::uniform(["x"], 0.8);
        let mut rng_low = rng_for(&low, 42);
        let mut rng_high = rng_for(&high, 42);

        // Same seed, different cell identifiers: independent streams.
        let a = rng_low.uniform(0.0, 1.0);
        let b = rng_high.uniform(0.0, 1.0);
        assert_ne!(a, b);
    }
}
