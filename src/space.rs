//! Dimension-keyed data model for the sampling domain.
//!
//! Every value in the system is a per-dimension mapping: sampled
//! [`Point`]s, grid-cell [`CellCoord`]s (upper bounds), the
//! [`DomainBorder`] carried by the guide chain, and the [`Shift`]
//! that re-centers raw samples on the caller's coordinate frame.
//!
//! All four are backed by `BTreeMap` so dimension iteration order is
//! the sorted name order. That choice is load-bearing: it fixes the
//! decrement-branch spawn order and the canonical guide enumeration,
//! making coverage and aggregation order reproducible across runs.

use std::collections::BTreeMap;

/// A sampled point: one real value per dimension name.
///
/// Immutable once produced.
///
/// # Examples
///
/// ```rust
/// use orthant_sampler::Point;
///
/// let p = Point::from_iter([("x", 1.5), ("y", 0.25)]);
/// assert_eq!(p.get("x"), Some(1.5));
/// assert_eq!(p.get("z"), None);
/// assert_eq!(p.len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Point {
    coords: BTreeMap<String, f64>,
}

impl Point {
    /// Returns the coordinate for `dimension`, if present.
    #[inline]
    pub fn get(&self, dimension: &str) -> Option<f64> {
        self.coords.get(dimension).copied()
    }

    /// Iterates over `(dimension, value)` pairs in sorted name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.coords.iter().map(|(d, v)| (d.as_str(), *v))
    }

    /// Iterates over dimension names in sorted order.
    pub fn dimensions(&self) -> impl Iterator<Item = &str> {
        self.coords.keys().map(String::as_str)
    }

    /// Number of dimensions.
    #[inline]
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    /// Whether the point has no dimensions.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for Point {
    fn from_iter<T: IntoIterator<Item = (S, f64)>>(iter: T) -> Self {
        Self {
            coords: iter.into_iter().map(|(d, v)| (d.into(), v)).collect(),
        }
    }
}

/// A grid cell, identified by the *upper* bound of the cell along every
/// axis. The cell spans `[upper - grid_step, upper]` per dimension.
#[derive(Clone, Debug, PartialEq)]
pub struct CellCoord {
    uppers: BTreeMap<String, f64>,
}

impl CellCoord {
    /// Builds a cell with the same upper bound along every dimension.
    pub fn uniform<'a>(dimensions: impl IntoIterator<Item = &'a str>, upper: f64) -> Self {
        Self {
            uppers: dimensions
                .into_iter()
                .map(|d| (d.to_string(), upper))
                .collect(),
        }
    }

    /// Returns the upper bound along `dimension`, if present.
    #[inline]
    pub fn upper(&self, dimension: &str) -> Option<f64> {
        self.uppers.get(dimension).copied()
    }

    /// Returns a copy of this cell with the upper bound along
    /// `dimension` replaced.
    pub fn with_upper(&self, dimension: &str, upper: f64) -> Self {
        let mut uppers = self.uppers.clone();
        uppers.insert(dimension.to_string(), upper);
        Self { uppers }
    }

    /// Iterates over `(dimension, upper)` pairs in sorted name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.uppers.iter().map(|(d, v)| (d.as_str(), *v))
    }

    /// Iterates over dimension names in sorted order.
    pub fn dimensions(&self) -> impl Iterator<Item = &str> {
        self.uppers.keys().map(String::as_str)
    }

    /// Number of dimensions.
    #[inline]
    pub fn len(&self) -> usize {
        self.uppers.len()
    }

    /// Whether the cell has no dimensions.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.uppers.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for CellCoord {
    fn from_iter<T: IntoIterator<Item = (S, f64)>>(iter: T) -> Self {
        Self {
            uppers: iter.into_iter().map(|(d, v)| (d.into(), v)).collect(),
        }
    }
}

/// The domain's full extent along every axis (`2 × radius` everywhere
/// in this system). Only the guide chain carries a border; its absence
/// marks a decrement-only task.
#[derive(Clone, Debug, PartialEq)]
pub struct DomainBorder {
    extents: BTreeMap<String, f64>,
}

impl DomainBorder {
    /// Builds a border with the same extent along every dimension.
    pub fn uniform<'a>(dimensions: impl IntoIterator<Item = &'a str>, extent: f64) -> Self {
        Self {
            extents: dimensions
                .into_iter()
                .map(|d| (d.to_string(), extent))
                .collect(),
        }
    }

    /// Returns the extent along `dimension`, if present.
    #[inline]
    pub fn extent(&self, dimension: &str) -> Option<f64> {
        self.extents.get(dimension).copied()
    }

    /// Iterates over `(dimension, extent)` pairs in sorted name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.extents.iter().map(|(d, v)| (d.as_str(), *v))
    }
}

/// Per-dimension translation re-centering raw in-cell samples on the
/// caller's center point: `shift = center - radius` per dimension.
#[derive(Clone, Debug, PartialEq)]
pub struct Shift {
    offsets: BTreeMap<String, f64>,
}

impl Shift {
    /// Computes the shift for a domain centered on `center` with the
    /// given radius, over the dimensions present in `center`.
    pub fn from_center(center: &Point, radius: f64) -> Self {
        Self {
            offsets: center
                .iter()
                .map(|(d, v)| (d.to_string(), v - radius))
                .collect(),
        }
    }

    /// Like [`from_center`](Self::from_center), but restricted to the
    /// named dimensions. A center is allowed to carry coordinates
    /// beyond the sampled dimension set; those must not contribute
    /// offsets, or they would misalign against cell coordinates.
    pub fn for_dimensions<'a>(
        center: &Point,
        radius: f64,
        dimensions: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        Self {
            offsets: dimensions
                .into_iter()
                .filter_map(|d| center.get(d).map(|v| (d.to_string(), v - radius)))
                .collect(),
        }
    }

    /// Returns the offset along `dimension`, if present.
    #[inline]
    pub fn offset(&self, dimension: &str) -> Option<f64> {
        self.offsets.get(dimension).copied()
    }

    /// Iterates over `(dimension, offset)` pairs in sorted name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.offsets.iter().map(|(d, v)| (d.as_str(), *v))
    }
}
