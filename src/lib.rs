//! # Orthant Sampler
//!
//! Grid-stratified parallel Monte Carlo point sampler over the
//! non-negative orthant.
//!
//! The sampler draws pseudo-random points approximately uniformly from
//! an n-dimensional hyper-cube of side `2 × radius` centered on a
//! caller-supplied point, keeping only points whose coordinates are all
//! non-negative. The cube is partitioned into a regular grid; a
//! recursive, work-stealing traversal visits every grid cell exactly
//! once and draws a fixed number of uniform candidates per cell,
//! rejecting any candidate with a negative coordinate.
//!
//! # Architecture
//!
//! ```text
//! OrthantSampler
//! ├── SamplerConfig   (grid resolution, draws per cell, seed)
//! ├── CellTask        (recursive fork/join over grid cells)
//! │   ├── grid        (pure index functions: guide / decrement / id)
//! │   ├── VisitedSet  (atomic claim; the only shared mutable state)
//! │   └── sampler     (per-cell uniform draws + boundary rejection)
//! └── SamplingReport  (points + visited-cell audit)
//! ```
//!
//! Traversal structure: one *guide chain* walks the canonical
//! enumeration of the grid; every task also branches into the
//! one-step-down neighbor along each dimension. A cell identifier is
//! claimed in the shared visited set before its task is spawned, so
//! each cell is explored by exactly one task regardless of how many
//! paths could reach it.
//!
//! # Usage Example
//!
//! ```rust
//! use orthant_sampler::{generate, Point};
//!
//! let center = Point::from_iter([("x", 5.0), ("y", 5.0)]);
//! let points = generate(&["x", "y"], 1.0, &center).unwrap();
//!
//! // Every coordinate is non-negative and inside the shifted domain.
//! for p in &points {
//!     assert!(p.get("x").unwrap() >= 0.0);
//!     assert!(p.get("y").unwrap() >= 0.0);
//! }
//! ```
//!
//! # Reproducibility
//!
//! The *set of visited cells* is deterministic for a fixed grid unit,
//! radius and dimension set. The sampled coordinates are additionally
//! reproducible when a seed is configured: each cell draws from an RNG
//! stream derived from the seed and the cell identifier, so output does
//! not depend on the work-stealing schedule.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

// Configuration (grid resolution, draws per cell, seed)
pub mod config;

// Error taxonomy (config validation, domain validation)
pub mod error;

// Grid index functions (guide enumeration, decrement, cell identity)
pub mod grid;

// Per-cell sampling with boundary rejection
pub mod sampler;

// Dimension-keyed data model
pub mod space;

// Shared visited-cell set
pub mod visited;

// Entry point and report types
mod generator;

// Recursive cell tasks (crate-internal; driven by the generator)
mod task;

// Re-export commonly used items for convenience
pub use config::{
    SamplerConfig, SamplerConfigBuilder, DEFAULT_GRID_UNIT, DEFAULT_POINTS_PER_CELL,
    MAX_POINTS_PER_CELL, MIN_GRID_UNIT,
};
pub use error::{ConfigError, DomainError};
pub use generator::{generate, OrthantSampler, SamplingReport};
pub use grid::CellId;
pub use sampler::CellRng;
pub use space::{CellCoord, DomainBorder, Point, Shift};
pub use visited::VisitedSet;
