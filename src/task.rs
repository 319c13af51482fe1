//! Recursive, parallel cell tasks.
//!
//! One [`CellTask`] owns one grid cell. Guide tasks (those carrying the
//! domain border) extend the canonical enumeration by one cell; every
//! task additionally branches into the one-step-down neighbor along
//! each dimension. A child is spawned only after its cell identifier
//! has been claimed in the shared [`VisitedSet`], so each cell is
//! explored by exactly one task no matter how many paths could reach
//! it.
//!
//! Execution is a rayon fork/join: a task starts its children on the
//! work-stealing pool, samples its own cell while they run, and
//! appends their results in spawn order (guide first, then decrement
//! branches in sorted dimension order). The only blocking point is the
//! join on a task's own children. Termination is structural: a decrement strictly
//! lowers one grid index toward the fixed minimum, and the guide
//! enumeration is strictly monotonic and bounded by the border.

use std::sync::Arc;

use tracing::trace;

use crate::config::SamplerConfig;
use crate::grid;
use crate::sampler::{self, CellRng};
use crate::space::{CellCoord, DomainBorder, Point, Shift};
use crate::visited::VisitedSet;

/// State shared read-only (or via atomic claims) by every task of one
/// run.
pub(crate) struct TraversalContext {
    /// Translation into the caller's coordinate frame.
    pub shift: Shift,
    /// Shared visited-cell set; the run's only shared mutable state.
    pub visited: VisitedSet,
    /// Grid resolution, draw count and seed.
    pub config: SamplerConfig,
    /// Full domain extent (`2 × radius`).
    pub domain_size: f64,
}

/// One grid cell's unit of work.
pub(crate) struct CellTask {
    cell: CellCoord,
    /// Present on the root and on guide children; absent on decrement
    /// branches.
    border: Option<DomainBorder>,
}

impl CellTask {
    pub(crate) fn new(cell: CellCoord, border: Option<DomainBorder>) -> Self {
        Self { cell, border }
    }

    /// Runs this task to completion and returns its merged point list:
    /// its own cell's samples followed by each child's result in spawn
    /// order.
    pub(crate) fn compute(self, ctx: &Arc<TraversalContext>) -> Vec<Point> {
        let grid_unit = ctx.config.grid_unit();
        let mut children = Vec::new();

        // Guide step: continue the canonical enumeration. A cell the
        // enumeration reaches may already be claimed by a decrement
        // branch; skip past it so the chain keeps introducing cells
        // until the odometer is exhausted.
        if let Some(border) = &self.border {
            let mut cursor = self.cell.clone();
            while let Some(next) =
                grid::next_guide_cell(&cursor, border, grid_unit, ctx.domain_size)
            {
                let id = grid::cell_id(&next, ctx.domain_size, grid_unit);
                let claimed = ctx.visited.claim(id);
                cursor = next.clone();
                if claimed {
                    children.push(CellTask::new(next, Some(border.clone())));
                    break;
                }
            }
        }

        // Decrement branches, in sorted dimension order. First claim
        // wins; a losing claim means another path already owns the
        // neighbor.
        let dimensions: Vec<&str> = self.cell.dimensions().collect();
        for dimension in dimensions {
            let Some(neighbor) =
                grid::decremented_neighbor(dimension, &self.cell, grid_unit, ctx.domain_size)
            else {
                continue;
            };
            let id = grid::cell_id(&neighbor, ctx.domain_size, grid_unit);
            if ctx.visited.claim(id) {
                children.push(CellTask::new(neighbor, None));
            }
        }

        trace!(
            cell = %grid::cell_id(&self.cell, ctx.domain_size, grid_unit),
            children = children.len(),
            guide = self.border.is_some(),
            "computing cell task"
        );

        // Children go onto the pool first so the guide chain keeps
        // advancing while this task samples its own cell; the scope
        // exit is the join barrier. Aggregation stays in spawn order:
        // own cell first, then each child's slot.
        let own_id = grid::cell_id(&self.cell, ctx.domain_size, grid_unit);
        let mut rng = CellRng::for_cell(ctx.config.seed(), &own_id);
        let mut slots: Vec<Option<Vec<Point>>> = (0..children.len()).map(|_| None).collect();
        let mut points = Vec::new();

        rayon::scope(|s| {
            for (slot, child) in slots.iter_mut().zip(children) {
                s.spawn(move |_| *slot = Some(child.compute(ctx)));
            }
            points = sampler::sample_cell(
                &self.cell,
                &ctx.shift,
                grid::grid_step(grid_unit, ctx.domain_size),
                ctx.config.points_per_cell(),
                &mut rng,
            );
        });

        for result in slots.into_iter().flatten() {
            points.extend(result);
        }
        points
    }
}
