//! Replaying a recorded arrangement onto a solved grid ("unsolve").
//!
//! Given a target grid, a fresh solved grid is walked towards the target
//! with pairwise swaps. The cells that are wrong in the target are kept in an
//! ordered list; the first of them is the pivot and is tried against every
//! later entry in turn. A trial swap that makes neither cell match the target
//! is undone, otherwise every cell that now matches leaves the list and the
//! scan restarts from the new first entry.
//!
//! Every trial swap and every undo is forwarded to the caller's visual board,
//! so that board ends in the same arrangement as the returned grid.

use crate::mirror::{check_dimensions, Swap, SwapSink};
use crate::{Grid, PuzzleError, Result};
use log::debug;

/// Result of [`reconcile`]
#[derive(Debug, Clone)]
pub struct Reconciliation {
    /// Grid whose arrangement equals the target's
    pub grid: Grid,
    /// Swaps that were kept, in order. Replaying them on a solved grid
    /// reproduces the target.
    pub swaps: Vec<Swap>,
    /// Number of pivots taken
    pub outer_iterations: usize,
    /// Number of trial swaps made
    pub comparisons: usize,
}

/// Build a grid with the same arrangement as `target`, starting from solved
/// and mirroring every step onto `visual`.
///
/// The result carries the target's pixel extents but no selected cell.
/// `visual` must start out solved for it to end up matching the target.
pub fn reconcile<S: SwapSink + ?Sized>(target: &Grid, visual: &mut S) -> Result<Reconciliation> {
    check_dimensions(&*visual, target.rows(), target.columns())?;

    let mut working = Grid::new(
        target.tile_width(),
        target.tile_height(),
        target.rows(),
        target.columns(),
    )?;
    let mut wrong = target.mismatched();
    let mut swaps = Vec::new();
    let mut outer_iterations = 0;
    let mut comparisons = 0;

    while let Some(&pivot) = wrong.first() {
        outer_iterations += 1;
        let mut progressed = false;

        for i in 1..wrong.len() {
            let partner = wrong[i];
            let swap = Swap::new(pivot, partner);
            visual.apply_swap(swap)?;
            working.swap(pivot, partner)?;
            comparisons += 1;

            let pivot_matches = working.tile(pivot)? == target.tile(pivot)?;
            let partner_matches = working.tile(partner)? == target.tile(partner)?;
            if !pivot_matches && !partner_matches {
                visual.apply_swap(swap)?;
                working.swap(pivot, partner)?;
                continue;
            }

            swaps.push(swap);
            wrong.retain(|&at| !(pivot_matches && at == pivot) && !(partner_matches && at == partner));
            progressed = true;
            break;
        }

        // Only reachable when the target is not a permutation of the cells
        if !progressed {
            return Err(PuzzleError::Unreconcilable(pivot));
        }
    }

    debug!(
        "reconciled {}x{} grid: {} swaps, {} pivots, {} trials",
        target.rows(),
        target.columns(),
        swaps.len(),
        outer_iterations,
        comparisons
    );

    Ok(Reconciliation {
        grid: working,
        swaps,
        outer_iterations,
        comparisons,
    })
}
