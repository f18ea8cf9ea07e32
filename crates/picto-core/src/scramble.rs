use crate::mirror::{check_dimensions, Swap, SwapSink};
use crate::{Grid, PuzzleRng, RandomSource, Result};
use log::debug;

/// Shuffles a grid by swapping random pairs of distinct cells.
///
/// Only swaps of two different cells count; a draw that lands on the same
/// cell twice is thrown away and drawn again. The result can still be solved
/// by chance on very small grids.
pub struct Scrambler<R: RandomSource = PuzzleRng> {
    rng: R,
}

impl Default for Scrambler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scrambler {
    /// Create a scrambler seeded from the OS
    pub fn new() -> Self {
        Self {
            rng: PuzzleRng::new(),
        }
    }

    /// Create a scrambler with a specific seed for reproducibility
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: PuzzleRng::with_seed(seed),
        }
    }
}

impl<R: RandomSource> Scrambler<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Perform `rows * columns` swaps, mirroring each one to `sink`
    pub fn scramble<S: SwapSink + ?Sized>(&mut self, grid: &mut Grid, sink: &mut S) -> Result<Vec<Swap>> {
        let count = grid.rows() * grid.columns();
        self.scramble_times(grid, count, sink)
    }

    /// Perform exactly `count` swaps of distinct cells
    pub fn scramble_times<S: SwapSink + ?Sized>(
        &mut self,
        grid: &mut Grid,
        count: usize,
        sink: &mut S,
    ) -> Result<Vec<Swap>> {
        check_dimensions(&*sink, grid.rows(), grid.columns())?;
        if grid.len() < 2 {
            debug!("nothing to scramble on a single-tile grid");
            return Ok(Vec::new());
        }

        let mut swaps = Vec::with_capacity(count);
        let mut rejected = 0usize;
        while swaps.len() < count {
            let first = grid.random_coordinate(&mut self.rng);
            let second = grid.random_coordinate(&mut self.rng);
            if first == second {
                rejected += 1;
                continue;
            }
            let swap = Swap::new(first, second);
            sink.apply_swap(swap)?;
            grid.swap(first, second)?;
            swaps.push(swap);
        }

        debug!(
            "scrambled {}x{} grid with {} swaps ({} rejected draws)",
            grid.rows(),
            grid.columns(),
            swaps.len(),
            rejected
        );
        Ok(swaps)
    }
}
