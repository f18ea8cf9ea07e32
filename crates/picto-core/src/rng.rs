use log::debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Uniform integer generator consumed by the scrambler.
///
/// Implementations must return a value in `0..bound`; `bound` is never zero.
pub trait RandomSource {
    fn next_below(&mut self, bound: usize) -> usize;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_below(&mut self, bound: usize) -> usize {
        (**self).next_below(bound)
    }
}

/// Small PCG-style generator, seeded from the OS or from a fixed seed
#[derive(Debug, Clone)]
pub struct PuzzleRng {
    state: u64,
}

impl Default for PuzzleRng {
    fn default() -> Self {
        Self::new()
    }
}

impl PuzzleRng {
    pub fn new() -> Self {
        Self::with_seed(os_seed())
    }

    /// Nearby seeds are spread through a SplitMix64 finalizer before use
    pub fn with_seed(seed: u64) -> Self {
        let mut z = seed.wrapping_add(0x9e37_79b9_7f4a_7c15);
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        Self { state: z ^ (z >> 31) }
    }

    fn next_u32(&mut self) -> u32 {
        let old = self.state;
        self.state = old
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let xorshifted = (((old >> 18) ^ old) >> 27) as u32;
        xorshifted.rotate_right((old >> 59) as u32)
    }
}

fn os_seed() -> u64 {
    let mut bytes = [0u8; 8];
    match getrandom::getrandom(&mut bytes) {
        Ok(()) => u64::from_le_bytes(bytes),
        Err(err) => {
            static FALLBACK: AtomicU64 = AtomicU64::new(0);
            let nanos = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|elapsed| elapsed.as_nanos() as u64)
                .unwrap_or_default();
            debug!("no OS randomness ({}), seeding from the clock", err);
            nanos ^ FALLBACK.fetch_add(1, Ordering::Relaxed)
        }
    }
}

impl RandomSource for PuzzleRng {
    fn next_below(&mut self, bound: usize) -> usize {
        (self.next_u32() as usize) % bound
    }
}
