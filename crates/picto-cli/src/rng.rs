use picto_core::RandomSource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Feeds the engine from `rand`'s standard generator
pub struct RandSource(StdRng);

impl RandSource {
    /// Seeded when `seed` is given, otherwise from OS entropy
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self(StdRng::seed_from_u64(seed)),
            None => Self(StdRng::from_entropy()),
        }
    }
}

impl RandomSource for RandSource {
    fn next_below(&mut self, bound: usize) -> usize {
        self.0.gen_range(0..bound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_source_repeats() {
        let mut a = RandSource::new(Some(4));
        let mut b = RandSource::new(Some(4));
        for bound in 1..30 {
            let value = a.next_below(bound);
            assert!(value < bound);
            assert_eq!(value, b.next_below(bound));
        }
    }
}
