//! Injected random source.

/// Uniform index selection, injected so tests can seed it.
pub trait RandomSource {
    /// A uniform index in `[0, len)`. `len` is never zero.
    fn pick_index(&mut self, len: usize) -> usize;
}

impl<R: rand::Rng> RandomSource for R {
    fn pick_index(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_pick_index_in_range() {
        let mut rng = SmallRng::seed_from_u64(11);
        for _ in 0..200 {
            assert!(rng.pick_index(3) < 3);
        }
        assert_eq!(rng.pick_index(1), 0);
    }
}
