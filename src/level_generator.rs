use rand::prelude::*;

/// Upon the insertion of a new node in the list, the node is replicated to
/// high levels with a certain probability as determined by a
/// `LevelGenerator`.
pub trait LevelGenerator {
    /// The total number of levels that are assumed to exist for this level
    /// generator.
    fn total(&self) -> usize;

    /// Generate a random height for a new node in the range `[1, total]`.
    ///
    /// This must never return a height that is `> self.total()`, and must
    /// not depend on anything but the generator's own randomness.
    fn random(&mut self) -> usize;
}

/// A level generator which will produce geometrically distributed heights.
///
/// The probability of generating height `n + 1` is `p` times the probability
/// of generating height `n`, with the distribution truncated at the maximum
/// number of levels allowed.
pub struct GeometricalLevelGenerator {
    total: usize,
    p: f64,
    rng: SmallRng, // Fast generator
}

impl GeometricalLevelGenerator {
    /// Create a new GeometricalLevelGenerator with `total` number of levels,
    /// and `p` as the probability that a given node is present in the next
    /// level.
    ///
    /// # Panics
    ///
    /// `p` must be between 0 and 1 and will panic otherwise.  Similarly,
    /// `total` must be at greater or equal to 1.
    pub fn new(total: usize, p: f64) -> Self {
        if total == 0 {
            panic!("total must be non-zero.");
        }
        if p <= 0.0 || p >= 1.0 {
            panic!("p must be in (0, 1).");
        }
        GeometricalLevelGenerator {
            total,
            p,
            rng: SmallRng::from_rng(thread_rng()).unwrap(),
        }
    }
}

impl LevelGenerator for GeometricalLevelGenerator {
    fn random(&mut self) -> usize {
        let mut height = 1;
        while height < self.total && self.rng.gen::<f64>() < self.p {
            height += 1;
        }
        height
    }

    fn total(&self) -> usize {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use crate::level_generator::{
        GeometricalLevelGenerator,
        LevelGenerator,
    };

    #[test]
    #[should_panic]
    fn invalid_total() {
        GeometricalLevelGenerator::new(0, 0.5);
    }

    #[test]
    #[should_panic]
    fn invalid_p_0() {
        GeometricalLevelGenerator::new(1, 0.0);
    }

    #[test]
    #[should_panic]
    fn invalid_p_1() {
        GeometricalLevelGenerator::new(1, 1.0);
    }

    #[test]
    fn new() {
        GeometricalLevelGenerator::new(1, 0.5);
    }

    #[test]
    fn heights_stay_in_range() {
        let mut lg = GeometricalLevelGenerator::new(32, 0.25);
        for _ in 0..10_000 {
            let h = lg.random();
            assert!((1..=32).contains(&h));
        }
    }

    #[test]
    fn mean_height_tracks_p() {
        // E[height] for a truncated geometric with p = 0.25 is 1/(1 - p).
        let mut lg = GeometricalLevelGenerator::new(32, 0.25);
        const SAMPLES: usize = 100_000;
        let sum: usize = (0..SAMPLES).map(|_| lg.random()).sum();
        let mean = sum as f64 / SAMPLES as f64;
        assert!(
            (mean - 4.0 / 3.0).abs() < 0.05,
            "mean height {} outside the expected band",
            mean
        );
    }
}
