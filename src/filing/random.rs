use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Source of the simulator's injected failures.
///
/// Implemented for every [`RngCore`], so a seeded [`StdRng`] gives
/// reproducible runs.
pub trait FailureSource: Send {
    /// Returns `true` with the given probability (which lies in `[0, 1]`).
    fn fails(&mut self, probability: f64) -> bool;
}

impl<R: RngCore + Send> FailureSource for R {
    fn fails(&mut self, probability: f64) -> bool {
        self.gen_bool(probability)
    }
}

/// Entropy-seeded source used by default.
pub(crate) fn entropy_source() -> Box<dyn FailureSource> {
    Box::new(StdRng::from_entropy())
}

/// Reproducible source for tests and demos.
pub fn seeded_source(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
