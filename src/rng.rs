use rand::Rng;

/// Source of all game randomness.
///
/// Every roll the engine makes (damage variance, turn-order tie breaks, loot
/// drops, offline win rolls) goes through this trait so callers can supply a
/// seeded generator for reproducible runs, and tests can pin exact outcomes.
/// Any `rand` generator implements it via the blanket impl below.
pub trait RandomSource {
    /// Uniform value in `[0.0, 1.0)`.
    fn unit(&mut self) -> f64;

    /// Uniform value in `[low, high]`.
    fn range_f64(&mut self, low: f64, high: f64) -> f64;

    /// Uniform integer in `[low, high]`.
    fn range_i32(&mut self, low: i32, high: i32) -> i32;

    /// Fair coin flip.
    fn coin_flip(&mut self) -> bool;
}

impl<R: Rng> RandomSource for R {
    fn unit(&mut self) -> f64 {
        self.gen_range(0.0..1.0)
    }

    fn range_f64(&mut self, low: f64, high: f64) -> f64 {
        self.gen_range(low..=high)
    }

    fn range_i32(&mut self, low: i32, high: i32) -> i32 {
        self.gen_range(low..=high)
    }

    fn coin_flip(&mut self) -> bool {
        self.gen()
    }
}
