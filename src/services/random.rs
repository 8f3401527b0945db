//! Injectable randomness for chance draws and reviewer picks.

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

/// Source of random draws used by the chance filter and the selector.
pub trait RandomSource {
    /// A uniform value in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// A uniform index in `0..len`. Callers never pass `len == 0`.
    fn pick_index(&mut self, len: usize) -> usize;
}

/// Unseeded generator backed by the thread-local RNG.
pub type ThreadRandom = RngSource<ThreadRng>;

/// Seeded generator; the same seed over the same roster reproduces a run.
pub type SeededRandom = RngSource<StdRng>;

/// Adapter from any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl ThreadRandom {
    pub fn thread() -> Self {
        Self::new(rand::thread_rng())
    }
}

impl SeededRandom {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn pick_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Replays a fixed list of draws, cycling when exhausted.
///
/// `next_unit` consumes `units`; `pick_index` consumes `indices` and reduces
/// them modulo `len`.
#[derive(Debug, Clone, Default)]
pub struct FixedSequence {
    units: Vec<f64>,
    indices: Vec<usize>,
    unit_pos: usize,
    index_pos: usize,
}

impl FixedSequence {
    pub fn new(units: Vec<f64>, indices: Vec<usize>) -> Self {
        Self {
            units,
            indices,
            unit_pos: 0,
            index_pos: 0,
        }
    }

    /// Every unit draw returns `value`, every index draw returns 0.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value], vec![0])
    }
}

impl RandomSource for FixedSequence {
    fn next_unit(&mut self) -> f64 {
        if self.units.is_empty() {
            return 0.0;
        }
        let value = self.units[self.unit_pos % self.units.len()];
        self.unit_pos += 1;
        value
    }

    fn pick_index(&mut self, len: usize) -> usize {
        if self.indices.is_empty() {
            return 0;
        }
        let value = self.indices[self.index_pos % self.indices.len()];
        self.index_pos += 1;
        value % len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_source_bounds() {
        let mut source = ThreadRandom::thread();
        for _ in 0..1000 {
            let unit = source.next_unit();
            assert!((0.0..1.0).contains(&unit));
            assert!(source.pick_index(3) < 3);
        }
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = SeededRandom::seeded(42);
        let mut b = SeededRandom::seeded(42);
        for _ in 0..20 {
            assert_eq!(a.next_unit(), b.next_unit());
            assert_eq!(a.pick_index(7), b.pick_index(7));
        }
    }

    #[test]
    fn test_fixed_sequence_cycles() {
        let mut source = FixedSequence::new(vec![0.1, 0.9], vec![5, 1]);
        assert_eq!(source.next_unit(), 0.1);
        assert_eq!(source.next_unit(), 0.9);
        assert_eq!(source.next_unit(), 0.1);
        assert_eq!(source.pick_index(3), 2);
        assert_eq!(source.pick_index(3), 1);
    }
}
