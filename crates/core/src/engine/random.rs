//! Random sources used to pick the next country.

use rand::{rngs::StdRng, Rng, SeedableRng};

/// Supplies uniformly distributed indices.
pub trait RandomSource {
    /// Return an index in `0..len`. Callers never pass `len == 0`.
    fn pick(&mut self, len: usize) -> usize;
}

/// Source backed by the standard RNG.
#[derive(Debug, Clone)]
pub struct StdRandom {
    rng: StdRng,
}

impl StdRandom {
    /// Seed from operating system entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Seed deterministically.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for StdRandom {
    fn pick(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }
}

/// Replays a fixed list of indices, cycling when exhausted.
///
/// Indices are reduced modulo the pool length, so any sequence is valid.
#[derive(Debug, Clone)]
pub struct FixedSequence {
    values: Vec<usize>,
    cursor: usize,
}

impl FixedSequence {
    /// Build a sequence; an empty list always yields index 0.
    pub fn new(values: impl Into<Vec<usize>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }
}

impl RandomSource for FixedSequence {
    fn pick(&mut self, len: usize) -> usize {
        if self.values.is_empty() {
            return 0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value % len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_sequence_cycles_within_bounds() {
        let mut source = FixedSequence::new(vec![1, 5, 2]);
        let picks: Vec<usize> = (0..5).map(|_| source.pick(3)).collect();
        assert_eq!(picks, vec![1, 2, 2, 1, 2]);
    }

    #[test]
    fn seeded_source_stays_in_range() {
        let mut source = StdRandom::seeded(7);
        assert!((0..200).all(|_| source.pick(4) < 4));
    }
}
