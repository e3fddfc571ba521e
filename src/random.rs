//! Uniform random choice, injectable so bot play can be made deterministic

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of uniformly distributed indices
pub trait RandomSource {
    /// Returns an index in `0..len`; `len` is never zero
    fn index(&mut self, len: usize) -> usize;

    /// Picks one element of a non-empty slice
    fn choose<T: Copy>(&mut self, items: &[T]) -> Option<T>
    where
        Self: Sized,
    {
        match items.len() {
            0 => None,
            len => Some(items[self.index(len)]),
        }
    }
}

impl RandomSource for StdRng {
    fn index(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }
}

/// An OS-seeded generator for interactive play
pub fn from_entropy() -> StdRng {
    StdRng::from_os_rng()
}

/// A reproducible generator
pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Replays a fixed list of indices, wrapping around, each reduced modulo the
/// requested range
#[cfg(test)]
pub(crate) struct FixedSequence {
    values: Vec<usize>,
    next: usize,
}

#[cfg(test)]
impl FixedSequence {
    pub fn new(values: Vec<usize>) -> Self {
        assert!(!values.is_empty());
        Self { values, next: 0 }
    }
}

#[cfg(test)]
impl RandomSource for FixedSequence {
    fn index(&mut self, len: usize) -> usize {
        let value = self.values[self.next % self.values.len()];
        self.next += 1;
        value % len
    }
}
