//! Random number generation for floor building
//!
//! Uses a seeded ChaCha RNG so a floor seed reproduces the same layout.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Floor random number generator
///
/// Wraps ChaCha8Rng. Every draw of a floor build goes through one instance,
/// so the order of calls is part of the layout's identity.
#[derive(Debug, Clone)]
pub struct FloorRng {
    rng: ChaCha8Rng,
    seed: u64,
}

// Only the seed is serialized; the stream restarts from it on deserialize
impl Serialize for FloorRng {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.seed.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FloorRng {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let seed = u64::deserialize(deserializer)?;
        Ok(FloorRng::new(seed))
    }
}

impl FloorRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a new RNG with a random seed
    pub fn from_entropy() -> Self {
        Self::new(fresh_seed())
    }

    /// Get the seed used to create this RNG
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Derive an independent stream from this one's seed.
    ///
    /// The salt keeps derived streams apart from each other and from the
    /// parent, which is left untouched.
    pub fn derive(&self, salt: u64) -> Self {
        Self::new(self.seed.rotate_left(17) ^ salt.wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }

    /// Returns 0..n-1
    ///
    /// Returns 0 if n is 0.
    pub fn rn2(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        self.rng.gen_range(0..n)
    }

    /// Wide variant of `rn2` for totals past `u32::MAX`
    pub fn rn2_u64(&mut self, n: u64) -> u64 {
        if n == 0 {
            return 0;
        }
        self.rng.gen_range(0..n)
    }

    /// Returns lo..=hi, or lo when the range is empty
    pub fn range_inclusive(&mut self, lo: u32, hi: u32) -> u32 {
        if hi <= lo {
            return lo;
        }
        self.rng.gen_range(lo..=hi)
    }

    /// Returns an index in 0..len
    pub fn index(&mut self, len: usize) -> usize {
        self.rn2(len as u32) as usize
    }

    /// Choose a random element from a slice
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            None
        } else {
            Some(&items[self.index(items.len())])
        }
    }

    /// Shuffle a slice in place (Fisher-Yates, back to front)
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.rn2(i as u32 + 1) as usize;
            items.swap(i, j);
        }
    }
}

impl Default for FloorRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

/// A random non-zero seed. Zero is reserved for "pick one for me".
pub fn fresh_seed() -> u64 {
    loop {
        let seed: u64 = rand::random();
        if seed != 0 {
            return seed;
        }
    }
}
