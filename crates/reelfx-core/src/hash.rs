//! Stable string hashing and seeded pseudo-randomness.
//!
//! Render output must replay identically, so any visual variation is derived
//! from these functions rather than from a runtime RNG. The hash matches the
//! 32-bit `h = h * 31 + c` string hash used by the web front end, which keeps
//! placeholder URLs and particle layouts identical across both sides.

/// Non-negative 32-bit hash of a string's UTF-16 code units.
pub fn stable_hash(input: &str) -> u32 {
    let mut h: i32 = 0;
    for unit in input.encode_utf16() {
        h = h.wrapping_shl(5).wrapping_sub(h).wrapping_add(unit as i32);
    }
    h.unsigned_abs()
}

/// Deterministic sequence of values in `[0, 1)` derived from a seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeededRandom {
    seed: u32,
}

impl SeededRandom {
    pub const fn new(seed: u32) -> Self {
        Self { seed }
    }

    /// Seed from the stable hash of `key`.
    pub fn from_key(key: &str) -> Self {
        Self::new(stable_hash(key))
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// The `index`-th value of the sequence.
    pub fn at(&self, index: u32) -> f64 {
        let x = (self.seed as f64 + index as f64 * 9301.0 + 49297.0).sin() * 49979.0;
        x - x.floor()
    }

    /// The `index`-th value scaled into `[lo, hi)`.
    pub fn range(&self, index: u32, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.at(index)
    }

    /// Pick an index in `0..len` for slot `index`. `len` must be non-zero.
    pub fn pick(&self, index: u32, len: usize) -> usize {
        ((self.at(index) * len as f64) as usize).min(len.saturating_sub(1))
    }
}
