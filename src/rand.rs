//! Seed-unique linear generator for key-schedule construction
//!
//! A plain LCG with fixed multiplier and increment walks one global sequence;
//! two seeds merely start at different phases of it. `ScheduleRng` re-derives
//! the multiplicand/addend pair from the seed's own trajectory before every
//! output word (it emits the 1st, 3rd, 6th, 10th, ... outputs of the base
//! LCG), so every seed yields a genuinely distinct sequence. That matters
//! here: the seed is the entire security parameter of the cipher schedule.
//!
//! The generator is used only while a schedule is being built, never on the
//! encryption path.

use crate::params::{BASE_ADDEND, BASE_MULTIPLICAND};

/// Deterministic generator driving [`RollCipher::new`](crate::RollCipher::new).
///
/// All arithmetic is modulo 2^64; the wraparound is load-bearing.
#[derive(Debug, Clone)]
pub struct ScheduleRng {
    current: u64,
    multiplicand: u64,
    addend: u64,
}

impl ScheduleRng {
    /// Creates a generator positioned at `seed`.
    pub fn new(seed: u32) -> Self {
        Self {
            current: u64::from(seed),
            multiplicand: 1,
            addend: 0,
        }
    }

    /// Advances the state and returns the upper 32 bits of it.
    #[inline(always)]
    pub fn next_u32(&mut self) -> u32 {
        self.addend = self
            .addend
            .wrapping_add(self.multiplicand.wrapping_mul(BASE_ADDEND));
        self.multiplicand = self.multiplicand.wrapping_mul(BASE_MULTIPLICAND);
        self.current = self
            .current
            .wrapping_mul(self.multiplicand)
            .wrapping_add(self.addend);
        (self.current >> 32) as u32
    }

    /// Two draws, high word first.
    #[inline(always)]
    pub fn next_u64(&mut self) -> u64 {
        let hi = u64::from(self.next_u32());
        (hi << 32) | u64::from(self.next_u32())
    }

    /// Returns a value in `[0, n)`.
    ///
    /// The multiply-shift reduction carries a slight low bias; acceptable for
    /// schedule generation, not for uniform sampling elsewhere.
    #[inline(always)]
    pub fn bounded(&mut self, n: u32) -> u32 {
        ((u64::from(self.next_u32()) * u64::from(n)) >> 32) as u32
    }

    /// Draws a uniform random permutation of `[0, N)` via an in-place
    /// Fisher-Yates shuffle over [`bounded`](Self::bounded).
    pub fn permutation<const N: usize>(&mut self) -> [u32; N] {
        let mut arr: [u32; N] = core::array::from_fn(|i| i as u32);
        for i in 1..N {
            let pos = self.bounded(i as u32 + 1) as usize;
            arr.swap(i, pos);
        }
        arr
    }
}
