//! Seeded substitution-permutation cipher over 640-bit blocks
//!
//! The cipher operates on 10 little-endian 64-bit words and runs 84 rounds of
//! pbox / sbox / pbox / linear mixing / round key. Its entire key schedule is
//! drawn from a [`ScheduleRng`] seeded with one u32, so re-seeding each epoch
//! re-parameterizes the whole cipher and leaves fixed-function hardware
//! tuned for the previous schedule stale.
//!
//! Two sbox widths are used: 6-bit sboxes suit FPGA logic elements, 10-bit
//! sboxes suit FPGA RAM elements. Each 64-bit word splits into four
//! (6-bit, 10-bit) chunk pairs.

use crate::params::{
    BLOCK_SIZE, LARGE_SBOX_COUNT, LARGE_SBOX_SIZE, LARGE_SBOX_WIDTH, PBOX_M, PBOX_SUBROUNDS,
    ROTATION_COUNT, ROUNDS, SMALL_SBOX_COUNT, SMALL_SBOX_SIZE, SMALL_SBOX_WIDTH, STATE_WORDS,
    WORD_BITS, WORD_PAIRS,
};
use crate::rand::ScheduleRng;

/// One permutation network: a masked-swap mask per word pair for each stage,
/// and a rotation amount per word pair for each stage but the last.
#[derive(Debug, Clone)]
pub(crate) struct Pbox {
    pub(crate) mask: [[u64; WORD_PAIRS]; PBOX_SUBROUNDS],
    pub(crate) rotation: [[u32; WORD_PAIRS]; PBOX_SUBROUNDS - 1],
}

/// A fully scheduled cipher instance.
///
/// Immutable once built; [`encrypt`](Self::encrypt) is a pure function of the
/// schedule and the plaintext, so independent instances may run in parallel.
pub struct RollCipher {
    pub(crate) sbox_small: [[u8; SMALL_SBOX_SIZE]; SMALL_SBOX_COUNT],
    pub(crate) sbox_large: [[u16; LARGE_SBOX_SIZE]; LARGE_SBOX_COUNT],
    pub(crate) permutation: [Pbox; 2],
    pub(crate) rotations: [u32; ROTATION_COUNT],
    pub(crate) round_keys: [u16; ROUNDS],
}

impl RollCipher {
    /// Builds the key schedule for `seed`.
    ///
    /// Draw order is part of the consensus contract: small sboxes, large
    /// sboxes, both pboxes (masks then rotations), mixing rotations, round
    /// keys.
    pub fn new(seed: u32) -> Self {
        let mut rng = ScheduleRng::new(seed);

        let mut sbox_small = [[0u8; SMALL_SBOX_SIZE]; SMALL_SBOX_COUNT];
        for sbox in sbox_small.iter_mut() {
            let perm: [u32; SMALL_SBOX_SIZE] = rng.permutation();
            for (entry, value) in sbox.iter_mut().zip(perm) {
                *entry = value as u8;
            }
        }

        let mut sbox_large = [[0u16; LARGE_SBOX_SIZE]; LARGE_SBOX_COUNT];
        for sbox in sbox_large.iter_mut() {
            let perm: [u32; LARGE_SBOX_SIZE] = rng.permutation();
            for (entry, value) in sbox.iter_mut().zip(perm) {
                *entry = value as u16;
            }
        }

        let permutation = [draw_pbox(&mut rng), draw_pbox(&mut rng)];
        let rotations = draw_rotations(&mut rng);

        let mut round_keys = [0u16; ROUNDS];
        for key in round_keys.iter_mut() {
            *key = rng.bounded(1 << STATE_WORDS) as u16;
        }

        Self {
            sbox_small,
            sbox_large,
            permutation,
            rotations,
            round_keys,
        }
    }

    /// Encrypts one 80-byte block.
    pub fn encrypt(&self, plain: &[u8; BLOCK_SIZE]) -> [u8; BLOCK_SIZE] {
        let mut state = bytes_to_words(plain);
        pre_mix(&mut state);
        for &round_key in self.round_keys.iter() {
            permute(&mut state, &self.permutation[0]);
            self.apply_sboxes(&mut state);
            permute(&mut state, &self.permutation[1]);
            self.apply_rotations(&mut state);
            apply_round_key(&mut state, round_key);
        }
        words_to_bytes(&state)
    }

    /// Substitution layer: each word is split into repeating (6-bit, 10-bit)
    /// chunks; small chunks each have their own sbox, large chunks share the
    /// sbox of their word index. Chunks are reassembled at the same offsets.
    fn apply_sboxes(&self, state: &mut [u64; STATE_WORDS]) {
        const SMALL_MASK: u64 = (SMALL_SBOX_SIZE - 1) as u64;
        const LARGE_MASK: u64 = (LARGE_SBOX_SIZE - 1) as u64;

        let mut small = 0;
        for (i, word) in state.iter_mut().enumerate() {
            let mut next = 0u64;
            let mut pos = 0;
            for _ in 0..SMALL_SBOX_COUNT / STATE_WORDS {
                next |= u64::from(self.sbox_small[small][((*word >> pos) & SMALL_MASK) as usize])
                    << pos;
                pos += SMALL_SBOX_WIDTH;
                next |= u64::from(self.sbox_large[i][((*word >> pos) & LARGE_MASK) as usize])
                    << pos;
                pos += LARGE_SBOX_WIDTH;
                small += 1;
            }
            *word = next;
        }
    }

    /// Linear mixing layer: word `i` of the output starts as old word `i + 1`
    /// (wrapping), then absorbs old word `i` at each of the six rotation
    /// offsets. One pass spreads influence across word position and bit
    /// position simultaneously.
    fn apply_rotations(&self, state: &mut [u64; STATE_WORDS]) {
        let mut next: [u64; STATE_WORDS] =
            core::array::from_fn(|i| state[(i + 1) % STATE_WORDS]);
        for (i, word) in state.iter().enumerate() {
            for &r in self.rotations.iter() {
                next[i] ^= word.rotate_left(r);
            }
        }
        *state = next;
    }
}

/// Draws the masks and per-stage rotation amounts of one permutation network.
fn draw_pbox(rng: &mut ScheduleRng) -> Pbox {
    let mut mask = [[0u64; WORD_PAIRS]; PBOX_SUBROUNDS];
    for stage in mask.iter_mut() {
        for m in stage.iter_mut() {
            *m = rng.next_u64();
        }
    }
    let mut rotation = [[0u32; WORD_PAIRS]; PBOX_SUBROUNDS - 1];
    for stage in rotation.iter_mut() {
        for r in stage.iter_mut() {
            *r = rng.bounded(63) + 1;
        }
    }
    Pbox { mask, rotation }
}

/// Draws the six mixing rotations: pairwise distinct, nonzero, odd sum.
///
/// The first five come straight off a shuffle of `[0, 63)`; the shuffle is
/// then scanned onward for an entry that makes the running sum odd. Both
/// parities survive any five removals from 63 candidates, so the scan always
/// terminates inside the array.
fn draw_rotations(rng: &mut ScheduleRng) -> [u32; ROTATION_COUNT] {
    let bits: [u32; WORD_BITS as usize - 1] = rng.permutation();
    let mut rotations = [0u32; ROTATION_COUNT];
    let mut sum = 0;
    for (rotation, &bit) in rotations.iter_mut().zip(bits.iter()).take(ROTATION_COUNT - 1) {
        *rotation = bit + 1;
        sum += bit + 1;
    }
    let mut j = ROTATION_COUNT - 1;
    while (bits[j] + 1 + sum) % 2 == 0 {
        j += 1;
    }
    rotations[ROTATION_COUNT - 1] = bits[j] + 1;
    rotations
}

/// Unpacks an 80-byte block into 10 little-endian words. Pure inverse of
/// [`words_to_bytes`].
#[inline(always)]
pub fn bytes_to_words(bytes: &[u8; BLOCK_SIZE]) -> [u64; STATE_WORDS] {
    core::array::from_fn(|i| u64::from_le_bytes(bytes[8 * i..8 * i + 8].try_into().unwrap()))
}

/// Packs 10 words back into an 80-byte block. Pure inverse of
/// [`bytes_to_words`].
#[inline(always)]
pub fn words_to_bytes(state: &[u64; STATE_WORDS]) -> [u8; BLOCK_SIZE] {
    let mut bytes = [0u8; BLOCK_SIZE];
    for (chunk, word) in bytes.chunks_exact_mut(8).zip(state.iter()) {
        chunk.copy_from_slice(&word.to_le_bytes());
    }
    bytes
}

/// Pre-mix: XOR-fold the whole state to one word, fold its high half into its
/// low half, and XOR that parity value back into every word.
fn pre_mix(state: &mut [u64; STATE_WORDS]) {
    let mut total = 0u64;
    for word in state.iter() {
        total ^= word;
    }
    total ^= total >> 32;
    for word in state.iter_mut() {
        *word ^= total;
    }
}

/// Runs one permutation network forward: five stages of masked swap, word
/// shuffle and pair rotation, then a final masked swap.
pub(crate) fn permute(state: &mut [u64; STATE_WORDS], pbox: &Pbox) {
    for stage in 0..PBOX_SUBROUNDS - 1 {
        masked_swaps(state, &pbox.mask[stage]);
        word_shuffle(state, PBOX_M);
        pair_rotations(state, &pbox.rotation[stage]);
    }
    masked_swaps(state, &pbox.mask[PBOX_SUBROUNDS - 1]);
}

/// Runs one permutation network backward: reversed stage order, rotation
/// amounts complemented to `WORD_BITS`, shuffle driven by the inverse
/// multiplier. No full decryption routine is assembled from this.
#[cfg(test)]
pub(crate) fn permute_inverse(state: &mut [u64; STATE_WORDS], pbox: &Pbox) {
    masked_swaps(state, &pbox.mask[PBOX_SUBROUNDS - 1]);
    for stage in (0..PBOX_SUBROUNDS - 1).rev() {
        let inverse: [u32; WORD_PAIRS] =
            core::array::from_fn(|j| WORD_BITS - pbox.rotation[stage][j]);
        pair_rotations(state, &inverse);
        word_shuffle(state, crate::params::INV_PBOX_M);
        masked_swaps(state, &pbox.mask[stage]);
    }
}

/// For each bit set in a pair's mask, swaps that bit between the two words.
#[inline(always)]
fn masked_swaps(state: &mut [u64; STATE_WORDS], masks: &[u64; WORD_PAIRS]) {
    for (pair, mask) in state.chunks_exact_mut(2).zip(masks.iter()) {
        let swp = mask & (pair[0] ^ pair[1]);
        pair[0] ^= swp;
        pair[1] ^= swp;
    }
}

/// Relocates word `i` to position `m * i mod STATE_WORDS`; `m` is coprime to
/// `STATE_WORDS`, so this is a permutation of word slots.
#[inline(always)]
fn word_shuffle(state: &mut [u64; STATE_WORDS], m: usize) {
    let mut next = [0u64; STATE_WORDS];
    for (i, &word) in state.iter().enumerate() {
        next[m * i % STATE_WORDS] = word;
    }
    *state = next;
}

/// Rotates only the even-indexed words. Rotating every word is equivalent to
/// rotating the evens per stage and the odds once after the final stage, so
/// the odd rotation is elided.
#[inline(always)]
fn pair_rotations(state: &mut [u64; STATE_WORDS], rotation: &[u32; WORD_PAIRS]) {
    for (i, &r) in rotation.iter().enumerate() {
        state[2 * i] = state[2 * i].rotate_left(r);
    }
}

/// Single-bit-per-word key injection: word `i` XORs in bit `i` of the round
/// key, not the whole key word.
#[inline(always)]
fn apply_round_key(state: &mut [u64; STATE_WORDS], round_key: u16) {
    for (i, word) in state.iter_mut().enumerate() {
        *word ^= u64::from((round_key >> i) & 1);
    }
}
