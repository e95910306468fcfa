//! Blum-Blum-Shub table-index extractor
//!
//! Epoch constants are pulled from the fraction tables by a modular-squaring
//! bit generator over the fixed Blum modulus `M = (2^108 - 59)(2^126 - 335)`.
//! Each squaring yields one bit - 1 when the square has no trailing zero
//! bits - and fourteen bits, most significant first, form one table index.
//! An index already consumed within a call is discarded and the squaring
//! continues, so every extracted value within one call is distinct.

use num_bigint::BigUint;
use num_traits::One;
use once_cell::sync::Lazy;

use crate::params::TABLE_SIZE_BITS;

/// `(2^108 - 59) * (2^126 - 335)`, fixed by consensus.
static MODULUS: Lazy<BigUint> = Lazy::new(|| {
    let multiplier = (BigUint::one() << 108u32) - 59u32;
    let multiplicand = (BigUint::one() << 126u32) - 335u32;
    multiplier * multiplicand
});

/// Extracts `N` distinct entries of `table`, deterministically from `seed`.
///
/// `table` must hold `2^TABLE_SIZE_BITS` entries so every 14-bit index is in
/// range; `N` must not exceed the table length or the rejection loop could
/// never finish. Both hold for the fixed tables and counts used here.
pub(crate) fn extract<const N: usize>(seed: u64, table: &[u32]) -> [u32; N] {
    let modulus = &*MODULUS;
    let mut value = BigUint::from(seed) % modulus;

    let mut used = [0usize; N];
    let mut out = [0u32; N];
    let mut filled = 0;

    while filled < N {
        let mut index = 0usize;
        for _ in 0..TABLE_SIZE_BITS {
            value = &value * &value % modulus;
            let bit = match value.trailing_zeros() {
                Some(0) => 1,
                _ => 0,
            };
            index = (index << 1) | bit;
        }
        if !used[..filled].contains(&index) {
            used[filled] = index;
            out[filled] = table[index];
            filled += 1;
        }
    }
    out
}
