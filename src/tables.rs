//! Prime and irrational-fraction constant tables
//!
//! The epoch extractor samples its output constants from two fixed tables:
//! the fractional parts of the square roots and cube roots of the first
//! 16384 primes, scaled by 2^32 and floored. The first eight square-root
//! entries are exactly SHA-256's standard `H` constants and the first
//! cube-root entries its standard `K` constants; the tables extend that
//! construction across the whole prime range.
//!
//! Fractions are computed with exact integer roots (`isqrt(p << 64)`,
//! `icbrt(p << 96)`), never floats, so every node derives bit-identical
//! tables. Downstream security requires every entry to be unique; a
//! collision aborts construction with an error.

use once_cell::sync::OnceCell;

use crate::error::ParamError;
use crate::params::TABLE_SIZE;

static SHARED: OnceCell<FractionTables> = OnceCell::new();

/// The process-wide constant tables, built once and immutable thereafter.
pub struct FractionTables {
    /// `floor(2^32 * frac(sqrt(p)))` for the first 16384 primes `p`.
    pub sqrt: Box<[u32]>,
    /// `floor(2^32 * frac(cbrt(p)))` for the first 16384 primes `p`.
    pub cbrt: Box<[u32]>,
}

impl FractionTables {
    /// Returns the shared tables, building them on first use.
    ///
    /// The build runs at most once per process, behind a one-time
    /// initialization guard; concurrent first callers block until it
    /// completes and then share the same immutable reference.
    pub fn shared() -> Result<&'static FractionTables, ParamError> {
        SHARED.get_or_try_init(FractionTables::build)
    }

    /// Builds both tables from scratch and verifies them collision-free.
    pub fn build() -> Result<FractionTables, ParamError> {
        let primes = first_primes(TABLE_SIZE);

        let sqrt: Box<[u32]> = primes.iter().map(|&p| sqrt_fraction(p)).collect();
        verify_distinct(&sqrt, "sqrt")?;

        let cbrt: Box<[u32]> = primes.iter().map(|&p| cbrt_fraction(p)).collect();
        verify_distinct(&cbrt, "cbrt")?;

        Ok(FractionTables { sqrt, cbrt })
    }
}

/// Collects the first `count` primes by trial division.
fn first_primes(count: usize) -> Vec<u32> {
    let mut primes = Vec::with_capacity(count);
    let mut candidate = 2u32;
    while primes.len() < count {
        if is_prime(candidate) {
            primes.push(candidate);
        }
        candidate += 1;
    }
    primes
}

fn is_prime(n: u32) -> bool {
    let mut d = 2u32;
    while d * d <= n {
        if n % d == 0 {
            return false;
        }
        d += 1;
    }
    true
}

/// Low 32 bits of `isqrt(p << 64)`, i.e. `floor(2^32 * frac(sqrt(p)))`.
fn sqrt_fraction(p: u32) -> u32 {
    (isqrt(u128::from(p) << 64) & 0xFFFF_FFFF) as u32
}

/// Low 32 bits of `icbrt(p << 96)`, i.e. `floor(2^32 * frac(cbrt(p)))`.
fn cbrt_fraction(p: u32) -> u32 {
    (icbrt(u128::from(p) << 96) & 0xFFFF_FFFF) as u32
}

/// Integer square root by Newton iteration with a final floor correction.
fn isqrt(n: u128) -> u128 {
    if n < 2 {
        return n;
    }
    let mut x = 1u128 << (n.ilog2() / 2 + 1);
    loop {
        let next = (x + n / x) >> 1;
        if next >= x {
            break;
        }
        x = next;
    }
    while x * x > n {
        x -= 1;
    }
    while (x + 1) * (x + 1) <= n {
        x += 1;
    }
    x
}

/// Integer cube root by Newton iteration with a final floor correction.
fn icbrt(n: u128) -> u128 {
    if n < 2 {
        return n;
    }
    let mut x = 1u128 << (n.ilog2() / 3 + 1);
    loop {
        let next = (2 * x + n / (x * x)) / 3;
        if next >= x {
            break;
        }
        x = next;
    }
    while x * x * x > n {
        x -= 1;
    }
    while (x + 1) * (x + 1) * (x + 1) <= n {
        x += 1;
    }
    x
}

/// Sorts a copy and scans adjacent entries; any duplicate fails the build.
fn verify_distinct(table: &[u32], name: &'static str) -> Result<(), ParamError> {
    let mut sorted = table.to_vec();
    sorted.sort_unstable();
    for pair in sorted.windows(2) {
        if pair[0] == pair[1] {
            return Err(ParamError::TableCollision {
                table: name,
                value: pair[0],
            });
        }
    }
    Ok(())
}
