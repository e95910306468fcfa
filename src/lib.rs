//! # RollHash Core
//!
//! Epoch-rolling parameter derivation for ASIC-resistant proof-of-work.
//!
//! Instead of fixing one hash function forever, RollHash re-derives the hash
//! function's internal constants from a time-indexed epoch value. Hardware
//! baked around one constant set goes stale at the next epoch boundary,
//! while commodity CPUs, GPUs and FPGAs simply reload.
//!
//! ## Components
//!
//! - [`ScheduleRng`]: a seed-unique linear generator used only to build
//!   cipher key schedules.
//! - [`RollCipher`]: an 84-round substitution-permutation cipher over
//!   640-bit blocks, fully re-parameterized by one u32 seed.
//! - [`FractionTables`]: the first 16384 primes and the 2^32-scaled
//!   fractional parts of their square and cube roots, built once per process
//!   and verified collision-free.
//! - [`derive_params`]: maps an epoch key to the epoch's `(h, k)` constant
//!   arrays via a Blum-Blum-Shub index extractor over the fixed modulus
//!   `(2^108 - 59)(2^126 - 335)`.
//!
//! The derived arrays feed an external SHA-256 compression engine as its
//! initialization vector and round constants; that engine's internals are
//! standard and live outside this crate.
//!
//! ## Example
//!
//! ```rust
//! use rollhash_core::{derive_params, RollCipher};
//!
//! // Constants for epoch key 1, shared by every miner in that epoch.
//! let params = derive_params(1).unwrap();
//! assert_eq!(params.h.len(), 8);
//! assert_eq!(params.k.len(), 64);
//!
//! // A cipher schedule seeded from the same epoch.
//! let cipher = RollCipher::new(params.h[0]);
//! let block = [0u8; 80];
//! let encrypted = cipher.encrypt(&block);
//! assert_ne!(encrypted, block);
//! ```

mod bbs;
mod cipher;
mod epoch;
mod error;
mod rand;
mod tables;

pub mod params;

pub use cipher::{bytes_to_words, words_to_bytes, RollCipher};
pub use epoch::{derive_params, epoch_index, EpochParams};
pub use error::ParamError;
pub use rand::ScheduleRng;
pub use tables::FractionTables;

#[cfg(test)]
mod tests;
