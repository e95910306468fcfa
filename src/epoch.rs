//! Epoch scheduling and constant derivation
//!
//! An external key (typically a coarse wall-clock value or block height
//! counter) maps to a monotonic epoch index through the fixed anchor time and
//! ten-day period. Every key inside one epoch derives the same constants, so
//! all miners re-parameterize in lockstep at the epoch boundary.

use crate::bbs::extract;
use crate::error::ParamError;
use crate::params::{ANCHOR_TIME, EPOCH_PERIOD};
use crate::tables::FractionTables;

/// One epoch's derived hash constants, handed to the external SHA-256
/// compression engine as its initialization vector (`h`) and round-constant
/// table (`k`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpochParams {
    /// Initialization state, drawn from the square-root fraction table.
    pub h: [u32; 8],
    /// Round constants, drawn from the cube-root fraction table.
    pub k: [u32; 64],
}

/// Maps an epoch key to its epoch index:
/// `ceil((ANCHOR_TIME + key * EPOCH_PERIOD) / EPOCH_PERIOD)`.
///
/// Monotonically non-decreasing in `key`; computed in u128 so no u64 key can
/// overflow the intermediate sum.
pub fn epoch_index(key: u64) -> u64 {
    let t = u128::from(ANCHOR_TIME) + u128::from(key) * u128::from(EPOCH_PERIOD);
    t.div_ceil(u128::from(EPOCH_PERIOD)) as u64
}

/// Derives the epoch's `(h, k)` constant arrays for `key`.
///
/// Pure in `key`: repeated calls return bit-identical arrays. The fraction
/// tables are built on first use; a table collision (impossible for the fixed
/// prime range, but checked) is the only error path.
pub fn derive_params(key: u64) -> Result<EpochParams, ParamError> {
    let tables = FractionTables::shared()?;
    let epoch = epoch_index(key);
    Ok(EpochParams {
        h: extract(epoch, &tables.sqrt),
        k: extract(epoch, &tables.cbrt),
    })
}
