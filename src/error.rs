//! Error types for RollHash parameter derivation

use thiserror::Error;

/// Errors surfaced by constant-table construction.
///
/// Everything downstream of a successfully built table is infallible: the
/// cipher and the extractor are pure computations over fixed-size values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
    /// Two entries of a fraction table collided. The extractor's output
    /// distinctness rests on table uniqueness, so construction must not
    /// proceed with a degraded table.
    #[error("duplicate entry {value:#010x} in the {table} fraction table")]
    TableCollision {
        /// Which table failed ("sqrt" or "cbrt").
        table: &'static str,
        /// The duplicated entry.
        value: u32,
    },
}
