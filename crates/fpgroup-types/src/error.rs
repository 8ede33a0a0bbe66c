// ─────────────────────────────────────────────────────────────────────
// FPGroup Bridge — Error Hierarchy
// ─────────────────────────────────────────────────────────────────────

use thiserror::Error;

/// Root error type for all bridge failures.
///
/// Host algebra systems keep their own error types (see
/// `HostAlgebra::Error` in `fpgroup-core`); they only need to be
/// constructible from a `BridgeError`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    /// A relator term names a generator outside `[0, rank)`.
    #[error(
        "relation {relation}, term {term}: generator {generator} out of range for rank {rank}"
    )]
    GeneratorOutOfRange {
        relation: usize,
        term: usize,
        generator: usize,
        rank: usize,
    },

    /// A relator term carries a zero exponent.
    #[error("relation {relation}, term {term}: exponent must be nonzero")]
    ZeroExponent { relation: usize, term: usize },

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// The host algebra rejected an operation.
    #[error("host algebra error: {0}")]
    Host(String),

    /// JSON encoding or decoding failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

pub type BridgeResult<T> = Result<T, BridgeError>;
