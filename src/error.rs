use crate::simd::Engine;

/// Everything that can go wrong while setting up or running an alignment.
///
/// Score overflow at 8 or 16 bits never shows up here: it is handled by
/// rerunning at a wider width. Only the 32-bit overflow is reported.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AlignError {
    #[error("query sequence is empty")]
    EmptyQuery,

    #[error("symbol {symbol} at position {position} is outside the alphabet of size {alphabet_size}")]
    InvalidSymbol {
        symbol: u8,
        position: usize,
        alphabet_size: usize,
    },

    #[error("gap penalties open={open} extend={extend} are not usable (open + extend must be in 1..=255)")]
    InvalidGapPenalties { open: u8, extend: u8 },

    #[error("alphabet has no complement, reverse strand alignment is not possible")]
    MissingComplement,

    #[error("{0:?} engine is not supported on this CPU")]
    EngineUnavailable(Engine),

    #[error("invalid substitution matrix: {0}")]
    InvalidMatrix(String),

    #[error("query prefix ending at {end} is past the end of a query of length {query_len}")]
    PrefixOutOfRange { end: usize, query_len: usize },

    #[error("engine uses {engine} lanes but the profile has {profile} and the pool {pool}")]
    LaneMismatch { engine: usize, profile: usize, pool: usize },

    #[error("query needs {requested} segments but the resource pool only holds {capacity}")]
    Capacity { requested: usize, capacity: usize },

    #[error("alignment score does not fit in {bits}-bit lanes")]
    ScoreRangeExceeded { bits: u32 },
}

impl AlignError {
    /// Whether the error comes from a malformed scoring setup rather than from
    /// pool sizing or score range.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            AlignError::EmptyQuery
                | AlignError::InvalidSymbol { .. }
                | AlignError::InvalidGapPenalties { .. }
                | AlignError::MissingComplement
                | AlignError::EngineUnavailable(_)
                | AlignError::InvalidMatrix(_)
                | AlignError::PrefixOutOfRange { .. }
                | AlignError::LaneMismatch { .. }
        )
    }
}
