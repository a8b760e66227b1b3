/// Parse and validation failures for foundation types.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TypeError {
    /// Hex string could not be decoded.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// Decoded byte length did not match expectations.
    #[error("invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// Short identifiers must be non-empty.
    #[error("short id must not be empty")]
    EmptyShortId,

    /// Short identifiers are lowercase base-36 only.
    #[error("invalid character {ch:?} in short id")]
    InvalidShortIdChar { ch: char },

    /// Short identifier too long to carry a numeric value.
    #[error("short id {id:?} exceeds the numeric range")]
    ShortIdOverflow { id: String },

    /// Unrecognized category name.
    #[error("unknown category: {0:?}")]
    UnknownCategory(String),
}
