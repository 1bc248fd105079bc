use thiserror::Error;

/// The primary error type for the `nexus-origin` library.
///
/// Every error is synchronous and local to a single builder call; nothing is
/// retried internally and no partial token is ever produced.
#[derive(Error, Debug)]
pub enum OriginError {
    #[error("Invalid symmetric key length: expected 16 bytes, got {actual}")]
    InvalidKeyLength { actual: usize },

    #[error("Key is not valid hex: {0}")]
    KeyEncoding(#[from] hex::FromHexError),

    #[error("Unrecognized origin action: {0}")]
    InvalidAction(String),

    #[error("Unrecognized origin command type code: {code}")]
    InvalidType { code: u8 },

    #[error("{field} value {value} exceeds maximum {max}")]
    FieldOverflow {
        field: &'static str,
        value: u64,
        max: u64,
    },
}
