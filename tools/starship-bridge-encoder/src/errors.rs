use thiserror::Error;

/// Errors raised while encoding transfer inputs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// An address was not exactly 20 bytes.
    #[error("invalid address length: expected 20 bytes, got {0}")]
    InvalidAddressLength(usize),
    #[error("invalid hex input: {0}")]
    InvalidHex(String),
    /// Compose payload was not two 32-byte words, or the uint8 word had high bits set.
    #[error("malformed compose message")]
    MalformedComposeMessage,
}
