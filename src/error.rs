//! Error types for the ElGamal library

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ElGamalError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ElGamalError {
    #[error("Invalid domain parameters: {0}")]
    InvalidParameters(String),

    #[error("Message too long: {len} bytes (max is {max})")]
    MessageTooLong { len: usize, max: usize },

    #[error("No probe candidate is a member of the order-q subgroup")]
    EncodingExhausted,

    #[error("Malformed group element: {0}")]
    MalformedElement(String),

    #[error("Invalid ciphertext: {0}")]
    InvalidCiphertext(String),

    #[error("Randomness source unavailable: {0}")]
    RandomnessUnavailable(String),
}
