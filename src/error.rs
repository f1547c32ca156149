//! Error handling for the codec.
//!
//! Every condition is local and recoverable by the caller; nothing is
//! retried internally and no partially decoded output is ever returned.

use thiserror::Error;

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;

#[derive(Error, Debug)]
pub enum CodecError {
    /// Rejected configuration, reported before any work is done.
    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        /// What was out of range.
        message: String,
    },

    /// A match token with an impossible offset or length.
    #[error("invalid token at index {index}: {message}")]
    InvalidToken {
        /// Position of the offending token in the stream.
        index: usize,
        /// What made it invalid.
        message: String,
    },

    /// The bit stream ended in the middle of a token.
    #[error("truncated stream: ran out of bits at bit offset {bit_offset}")]
    TruncatedStream {
        /// How many bits had been consumed when the stream ran dry.
        bit_offset: u64,
    },

    /// A literal that does not fit the configured alphabet width.
    #[error("symbol {symbol:#04x} at token {index} exceeds the {symbol_bits}-bit alphabet")]
    AlphabetOverflow {
        /// Position of the offending token in the stream.
        index: usize,
        /// The unrepresentable symbol.
        symbol: u8,
        /// Configured literal payload width.
        symbol_bits: u32,
    },

    /// I/O failure from the underlying bit sink.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
