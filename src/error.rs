//! Error types for stompwire.

use thiserror::Error;

/// Main error type for all stompwire operations.
///
/// The two protocol kinds are deliberately distinct: an [`Encoding`] error
/// means the caller handed the encoder a malformed frame and can fix it
/// locally before sending; a [`Decoding`] error means the peer sent
/// malformed wire bytes. STOMP framing has no synchronization marker to
/// resume after corruption, so on a [`Decoding`] error the
/// [`Decoder`](crate::protocol::Decoder) instance and its connection must
/// be discarded.
///
/// [`Encoding`]: StompError::Encoding
/// [`Decoding`]: StompError::Decoding
#[derive(Debug, Error)]
pub enum StompError {
    /// Malformed frame fields handed to the encoder (caller bug).
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Malformed wire bytes (non-conformant peer or stream corruption).
    #[error("decoding error: {0}")]
    Decoding(String),

    /// I/O error on the client transport.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Connection closed unexpectedly.
    #[error("connection closed")]
    ConnectionClosed,
}

/// Result type alias using StompError.
pub type Result<T> = std::result::Result<T, StompError>;
