//! Frame struct with standard-command constructors.
//!
//! Represents one logical STOMP message: command, ordered headers, body.
//! Uses `bytes::Bytes` for zero-copy body sharing.
//!
//! # Example
//!
//! ```
//! use stompwire::protocol::Frame;
//!
//! let frame = Frame::send("/queue/orders")
//!     .header("receipt", "42")
//!     .body(&b"payload"[..]);
//!
//! assert_eq!(frame.command, "SEND");
//! assert_eq!(frame.header_value("destination"), Some("/queue/orders"));
//! assert_eq!(&frame.body[..], b"payload");
//! ```

use bytes::Bytes;

/// One logical STOMP message.
///
/// The command is an opaque string, not an enumeration: new broker commands
/// must parse without a code change. Headers are an ordered list and may
/// contain duplicate keys; per protocol convention the first occurrence of a
/// duplicated key is authoritative for readers, later ones are preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Command verb (CONNECT, SEND, MESSAGE, ERROR, ...).
    pub command: String,
    /// Ordered (key, value) header pairs, reproduced verbatim on encode.
    pub headers: Vec<(String, String)>,
    /// Body bytes (zero-copy via `bytes::Bytes`); empty for most commands.
    pub body: Bytes,
}

impl Frame {
    /// Create a frame with the given command, no headers, and an empty body.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            headers: Vec::new(),
            body: Bytes::new(),
        }
    }

    /// Append a header pair (builder style).
    ///
    /// Duplicate keys are allowed and kept in insertion order.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Set the body bytes (builder style).
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Get the value of the first header with the given key.
    ///
    /// Later duplicates are reachable through [`Frame::headers`] directly.
    pub fn header_value(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Get the body length in bytes.
    #[inline]
    pub fn body_len(&self) -> usize {
        self.body.len()
    }

    // Constructors for the standard client commands. Each pre-populates the
    // headers the protocol mandates for that command; further headers and a
    // body can be chained on top.

    /// CONNECT frame advertising protocol versions 1.0 through 1.2.
    pub fn connect(host: impl Into<String>) -> Self {
        Self::new("CONNECT")
            .header("accept-version", "1.0,1.1,1.2")
            .header("host", host)
    }

    /// SEND frame targeting a destination.
    pub fn send(destination: impl Into<String>) -> Self {
        Self::new("SEND").header("destination", destination)
    }

    /// SUBSCRIBE frame with an explicit subscription id.
    pub fn subscribe(destination: impl Into<String>, id: impl Into<String>) -> Self {
        Self::new("SUBSCRIBE")
            .header("destination", destination)
            .header("id", id)
    }

    /// UNSUBSCRIBE frame for a previously subscribed id.
    pub fn unsubscribe(destination: impl Into<String>, id: impl Into<String>) -> Self {
        Self::new("UNSUBSCRIBE")
            .header("destination", destination)
            .header("id", id)
    }

    /// ACK frame acknowledging a received message.
    pub fn ack(id: impl Into<String>) -> Self {
        Self::new("ACK").header("id", id)
    }

    /// NACK frame rejecting a received message.
    pub fn nack(id: impl Into<String>) -> Self {
        Self::new("NACK").header("id", id)
    }

    /// BEGIN frame opening a transaction.
    pub fn begin(transaction: impl Into<String>) -> Self {
        Self::new("BEGIN").header("transaction", transaction)
    }

    /// COMMIT frame committing a transaction.
    pub fn commit(transaction: impl Into<String>) -> Self {
        Self::new("COMMIT").header("transaction", transaction)
    }

    /// ABORT frame rolling back a transaction.
    pub fn abort(transaction: impl Into<String>) -> Self {
        Self::new("ABORT").header("transaction", transaction)
    }

    /// DISCONNECT frame requesting a receipt.
    pub fn disconnect(receipt: impl Into<String>) -> Self {
        Self::new("DISCONNECT").header("receipt", receipt)
    }
}
