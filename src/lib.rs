//! # stompwire
//!
//! Wire-level STOMP frame codec: a pure encoder from logical frames to
//! exact protocol bytes, and an incremental decoder from an arbitrary,
//! possibly-fragmented byte stream back to ordered frames.
//!
//! ## Architecture
//!
//! - **Core** (`protocol`): [`Frame`], [`encode`](protocol::encode), and
//!   [`Decoder`] - synchronous, no I/O, no broker semantics. One decoder
//!   instance per connection, driven sequentially by a single reader loop.
//! - **Client** (optional thin adapter): a dumb asynchronous debug client
//!   that drives the core over a TCP stream, suitable for scripts that
//!   inject or monitor bus messages.
//!
//! ## Example
//!
//! ```
//! use stompwire::{encode, Decoder, Frame};
//!
//! // Outbound: frame -> bytes, write them to any transport.
//! let wire = encode(&Frame::send("/queue/a").body(&b"hello"[..])).unwrap();
//!
//! // Inbound: push transport reads into the decoder in chunks of any size.
//! let mut decoder = Decoder::new();
//! let frames = decoder.feed(&wire).unwrap();
//! assert_eq!(frames[0].command, "SEND");
//! assert_eq!(&frames[0].body[..], b"hello");
//! ```

pub mod error;
pub mod protocol;

mod client;

pub use client::Client;
pub use error::{Result, StompError};
pub use protocol::{encode, encode_with, Decoder, EncodeOptions, Frame};
