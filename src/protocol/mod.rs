//! Protocol module - frame type, encoder, and incremental decoder.
//!
//! This module implements the wire-level mechanics of STOMP framing:
//! - Frame struct with standard-command constructors
//! - Pure single-pass encoder producing exact protocol bytes
//! - Stateful decoder for accumulating partial reads
//!
//! Nothing here performs I/O, blocks, or validates broker semantics; only
//! frame syntax is checked.

mod decoder;
mod encoder;
mod frame;
mod wire_format;

pub use decoder::Decoder;
pub use encoder::{encode, encode_with, EncodeOptions};
pub use frame::Frame;
pub use wire_format::{
    escape_header_into, unescape_header, verbatim_header, CARRIAGE_RETURN, CONTENT_LENGTH,
    DEFAULT_MAX_FRAME_SIZE, FRAME_TERMINATOR, HEADER_ESCAPE, HEADER_SEPARATOR, LINE_FEED,
};
