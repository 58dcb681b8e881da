//! Wire-level constants and header escaping.
//!
//! A STOMP frame on the wire is line-oriented text followed by an opaque
//! body:
//! ```text
//! COMMAND LF
//! (key ":" value LF)*
//! LF
//! BODY
//! NUL
//! ```
//! Bare line-feeds between frames are heart-beats and carry no payload.
//!
//! Header keys and values may not contain an unescaped line-feed, colon, or
//! backslash; this module implements the protocol's escaping rule for those
//! three bytes.

use crate::error::{Result, StompError};

/// Byte terminating every frame.
pub const FRAME_TERMINATOR: u8 = 0x00;

/// Line delimiter for the command and header section.
pub const LINE_FEED: u8 = b'\n';

/// Tolerated immediately before a line-feed (STOMP 1.2 allows CRLF lines).
pub const CARRIAGE_RETURN: u8 = b'\r';

/// Separator between a header key and its value.
pub const HEADER_SEPARATOR: u8 = b':';

/// Escape introducer inside header keys and values.
pub const HEADER_ESCAPE: u8 = b'\\';

/// Header announcing the exact byte length of a frame body.
pub const CONTENT_LENGTH: &str = "content-length";

/// Default maximum buffered size for one in-progress frame (16 MB).
pub const DEFAULT_MAX_FRAME_SIZE: usize = 16 * 1024 * 1024;

/// Append `text` to `out` with frame-syntax bytes escaped.
///
/// `\` becomes `\\`, `:` becomes `\c`, and line-feed becomes `\n`, per the
/// protocol's escaping rule. All other bytes pass through verbatim.
///
/// # Example
///
/// ```
/// use stompwire::protocol::escape_header_into;
///
/// let mut out = Vec::new();
/// escape_header_into(&mut out, "a:b\\c\nd");
/// assert_eq!(out, b"a\\cb\\\\c\\nd");
/// ```
pub fn escape_header_into(out: &mut Vec<u8>, text: &str) {
    for &byte in text.as_bytes() {
        match byte {
            HEADER_ESCAPE => out.extend_from_slice(b"\\\\"),
            HEADER_SEPARATOR => out.extend_from_slice(b"\\c"),
            LINE_FEED => out.extend_from_slice(b"\\n"),
            other => out.push(other),
        }
    }
}

/// Decode an escaped header key or value back to its logical text.
///
/// Inverse of [`escape_header_into`]: `\\`, `\c`, and `\n` become backslash,
/// colon, and line-feed. Any other escape sequence, a trailing lone
/// backslash, or non-UTF-8 text is a decoding error.
pub fn unescape_header(raw: &[u8]) -> Result<String> {
    let mut out = Vec::with_capacity(raw.len());
    let mut iter = raw.iter();
    while let Some(&byte) = iter.next() {
        if byte != HEADER_ESCAPE {
            out.push(byte);
            continue;
        }
        match iter.next() {
            Some(b'\\') => out.push(HEADER_ESCAPE),
            Some(b'c') => out.push(HEADER_SEPARATOR),
            Some(b'n') => out.push(LINE_FEED),
            Some(&other) => {
                return Err(StompError::Decoding(format!(
                    "malformed escape sequence \\{} in header",
                    other as char
                )))
            }
            None => {
                return Err(StompError::Decoding(
                    "truncated escape sequence at end of header".to_string(),
                ))
            }
        }
    }
    String::from_utf8(out)
        .map_err(|_| StompError::Decoding("header is not valid UTF-8".to_string()))
}

/// Decode a verbatim (unescaped) header key or value.
pub fn verbatim_header(raw: &[u8]) -> Result<String> {
    std::str::from_utf8(raw)
        .map(str::to_owned)
        .map_err(|_| StompError::Decoding("header is not valid UTF-8".to_string()))
}
