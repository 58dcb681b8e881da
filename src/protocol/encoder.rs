//! Frame encoding - logical frame to wire bytes.
//!
//! [`encode`] is a pure, single-pass function: output capacity is computed
//! up front and every input byte is visited once, so cost stays linear in
//! the frame size.
//!
//! Headers are written verbatim by default. That is the fast path the format
//! allows for connection-establishment frames, but it is unsafe for
//! arbitrary user content; [`encode_with`] takes [`EncodeOptions`] to opt
//! into header escaping and binary-safe bodies per call.
//!
//! # Example
//!
//! ```
//! use stompwire::protocol::{encode, Frame};
//!
//! let frame = Frame::send("/queue/a").body(&b"dave"[..]);
//! let wire = encode(&frame).unwrap();
//! assert_eq!(wire, b"SEND\ndestination:/queue/a\n\ndave\x00");
//! ```

use super::frame::Frame;
use super::wire_format::{
    escape_header_into, CONTENT_LENGTH, FRAME_TERMINATOR, HEADER_SEPARATOR, LINE_FEED,
};
use crate::error::{Result, StompError};

/// Per-call encoding options.
#[derive(Debug, Clone, Copy, Default)]
pub struct EncodeOptions {
    /// Escape backslash, colon, and line-feed in header keys and values.
    ///
    /// Off by default: connection-establishment headers are known-safe and
    /// skipping the escape scan keeps per-byte overhead minimal. Some
    /// brokers disable escaping for CONNECT/CONNECTED frames entirely,
    /// which is why this is a per-call flag rather than a command-based
    /// default.
    pub escape_headers: bool,
    /// Always announce the body length with a `content-length` header.
    ///
    /// Without this, the header is injected only when the body contains a
    /// NUL byte (where it is mandatory for the frame to be parseable).
    pub force_content_length: bool,
}

/// Encode a frame to wire bytes with default options (no escaping).
pub fn encode(frame: &Frame) -> Result<Vec<u8>> {
    encode_with(frame, EncodeOptions::default())
}

/// Encode a frame to wire bytes.
///
/// Produces `COMMAND LF (key ":" value LF)* LF BODY NUL`. A
/// `content-length` header is injected as the first header line when the
/// body contains a NUL byte or `force_content_length` is set, unless the
/// caller already supplied one. Body bytes are never escaped.
///
/// # Errors
///
/// [`StompError::Encoding`] when the command is empty or contains a
/// line-feed, or when a header key is empty.
pub fn encode_with(frame: &Frame, options: EncodeOptions) -> Result<Vec<u8>> {
    if frame.command.is_empty() {
        return Err(StompError::Encoding("command must not be empty".to_string()));
    }
    if frame.command.as_bytes().contains(&LINE_FEED) {
        return Err(StompError::Encoding(
            "command must not contain a line-feed".to_string(),
        ));
    }

    let inject_length = (options.force_content_length
        || frame.body.contains(&FRAME_TERMINATOR))
        && frame.header_value(CONTENT_LENGTH).is_none();

    // Exact for the fast path; escaping grows the vector only when a header
    // actually contains one of the three escaped bytes.
    let header_bytes: usize = frame
        .headers
        .iter()
        .map(|(k, v)| k.len() + 1 + v.len() + 1)
        .sum();
    let mut out = Vec::with_capacity(
        frame.command.len() + 1 + header_bytes + 32 + 1 + frame.body.len() + 1,
    );

    out.extend_from_slice(frame.command.as_bytes());
    out.push(LINE_FEED);

    if inject_length {
        out.extend_from_slice(CONTENT_LENGTH.as_bytes());
        out.push(HEADER_SEPARATOR);
        out.extend_from_slice(frame.body.len().to_string().as_bytes());
        out.push(LINE_FEED);
    }

    for (key, value) in &frame.headers {
        if key.is_empty() {
            return Err(StompError::Encoding("header key must not be empty".to_string()));
        }
        if options.escape_headers {
            escape_header_into(&mut out, key);
            out.push(HEADER_SEPARATOR);
            escape_header_into(&mut out, value);
        } else {
            out.extend_from_slice(key.as_bytes());
            out.push(HEADER_SEPARATOR);
            out.extend_from_slice(value.as_bytes());
        }
        out.push(LINE_FEED);
    }

    out.push(LINE_FEED);
    out.extend_from_slice(&frame.body);
    out.push(FRAME_TERMINATOR);

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_no_body_no_headers() {
        let wire = encode(&Frame::new("cmd")).unwrap();
        assert_eq!(wire, b"cmd\n\n\x00");
    }

    #[test]
    fn test_encode_headers_no_body() {
        let wire = encode(&Frame::new("cmd").header("a", "b")).unwrap();
        assert_eq!(wire, b"cmd\na:b\n\n\x00");
    }

    #[test]
    fn test_encode_text_body_no_length_header() {
        // A NUL-free body needs no content-length; the terminator delimits it.
        let wire = encode(&Frame::new("cmd").header("a", "b").body(&b"dave"[..])).unwrap();
        assert_eq!(wire, b"cmd\na:b\n\ndave\x00");
    }

    #[test]
    fn test_encode_binary_body_injects_content_length() {
        let wire = encode(&Frame::new("cmd").body(&b"a\x00b"[..])).unwrap();
        assert_eq!(wire, b"cmd\ncontent-length:3\n\na\x00b\x00");
    }

    #[test]
    fn test_encode_forced_content_length_first_header() {
        let options = EncodeOptions {
            force_content_length: true,
            ..Default::default()
        };
        let frame = Frame::new("SEND").header("destination", "/a").body(&b"dave"[..]);
        let wire = encode_with(&frame, options).unwrap();
        assert_eq!(wire, b"SEND\ncontent-length:4\n\ndestination:/a\n\ndave\x00");
    }

    #[test]
    fn test_encode_caller_supplied_content_length_not_duplicated() {
        let options = EncodeOptions {
            force_content_length: true,
            ..Default::default()
        };
        let frame = Frame::new("SEND").header("content-length", "4").body(&b"dave"[..]);
        let wire = encode_with(&frame, options).unwrap();
        assert_eq!(wire, b"SEND\ncontent-length:4\n\ndave\x00");
    }

    #[test]
    fn test_encode_escaping_disabled_by_default() {
        let wire = encode(&Frame::new("cmd").header("a", "b:c")).unwrap();
        assert_eq!(wire, b"cmd\na:b:c\n\n\x00");
    }

    #[test]
    fn test_encode_escaping_enabled() {
        let options = EncodeOptions {
            escape_headers: true,
            ..Default::default()
        };
        let frame = Frame::new("cmd").header("a:x", "b\\y\nz");
        let wire = encode_with(&frame, options).unwrap();
        assert_eq!(wire, b"cmd\na\\cx:b\\\\y\\nz\n\n\x00");
    }

    #[test]
    fn test_encode_deterministic() {
        let frame = Frame::send("/q").header("k", "v").body(&b"payload"[..]);
        assert_eq!(encode(&frame).unwrap(), encode(&frame).unwrap());
    }

    #[test]
    fn test_encode_rejects_empty_command() {
        let result = encode(&Frame::new(""));
        assert!(matches!(result, Err(StompError::Encoding(_))));
    }

    #[test]
    fn test_encode_rejects_command_with_line_feed() {
        let result = encode(&Frame::new("SE\nND"));
        assert!(matches!(result, Err(StompError::Encoding(_))));
    }

    #[test]
    fn test_encode_rejects_empty_header_key() {
        let result = encode(&Frame::new("cmd").header("", "v"));
        assert!(matches!(result, Err(StompError::Encoding(_))));
    }

    #[test]
    fn test_encode_single_terminator() {
        let wire = encode(&Frame::new("cmd").body(&b"dave"[..])).unwrap();
        assert_eq!(wire.iter().filter(|&&b| b == 0).count(), 1);
        assert_eq!(*wire.last().unwrap(), 0);
    }
}
