//! Incremental frame decoder for accumulating partial reads.
//!
//! Uses `bytes::BytesMut` for buffer management and a state machine for
//! handling fragmented frames:
//! - `Command`: skipping heart-beat line-feeds, then accumulating the
//!   command line
//! - `Headers`: accumulating line-feed-terminated header lines until the
//!   empty line that ends the section
//! - `Body`: length-delimited (exact `content-length` bytes plus a
//!   mandatory NUL) or NUL-delimited (first NUL ends the body)
//!
//! Every state is resumable at any chunk boundary; only the unconsumed tail
//! is retained, bounded by the max frame size.
//!
//! # Example
//!
//! ```
//! use stompwire::protocol::Decoder;
//!
//! let mut decoder = Decoder::new();
//!
//! // Data arrives in chunks from a socket
//! let frames = decoder.feed(b"MESSAGE\ndestination:/a\n\nhi\x00").unwrap();
//! assert_eq!(frames.len(), 1);
//! assert_eq!(frames[0].command, "MESSAGE");
//! ```

use bytes::{Buf, Bytes, BytesMut};

use super::frame::Frame;
use super::wire_format::{
    unescape_header, verbatim_header, CARRIAGE_RETURN, CONTENT_LENGTH, DEFAULT_MAX_FRAME_SIZE,
    FRAME_TERMINATOR, HEADER_SEPARATOR, LINE_FEED,
};
use crate::error::{Result, StompError};

/// State machine for frame parsing.
///
/// Partially accumulated frame fields travel inside the state, so the
/// buffer only ever holds bytes not yet attributed to a field.
#[derive(Debug, Default)]
enum State {
    /// Skipping heart-beats, then waiting for a complete command line.
    #[default]
    Command,
    /// Command parsed, accumulating header lines.
    Headers {
        command: String,
        headers: Vec<(String, String)>,
    },
    /// Header section ended, waiting for body bytes.
    Body {
        command: String,
        headers: Vec<(String, String)>,
        length: Option<usize>,
    },
}

/// Incremental decoder turning a fragmented byte stream into frames.
///
/// Feed raw reads with [`feed`](Decoder::feed) as often as desired; each
/// call returns every frame completed by that chunk, in order. Call
/// [`finish`](Decoder::finish) at end-of-stream to surface truncation.
///
/// A decoder exclusively owns its partial-frame buffer: one instance per
/// connection, driven by a single reader loop. Independent instances share
/// no state. After a decoding error the instance is unrecoverable and must
/// be discarded along with its connection.
pub struct Decoder {
    /// Accumulated bytes not yet attributed to a frame field.
    buffer: BytesMut,
    /// Current parsing state, carrying the partial frame.
    state: State,
    /// Bytes of the in-progress frame already moved out of the buffer.
    consumed: usize,
    /// Maximum buffered size for one in-progress frame.
    max_frame_size: usize,
    /// Unescape `\n`, `\c`, `\\` in header keys and values.
    unescape_headers: bool,
}

impl Decoder {
    /// Create a decoder with the default max frame size and no unescaping.
    pub fn new() -> Self {
        Self::with_max_frame_size(DEFAULT_MAX_FRAME_SIZE)
    }

    /// Create a decoder with a custom max in-progress frame size.
    ///
    /// The limit covers command, headers, and a NUL-delimited body still
    /// being buffered, as well as any announced `content-length`. It bounds
    /// memory growth against a malformed or adversarial peer.
    pub fn with_max_frame_size(max_frame_size: usize) -> Self {
        Self {
            buffer: BytesMut::with_capacity(8 * 1024),
            state: State::Command,
            consumed: 0,
            max_frame_size,
            unescape_headers: false,
        }
    }

    /// Enable header unescaping (builder style).
    ///
    /// Match this to the encoder's `escape_headers` option. Some brokers
    /// skip escaping on CONNECT/CONNECTED frames, so it is off by default.
    pub fn with_header_unescaping(mut self) -> Self {
        self.unescape_headers = true;
        self
    }

    /// Feed a chunk of bytes and extract all frames it completes.
    ///
    /// Chunks may be of any size: empty, a single byte, or many frames at
    /// once. Partial data is buffered internally for the next call; bare
    /// line-feeds between frames are heart-beats and never produce a frame.
    ///
    /// # Errors
    ///
    /// [`StompError::Decoding`] on malformed wire bytes or when the
    /// in-progress frame exceeds the max frame size. No partial frame is
    /// returned for a failed parse, and the decoder must then be discarded.
    pub fn feed(&mut self, data: &[u8]) -> Result<Vec<Frame>> {
        self.buffer.extend_from_slice(data);

        let mut frames = Vec::new();
        while let Some(frame) = self.try_extract_one()? {
            frames.push(frame);
        }
        Ok(frames)
    }

    /// Signal end-of-stream.
    ///
    /// # Errors
    ///
    /// [`StompError::Decoding`] if bytes are still buffered or a frame is
    /// mid-parse: the stream was truncated, not cleanly closed.
    pub fn finish(&mut self) -> Result<()> {
        if matches!(self.state, State::Command) && self.buffer.is_empty() {
            Ok(())
        } else {
            Err(StompError::Decoding(
                "stream truncated inside an unfinished frame".to_string(),
            ))
        }
    }

    /// Get the number of buffered bytes not yet attributed to a frame.
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if no partial frame data is pending.
    pub fn is_empty(&self) -> bool {
        matches!(self.state, State::Command) && self.buffer.is_empty()
    }

    /// Try to extract a single frame from the buffer.
    ///
    /// Returns:
    /// - `Ok(Some(frame))` if a complete frame was extracted
    /// - `Ok(None)` if more data is needed
    /// - `Err(...)` on a protocol violation
    fn try_extract_one(&mut self) -> Result<Option<Frame>> {
        match std::mem::take(&mut self.state) {
            State::Command => {
                self.skip_heartbeats()?;

                let Some(eol) = find_byte(&self.buffer, LINE_FEED) else {
                    // State stays Command; a lone trailing CR also waits here.
                    self.check_size_guard()?;
                    return Ok(None);
                };
                let line = self.take_line(eol);
                let command = std::str::from_utf8(&line)
                    .map_err(|_| {
                        StompError::Decoding("command is not valid UTF-8".to_string())
                    })?
                    .to_owned();

                self.state = State::Headers {
                    command,
                    headers: Vec::new(),
                };
                self.try_extract_one()
            }

            State::Headers {
                command,
                mut headers,
            } => {
                loop {
                    let Some(eol) = find_byte(&self.buffer, LINE_FEED) else {
                        self.state = State::Headers { command, headers };
                        self.check_size_guard()?;
                        return Ok(None);
                    };
                    let line = self.take_line(eol);

                    if line.is_empty() {
                        // Empty line ends the header section.
                        let length = content_length_of(&headers)?;
                        if let Some(n) = length {
                            if n > self.max_frame_size {
                                return Err(StompError::Decoding(format!(
                                    "announced body length {} exceeds maximum frame size {}",
                                    n, self.max_frame_size
                                )));
                            }
                        }
                        self.state = State::Body {
                            command,
                            headers,
                            length,
                        };
                        return self.try_extract_one();
                    }

                    // Escape sequences use a backslash introducer, so the
                    // first raw colon is the separator in either mode.
                    let sep = find_byte(&line, HEADER_SEPARATOR).ok_or_else(|| {
                        StompError::Decoding("header line without colon separator".to_string())
                    })?;
                    let (key, value) = if self.unescape_headers {
                        (
                            unescape_header(&line[..sep])?,
                            unescape_header(&line[sep + 1..])?,
                        )
                    } else {
                        (
                            verbatim_header(&line[..sep])?,
                            verbatim_header(&line[sep + 1..])?,
                        )
                    };
                    headers.push((key, value));
                }
            }

            State::Body {
                command,
                headers,
                length,
            } => {
                let body = match length {
                    Some(n) => {
                        // Body plus its mandatory NUL terminator.
                        if self.buffer.len() < n + 1 {
                            self.state = State::Body {
                                command,
                                headers,
                                length,
                            };
                            return Ok(None);
                        }
                        let body = self.buffer.split_to(n).freeze();
                        let terminator = self.buffer[0];
                        self.buffer.advance(1);
                        if terminator != FRAME_TERMINATOR {
                            return Err(StompError::Decoding(format!(
                                "expected NUL after {}-byte body, found 0x{:02x}",
                                n, terminator
                            )));
                        }
                        body
                    }
                    None => {
                        let Some(end) = find_byte(&self.buffer, FRAME_TERMINATOR) else {
                            self.state = State::Body {
                                command,
                                headers,
                                length,
                            };
                            self.check_size_guard()?;
                            return Ok(None);
                        };
                        let body = self.buffer.split_to(end).freeze();
                        self.buffer.advance(1);
                        body
                    }
                };

                self.consumed = 0;
                Ok(Some(Frame {
                    command,
                    headers,
                    body,
                }))
            }
        }
    }

    /// Discard heart-beat line-feeds (and CRLF pairs) before a command.
    fn skip_heartbeats(&mut self) -> Result<()> {
        loop {
            match self.buffer.first().copied() {
                Some(LINE_FEED) => self.buffer.advance(1),
                Some(CARRIAGE_RETURN) => match self.buffer.get(1).copied() {
                    Some(LINE_FEED) => self.buffer.advance(2),
                    Some(_) => {
                        return Err(StompError::Decoding(
                            "bare carriage return where a command was expected".to_string(),
                        ));
                    }
                    // Lone trailing CR: wait for the next chunk.
                    None => return Ok(()),
                },
                _ => return Ok(()),
            }
        }
    }

    /// Consume one line up to `eol`, dropping the line-feed and an optional
    /// carriage return before it.
    fn take_line(&mut self, eol: usize) -> Bytes {
        let mut line = self.buffer.split_to(eol);
        self.buffer.advance(1);
        self.consumed += eol + 1;
        if line.last() == Some(&CARRIAGE_RETURN) {
            line.truncate(line.len() - 1);
        }
        line.freeze()
    }

    /// Fail if the in-progress frame has outgrown the configured maximum.
    fn check_size_guard(&self) -> Result<()> {
        if self.consumed + self.buffer.len() > self.max_frame_size {
            return Err(StompError::Decoding(format!(
                "frame exceeds maximum size {}",
                self.max_frame_size
            )));
        }
        Ok(())
    }

    /// Get the current state for debugging.
    #[cfg(test)]
    fn state_name(&self) -> &'static str {
        match &self.state {
            State::Command => "Command",
            State::Headers { .. } => "Headers",
            State::Body { .. } => "Body",
        }
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Find the first occurrence of `needle` in `haystack`.
#[inline]
fn find_byte(haystack: &[u8], needle: u8) -> Option<usize> {
    haystack.iter().position(|&b| b == needle)
}

/// Parse the first `content-length` header, if any.
fn content_length_of(headers: &[(String, String)]) -> Result<Option<usize>> {
    let Some(value) = headers
        .iter()
        .find(|(key, _)| key == CONTENT_LENGTH)
        .map(|(_, value)| value.as_str())
    else {
        return Ok(None);
    };
    value
        .parse::<usize>()
        .map(Some)
        .map_err(|_| StompError::Decoding(format!("invalid content-length {:?}", value)))
}
