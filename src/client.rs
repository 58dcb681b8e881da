//! Thin asynchronous debug client over the core codec.
//!
//! The core never performs I/O; this adapter owns a transport and drives
//! the two core primitives: [`encode`] for outbound frames and
//! [`Decoder::feed`] for inbound bytes. It is deliberately dumb - no
//! version negotiation, no reconnect, no broker semantics - and is suited
//! to scripts that inject or monitor bus messages.
//!
//! The adapter is generic over any `AsyncRead + AsyncWrite` stream, so the
//! same code runs over TCP, TLS wrappers, or an in-memory duplex in tests.
//!
//! # Example
//!
//! ```ignore
//! use stompwire::Client;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut client = Client::connect("localhost", 61613).await?;
//!     client.login("localhost", Some("guest"), Some("guest")).await?;
//!     client.subscribe("/queue/a", "sub-0").await?;
//!     loop {
//!         let frame = client.next().await?;
//!         println!("received: {:?}", frame);
//!     }
//! }
//! ```

use std::collections::VecDeque;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::error::{Result, StompError};
use crate::protocol::{encode, Decoder, Frame};

/// Read buffer size for each transport read.
const READ_BUFFER_SIZE: usize = 64 * 1024;

/// Dumb asynchronous client driving the codec over a byte stream.
///
/// Owns exactly one [`Decoder`]; frames parsed ahead of the caller are
/// queued and handed out in order by [`next`](Client::next).
pub struct Client<S = TcpStream> {
    /// The owned transport.
    stream: S,
    /// Incremental parser fed from transport reads.
    decoder: Decoder,
    /// Frames parsed but not yet consumed.
    ready: VecDeque<Frame>,
    /// Scratch buffer for transport reads.
    read_buf: Vec<u8>,
}

impl Client<TcpStream> {
    /// Open a TCP connection to a broker.
    ///
    /// No frame is sent; call [`login`](Client::login) to send CONNECT.
    pub async fn connect(host: &str, port: u16) -> Result<Self> {
        let stream = TcpStream::connect((host, port)).await?;
        tracing::debug!(host, port, "connected");
        Ok(Self::from_stream(stream))
    }
}

impl<S: AsyncRead + AsyncWrite + Unpin> Client<S> {
    /// Wrap an already-connected stream.
    pub fn from_stream(stream: S) -> Self {
        Self {
            stream,
            decoder: Decoder::new(),
            ready: VecDeque::new(),
            read_buf: vec![0u8; READ_BUFFER_SIZE],
        }
    }

    /// Send a CONNECT frame, with credential headers when given.
    pub async fn login(
        &mut self,
        host: &str,
        login: Option<&str>,
        passcode: Option<&str>,
    ) -> Result<()> {
        let mut frame = Frame::connect(host);
        if login.is_some() || passcode.is_some() {
            frame = frame
                .header("login", login.unwrap_or(""))
                .header("passcode", passcode.unwrap_or(""));
        }
        self.send_frame(&frame).await
    }

    /// Encode a frame and write it to the transport.
    pub async fn send_frame(&mut self, frame: &Frame) -> Result<()> {
        let wire = encode(frame)?;
        self.stream.write_all(&wire).await?;
        self.stream.flush().await?;
        tracing::trace!(command = %frame.command, bytes = wire.len(), "frame sent");
        Ok(())
    }

    /// Wait for the next available frame.
    ///
    /// Frames already parsed are returned immediately; otherwise the
    /// transport is read until the decoder completes one. Heart-beats are
    /// consumed silently and never surface here.
    ///
    /// # Errors
    ///
    /// [`StompError::ConnectionClosed`] on clean EOF,
    /// [`StompError::Decoding`] when the peer closes mid-frame or sends
    /// malformed bytes (discard the client afterwards).
    pub async fn next(&mut self) -> Result<Frame> {
        loop {
            if let Some(frame) = self.ready.pop_front() {
                return Ok(frame);
            }

            let n = self.stream.read(&mut self.read_buf).await?;
            if n == 0 {
                self.decoder.finish()?;
                return Err(StompError::ConnectionClosed);
            }

            let frames = self.decoder.feed(&self.read_buf[..n])?;
            if !frames.is_empty() {
                tracing::trace!(count = frames.len(), "frames received");
            }
            self.ready.extend(frames);
        }
    }

    // Forwarders for the standard-command constructors, so simple scripts
    // never touch Frame directly.

    /// Send a SEND frame carrying `body` to a destination.
    pub async fn send(&mut self, destination: &str, body: &[u8]) -> Result<()> {
        self.send_frame(&Frame::send(destination).body(body.to_vec()))
            .await
    }

    /// Send a SUBSCRIBE frame.
    pub async fn subscribe(&mut self, destination: &str, id: &str) -> Result<()> {
        self.send_frame(&Frame::subscribe(destination, id)).await
    }

    /// Send an UNSUBSCRIBE frame.
    pub async fn unsubscribe(&mut self, destination: &str, id: &str) -> Result<()> {
        self.send_frame(&Frame::unsubscribe(destination, id)).await
    }

    /// Send an ACK frame.
    pub async fn ack(&mut self, id: &str) -> Result<()> {
        self.send_frame(&Frame::ack(id)).await
    }

    /// Send a NACK frame.
    pub async fn nack(&mut self, id: &str) -> Result<()> {
        self.send_frame(&Frame::nack(id)).await
    }

    /// Send a BEGIN frame.
    pub async fn begin(&mut self, transaction: &str) -> Result<()> {
        self.send_frame(&Frame::begin(transaction)).await
    }

    /// Send a COMMIT frame.
    pub async fn commit(&mut self, transaction: &str) -> Result<()> {
        self.send_frame(&Frame::commit(transaction)).await
    }

    /// Send an ABORT frame.
    pub async fn abort(&mut self, transaction: &str) -> Result<()> {
        self.send_frame(&Frame::abort(transaction)).await
    }

    /// Send a DISCONNECT frame.
    pub async fn disconnect(&mut self, receipt: &str) -> Result<()> {
        self.send_frame(&Frame::disconnect(receipt)).await
    }
}
