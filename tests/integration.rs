//! Integration tests for stompwire.
//!
//! These tests verify encode/decode as a pair: everything the encoder
//! produces must come back out of the decoder unchanged, however the bytes
//! are fragmented on the way in.

use stompwire::protocol::{encode, encode_with, Decoder, EncodeOptions, Frame};

/// Encode, feed the bytes whole, and return the single resulting frame.
fn round_trip(frame: &Frame) -> Frame {
    let wire = encode(frame).unwrap();
    let mut decoder = Decoder::new();
    let mut frames = decoder.feed(&wire).unwrap();
    assert_eq!(frames.len(), 1);
    assert!(decoder.is_empty());
    frames.pop().unwrap()
}

#[test]
fn test_round_trip_preserves_ordered_headers() {
    let frame = Frame::new("SEND")
        .header("destination", "/foo/bar")
        .header("priority", "4")
        .header("receipt", "42")
        .body(&b"dave"[..]);

    let parsed = round_trip(&frame);
    assert_eq!(parsed, frame);
}

#[test]
fn test_round_trip_duplicate_headers_kept_in_order() {
    let frame = Frame::new("SEND")
        .header("key", "value1")
        .header("key", "value2");

    let parsed = round_trip(&frame);
    assert_eq!(parsed.headers, frame.headers);
    assert_eq!(parsed.header_value("key"), Some("value1"));
}

#[test]
fn test_round_trip_escaped_headers() {
    let options = EncodeOptions {
        escape_headers: true,
        ..Default::default()
    };
    let frame = Frame::new("SEND")
        .header("weird:key", "value\nwith\\specials")
        .body(&b"x"[..]);

    let wire = encode_with(&frame, options).unwrap();
    let mut decoder = Decoder::new().with_header_unescaping();
    let frames = decoder.feed(&wire).unwrap();

    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0], frame);
}

#[test]
fn test_round_trip_binary_body() {
    let frame = Frame::new("MESSAGE").body(&b"a\x00b"[..]);

    let wire = encode(&frame).unwrap();
    assert!(wire.starts_with(b"MESSAGE\ncontent-length:3\n"));

    let mut decoder = Decoder::new();
    let frames = decoder.feed(&wire).unwrap();
    assert_eq!(&frames[0].body[..], b"a\x00b");
}

#[test]
fn test_round_trip_every_standard_constructor() {
    for frame in [
        Frame::connect("localhost"),
        Frame::send("/foo/bar").body(&b"dave"[..]),
        Frame::subscribe("/foo/bar", "123"),
        Frame::unsubscribe("/foo/bar", "123"),
        Frame::ack("123"),
        Frame::nack("123"),
        Frame::begin("tx1"),
        Frame::commit("tx1"),
        Frame::abort("tx1"),
        Frame::disconnect("77"),
    ] {
        assert_eq!(round_trip(&frame), frame);
    }
}

#[test]
fn test_encode_is_deterministic() {
    let frame = Frame::send("/q").header("k", "v").body(&b"payload"[..]);
    assert_eq!(encode(&frame).unwrap(), encode(&frame).unwrap());
}

#[test]
fn test_chunk_invariance_every_split_point() {
    let frame = Frame::send("/foo/bar")
        .header("a", "b")
        .body(&b"some body text"[..]);
    let wire = encode(&frame).unwrap();

    for split in 1..wire.len() {
        let mut decoder = Decoder::new();
        let mut frames = decoder.feed(&wire[..split]).unwrap();
        frames.extend(decoder.feed(&wire[split..]).unwrap());

        assert_eq!(frames.len(), 1, "split at {} lost the frame", split);
        assert_eq!(frames[0], frame, "split at {} corrupted the frame", split);
        assert!(decoder.is_empty());
    }
}

#[test]
fn test_chunk_invariance_fixed_chunk_sizes() {
    let mut wire = Vec::new();
    for i in 0..5 {
        let frame = Frame::send(format!("/queue/{}", i)).body(format!("body {}", i).into_bytes());
        wire.extend_from_slice(&encode(&frame).unwrap());
        wire.extend_from_slice(b"\n");
    }

    // Whole-buffer parse is the reference result.
    let mut reference = Decoder::new();
    let expected = reference.feed(&wire).unwrap();
    assert_eq!(expected.len(), 5);

    for chunk_size in [1, 2, 3, 7, 16, 64] {
        let mut decoder = Decoder::new();
        let mut frames = Vec::new();
        for chunk in wire.chunks(chunk_size) {
            frames.extend(decoder.feed(chunk).unwrap());
        }
        assert_eq!(frames, expected, "chunk size {} diverged", chunk_size);
        decoder.finish().unwrap();
    }
}

#[test]
fn test_multi_frame_batching_single_feed() {
    let first = Frame::send("/a").body(&b"one"[..]);
    let second = Frame::send("/b").body(&b"two"[..]);

    let mut wire = encode(&first).unwrap();
    wire.extend_from_slice(&encode(&second).unwrap());

    let mut decoder = Decoder::new();
    let frames = decoder.feed(&wire).unwrap();

    assert_eq!(frames, vec![first, second]);
}

#[test]
fn test_heartbeat_transparency_between_frames() {
    let first = Frame::send("/a").body(&b"one"[..]);
    let second = Frame::send("/b").body(&b"two"[..]);

    let mut wire = encode(&first).unwrap();
    wire.extend_from_slice(b"\n\n");
    wire.extend_from_slice(&encode(&second).unwrap());

    let mut decoder = Decoder::new();
    let frames = decoder.feed(&wire).unwrap();

    assert_eq!(frames, vec![first, second]);
    assert!(decoder.is_empty());
}

#[test]
fn test_heartbeat_padding_split_across_feeds() {
    let frame = Frame::send("/a").body(&b"dave"[..]);
    let mut wire = b"\n\r\n\n".to_vec();
    wire.extend_from_slice(&encode(&frame).unwrap());
    wire.extend_from_slice(b"\n\r\n\n");

    // Split inside the leading EOL padding.
    let mut decoder = Decoder::new();
    let mut frames = decoder.feed(&wire[..3]).unwrap();
    frames.extend(decoder.feed(&wire[3..]).unwrap());

    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0], frame);
    decoder.finish().unwrap();
}

#[test]
fn test_interleaved_sends_and_receipts() {
    // A realistic broker exchange: message, receipt, message.
    let mut wire = Vec::new();
    wire.extend_from_slice(
        &encode(&Frame::new("MESSAGE").header("subscription", "0").body(&b"m1"[..])).unwrap(),
    );
    wire.extend_from_slice(&encode(&Frame::new("RECEIPT").header("receipt-id", "42")).unwrap());
    wire.extend_from_slice(
        &encode(&Frame::new("MESSAGE").header("subscription", "0").body(&b"m2"[..])).unwrap(),
    );

    let mut decoder = Decoder::new();
    let frames = decoder.feed(&wire).unwrap();

    assert_eq!(frames.len(), 3);
    assert_eq!(frames[0].command, "MESSAGE");
    assert_eq!(frames[1].command, "RECEIPT");
    assert_eq!(frames[1].header_value("receipt-id"), Some("42"));
    assert_eq!(frames[2].command, "MESSAGE");
}

#[test]
fn test_forced_content_length_survives_round_trip() {
    let options = EncodeOptions {
        force_content_length: true,
        ..Default::default()
    };
    let frame = Frame::send("/q").body(&b"dave"[..]);
    let wire = encode_with(&frame, options).unwrap();

    let mut decoder = Decoder::new();
    let frames = decoder.feed(&wire).unwrap();

    assert_eq!(frames[0].header_value("content-length"), Some("4"));
    assert_eq!(&frames[0].body[..], b"dave");
}
