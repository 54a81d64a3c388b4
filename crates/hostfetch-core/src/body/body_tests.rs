#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

#[test]
fn BodyStream___new___available_is_full_length() {
    let stream = BodyStream::new(b"hello");

    assert_eq!(stream.available(), 5);
    assert_eq!(stream.len(), 5);
    assert_eq!(stream.position(), 0);
}

#[test]
fn BodyStream___read_byte___walks_to_end_of_stream() {
    let mut stream = BodyStream::new(&[0x01, 0xff]);

    assert_eq!(stream.read_byte(), Some(0x01));
    assert_eq!(stream.read_byte(), Some(0xff));
    assert_eq!(stream.read_byte(), None);
    assert_eq!(stream.read_byte(), None);
}

#[test]
fn BodyStream___read_with_available___never_reads_past_end() {
    let body = b"abcdefghij";
    let mut stream = BodyStream::new(body);
    let mut collected = Vec::new();
    let mut chunk = [0u8; 3];

    while stream.available() > 0 {
        let n = stream.read(&mut chunk).unwrap();
        assert!(n > 0);
        collected.extend_from_slice(&chunk[..n]);
    }

    assert_eq!(collected, body);
    assert_eq!(stream.position(), body.len());
    assert_eq!(stream.read(&mut chunk).unwrap(), 0);
}

#[test]
fn BodyStream___read_advances_position() {
    let mut stream = BodyStream::new(b"abcdef");
    let mut buf = [0u8; 4];

    stream.read(&mut buf).unwrap();
    let second = stream.read(&mut buf).unwrap();

    assert_eq!(second, 2);
    assert_eq!(&buf[..2], b"ef");
}

#[test]
fn BodyStream___read_to_end___yields_whole_body() {
    let mut stream = BodyStream::new(b"payload");
    let mut out = Vec::new();

    stream.read_to_end(&mut out).unwrap();

    assert_eq!(out, b"payload");
}

#[test]
fn BodyStream___read_empty_body___is_end_of_stream() {
    let mut stream = BodyStream::new(&[]);
    let mut buf = [0u8; 8];

    assert!(stream.is_empty());
    assert_eq!(stream.read(&mut buf).unwrap(), 0);
}

#[test_case(0, 0, 10 ; "zero skips nothing")]
#[test_case(4, 4, 6 ; "partial skip")]
#[test_case(10, 10, 0 ; "exact skip")]
#[test_case(50, 10, 0 ; "oversized skip clamps to remaining")]
fn BodyStream___skip___returns_count_skipped(n: u64, expected: u64, left: usize) {
    let mut stream = BodyStream::new(b"0123456789");

    let skipped = stream.skip(n);

    assert_eq!(skipped, expected);
    assert_eq!(stream.available(), left);
}

#[test]
fn BodyStream___skip_after_read___skips_only_remaining() {
    let mut stream = BodyStream::new(b"0123456789");
    stream.read_byte();
    stream.read_byte();

    let skipped = stream.skip(u64::MAX);

    assert_eq!(skipped, 8);
    assert_eq!(stream.read_byte(), None);
}
