//! Zero-copy reader over a decoded request body

use std::io::{self, Read};

/// Cursor over a borrowed body region
///
/// The bytes stay owned by the decoded [`crate::Request`]; the stream only
/// tracks a position. Reading past the end is end-of-stream, never an error.
#[derive(Debug, Clone)]
pub struct BodyStream<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> BodyStream<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Number of bytes left to read
    pub fn available(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Total body length
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Read a single byte, `None` at end-of-stream
    pub fn read_byte(&mut self) -> Option<u8> {
        let byte = *self.data.get(self.pos)?;
        self.pos += 1;
        Some(byte)
    }

    /// Skip up to `n` bytes, returning how many were skipped
    pub fn skip(&mut self, n: u64) -> u64 {
        let remaining = self.available() as u64;
        let to_skip = n.min(remaining);
        self.pos += to_skip as usize;
        to_skip
    }

    /// Unread part of the body
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }
}

impl Read for BodyStream<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let remaining = self.remaining();
        let count = remaining.len().min(buf.len());
        buf[..count].copy_from_slice(&remaining[..count]);
        self.pos += count;
        Ok(count)
    }
}

#[cfg(test)]
#[path = "body/body_tests.rs"]
mod body_tests;
