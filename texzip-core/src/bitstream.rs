//! Bit-level I/O for the arithmetic coder.
//!
//! Unlike a general-purpose bit packer, the arithmetic coder depends on
//! exact single-bit granularity and on the end-of-stream behavior: once
//! the underlying reader is exhausted, further reads must yield an
//! infinite tail of zero bits rather than an error, so the coder can
//! flush its final symbol without special-casing EOF.
//!
//! # Bit ordering
//!
//! Bits are packed MSB-first within each byte: the first bit written
//! becomes the most significant bit of the first output byte.

use crate::error::Result;
use std::io::{Read, Write};

/// Reads individual bits, MSB-first, from an underlying byte stream.
///
/// Reading past the end of the underlying stream is not an error: it
/// returns `0` forever. This matches the reference coder's behavior,
/// which relies on a virtual tail of zero bits to resolve the final
/// symbol on decode.
#[derive(Debug)]
pub struct BitReader<R: Read> {
    reader: R,
    /// `None` once the underlying reader has reached EOF.
    current_byte: Option<u8>,
    /// Number of unread bits remaining in `current_byte`, 0..=7.
    bits_remaining: u8,
    total_bits_read: u64,
}

impl<R: Read> BitReader<R> {
    /// Wrap a byte reader for bit-level access.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            current_byte: Some(0),
            bits_remaining: 0,
            total_bits_read: 0,
        }
    }

    /// Total number of bits read so far (including virtual zero bits
    /// read after EOF), useful for diagnostics.
    pub fn bits_read(&self) -> u64 {
        self.total_bits_read
    }

    /// Read a single bit. Never fails; returns `0` past EOF.
    pub fn read_bit(&mut self) -> u8 {
        self.total_bits_read += 1;
        if self.current_byte.is_none() {
            return 0;
        }
        if self.bits_remaining == 0 {
            let mut buf = [0u8; 1];
            match self.reader.read(&mut buf) {
                Ok(1) => {
                    self.current_byte = Some(buf[0]);
                    self.bits_remaining = 8;
                }
                _ => {
                    self.current_byte = None;
                    return 0;
                }
            }
        }
        let byte = self.current_byte.expect("checked above");
        self.bits_remaining -= 1;
        (byte >> self.bits_remaining) & 1
    }
}

/// Writes individual bits, MSB-first, to an underlying byte writer.
///
/// Bits accumulate in a byte buffer and are flushed one byte at a time;
/// `finish` zero-pads any partial final byte and returns the underlying
/// writer.
#[derive(Debug)]
pub struct BitWriter<W: Write> {
    writer: W,
    current_byte: u8,
    bits_filled: u8,
}

impl<W: Write> BitWriter<W> {
    /// Wrap a byte writer for bit-level access.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            current_byte: 0,
            bits_filled: 0,
        }
    }

    /// Write a single bit (must be 0 or 1).
    pub fn write_bit(&mut self, bit: u8) -> Result<()> {
        debug_assert!(bit == 0 || bit == 1, "bit must be 0 or 1");
        self.current_byte = (self.current_byte << 1) | (bit & 1);
        self.bits_filled += 1;
        if self.bits_filled == 8 {
            self.writer.write_all(&[self.current_byte])?;
            self.current_byte = 0;
            self.bits_filled = 0;
        }
        Ok(())
    }

    /// Zero-pad to the next byte boundary and return the underlying
    /// writer. Must be called exactly once, after the encoder's
    /// `finish()` has emitted its terminating bit.
    pub fn finish(mut self) -> Result<W> {
        while self.bits_filled != 0 {
            self.write_bit(0)?;
        }
        Ok(self.writer)
    }
}
