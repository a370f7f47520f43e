//! Packed symbol framing for the arithmetic-over-LZ77 back end.
//!
//! Each LZ77 [`Triple`] is packed into a 16-bit word `(offset << 4) |
//! length`; when `offset == MAX_OFFSET` (the literal marker) an extra byte
//! carries the literal's codepoint. The arithmetic coder treats the
//! packed word (and, conditionally, the trailing literal byte) as symbols
//! over a single adaptive 65537-entry table shared across the whole
//! stream — entry `65536` is the reserved EOF symbol.

use crate::arith::{ArithmeticDecoder, ArithmeticEncoder};
use crate::error::Result;
use crate::freq::{FlatFrequencyTable, FrequencyTable, SimpleFrequencyTable};
use crate::lz77::{MAX_OFFSET, Triple};
use std::io::{Read, Write};

/// Number of symbols in the packed table: every 16-bit packed word, plus
/// one reserved EOF symbol.
pub const PACKED_SYMBOL_LIMIT: u32 = 65537;
/// The EOF symbol terminating a packed stream.
pub const EOF_SYMBOL: u32 = 65536;

fn pack(t: &Triple) -> u32 {
    ((t.offset as u32) << 4) | (t.length as u32)
}

fn unpack(value: u32) -> (u16, u8) {
    ((value >> 4) as u16, (value & 0xF) as u8)
}

/// A freshly-seeded adaptive table for the packed back end (a copy of a
/// flat table over all 65537 symbols, per spec).
pub fn new_packed_table() -> Result<SimpleFrequencyTable> {
    SimpleFrequencyTable::from_table(&mut FlatFrequencyTable::new(PACKED_SYMBOL_LIMIT)?)
}

/// Arithmetic-encode a sequence of LZ77 triples, terminated by the EOF
/// symbol, using one shared adaptive table.
pub fn encode<W: Write>(enc: &mut ArithmeticEncoder<W>, triples: &[Triple]) -> Result<()> {
    let mut freqs = new_packed_table()?;
    for t in triples {
        let value = pack(t);
        enc.write(&mut freqs, value)?;
        freqs.increment(value)?;
        if t.offset == MAX_OFFSET {
            let lit = t.literal.unwrap_or(0) as u32;
            enc.write(&mut freqs, lit)?;
            freqs.increment(lit)?;
        }
    }
    enc.write(&mut freqs, EOF_SYMBOL)?;
    Ok(())
}

/// Decode a packed arithmetic stream back into LZ77 triples.
pub fn decode<R: Read>(dec: &mut ArithmeticDecoder<R>) -> Result<Vec<Triple>> {
    let mut freqs = new_packed_table()?;
    let mut triples = Vec::new();
    loop {
        let value = dec.read(&mut freqs)?;
        if value == EOF_SYMBOL {
            break;
        }
        freqs.increment(value)?;
        let (offset, length) = unpack(value);
        let literal = if offset == MAX_OFFSET {
            let lit = dec.read(&mut freqs)?;
            freqs.increment(lit)?;
            Some(lit as u8)
        } else {
            None
        };
        triples.push(Triple {
            offset,
            length,
            literal,
        });
    }
    Ok(triples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitstream::{BitReader, BitWriter};
    use std::io::Cursor;

    #[test]
    fn round_trips_triples_with_and_without_literal() {
        let triples = vec![
            Triple {
                offset: 10,
                length: 5,
                literal: Some(b'a'),
            },
            Triple {
                offset: MAX_OFFSET,
                length: 3,
                literal: Some(b'x'),
            },
            Triple {
                offset: MAX_OFFSET,
                length: 0,
                literal: Some(b'z'),
            },
        ];

        let mut out = Vec::new();
        {
            let mut enc = ArithmeticEncoder::new(BitWriter::new(&mut out));
            encode(&mut enc, &triples).unwrap();
            enc.finish().unwrap().finish().unwrap();
        }

        let mut dec = ArithmeticDecoder::new(BitReader::new(Cursor::new(&out)));
        let decoded = decode(&mut dec).unwrap();
        assert_eq!(decoded, triples);
    }

    #[test]
    fn round_trips_empty_triple_sequence() {
        let mut out = Vec::new();
        {
            let mut enc = ArithmeticEncoder::new(BitWriter::new(&mut out));
            encode(&mut enc, &[]).unwrap();
            enc.finish().unwrap().finish().unwrap();
        }
        let mut dec = ArithmeticDecoder::new(BitReader::new(Cursor::new(&out)));
        assert_eq!(decode(&mut dec).unwrap(), Vec::new());
    }

    #[test]
    fn pack_unpack_round_trips() {
        let t = Triple {
            offset: 4095,
            length: 15,
            literal: None,
        };
        let (o, l) = unpack(pack(&t));
        assert_eq!(o, t.offset);
        assert_eq!(l, t.length);
    }
}
