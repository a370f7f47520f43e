//! Outer orchestration: race both back ends, keep the smaller output.
//!
//! [`compress`] runs the substitution + LZ77 + packed-arithmetic path and
//! the order-3 PPM-arithmetic path independently over the same input,
//! prepends a one-byte discriminator (`'0'` = PPM, `'1'` = arithmetic/LZ77)
//! to each candidate, and keeps whichever is smaller. On a tie the PPM
//! encoding wins, mirroring the original's `len(ppm) > len(lz)` compare
//! (strictly-greater, so equality favors the left-hand side: PPM).

use crate::arith::{ArithmeticDecoder, ArithmeticEncoder};
use crate::bitstream::{BitReader, BitWriter};
use crate::error::{Result, TexZipError};
use crate::lz77;
use crate::packed;
use crate::ppm::PpmModel;
use crate::substitution;
use std::io::Cursor;

/// Discriminator byte for the PPM back end.
pub const DISCRIMINATOR_PPM: u8 = b'0';
/// Discriminator byte for the arithmetic/LZ77 back end.
pub const DISCRIMINATOR_LZ: u8 = b'1';

const PPM_ORDER: i32 = 3;
const PPM_SYMBOL_LIMIT: u32 = 257;
const PPM_EOF: u32 = 256;

/// Compress `input`, returning the smaller of the two back ends' outputs
/// with its discriminator byte prepended.
///
/// # Precondition
///
/// `input` must not contain a BEL byte (`0x07`); see [`substitution`] for
/// why this is not validated here.
pub fn compress(input: &[u8]) -> Result<Vec<u8>> {
    let lz_encoded = encode_lz(input)?;
    let ppm_encoded = encode_ppm(input)?;

    let mut lz_out = Vec::with_capacity(lz_encoded.len() + 1);
    lz_out.push(DISCRIMINATOR_LZ);
    lz_out.extend_from_slice(&lz_encoded);

    let mut ppm_out = Vec::with_capacity(ppm_encoded.len() + 1);
    ppm_out.push(DISCRIMINATOR_PPM);
    ppm_out.extend_from_slice(&ppm_encoded);

    // PPM wins ties: only switch to the LZ77 path if it is strictly smaller.
    if lz_out.len() < ppm_out.len() {
        Ok(lz_out)
    } else {
        Ok(ppm_out)
    }
}

/// Decompress a stream produced by [`compress`].
pub fn decompress(input: &[u8]) -> Result<Vec<u8>> {
    let (&discriminator, body) = input
        .split_first()
        .ok_or_else(|| TexZipError::corrupted("format", "empty input, missing discriminator"))?;

    match discriminator {
        DISCRIMINATOR_PPM => decode_ppm(body),
        DISCRIMINATOR_LZ => decode_lz(body),
        other => Err(TexZipError::corrupted(
            "format",
            format!("unknown discriminator byte {other:#04x}"),
        )),
    }
}

fn encode_lz(input: &[u8]) -> Result<Vec<u8>> {
    let folded = substitution::fold(input);
    let triples = lz77::compress(&folded);

    let mut out = Vec::new();
    {
        let mut enc = ArithmeticEncoder::new(BitWriter::new(&mut out));
        packed::encode(&mut enc, &triples)?;
        enc.finish()?.finish()?;
    }
    Ok(out)
}

fn decode_lz(body: &[u8]) -> Result<Vec<u8>> {
    let mut dec = ArithmeticDecoder::new(BitReader::new(Cursor::new(body)));
    let triples = packed::decode(&mut dec)?;
    let folded = lz77::decompress(&triples);
    Ok(substitution::unfold(&folded))
}

fn encode_ppm(input: &[u8]) -> Result<Vec<u8>> {
    let mut model = PpmModel::new(PPM_ORDER, PPM_SYMBOL_LIMIT, PPM_EOF)?;
    let mut out = Vec::new();
    {
        let mut enc = ArithmeticEncoder::new(BitWriter::new(&mut out));
        let mut history = Vec::new();
        for &b in input {
            let symbol = b as u32;
            model.encode_symbol(&mut enc, &history, symbol)?;
            model.increment_contexts(&history, symbol)?;
            model.push_history(&mut history, symbol);
        }
        model.encode_symbol(&mut enc, &history, PPM_EOF)?;
        enc.finish()?.finish()?;
    }
    Ok(out)
}

fn decode_ppm(body: &[u8]) -> Result<Vec<u8>> {
    let mut model = PpmModel::new(PPM_ORDER, PPM_SYMBOL_LIMIT, PPM_EOF)?;
    let mut dec = ArithmeticDecoder::new(BitReader::new(Cursor::new(body)));
    let mut history = Vec::new();
    let mut out = Vec::new();
    loop {
        let symbol = model.decode_symbol(&mut dec, &history)?;
        if symbol == PPM_EOF {
            break;
        }
        model.increment_contexts(&history, symbol)?;
        model.push_history(&mut history, symbol);
        out.push(symbol as u8);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(input: &[u8]) {
        let compressed = compress(input).unwrap();
        let decompressed = decompress(&compressed).unwrap();
        assert_eq!(decompressed, input, "round trip mismatch for {input:?}");
    }

    #[test]
    fn round_trips_empty_input() {
        round_trip(b"");
    }

    #[test]
    fn round_trips_plain_text() {
        round_trip(b"the quick brown fox jumps over the lazy dog");
    }

    #[test]
    fn round_trips_latex_with_repetition() {
        let text = b"\\section{Intro}\n\\begin{enumerate}\n\\item First\n\\item Second\n\\end{enumerate}\n".repeat(4);
        round_trip(&text);
    }

    #[test]
    fn picks_smaller_backend_and_tags_it() {
        let text = b"aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
        let compressed = compress(text).unwrap();
        assert!(compressed[0] == DISCRIMINATOR_PPM || compressed[0] == DISCRIMINATOR_LZ);
    }

    #[test]
    fn rejects_unknown_discriminator() {
        let bad = vec![b'9', 0, 0, 0];
        assert!(decompress(&bad).is_err());
    }

    #[test]
    fn rejects_empty_stream() {
        assert!(decompress(&[]).is_err());
    }
}
