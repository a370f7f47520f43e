//! Order-N PPM (Prediction by Partial Matching) byte model with
//! escape-to-lower-order fallback.
//!
//! Contexts form an N-ary tree of maximum depth `model_order`, rooted at
//! [`PpmModel::root_context`]. Each context holds a frequency table over
//! the full symbol alphabet plus, below `model_order`, a lazily-populated
//! array of child contexts keyed by the next symbol. A shared flat table
//! over the alphabet stands in for the order-(-1) fallback.

use crate::arith::{ArithmeticDecoder, ArithmeticEncoder};
use crate::error::{Result, TexZipError};
use crate::freq::{FlatFrequencyTable, FrequencyTable, SimpleFrequencyTable};
use std::io::{Read, Write};

/// A single node in the PPM context tree.
#[derive(Debug)]
pub struct Context {
    frequencies: SimpleFrequencyTable,
    /// `None` at the maximum configured depth (no further refinement).
    children: Option<Vec<Option<Box<Context>>>>,
}

impl Context {
    fn new(symbol_limit: u32, has_children: bool) -> Result<Self> {
        let frequencies = SimpleFrequencyTable::from_counts(vec![0; symbol_limit as usize])?;
        Ok(Self {
            frequencies,
            children: has_children.then(|| (0..symbol_limit).map(|_| None).collect()),
        })
    }
}

/// An order-N PPM model over a fixed symbol alphabet with a dedicated
/// escape symbol.
#[derive(Debug)]
pub struct PpmModel {
    model_order: i32,
    symbol_limit: u32,
    escape_symbol: u32,
    root_context: Option<Context>,
    order_minus1_freqs: FlatFrequencyTable,
}

impl PpmModel {
    /// Create a new model. `order` must be `>= -1`; `escape_symbol` must
    /// be `< symbol_limit`.
    pub fn new(order: i32, symbol_limit: u32, escape_symbol: u32) -> Result<Self> {
        if order < -1 {
            return Err(TexZipError::invalid_config("PPM order must be >= -1"));
        }
        if symbol_limit == 0 {
            return Err(TexZipError::invalid_config(
                "PPM symbol limit must be positive",
            ));
        }
        if escape_symbol >= symbol_limit {
            return Err(TexZipError::invalid_config(
                "PPM escape symbol out of range",
            ));
        }

        let root_context = if order >= 0 {
            let mut ctx = Context::new(symbol_limit, order >= 1)?;
            ctx.frequencies.increment(escape_symbol)?;
            Some(ctx)
        } else {
            None
        };

        Ok(Self {
            model_order: order,
            symbol_limit,
            escape_symbol,
            root_context,
            order_minus1_freqs: FlatFrequencyTable::new(symbol_limit)?,
        })
    }

    /// Maximum context depth.
    pub fn model_order(&self) -> i32 {
        self.model_order
    }

    /// After observing `symbol` with `history` (most-recent-first, length
    /// <= `model_order`) as its preceding context, walk root -> children
    /// along `history` in order, creating missing contexts lazily, and
    /// increment `symbol`'s frequency in every context visited (root
    /// included). Must not be called for the EOF symbol's terminating
    /// pass.
    pub fn increment_contexts(&mut self, history: &[u32], symbol: u32) -> Result<()> {
        if self.model_order == -1 {
            return Ok(());
        }
        if history.len() > self.model_order as usize || symbol >= self.symbol_limit {
            return Err(TexZipError::invalid_config(
                "history too long or symbol out of range",
            ));
        }

        let symbol_limit = self.symbol_limit;
        let escape_symbol = self.escape_symbol;
        let order = self.model_order;
        let ctx = self
            .root_context
            .as_mut()
            .expect("root context exists when model_order >= 0");
        ctx.frequencies.increment(symbol)?;

        let mut ctx = ctx;
        for (i, &sym) in history.iter().enumerate() {
            let children = ctx
                .children
                .as_mut()
                .expect("non-leaf depth has a children array");
            let slot = &mut children[sym as usize];
            if slot.is_none() {
                let mut fresh = Context::new(symbol_limit, (i as i32 + 1) < order)?;
                fresh.frequencies.increment(escape_symbol)?;
                *slot = Some(Box::new(fresh));
            }
            ctx = slot.as_deref_mut().expect("just created or already present");
            ctx.frequencies.increment(symbol)?;
        }
        Ok(())
    }

    /// Push `symbol` to the front of `history`, dropping the oldest entry
    /// once the history reaches `model_order` in length. No-op at order 0
    /// or -1 (spec: history only accumulates for `model_order >= 1`).
    pub fn push_history(&self, history: &mut Vec<u32>, symbol: u32) {
        if self.model_order >= 1 {
            if history.len() == self.model_order as usize {
                history.pop();
            }
            history.insert(0, symbol);
        }
    }

    /// Encode one byte (or the EOF symbol) against `history`, walking the
    /// context ladder from the deepest available order down to -1.
    pub fn encode_symbol<W: Write>(
        &mut self,
        enc: &mut ArithmeticEncoder<W>,
        history: &[u32],
        symbol: u32,
    ) -> Result<()> {
        for order in (0..=history.len()).rev() {
            let mut ctx = self.root_context.as_mut();
            let mut reached = true;
            for &sym in &history[..order] {
                let Some(c) = ctx else {
                    reached = false;
                    break;
                };
                let Some(children) = c.children.as_mut() else {
                    reached = false;
                    break;
                };
                ctx = children[sym as usize].as_deref_mut();
                if ctx.is_none() {
                    reached = false;
                    break;
                }
            }
            let Some(c) = (if reached { ctx } else { None }) else {
                continue;
            };
            if symbol != self.escape_symbol && c.frequencies.get(symbol) > 0 {
                enc.write(&mut c.frequencies, symbol)?;
                return Ok(());
            }
            enc.write(&mut c.frequencies, self.escape_symbol)?;
        }
        enc.write(&mut self.order_minus1_freqs, symbol)
    }

    /// Decode one symbol against `history`, mirroring [`Self::encode_symbol`].
    pub fn decode_symbol<R: Read>(
        &mut self,
        dec: &mut ArithmeticDecoder<R>,
        history: &[u32],
    ) -> Result<u32> {
        for order in (0..=history.len()).rev() {
            let mut ctx = self.root_context.as_mut();
            let mut reached = true;
            for &sym in &history[..order] {
                let Some(c) = ctx else {
                    reached = false;
                    break;
                };
                let Some(children) = c.children.as_mut() else {
                    reached = false;
                    break;
                };
                ctx = children[sym as usize].as_deref_mut();
                if ctx.is_none() {
                    reached = false;
                    break;
                }
            }
            let Some(c) = (if reached { ctx } else { None }) else {
                continue;
            };
            let symbol = dec.read(&mut c.frequencies)?;
            if symbol != self.escape_symbol {
                return Ok(symbol);
            }
        }
        dec.read(&mut self.order_minus1_freqs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitstream::{BitReader, BitWriter};
    use std::io::Cursor;

    const ORDER: i32 = 3;
    const SYMBOL_LIMIT: u32 = 257;
    const ESCAPE: u32 = 256;

    fn ppm_round_trip(bytes: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        {
            let mut model = PpmModel::new(ORDER, SYMBOL_LIMIT, ESCAPE).unwrap();
            let mut enc = ArithmeticEncoder::new(BitWriter::new(&mut out));
            let mut history = Vec::new();
            for &b in bytes {
                let sym = b as u32;
                model.encode_symbol(&mut enc, &history, sym).unwrap();
                model.increment_contexts(&history, sym).unwrap();
                model.push_history(&mut history, sym);
            }
            model.encode_symbol(&mut enc, &history, ESCAPE).unwrap();
            enc.finish().unwrap().finish().unwrap();
        }

        let mut model = PpmModel::new(ORDER, SYMBOL_LIMIT, ESCAPE).unwrap();
        let mut dec = ArithmeticDecoder::new(BitReader::new(Cursor::new(&out)));
        let mut history = Vec::new();
        let mut decoded = Vec::new();
        loop {
            let sym = model.decode_symbol(&mut dec, &history).unwrap();
            if sym == ESCAPE {
                break;
            }
            model.increment_contexts(&history, sym).unwrap();
            model.push_history(&mut history, sym);
            decoded.push(sym as u8);
        }
        decoded
    }

    #[test]
    fn round_trips_empty_input() {
        assert_eq!(ppm_round_trip(b""), Vec::<u8>::new());
    }

    #[test]
    fn round_trips_repetitive_text() {
        let text = b"the quick brown fox the quick brown fox the quick brown fox";
        assert_eq!(ppm_round_trip(text), text);
    }

    #[test]
    fn root_escape_frequency_is_preincremented() {
        let model = PpmModel::new(ORDER, SYMBOL_LIMIT, ESCAPE).unwrap();
        let root = model.root_context.as_ref().unwrap();
        assert_eq!(root.frequencies.get(ESCAPE), 1);
    }

    #[test]
    fn order_minus_one_model_has_no_root() {
        let model = PpmModel::new(-1, SYMBOL_LIMIT, ESCAPE).unwrap();
        assert!(model.root_context.is_none());
    }

    #[test]
    fn rejects_invalid_construction() {
        assert!(PpmModel::new(-2, SYMBOL_LIMIT, ESCAPE).is_err());
        assert!(PpmModel::new(ORDER, 0, 0).is_err());
        assert!(PpmModel::new(ORDER, SYMBOL_LIMIT, SYMBOL_LIMIT).is_err());
    }
}
