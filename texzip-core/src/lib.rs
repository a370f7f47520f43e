//! # TexZip Core
//!
//! Core coding engine for the TexZip LaTeX-aware compressor.
//!
//! This crate provides the fundamental building blocks for texzip's
//! two competing back ends:
//!
//! - [`bitstream`]: Bit-level I/O (MSB-first, single-bit granularity)
//! - [`freq`]: Frequency table family for the arithmetic coder
//! - [`arith`]: Adaptive integer arithmetic encoder/decoder
//! - [`ppm`]: Order-N PPM byte model with escape-to-lower-order fallback
//! - [`lz77`]: Sliding-window match finder and self-overlapping decoder
//! - [`packed`]: 16-bit packed-symbol framing over LZ77 triples
//! - [`substitution`]: Fixed BEL-escape dictionary for recurring LaTeX tokens
//! - [`format`]: Outer orchestration — race both back ends, tag the winner
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ format: compress()/decompress() — discriminator byte     │
//! ├───────────────────────────┬───────────────────────────────┤
//! │ path A (arithmetic/LZ77)  │ path B (PPM)                  │
//! │ substitution -> lz77      │ ppm (order 3) over raw bytes   │
//! │   -> packed -> arith      │   -> arith                    │
//! ├───────────────────────────┴───────────────────────────────┤
//! │ arith: ArithmeticEncoder/Decoder over a FrequencyTable     │
//! ├─────────────────────────────────────────────────────────┤
//! │ bitstream: BitReader/BitWriter                           │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use texzip_core::format::{compress, decompress};
//!
//! let text = b"\\section{Intro}\n\\item First\n\\item Second\n";
//! let compressed = compress(text).unwrap();
//! let restored = decompress(&compressed).unwrap();
//! assert_eq!(restored, text);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod arith;
pub mod bitstream;
pub mod error;
pub mod format;
pub mod freq;
pub mod lz77;
pub mod packed;
pub mod ppm;
pub mod substitution;

// Re-exports for convenience
pub use arith::{ArithmeticDecoder, ArithmeticEncoder};
pub use bitstream::{BitReader, BitWriter};
pub use error::{Result, TexZipError};
pub use format::{compress, decompress};
pub use freq::{CheckedFrequencyTable, FlatFrequencyTable, FrequencyTable, SimpleFrequencyTable};
pub use lz77::Triple;
pub use ppm::PpmModel;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::arith::{ArithmeticDecoder, ArithmeticEncoder};
    pub use crate::bitstream::{BitReader, BitWriter};
    pub use crate::error::{Result, TexZipError};
    pub use crate::format::{compress, decompress};
    pub use crate::freq::{FrequencyTable, SimpleFrequencyTable};
}
