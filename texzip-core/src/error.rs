//! Error types for texzip's coding engine.
//!
//! Mirrors the failure classes from the design: programmer-contract
//! violations and input validation are rejected as `Result::Err` rather
//! than panics, since the arithmetic coder and PPM model are reachable
//! from untrusted compressed input during decode.

use std::io;
use thiserror::Error;

/// The main error type for texzip coding operations.
#[derive(Debug, Error)]
pub enum TexZipError {
    /// I/O error from an underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The compressed stream is corrupt: a coder invariant was violated,
    /// a discriminator byte was unrecognized, or a decoded value fell
    /// outside its expected range.
    #[error("corrupted stream ({context}): {detail}")]
    CorruptedStream {
        /// Where in the pipeline the corruption was detected.
        context: &'static str,
        /// Human-readable description.
        detail: String,
    },

    /// A construction-time parameter was invalid (PPM order, symbol
    /// limit, escape symbol, frequency table size). Rejected before any
    /// output is produced.
    #[error("invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the invalid parameter.
        message: String,
    },

    /// A symbol with zero cumulative-frequency range was coded. This is a
    /// programmer-contract violation (the frequency table and the symbol
    /// being coded must agree), not an attacker-controlled condition.
    #[error("symbol {symbol} has zero frequency")]
    ZeroFrequencySymbol {
        /// The offending symbol index.
        symbol: u32,
    },

    /// The frequency table total exceeds the arithmetic coder's
    /// `max_total` for its state width.
    #[error("frequency total {total} exceeds maximum {max_total}")]
    TotalTooLarge {
        /// Offending total.
        total: u64,
        /// Coder's ceiling.
        max_total: u64,
    },
}

/// Result type alias for texzip coding operations.
pub type Result<T> = std::result::Result<T, TexZipError>;

impl TexZipError {
    /// Create a corrupted-stream error.
    pub fn corrupted(context: &'static str, detail: impl Into<String>) -> Self {
        Self::CorruptedStream {
            context,
            detail: detail.into(),
        }
    }

    /// Create an invalid-configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a zero-frequency-symbol error.
    pub fn zero_frequency(symbol: u32) -> Self {
        Self::ZeroFrequencySymbol { symbol }
    }

    /// Create a total-too-large error.
    pub fn total_too_large(total: u64, max_total: u64) -> Self {
        Self::TotalTooLarge { total, max_total }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TexZipError::corrupted("arithmetic decode", "code out of range");
        assert!(err.to_string().contains("arithmetic decode"));

        let err = TexZipError::zero_frequency(42);
        assert!(err.to_string().contains("42"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::UnexpectedEof, "eof");
        let err: TexZipError = io_err.into();
        assert!(matches!(err, TexZipError::Io(_)));
    }
}
