//! Frequency table family used by the arithmetic coder.
//!
//! A frequency table maps each symbol in `0..symbol_limit()` to a
//! non-negative count, with the cumulative queries (`cum_low`, `cum_high`)
//! the coder needs to map a code value to a symbol and back.

use crate::error::{Result, TexZipError};

/// Cumulative-frequency queries and updates over a fixed symbol alphabet.
pub trait FrequencyTable {
    /// Number of symbols, always >= 1.
    fn symbol_limit(&self) -> u32;

    /// Frequency of `symbol`, always >= 0.
    fn get(&self, symbol: u32) -> u32;

    /// Set the frequency of `symbol`.
    fn set(&mut self, symbol: u32, freq: u32) -> Result<()>;

    /// Increment the frequency of `symbol` by 1.
    fn increment(&mut self, symbol: u32) -> Result<()>;

    /// Sum of all frequencies; always equals `cum_high(symbol_limit() - 1)`.
    fn total(&mut self) -> u64;

    /// Sum of frequencies of all symbols strictly below `symbol`.
    fn cum_low(&mut self, symbol: u32) -> u64;

    /// Sum of frequencies of `symbol` and all symbols below it.
    fn cum_high(&mut self, symbol: u32) -> u64;
}

/// An immutable table where every symbol has frequency 1.
///
/// Useful as the PPM order-(-1) fallback and as the seed for the
/// 65537-symbol adaptive table used by the arithmetic-over-LZ77 path.
#[derive(Debug, Clone, Copy)]
pub struct FlatFrequencyTable {
    num_symbols: u32,
}

impl FlatFrequencyTable {
    /// Create a flat table over `num_symbols` symbols (must be >= 1).
    pub fn new(num_symbols: u32) -> Result<Self> {
        if num_symbols < 1 {
            return Err(TexZipError::invalid_config(
                "flat frequency table needs at least 1 symbol",
            ));
        }
        Ok(Self { num_symbols })
    }
}

impl FrequencyTable for FlatFrequencyTable {
    fn symbol_limit(&self) -> u32 {
        self.num_symbols
    }

    fn get(&self, _symbol: u32) -> u32 {
        1
    }

    fn set(&mut self, _symbol: u32, _freq: u32) -> Result<()> {
        Err(TexZipError::invalid_config(
            "FlatFrequencyTable is immutable",
        ))
    }

    fn increment(&mut self, _symbol: u32) -> Result<()> {
        Err(TexZipError::invalid_config(
            "FlatFrequencyTable is immutable",
        ))
    }

    fn total(&mut self) -> u64 {
        self.num_symbols as u64
    }

    fn cum_low(&mut self, symbol: u32) -> u64 {
        symbol as u64
    }

    fn cum_high(&mut self, symbol: u32) -> u64 {
        symbol as u64 + 1
    }
}

/// A mutable frequency table backed by a count vector, with a lazily
/// materialized cumulative-prefix array invalidated on every mutation.
///
/// The number of symbols is fixed at construction. Cumulative lookups
/// take linear time to rebuild the prefix array on first use after a
/// mutation; a Fenwick tree would give logarithmic updates but this
/// matches the reference model's complexity, which is adequate for the
/// symbol counts in play (257 for PPM, 65537 for the packed LZ77 table).
#[derive(Debug, Clone)]
pub struct SimpleFrequencyTable {
    frequencies: Vec<u32>,
    total: u64,
    /// `None` when stale; recomputed lazily by `ensure_cumulative`.
    cumulative: Option<Vec<u64>>,
}

impl SimpleFrequencyTable {
    /// Build a table from an explicit sequence of per-symbol counts.
    pub fn from_counts(frequencies: Vec<u32>) -> Result<Self> {
        if frequencies.is_empty() {
            return Err(TexZipError::invalid_config(
                "frequency table needs at least 1 symbol",
            ));
        }
        let total = frequencies.iter().map(|&f| f as u64).sum();
        Ok(Self {
            frequencies,
            total,
            cumulative: None,
        })
    }

    /// Build a table by copying the counts of another table (e.g. seeding
    /// an adaptive table from a `FlatFrequencyTable`).
    pub fn from_table(source: &mut dyn FrequencyTable) -> Result<Self> {
        let n = source.symbol_limit();
        let counts = (0..n).map(|s| source.get(s)).collect();
        Self::from_counts(counts)
    }

    fn ensure_cumulative(&mut self) {
        if self.cumulative.is_some() {
            return;
        }
        let mut cumul = Vec::with_capacity(self.frequencies.len() + 1);
        let mut sum = 0u64;
        cumul.push(0);
        for &f in &self.frequencies {
            sum += f as u64;
            cumul.push(sum);
        }
        debug_assert_eq!(sum, self.total);
        self.cumulative = Some(cumul);
    }
}

impl FrequencyTable for SimpleFrequencyTable {
    fn symbol_limit(&self) -> u32 {
        self.frequencies.len() as u32
    }

    fn get(&self, symbol: u32) -> u32 {
        self.frequencies[symbol as usize]
    }

    fn set(&mut self, symbol: u32, freq: u32) -> Result<()> {
        let idx = symbol as usize;
        let old = self.frequencies[idx] as u64;
        self.total = self.total - old + freq as u64;
        self.frequencies[idx] = freq;
        self.cumulative = None;
        Ok(())
    }

    fn increment(&mut self, symbol: u32) -> Result<()> {
        self.frequencies[symbol as usize] += 1;
        self.total += 1;
        self.cumulative = None;
        Ok(())
    }

    fn total(&mut self) -> u64 {
        self.total
    }

    fn cum_low(&mut self, symbol: u32) -> u64 {
        self.ensure_cumulative();
        self.cumulative.as_ref().expect("just computed")[symbol as usize]
    }

    fn cum_high(&mut self, symbol: u32) -> u64 {
        self.ensure_cumulative();
        self.cumulative.as_ref().expect("just computed")[symbol as usize + 1]
    }
}

/// A pass-through wrapper that verifies the bounds and monotonicity
/// post-conditions of an inner frequency table on every call. Used by the
/// arithmetic coder to catch contract violations (spec.md §4.3) close to
/// their source rather than as a corrupted-range assertion several calls
/// later.
#[derive(Debug)]
pub struct CheckedFrequencyTable<'a> {
    inner: &'a mut dyn FrequencyTable,
}

impl<'a> CheckedFrequencyTable<'a> {
    /// Wrap a frequency table for bounds-checked access.
    pub fn new(inner: &'a mut dyn FrequencyTable) -> Self {
        Self { inner }
    }
}

impl FrequencyTable for CheckedFrequencyTable<'_> {
    fn symbol_limit(&self) -> u32 {
        let n = self.inner.symbol_limit();
        debug_assert!(n >= 1, "non-positive symbol limit");
        n
    }

    fn get(&self, symbol: u32) -> u32 {
        self.inner.get(symbol)
    }

    fn set(&mut self, symbol: u32, freq: u32) -> Result<()> {
        self.inner.set(symbol, freq)
    }

    fn increment(&mut self, symbol: u32) -> Result<()> {
        self.inner.increment(symbol)
    }

    fn total(&mut self) -> u64 {
        let t = self.inner.total();
        debug_assert!(t < (1u64 << 62), "implausible total");
        t
    }

    fn cum_low(&mut self, symbol: u32) -> u64 {
        let low = self.inner.cum_low(symbol);
        let high = self.inner.cum_high(symbol);
        debug_assert!(low <= high, "cum_low > cum_high for symbol {symbol}");
        low
    }

    fn cum_high(&mut self, symbol: u32) -> u64 {
        let low = self.inner.cum_low(symbol);
        let high = self.inner.cum_high(symbol);
        debug_assert!(low <= high, "cum_low > cum_high for symbol {symbol}");
        high
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_table_is_uniform() {
        let mut t = FlatFrequencyTable::new(5).unwrap();
        for s in 0..5 {
            assert_eq!(t.get(s), 1);
            assert_eq!(t.cum_low(s), s as u64);
            assert_eq!(t.cum_high(s), s as u64 + 1);
        }
        assert_eq!(t.total(), 5);
    }

    #[test]
    fn simple_table_tracks_total_and_cumulative() {
        let mut t = SimpleFrequencyTable::from_counts(vec![1, 2, 3, 4]).unwrap();
        assert_eq!(t.total(), 10);
        assert_eq!(t.cum_low(0), 0);
        assert_eq!(t.cum_high(0), 1);
        assert_eq!(t.cum_low(3), 6);
        assert_eq!(t.cum_high(3), 10);

        t.increment(0).unwrap();
        assert_eq!(t.total(), 11);
        assert_eq!(t.get(0), 2);
        assert_eq!(t.cum_high(3), 11);

        t.set(1, 10).unwrap();
        assert_eq!(t.total(), 19);
        assert_eq!(t.get(1), 10);
    }

    #[test]
    fn simple_table_seeded_from_flat() {
        let mut flat = FlatFrequencyTable::new(4).unwrap();
        let simple = SimpleFrequencyTable::from_table(&mut flat).unwrap();
        assert_eq!(simple.get(0), 1);
        assert_eq!(simple.get(3), 1);
    }

    #[test]
    fn invariants_hold_after_mutation() {
        let mut t = SimpleFrequencyTable::from_counts(vec![0, 0, 5, 0]).unwrap();
        let n = t.symbol_limit();
        t.increment(2).unwrap();
        let total = t.total();
        assert_eq!(t.cum_high(n - 1), total);
        let mut sum = 0u64;
        for s in 0..n {
            assert_eq!(t.cum_high(s) - t.cum_low(s), t.get(s) as u64);
            sum += t.get(s) as u64;
        }
        assert_eq!(sum, total);
    }

    #[test]
    fn checked_wrapper_passes_through() {
        let mut inner = SimpleFrequencyTable::from_counts(vec![1, 1, 1]).unwrap();
        let mut checked = CheckedFrequencyTable::new(&mut inner);
        assert_eq!(checked.total(), 3);
        checked.increment(0).unwrap();
        assert_eq!(checked.get(0), 2);
    }
}
