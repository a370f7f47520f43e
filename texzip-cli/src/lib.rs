//! Shared helpers for the `texzip-encode` and `texzip-decode` binaries.

pub mod utils;
