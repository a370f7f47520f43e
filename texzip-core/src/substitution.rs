//! Fixed substitution dictionary for recurring LaTeX tokens.
//!
//! Folds each of a small, fixed set of multi-character LaTeX tokens into
//! a two-byte escape sequence — BEL (`0x07`) followed by a single key
//! byte — before LZ77 sees the input. This shortens common tokens (e.g.
//! `\section`, `\begin{enumerate}`) to 2 bytes apiece, giving the LZ77
//! match finder more to work with in a fixed 4095-byte window.
//!
//! # Precondition
//!
//! The input must not contain a BEL byte (`0x07`) anywhere a real LaTeX
//! escape could be confused with one of ours: the fold is not reversible
//! if the raw input already contains BEL, since [`unfold`] cannot tell
//! the difference between an escape we produced and one that was already
//! there. This is a known, deliberately un-"fixed" limitation — see the
//! crate-level design notes.

/// One (key byte, literal token) pair. The key is emitted after the BEL
/// escape byte in the folded form.
pub const ENTRIES: [(u8, &str); 17] = [
    (b'a', "\\item"),
    (b'b', "{\\bf"),
    (b'c', "\\begin{align*}"),
    (b'd', "\\begin{enumerate}"),
    (b'e', "\\end{enumerate}"),
    (b'f', "\\section"),
    (b'g', "\\subsection"),
    (b'h', "\\draw[-latex]"),
    (b'i', "\\documentclass{"),
    (b'j', "\\end{center}"),
    (b'k', "\\dots"),
    (b'l', "function"),
    (b'm', "\\usepackage{"),
    (b'n', "which"),
    (b'o', "\\begin{pmatrix}"),
    (b'p', "\\end{align*}"),
    (b'q', "\\begin{center}"),
];

/// The escape byte marking a folded token.
pub const ESCAPE: u8 = 0x07;

/// Replace every occurrence of each entry's literal value with `(ESCAPE,
/// key)`. Entries are applied in table order, matching the original
/// dictionary's iteration order.
pub fn fold(input: &[u8]) -> Vec<u8> {
    let mut text = input.to_vec();
    for &(key, value) in ENTRIES.iter() {
        text = replace_bytes(&text, value.as_bytes(), &[ESCAPE, key]);
    }
    text
}

/// Invert [`fold`]: replace every `(ESCAPE, key)` pair with the entry's
/// literal value.
pub fn unfold(input: &[u8]) -> Vec<u8> {
    let mut text = input.to_vec();
    for &(key, value) in ENTRIES.iter() {
        text = replace_bytes(&text, &[ESCAPE, key], value.as_bytes());
    }
    text
}

/// Non-overlapping literal byte-string replace, left to right.
fn replace_bytes(haystack: &[u8], needle: &[u8], replacement: &[u8]) -> Vec<u8> {
    if needle.is_empty() {
        return haystack.to_vec();
    }
    let mut out = Vec::with_capacity(haystack.len());
    let mut i = 0;
    while i < haystack.len() {
        if haystack[i..].starts_with(needle) {
            out.extend_from_slice(replacement);
            i += needle.len();
        } else {
            out.push(haystack[i]);
            i += 1;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_and_unfolds_known_tokens() {
        let text = b"\\section{Intro}\n\\item First\n\\item Second\n";
        let folded = fold(text);
        assert!(folded.contains(&ESCAPE));
        assert_eq!(unfold(&folded), text);
    }

    #[test]
    fn leaves_unrelated_text_untouched() {
        let text = b"plain text with no tokens";
        assert_eq!(fold(text), text);
        assert_eq!(unfold(text), text);
    }

    #[test]
    fn round_trips_all_entries_at_once() {
        let mut text = Vec::new();
        for &(_, value) in ENTRIES.iter() {
            text.extend_from_slice(value.as_bytes());
            text.push(b' ');
        }
        let folded = fold(&text);
        assert_eq!(unfold(&folded), text);
    }
}
