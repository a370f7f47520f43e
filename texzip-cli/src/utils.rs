//! Shared helpers for the encode/decode binaries.

use indicatif::{ProgressBar, ProgressStyle};

/// Create a steadily-ticking spinner for a long-running pass (LZ77 match
/// finding, the PPM byte loop, or the competing arithmetic coding runs),
/// matching the teacher CLI's bar styling.
pub fn create_spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} [{elapsed_precise}] {msg}")
            .expect("spinner template is valid"),
    );
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb.set_message(message);
    pb
}

/// Derive the output path for `texzip-encode`: strip the input's
/// 4-character extension (including the dot) and append `.lz`.
pub fn encode_output_path(input: &str) -> Option<String> {
    if input.len() < 4 {
        return None;
    }
    let (stem, _ext) = input.split_at(input.len() - 4);
    Some(format!("{stem}.lz"))
}

/// Derive the output path for `texzip-decode`: strip the input's last 3
/// characters and append `-decoded.tex`.
pub fn decode_output_path(input: &str) -> Option<String> {
    if input.len() < 3 {
        return None;
    }
    let (stem, _ext) = input.split_at(input.len() - 3);
    Some(format!("{stem}-decoded.tex"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_path_strips_four_chars() {
        assert_eq!(
            encode_output_path("paper.tex"),
            Some("paper.lz".to_string())
        );
    }

    #[test]
    fn decode_path_strips_three_chars() {
        assert_eq!(
            decode_output_path("paper.lz"),
            Some("paper-decoded.tex".to_string())
        );
    }

    #[test]
    fn rejects_paths_too_short_to_strip() {
        assert_eq!(encode_output_path("ab"), None);
        assert_eq!(decode_output_path("ab"), None);
    }
}
