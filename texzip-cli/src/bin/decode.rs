//! `texzip-decode` — decompress a texzip-encoded file.
//!
//! Usage: `texzip-decode <input.lz>`. The output path is `<input>` with
//! its last 3 characters stripped and `-decoded.tex` appended.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use texzip_cli::utils;

#[derive(Parser)]
#[command(name = "texzip-decode")]
#[command(about = "Decompress a texzip-encoded file")]
struct Cli {
    /// File to decompress.
    input: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let input_str = cli.input.to_string_lossy().into_owned();

    let Some(output_path) = utils::decode_output_path(&input_str) else {
        eprintln!("texzip-decode: input path too short to derive an output name: {input_str}");
        return ExitCode::FAILURE;
    };

    let bytes = match std::fs::read(&cli.input) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("texzip-decode: failed to read {input_str}: {e}");
            return ExitCode::FAILURE;
        }
    };

    let spinner = utils::create_spinner("decompressing...");
    let decompressed = match texzip_core::decompress(&bytes) {
        Ok(d) => d,
        Err(e) => {
            spinner.finish_and_clear();
            eprintln!("texzip-decode: decompression failed: {e}");
            return ExitCode::FAILURE;
        }
    };
    spinner.finish_with_message("done");

    if let Err(e) = std::fs::write(&output_path, &decompressed) {
        eprintln!("texzip-decode: failed to write {output_path}: {e}");
        return ExitCode::FAILURE;
    }

    println!(
        "{input_str} ({} bytes) -> {output_path} ({} bytes)",
        bytes.len(),
        decompressed.len()
    );
    ExitCode::SUCCESS
}
