//! `texzip-encode` — compress a LaTeX source file.
//!
//! Usage: `texzip-encode <input>`. The output path is `<input>` with its
//! last 4 characters stripped and `.lz` appended.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use texzip_cli::utils;

#[derive(Parser)]
#[command(name = "texzip-encode")]
#[command(about = "Compress a LaTeX source file with texzip")]
struct Cli {
    /// File to compress.
    input: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let input_str = cli.input.to_string_lossy().into_owned();

    let Some(output_path) = utils::encode_output_path(&input_str) else {
        eprintln!("texzip-encode: input path too short to derive an output name: {input_str}");
        return ExitCode::FAILURE;
    };

    let bytes = match std::fs::read(&cli.input) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("texzip-encode: failed to read {input_str}: {e}");
            return ExitCode::FAILURE;
        }
    };

    let spinner = utils::create_spinner("compressing (racing PPM vs. LZ77+arithmetic)...");
    let compressed = match texzip_core::compress(&bytes) {
        Ok(c) => c,
        Err(e) => {
            spinner.finish_and_clear();
            eprintln!("texzip-encode: compression failed: {e}");
            return ExitCode::FAILURE;
        }
    };
    spinner.finish_with_message("done");

    if let Err(e) = std::fs::write(&output_path, &compressed) {
        eprintln!("texzip-encode: failed to write {output_path}: {e}");
        return ExitCode::FAILURE;
    }

    println!(
        "{input_str} ({} bytes) -> {output_path} ({} bytes)",
        bytes.len(),
        compressed.len()
    );
    ExitCode::SUCCESS
}
