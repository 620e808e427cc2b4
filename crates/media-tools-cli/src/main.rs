//! media-tools CLI - image sidecar invoked by a host application.
//!
//! Stdout is a protocol channel: the process prints exactly one token,
//! `SUCCESS` or `ERROR: <message>`, and the exit code mirrors it. All
//! diagnostics go to stderr behind `--verbose`.
//!
//! Subcommand and flag names use underscores to match the host's
//! invocation convention.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

mod commands;

/// Image conversion, size-capped re-encoding, and image-to-PDF assembly.
#[derive(Parser)]
#[command(name = "media-tools")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose diagnostics on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Re-encode an image so its size fits a byte budget
    #[command(name = "compress_image")]
    CompressImage {
        /// Source image path
        #[arg(long = "input_path")]
        input_path: PathBuf,

        /// Destination path; its extension selects the output format
        #[arg(long = "output_path")]
        output_path: PathBuf,

        /// Byte-size ceiling for the output
        #[arg(long = "target_size")]
        target_size: u64,
    },

    /// Convert an image to the format implied by the output extension
    #[command(name = "convert_image")]
    ConvertImage {
        /// Source image path
        #[arg(long = "input_path")]
        input_path: PathBuf,

        /// Destination path; its extension selects the output format
        #[arg(long = "output_path")]
        output_path: PathBuf,
    },

    /// Combine images into a single PDF, one page per image
    #[command(name = "images_to_pdf")]
    ImagesToPdf {
        /// Input image paths, in page order
        #[arg(required = true)]
        input_paths: Vec<PathBuf>,

        /// Destination PDF path
        #[arg(long = "output_path")]
        output_path: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::CompressImage { input_path, output_path, target_size } => {
            commands::compress::run(&input_path, &output_path, target_size, cli.verbose)
        }
        Commands::ConvertImage { input_path, output_path } => {
            commands::convert::run(&input_path, &output_path, cli.verbose)
        }
        Commands::ImagesToPdf { input_paths, output_path } => {
            commands::pdf::run(&input_paths, &output_path, cli.verbose)
        }
    };

    match result {
        Ok(()) => {
            println!("SUCCESS");
            ExitCode::SUCCESS
        }
        Err(err) => {
            println!("ERROR: {err:#}");
            ExitCode::FAILURE
        }
    }
}
