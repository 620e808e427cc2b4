//! Images-to-PDF command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use media_tools::images_to_pdf;

pub fn run(input_paths: &[PathBuf], output_path: &Path, verbose: bool) -> Result<()> {
    images_to_pdf(input_paths, output_path)?;

    if verbose {
        eprintln!(
            "assembled {} page(s) into {}",
            input_paths.len(),
            output_path.display()
        );
    }

    Ok(())
}
