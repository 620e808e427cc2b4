//! Format conversion command.

use std::path::Path;

use anyhow::Result;
use media_tools::convert_image;

pub fn run(input_path: &Path, output_path: &Path, verbose: bool) -> Result<()> {
    convert_image(input_path, output_path)?;

    if verbose {
        eprintln!(
            "converted {} -> {}",
            input_path.display(),
            output_path.display()
        );
    }

    Ok(())
}
