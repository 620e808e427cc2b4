//! Size-constrained re-encode command.

use std::path::Path;

use anyhow::{Result, bail};
use media_tools::compress_image;

pub fn run(input_path: &Path, output_path: &Path, target_size: u64, verbose: bool) -> Result<()> {
    if target_size == 0 {
        bail!("target_size must be a positive byte count");
    }

    let report = compress_image(input_path, output_path, target_size)?;

    if verbose {
        match report.quality {
            Some(quality) => eprintln!(
                "wrote {} bytes at quality {} after {} trial encodes",
                report.output_bytes, quality, report.trials
            ),
            None => eprintln!(
                "wrote {} bytes (lossless save, no quality search)",
                report.output_bytes
            ),
        }
        if report.output_bytes > target_size {
            eprintln!(
                "note: no quality in range fit the {target_size}-byte ceiling; output exceeds it"
            );
        }
    }

    Ok(())
}
