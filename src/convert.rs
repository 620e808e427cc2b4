//! Single-shot image format conversion.

use std::path::Path;

use crate::decode::{load_image, prepare_for_output};
use crate::encode::{encode_default, write_atomic};
use crate::error::Result;
use crate::format::OutputFormat;

/// Convert an image to the format implied by the output extension.
///
/// Alpha sources headed for JPEG are flattened onto white first; all other
/// conversions keep the source color mode. The save happens at codec
/// defaults with no size target.
pub fn convert_image(input_path: &Path, output_path: &Path) -> Result<()> {
    let format = OutputFormat::from_path(output_path)?;
    let image = load_image(input_path)?;
    let image = prepare_for_output(image, format);

    let bytes = encode_default(&image, format)?;
    write_atomic(output_path, &bytes)
}
