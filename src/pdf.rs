//! Multi-image PDF assembly.
//!
//! Emits one page per source image. Pages are sized from the pixel
//! dimensions at a fixed DPI, and each page embeds its image as a
//! DCTDecode (JPEG) XObject scaled to fill the page.

use std::path::{Path, PathBuf};

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

use crate::decode::{load_image, prepare_for_output};
use crate::encode::{encode_with_quality, write_atomic};
use crate::error::{Error, Result};
use crate::format::OutputFormat;

/// DPI used to derive page dimensions from pixel dimensions.
const PAGE_DPI: f32 = 100.0;

/// JPEG quality for the embedded page images.
const EMBED_QUALITY: u8 = 85;

/// Combine `input_paths` into a single PDF at `output_path`, one page per
/// image, in input order.
///
/// Sources with alpha are flattened onto white (PDF pages here are opaque
/// DeviceRGB). The document is serialized in memory and persisted
/// atomically.
///
/// # Errors
///
/// Returns [`Error::NoInputImages`] for an empty input list, and the usual
/// read/encode/write errors otherwise.
pub fn images_to_pdf(input_paths: &[PathBuf], output_path: &Path) -> Result<()> {
    if input_paths.is_empty() {
        return Err(Error::NoInputImages);
    }

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let mut kids: Vec<Object> = Vec::with_capacity(input_paths.len());

    for path in input_paths {
        let image = load_image(path)?;
        let image = prepare_for_output(image, OutputFormat::Jpeg);
        let (width, height) = (image.width(), image.height());
        let jpeg = encode_with_quality(&image, OutputFormat::Jpeg, EMBED_QUALITY)?;

        let page_width = width as f32 * 72.0 / PAGE_DPI;
        let page_height = height as f32 * 72.0 / PAGE_DPI;

        let image_id = doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => i64::from(width),
                "Height" => i64::from(height),
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
                "Filter" => "DCTDecode",
            },
            jpeg,
        ));

        // Scale the unit image square up to the page box.
        let content = Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![
                        Object::Real(page_width),
                        Object::Real(0.0),
                        Object::Real(0.0),
                        Object::Real(page_height),
                        Object::Real(0.0),
                        Object::Real(0.0),
                    ],
                ),
                Operation::new("Do", vec![Object::Name(b"Im0".to_vec())]),
                Operation::new("Q", vec![]),
            ],
        };
        let content_bytes = content
            .encode()
            .map_err(|e| Error::PdfAssembly(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, content_bytes));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(page_width),
                Object::Real(page_height),
            ],
            "Contents" => content_id,
            "Resources" => dictionary! {
                "XObject" => dictionary! { "Im0" => image_id },
            },
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf)
        .map_err(|e| Error::PdfAssembly(e.to_string()))?;
    write_atomic(output_path, &buf)
}
