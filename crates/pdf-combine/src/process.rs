//! Rasterization of input files into PNG bitmaps

use std::io::Cursor;

use image::ImageFormat;
use pdfium_render::prelude::*;

use crate::pdfium::init_pdfium;
use crate::types::{ConvertError, InputFile, RenderedImage, Result};

/// Convert a list of input files into an ordered sequence of rendered images.
///
/// Files are processed strictly in the order given, one at a time; a PDF
/// contributes one image per page in ascending page order, an image file
/// contributes exactly one, and anything else contributes none. The first
/// decode failure aborts the whole call, discarding results from earlier
/// files in the same call.
pub async fn process_files(files: &[InputFile]) -> Result<Vec<RenderedImage>> {
    let mut images = Vec::new();
    for file in files {
        images.extend(process_file(file).await?);
    }
    Ok(images)
}

/// Convert a single input file, dispatching on its declared media type.
///
/// Unrecognized types are skipped silently: no entry, no error.
pub async fn process_file(file: &InputFile) -> Result<Vec<RenderedImage>> {
    if file.is_pdf() {
        let name = file.name.clone();
        let bytes = file.bytes.clone();
        let images =
            tokio::task::spawn_blocking(move || render_pdf_pages(&name, &bytes)).await??;
        Ok(images)
    } else if file.is_image() {
        let name = file.name.clone();
        let bytes = file.bytes.clone();
        let image = tokio::task::spawn_blocking(move || reencode_image(&name, &bytes)).await??;
        Ok(vec![image])
    } else {
        Ok(Vec::new())
    }
}

/// Render every page of a PDF at scale 1.0, so each bitmap matches the
/// page's natural viewport dimensions in points.
fn render_pdf_pages(name: &str, bytes: &[u8]) -> Result<Vec<RenderedImage>> {
    let pdfium = init_pdfium()?;
    let document = pdfium
        .load_pdf_from_byte_slice(bytes, None)
        .map_err(|e| ConvertError::Decode(format!("failed to parse {name}: {e}")))?;

    let pages = document.pages();
    let page_count = pages.len();
    let render_config = PdfRenderConfig::new().scale_page_by_factor(1.0);

    let mut images = Vec::with_capacity(page_count as usize);
    for (index, page) in pages.iter().enumerate() {
        let bitmap = page.render_with_config(&render_config).map_err(|e| {
            ConvertError::Decode(format!(
                "failed to render page {} of {name}: {e}",
                index + 1
            ))
        })?;

        images.push(RenderedImage {
            source: format!("{name}, page {} of {}", index + 1, page_count),
            data: encode_png(bitmap.as_image())?,
        });
    }

    Ok(images)
}

/// Decode an image file and re-encode it as PNG at its natural dimensions.
fn reencode_image(name: &str, bytes: &[u8]) -> Result<RenderedImage> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| ConvertError::Decode(format!("failed to decode {name}: {e}")))?;

    Ok(RenderedImage {
        source: name.to_string(),
        data: encode_png(decoded)?,
    })
}

fn encode_png(image: image::DynamicImage) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut data), ImageFormat::Png)
        .map_err(|e| ConvertError::Decode(format!("failed to encode bitmap: {e}")))?;
    Ok(data)
}
