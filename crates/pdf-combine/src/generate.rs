//! Assembly of rendered bitmaps into a single A4 document

use printpdf::*;

use crate::types::{ConvertError, GeneratedDocument, RenderedImage, Result};

/// A4 portrait, matching the generated document's millimeter units
const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;

const PT_PER_MM: f32 = 2.83465;

/// Assemble rendered images into one A4 portrait document, one page per
/// image in input order, each scaled to fit the page and centered.
///
/// Dimension decoding runs concurrently across images, but every decode is
/// awaited and its result placed at the image's original index, so page
/// order always matches input order. A single decode failure aborts the
/// whole generation; no partial document is returned. An empty input still
/// produces a valid document with one blank page.
pub async fn generate_pdf(images: &[RenderedImage]) -> Result<GeneratedDocument> {
    let mut decodes = Vec::with_capacity(images.len());
    for image in images {
        let data = image.data.clone();
        decodes.push(tokio::task::spawn_blocking(move || decode_image(&data)));
    }

    let mut decoded = Vec::with_capacity(decodes.len());
    for handle in decodes {
        decoded.push(handle.await??);
    }

    let document = tokio::task::spawn_blocking(move || assemble_document(decoded)).await??;
    Ok(document)
}

fn decode_image(data: &[u8]) -> Result<RawImage> {
    let mut warnings = Vec::new();
    RawImage::decode_from_bytes(data, &mut warnings)
        .map_err(|e| ConvertError::Render(format!("failed to decode image: {e}")))
}

fn assemble_document(images: Vec<RawImage>) -> Result<GeneratedDocument> {
    let mut doc = PdfDocument::new("Combined Images");
    let mut pages = Vec::new();

    for image in &images {
        let width_px = image.width as f32;
        let height_px = image.height as f32;

        let scale = scale_to_fit(width_px, height_px, PAGE_WIDTH_MM, PAGE_HEIGHT_MM);
        let offset_x_mm = centered_offset(PAGE_WIDTH_MM, width_px * scale);
        let offset_y_mm = centered_offset(PAGE_HEIGHT_MM, height_px * scale);

        let image_id = doc.add_image(image);
        let ops = vec![Op::UseXobject {
            id: image_id,
            transform: XObjectTransform {
                translate_x: Some(Mm(offset_x_mm).into_pt()),
                translate_y: Some(Mm(offset_y_mm).into_pt()),
                rotate: None,
                // At 72 dpi the image's natural size is one point per pixel,
                // so the scale factors carry the whole mm fit.
                scale_x: Some(scale * PT_PER_MM),
                scale_y: Some(scale * PT_PER_MM),
                dpi: Some(72.0),
            },
        }];

        pages.push(PdfPage::new(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), ops));
    }

    if pages.is_empty() {
        // A fresh document still carries one blank page
        pages.push(PdfPage::new(
            Mm(PAGE_WIDTH_MM),
            Mm(PAGE_HEIGHT_MM),
            Vec::new(),
        ));
    }

    let page_count = pages.len();
    doc.pages = pages;

    let mut warnings = Vec::new();
    let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);

    Ok(GeneratedDocument { bytes, page_count })
}

/// Uniform scale-to-fit factor: the image keeps its aspect ratio and
/// neither drawn dimension exceeds the page.
fn scale_to_fit(image_width: f32, image_height: f32, page_width: f32, page_height: f32) -> f32 {
    let scale_w = page_width / image_width;
    let scale_h = page_height / image_height;
    scale_w.min(scale_h)
}

fn centered_offset(page_size: f32, drawn_size: f32) -> f32 {
    (page_size - drawn_size) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_fit_wide_image() {
        // 2100x1485 on a 210x297 page: width-limited, scale 0.1
        let scale = scale_to_fit(2100.0, 1485.0, PAGE_WIDTH_MM, PAGE_HEIGHT_MM);
        assert!((scale - 0.1).abs() < 0.001);
    }

    #[test]
    fn test_scale_fit_tall_image() {
        // 1050x2970: height-limited, scale 0.1
        let scale = scale_to_fit(1050.0, 2970.0, PAGE_WIDTH_MM, PAGE_HEIGHT_MM);
        assert!((scale - 0.1).abs() < 0.001);
    }

    #[test]
    fn test_small_image_is_enlarged() {
        // Fit scaling also scales up: 21x29.7 fills the page exactly at 10x
        let scale = scale_to_fit(21.0, 29.7, PAGE_WIDTH_MM, PAGE_HEIGHT_MM);
        assert!((scale - 10.0).abs() < 0.001);
    }

    #[test]
    fn test_drawn_size_never_exceeds_page() {
        let sizes = [
            (100.0, 100.0),
            (5000.0, 200.0),
            (200.0, 5000.0),
            (4961.0, 7016.0),
        ];
        for (w, h) in sizes {
            let scale = scale_to_fit(w, h, PAGE_WIDTH_MM, PAGE_HEIGHT_MM);
            assert!(w * scale <= PAGE_WIDTH_MM + 0.001);
            assert!(h * scale <= PAGE_HEIGHT_MM + 0.001);
        }
    }

    #[test]
    fn test_aspect_ratio_preserved() {
        let (w, h) = (1234.0, 567.0);
        let scale = scale_to_fit(w, h, PAGE_WIDTH_MM, PAGE_HEIGHT_MM);
        let ratio = (w * scale) / (h * scale);
        assert!((ratio - w / h).abs() < 0.0001);
    }

    #[test]
    fn test_offsets_center_the_image() {
        let scale = scale_to_fit(400.0, 400.0, PAGE_WIDTH_MM, PAGE_HEIGHT_MM);
        let drawn = 400.0 * scale;
        let x = centered_offset(PAGE_WIDTH_MM, drawn);
        let y = centered_offset(PAGE_HEIGHT_MM, drawn);

        assert!(x >= 0.0 && y >= 0.0);
        assert!((2.0 * x + drawn - PAGE_WIDTH_MM).abs() < 0.001);
        assert!((2.0 * y + drawn - PAGE_HEIGHT_MM).abs() < 0.001);
    }
}
