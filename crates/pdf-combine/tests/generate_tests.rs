use image::{Rgba, RgbaImage};
use lopdf::{Object, content::Content};
use pdf_combine::*;
use tempfile::TempDir;

/// Build a rendered image fixture: a solid-color PNG of the given size.
fn rendered(source: &str, width: u32, height: u32, color: [u8; 4]) -> RenderedImage {
    let img = RgbaImage::from_pixel(width, height, Rgba(color));
    let mut data = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(
            &mut std::io::Cursor::new(&mut data),
            image::ImageFormat::Png,
        )
        .unwrap();
    RenderedImage {
        source: source.to_string(),
        data,
    }
}

fn extract_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

#[tokio::test]
async fn test_page_count_matches_image_count() {
    let images = vec![
        rendered("a.png", 40, 40, [255, 0, 0, 255]),
        rendered("b.png", 10, 80, [0, 255, 0, 255]),
        rendered("c.png", 80, 10, [0, 0, 255, 255]),
    ];

    let document = generate_pdf(&images).await.unwrap();
    assert_eq!(document.page_count, 3);

    let parsed = lopdf::Document::load_mem(&document.bytes).unwrap();
    assert_eq!(parsed.get_pages().len(), 3);
}

#[tokio::test]
async fn test_single_image_single_page() {
    let images = vec![rendered("only.png", 64, 64, [9, 9, 9, 255])];

    let document = generate_pdf(&images).await.unwrap();
    assert_eq!(document.page_count, 1);

    let parsed = lopdf::Document::load_mem(&document.bytes).unwrap();
    assert_eq!(parsed.get_pages().len(), 1);
}

#[tokio::test]
async fn test_empty_input_yields_single_blank_page() {
    let document = generate_pdf(&[]).await.unwrap();
    assert_eq!(document.page_count, 1);

    let parsed = lopdf::Document::load_mem(&document.bytes).unwrap();
    assert_eq!(parsed.get_pages().len(), 1);
}

#[tokio::test]
async fn test_pages_are_a4_portrait() {
    let images = vec![rendered("wide.png", 300, 100, [1, 2, 3, 255])];

    let document = generate_pdf(&images).await.unwrap();
    let parsed = lopdf::Document::load_mem(&document.bytes).unwrap();

    let pages = parsed.get_pages();
    let first_page_id = *pages.values().next().unwrap();
    let page_dict = parsed.get_dictionary(first_page_id).unwrap();

    let media_box = page_dict.get(b"MediaBox").unwrap().as_array().unwrap();
    let width_pt = extract_number(&media_box[2]).unwrap();
    let height_pt = extract_number(&media_box[3]).unwrap();

    // 210x297mm in points
    assert!((width_pt - 595.28).abs() < 0.5, "width was {width_pt}");
    assert!((height_pt - 841.89).abs() < 0.5, "height was {height_pt}");
}

#[tokio::test]
async fn test_placement_transform_scales_and_centers() {
    // A 40x40 image on A4 is width-limited: the drawn square spans the
    // full 210mm and sits (297 - 210) / 2 = 43.5mm above the bottom edge.
    let images = vec![rendered("square.png", 40, 40, [255, 0, 0, 255])];
    let document = generate_pdf(&images).await.unwrap();

    let parsed = lopdf::Document::load_mem(&document.bytes).unwrap();
    let first_page_id = *parsed.get_pages().values().next().unwrap();
    let content_data = parsed.get_page_content(first_page_id).unwrap();
    let content = Content::decode(&content_data).unwrap();

    // Compose every cm in stream order; cm concatenates onto the CTM, so
    // the composed matrix is what the drawn unit square goes through.
    let mut ctm = [1.0f32, 0.0, 0.0, 1.0, 0.0, 0.0];
    let mut seen_cm = false;
    for op in &content.operations {
        if op.operator == "cm" {
            let m: Vec<f32> = op.operands.iter().filter_map(extract_number).collect();
            assert_eq!(m.len(), 6);
            ctm = [
                m[0] * ctm[0] + m[1] * ctm[2],
                m[0] * ctm[1] + m[1] * ctm[3],
                m[2] * ctm[0] + m[3] * ctm[2],
                m[2] * ctm[1] + m[3] * ctm[3],
                m[4] * ctm[0] + m[5] * ctm[2] + ctm[4],
                m[4] * ctm[1] + m[5] * ctm[3] + ctm[5],
            ];
            seen_cm = true;
        }
    }
    assert!(seen_cm, "no cm operator in page content");

    // 210mm drawn size on both axes, in points
    assert!((ctm[0] - 595.28).abs() < 0.5, "x scale was {}", ctm[0]);
    assert!((ctm[3] - 595.28).abs() < 0.5, "y scale was {}", ctm[3]);
    // Flush with the left edge, centered vertically at 43.5mm
    assert!(ctm[4].abs() < 0.5, "x offset was {}", ctm[4]);
    assert!((ctm[5] - 123.31).abs() < 0.5, "y offset was {}", ctm[5]);
}

#[tokio::test]
async fn test_invalid_image_aborts_generation() {
    let images = vec![
        rendered("ok.png", 16, 16, [0, 0, 0, 255]),
        RenderedImage {
            source: "broken.png".to_string(),
            data: b"definitely not a png".to_vec(),
        },
    ];

    let result = generate_pdf(&images).await;
    match result {
        Err(ConvertError::Render(_)) => {}
        _ => panic!("Expected Render error"),
    }
}

#[tokio::test]
async fn test_save_document_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("combined.pdf");

    let images = vec![rendered("a.png", 32, 32, [128, 128, 128, 255])];
    let document = generate_pdf(&images).await.unwrap();

    save_document(&document, &output_path).await.unwrap();

    assert!(output_path.exists());
    let loaded = lopdf::Document::load(&output_path).unwrap();
    assert_eq!(loaded.get_pages().len(), 1);
}

#[tokio::test]
async fn test_read_input_files_guesses_types_in_order() {
    let temp_dir = TempDir::new().unwrap();
    let png_path = temp_dir.path().join("scan.png");
    let pdf_path = temp_dir.path().join("report.pdf");
    let txt_path = temp_dir.path().join("notes.txt");
    std::fs::write(&png_path, b"png bytes").unwrap();
    std::fs::write(&pdf_path, b"pdf bytes").unwrap();
    std::fs::write(&txt_path, b"text").unwrap();

    let files = read_input_files(&[&png_path, &pdf_path, &txt_path])
        .await
        .unwrap();

    assert_eq!(files.len(), 3);
    assert_eq!(files[0].name, "scan.png");
    assert_eq!(files[0].media_type, "image/png");
    assert_eq!(files[0].bytes, b"png bytes".to_vec());
    assert_eq!(files[1].name, "report.pdf");
    assert!(files[1].is_pdf());
    assert_eq!(files[2].name, "notes.txt");
    assert_eq!(files[2].media_type, "");
    assert!(!files[2].is_pdf() && !files[2].is_image());
}

#[tokio::test]
async fn test_read_missing_file_fails_with_io_error() {
    let temp_dir = TempDir::new().unwrap();

    let result = read_input_file(temp_dir.path().join("missing.png")).await;
    match result {
        Err(ConvertError::Io(_)) => {}
        _ => panic!("Expected Io error"),
    }
}

#[tokio::test]
async fn test_generated_pages_keep_input_order() {
    // Round-trip through the rasterizer: each page's center pixel carries
    // the color of the image placed on it, regardless of its shape.
    let images = vec![
        rendered("red.png", 40, 40, [255, 0, 0, 255]),
        rendered("green.png", 10, 80, [0, 255, 0, 255]),
        rendered("blue.png", 80, 10, [0, 0, 255, 255]),
    ];

    let document = generate_pdf(&images).await.unwrap();

    let files = vec![InputFile::new(
        "combined.pdf",
        "application/pdf",
        document.bytes,
    )];
    let pages = process_files(&files).await.unwrap();
    assert_eq!(pages.len(), 3);

    let expected = [[255u8, 0, 0], [0, 255, 0], [0, 0, 255]];
    for (page, expected_rgb) in pages.iter().zip(expected) {
        let img = image::load_from_memory(&page.data).unwrap().into_rgb8();
        let center = img.get_pixel(img.width() / 2, img.height() / 2);
        assert_eq!(center.0, expected_rgb, "page {}", page.source);
    }
}
