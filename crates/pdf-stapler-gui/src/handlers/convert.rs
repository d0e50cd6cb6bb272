use std::path::PathBuf;

use image::GenericImageView;
use pdf_async_runtime::{ImagePreview, PdfUpdate};
use pdf_combine::{ConvertError, GeneratedDocument, RenderedImage};
use tokio::sync::mpsc;

/// Longest edge of the thumbnails shown in the image list.
const THUMBNAIL_EDGE: u32 = 160;

pub async fn handle_convert_files(
    paths: Vec<PathBuf>,
    update_tx: &mpsc::UnboundedSender<PdfUpdate>,
) {
    let total = paths.len();
    log::info!("Converting {total} files");
    let mut images = Vec::new();

    for (index, path) in paths.iter().enumerate() {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let _ = update_tx.send(PdfUpdate::Progress {
            operation: format!("Converting {name}"),
            current: index + 1,
            total,
        });

        let file = match pdf_combine::read_input_file(path).await {
            Ok(file) => file,
            Err(e) => {
                log::error!("Failed to read {}: {e}", path.display());
                let _ = update_tx.send(PdfUpdate::Error {
                    message: format!("Failed to read {}: {e}", path.display()),
                });
                return;
            }
        };

        match pdf_combine::process_file(&file).await {
            Ok(rendered) => images.extend(rendered),
            Err(e) => {
                log::error!("Failed to convert {}: {e}", file.name);
                let _ = update_tx.send(PdfUpdate::Error {
                    message: format!("Failed to convert {}: {e}", file.name),
                });
                return;
            }
        }
    }

    let previews = match build_previews(&images).await {
        Ok(previews) => previews,
        Err(e) => {
            let _ = update_tx.send(PdfUpdate::Error {
                message: format!("Failed to build previews: {e}"),
            });
            return;
        }
    };

    log::info!("Converted {} files into {} images", total, images.len());
    let _ = update_tx.send(PdfUpdate::FilesConverted { images, previews });
}

pub async fn handle_generate(
    images: Vec<RenderedImage>,
    update_tx: &mpsc::UnboundedSender<PdfUpdate>,
) {
    log::info!("Generating PDF from {} images", images.len());
    match pdf_combine::generate_pdf(&images).await {
        Ok(document) => {
            log::info!("Generated PDF with {} pages", document.page_count);
            let _ = update_tx.send(PdfUpdate::DocumentGenerated { document });
        }
        Err(e) => {
            log::error!("Failed to generate PDF: {e}");
            let _ = update_tx.send(PdfUpdate::Error {
                message: format!("Failed to generate PDF: {e}"),
            });
        }
    }
}

pub async fn handle_save(
    document: GeneratedDocument,
    path: PathBuf,
    update_tx: &mpsc::UnboundedSender<PdfUpdate>,
) {
    log::info!("Saving PDF to {}", path.display());
    match pdf_combine::save_document(&document, &path).await {
        Ok(()) => {
            log::info!("Saved {} pages to {}", document.page_count, path.display());
            let _ = update_tx.send(PdfUpdate::DocumentSaved { path });
        }
        Err(e) => {
            log::error!("Failed to save PDF: {e}");
            let _ = update_tx.send(PdfUpdate::Error {
                message: format!("Failed to save PDF: {e}"),
            });
        }
    }
}

async fn build_previews(images: &[RenderedImage]) -> pdf_combine::Result<Vec<ImagePreview>> {
    let mut previews = Vec::with_capacity(images.len());
    for image in images {
        let data = image.data.clone();
        let preview = tokio::task::spawn_blocking(move || make_preview(&data)).await??;
        previews.push(preview);
    }
    Ok(previews)
}

fn make_preview(data: &[u8]) -> pdf_combine::Result<ImagePreview> {
    let decoded = image::load_from_memory(data)
        .map_err(|e| ConvertError::Decode(format!("failed to decode preview: {e}")))?;
    let (source_width, source_height) = decoded.dimensions();
    let thumb = decoded.thumbnail(THUMBNAIL_EDGE, THUMBNAIL_EDGE);
    let width = thumb.width() as usize;
    let height = thumb.height() as usize;
    Ok(ImagePreview {
        source_width,
        source_height,
        width,
        height,
        rgba_data: thumb.into_rgba8().into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::AppLogger;

    #[tokio::test]
    async fn test_generate_handler_logs_start_and_finish() {
        let logger = AppLogger::new(50);
        logger.clone().init().unwrap();

        let (update_tx, mut update_rx) = mpsc::unbounded_channel();
        handle_generate(Vec::new(), &update_tx).await;

        match update_rx.try_recv() {
            Ok(PdfUpdate::DocumentGenerated { document }) => {
                assert_eq!(document.page_count, 1);
            }
            other => panic!("Expected DocumentGenerated, got {other:?}"),
        }

        let messages: Vec<String> = logger
            .get_entries()
            .iter()
            .map(|entry| entry.message.clone())
            .collect();
        assert!(messages.iter().any(|m| m.starts_with("Generating PDF")));
        assert!(messages.iter().any(|m| m.starts_with("Generated PDF")));
    }
}
