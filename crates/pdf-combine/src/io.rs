//! Reading input files and writing the assembled document

use std::path::Path;

use crate::types::{GeneratedDocument, InputFile, PDF_MEDIA_TYPE, Result};

/// Read a single input file, guessing its media type from the extension.
///
/// Unknown extensions yield an empty media type, which conversion skips.
pub async fn read_input_file(path: impl AsRef<Path>) -> Result<InputFile> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path).await?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let media_type = guess_media_type(&path).unwrap_or_default();

    Ok(InputFile::new(name, media_type, bytes))
}

/// Read multiple input files, preserving the order given.
pub async fn read_input_files(paths: &[impl AsRef<Path>]) -> Result<Vec<InputFile>> {
    let mut files = Vec::new();
    for path in paths {
        files.push(read_input_file(path).await?);
    }
    Ok(files)
}

/// Write the assembled document to disk.
pub async fn save_document(document: &GeneratedDocument, path: impl AsRef<Path>) -> Result<()> {
    tokio::fs::write(path.as_ref(), &document.bytes).await?;
    Ok(())
}

/// Extension-based media type guess, limited to formats the pipeline
/// actually decodes.
fn guess_media_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let media_type = match ext.as_str() {
        "pdf" => PDF_MEDIA_TYPE,
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "webp" => "image/webp",
        "tif" | "tiff" => "image/tiff",
        _ => return None,
    };
    Some(media_type)
}
