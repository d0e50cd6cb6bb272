//! Core types shared across the conversion pipeline

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Decode error: {0}")]
    Decode(String),
    #[error("Render error: {0}")]
    Render(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, ConvertError>;

/// Media type of inputs processed as PDF documents
pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// Media type prefix of inputs processed as images
pub const IMAGE_MEDIA_TYPE_PREFIX: &str = "image/";

/// A selected file read into memory, with its declared media type.
///
/// The media type decides how the file is processed; anything that is
/// neither a PDF nor an image is carried along but skipped by conversion.
#[derive(Debug, Clone)]
pub struct InputFile {
    pub name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl InputFile {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes,
        }
    }

    pub fn is_pdf(&self) -> bool {
        self.media_type == PDF_MEDIA_TYPE
    }

    pub fn is_image(&self) -> bool {
        self.media_type.starts_with(IMAGE_MEDIA_TYPE_PREFIX)
    }
}

/// One PNG-encoded bitmap derived from a source PDF page or image file.
#[derive(Debug, Clone)]
pub struct RenderedImage {
    /// Where the bitmap came from, e.g. "scan.png" or "report.pdf, page 3 of 7"
    pub source: String,
    /// PNG bytes at the source's natural dimensions
    pub data: Vec<u8>,
}

/// The assembled output document, one page per rendered image.
#[derive(Debug, Clone)]
pub struct GeneratedDocument {
    pub bytes: Vec<u8>,
    pub page_count: usize,
}
