use std::path::PathBuf;

// Re-export types that travel through the channel
pub use pdf_combine::{GeneratedDocument, RenderedImage};

/// Commands sent from UI to worker
#[derive(Debug)]
pub enum PdfCommand {
    ConvertFiles {
        paths: Vec<PathBuf>,
    },
    GeneratePdf {
        images: Vec<RenderedImage>,
    },
    SaveDocument {
        document: GeneratedDocument,
        path: PathBuf,
    },
}

/// Updates sent from worker to UI
#[derive(Debug, Clone)]
pub enum PdfUpdate {
    Progress {
        operation: String,
        current: usize,
        total: usize,
    },
    /// Newly rendered images in selection order, with matching thumbnails
    FilesConverted {
        images: Vec<RenderedImage>,
        previews: Vec<ImagePreview>,
    },
    DocumentGenerated {
        document: GeneratedDocument,
    },
    DocumentSaved {
        path: PathBuf,
    },
    Error {
        message: String,
    },
}

/// Raw RGBA thumbnail of a rendered image, sized for list display
#[derive(Debug, Clone)]
pub struct ImagePreview {
    /// Natural dimensions of the full-size rendered image
    pub source_width: u32,
    pub source_height: u32,
    /// Thumbnail dimensions, matching `rgba_data`
    pub width: usize,
    pub height: usize,
    pub rgba_data: Vec<u8>,
}
