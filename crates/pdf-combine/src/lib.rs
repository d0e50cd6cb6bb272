//! Conversion of image and PDF files into a single combined PDF.
//!
//! Two operations do the work: [`process_files`] rasterizes every page of
//! every recognized input into PNG bitmaps, and [`generate_pdf`] lays those
//! bitmaps out one per page on A4, scaled to fit and centered. The I/O
//! helpers in [`io`] read inputs with extension-based media type guessing and
//! write the assembled document out.

mod generate;
pub mod io;
mod pdfium;
mod process;
mod types;

pub use generate::generate_pdf;
pub use io::{read_input_file, read_input_files, save_document};
pub use process::{process_file, process_files};
pub use types::*;
