use pdfium_render::prelude::*;

use crate::types::{ConvertError, Result};

/// Initialize Pdfium, trying the vendored library first, then falling back to system.
///
/// The build script downloads a matching pdfium build into `vendor/pdfium`;
/// when running from cargo the working directory is the workspace root, so
/// that copy is found first. Without it the system search paths apply.
pub fn init_pdfium() -> Result<Pdfium> {
    let vendor_path = std::env::current_dir().ok().and_then(|mut p| {
        p.push("vendor/pdfium/lib");
        if p.exists() { Some(p) } else { None }
    });

    if let Some(vendor_path) = vendor_path {
        if let Ok(binding) =
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(&vendor_path))
        {
            return Ok(Pdfium::new(binding));
        }
    }

    Pdfium::bind_to_system_library()
        .map(Pdfium::new)
        .map_err(|e| {
            ConvertError::Decode(format!(
                "pdfium library not found in vendor/pdfium/lib or system paths: {e}"
            ))
        })
}
