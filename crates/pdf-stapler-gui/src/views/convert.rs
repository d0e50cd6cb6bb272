use eframe::egui;
use pdf_async_runtime::PdfCommand;
use pdf_combine::{GeneratedDocument, RenderedImage};
use tokio::sync::mpsc;

/// Extensions offered by the file picker. Dropped files are not filtered;
/// the conversion layer skips anything it does not recognize.
const PICKER_EXTENSIONS: &[&str] = &[
    "pdf", "png", "jpg", "jpeg", "gif", "bmp", "webp", "tif", "tiff",
];

pub struct ImageEntry {
    pub image: RenderedImage,
    /// Natural dimensions of the rendered image in pixels
    pub width: u32,
    pub height: u32,
    pub texture: egui::TextureHandle,
}

#[derive(Default)]
pub struct ConvertState {
    pub entries: Vec<ImageEntry>,
    pub document: Option<GeneratedDocument>,
    pub busy: bool,
}

pub fn show_convert(
    ui: &mut egui::Ui,
    state: &mut ConvertState,
    command_tx: &mpsc::UnboundedSender<PdfCommand>,
    status: &mut String,
) {
    ui.horizontal(|ui| {
        if ui
            .add_enabled(!state.busy, egui::Button::new("➕ Add Files..."))
            .clicked()
        {
            if let Some(paths) = rfd::FileDialog::new()
                .add_filter("Images and PDFs", PICKER_EXTENSIONS)
                .pick_files()
            {
                let _ = command_tx.send(PdfCommand::ConvertFiles { paths });
                state.busy = true;
                *status = "Converting files...".to_string();
            }
        }

        let can_generate = !state.entries.is_empty() && !state.busy;
        if ui
            .add_enabled(can_generate, egui::Button::new("📄 Generate PDF"))
            .clicked()
        {
            let images: Vec<RenderedImage> =
                state.entries.iter().map(|entry| entry.image.clone()).collect();
            let _ = command_tx.send(PdfCommand::GeneratePdf { images });
            state.busy = true;
            *status = "Generating PDF...".to_string();
        }

        let can_save = state.document.is_some() && !state.busy;
        if ui
            .add_enabled(can_save, egui::Button::new("💾 Save PDF..."))
            .clicked()
        {
            if let Some(document) = &state.document {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("PDF", &["pdf"])
                    .set_file_name("combined.pdf")
                    .save_file()
                {
                    let _ = command_tx.send(PdfCommand::SaveDocument {
                        document: document.clone(),
                        path,
                    });
                    state.busy = true;
                    *status = "Saving PDF...".to_string();
                }
            }
        }

        if !state.entries.is_empty() {
            ui.separator();
            ui.label(format!("{} images", state.entries.len()));
        }

        if let Some(document) = &state.document {
            ui.separator();
            ui.label(format!(
                "Document ready: {} pages, {} KB",
                document.page_count,
                document.bytes.len() / 1024
            ));
        }
    });

    ui.separator();

    if state.entries.is_empty() {
        ui.centered_and_justified(|ui| {
            ui.vertical_centered(|ui| {
                ui.heading("No Images Yet");
                ui.label("Add image or PDF files, or drop them anywhere in this window");
            });
        });
    } else {
        egui::ScrollArea::vertical().show(ui, |ui| {
            for entry in &state.entries {
                ui.horizontal(|ui| {
                    ui.image((entry.texture.id(), entry.texture.size_vec2()));
                    ui.vertical(|ui| {
                        ui.label(&entry.image.source);
                        ui.label(format!("{} x {} px", entry.width, entry.height));
                    });
                });
                ui.separator();
            }
        });
    }
}
