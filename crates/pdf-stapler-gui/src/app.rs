use eframe::egui;
use pdf_async_runtime::{PdfCommand, PdfUpdate};
use tokio::sync::mpsc;

use crate::logger::AppLogger;
use crate::views::{ConvertState, ImageEntry, show_convert};

#[derive(Clone)]
struct ProgressState {
    operation: String,
    current: usize,
    total: usize,
}

pub struct StaplerApp {
    state: ConvertState,
    status: String,

    // Async infrastructure
    command_tx: mpsc::UnboundedSender<PdfCommand>,
    update_rx: mpsc::UnboundedReceiver<PdfUpdate>,

    // Progress tracking
    progress: Option<ProgressState>,

    logger: AppLogger,

    // Runtime handle
    _tokio_handle: tokio::runtime::Handle,
}

impl StaplerApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        tokio_handle: tokio::runtime::Handle,
        logger: AppLogger,
    ) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        // Spawn worker task
        tokio_handle.spawn(crate::worker::worker_task(command_rx, update_tx));

        Self {
            state: ConvertState::default(),
            status: String::new(),
            command_tx,
            update_rx,
            progress: None,
            logger,
            _tokio_handle: tokio_handle,
        }
    }
}

impl eframe::App for StaplerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Handle drag-and-drop. Every dropped path is forwarded as-is;
        // the conversion layer skips files it does not recognize.
        ctx.input(|i| {
            if !i.raw.dropped_files.is_empty() && !self.state.busy {
                let paths: Vec<_> = i
                    .raw
                    .dropped_files
                    .iter()
                    .filter_map(|file| file.path.clone())
                    .collect();
                if !paths.is_empty() {
                    let _ = self.command_tx.send(PdfCommand::ConvertFiles { paths });
                    self.state.busy = true;
                    self.status = "Converting files...".to_string();
                }
            }
        });

        // Process all pending updates from worker
        while let Ok(update) = self.update_rx.try_recv() {
            match update {
                PdfUpdate::Progress {
                    operation,
                    current,
                    total,
                } => {
                    self.progress = Some(ProgressState {
                        operation,
                        current,
                        total,
                    });
                    ctx.request_repaint(); // Request another frame
                }
                PdfUpdate::FilesConverted { images, previews } => {
                    let added = images.len();
                    for (image, preview) in images.into_iter().zip(previews) {
                        let color_image = egui::ColorImage::from_rgba_unmultiplied(
                            [preview.width, preview.height],
                            &preview.rgba_data,
                        );
                        let texture = ctx.load_texture(
                            "image_preview",
                            color_image,
                            egui::TextureOptions::default(),
                        );
                        self.state.entries.push(ImageEntry {
                            image,
                            width: preview.source_width,
                            height: preview.source_height,
                            texture,
                        });
                    }
                    self.status =
                        format!("Added {} images ({} total)", added, self.state.entries.len());
                    self.state.busy = false;
                    self.progress = None;
                }
                PdfUpdate::DocumentGenerated { document } => {
                    self.status = format!("Generated PDF with {} pages", document.page_count);
                    self.state.document = Some(document);
                    self.state.busy = false;
                    self.progress = None;
                }
                PdfUpdate::DocumentSaved { path } => {
                    self.status = format!("Saved PDF → {}", path.display());
                    self.state.busy = false;
                    self.progress = None;
                }
                PdfUpdate::Error { message } => {
                    self.status = format!("Error: {message}");
                    self.state.busy = false;
                    self.progress = None;
                }
            }
        }

        egui::TopBottomPanel::bottom("status_panel")
            .resizable(true)
            .show(ctx, |ui| {
                // Show progress bar
                if let Some(ref progress) = self.progress {
                    ui.label(&progress.operation);
                    ui.add(
                        egui::ProgressBar::new(
                            progress.current as f32 / progress.total.max(1) as f32,
                        )
                        .show_percentage(),
                    );
                    ctx.request_repaint(); // Keep updating during operations
                }

                if !self.status.is_empty() {
                    ui.label(&self.status);
                }

                egui::CollapsingHeader::new("Activity Log").show(ui, |ui| {
                    if ui.button("Clear").clicked() {
                        self.logger.clear();
                    }
                    egui::ScrollArea::vertical()
                        .max_height(160.0)
                        .stick_to_bottom(true)
                        .show(ui, |ui| {
                            for entry in self.logger.get_entries() {
                                let text = format!(
                                    "{} [{}] {}",
                                    entry.timestamp.format("%H:%M:%S"),
                                    entry.level,
                                    entry.message
                                );
                                let color = match entry.level {
                                    log::Level::Error => egui::Color32::LIGHT_RED,
                                    log::Level::Warn => egui::Color32::YELLOW,
                                    _ => ui.visuals().text_color(),
                                };
                                ui.colored_label(color, text);
                            }
                        });
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            show_convert(ui, &mut self.state, &self.command_tx, &mut self.status);
        });
    }
}
