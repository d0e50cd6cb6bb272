use pdf_async_runtime::{PdfCommand, PdfUpdate};
use tokio::sync::mpsc;

use crate::handlers;

/// Async worker task that executes conversion commands and sends updates
pub async fn worker_task(
    mut command_rx: mpsc::UnboundedReceiver<PdfCommand>,
    update_tx: mpsc::UnboundedSender<PdfUpdate>,
) {
    while let Some(cmd) = command_rx.recv().await {
        process_command(cmd, &update_tx).await;
    }
}

async fn process_command(cmd: PdfCommand, update_tx: &mpsc::UnboundedSender<PdfUpdate>) {
    match cmd {
        PdfCommand::ConvertFiles { paths } => {
            handlers::convert::handle_convert_files(paths, update_tx).await;
        }
        PdfCommand::GeneratePdf { images } => {
            handlers::convert::handle_generate(images, update_tx).await;
        }
        PdfCommand::SaveDocument { document, path } => {
            handlers::convert::handle_save(document, path, update_tx).await;
        }
    }
}
