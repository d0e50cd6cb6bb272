use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

#[derive(Parser)]
#[command(name = "staple", about = "Combine images and PDFs into a single PDF", version)]
struct Cli {
    /// Input files, combined in the order given. PDFs contribute one page
    /// per page, images one page each; unrecognized files are skipped.
    #[arg(required = true, num_args = 1..)]
    input: Vec<PathBuf>,

    /// Output PDF file
    #[arg(short, long)]
    output: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let files = pdf_combine::read_input_files(&cli.input).await?;
    let skipped = files.iter().filter(|f| !f.is_pdf() && !f.is_image()).count();

    let images = pdf_combine::process_files(&files).await?;
    println!("Rendered {} images from {} files", images.len(), files.len());
    if skipped > 0 {
        println!("Skipped {skipped} files with unrecognized types");
    }

    let document = pdf_combine::generate_pdf(&images).await?;
    pdf_combine::save_document(&document, &cli.output).await?;
    println!(
        "Combined {} pages → {}",
        document.page_count,
        cli.output.display()
    );

    Ok(())
}
