//! Background removal CLI tool
//!
//! Command-line interface for removing the background of a single image file
//! via the external `imgly-bgremove` collaborator.

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    removebg::cli::main().await
}
