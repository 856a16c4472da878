//! # removebg
//!
//! Single-shot background removal: read an image file, hand its bytes to an
//! external background-removal collaborator, write the result bytes to an
//! output file.
//!
//! The removal algorithm itself (segmentation, inference, alpha-matting) is
//! not part of this crate. It lives behind the [`BackgroundRemover`] trait,
//! an opaque `bytes -> bytes` transform; the production implementation
//! delegates to the `imgly-bgremove` crate.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use removebg::{remove_background_file, ImglyRemover};
//! use std::path::Path;
//!
//! # async fn example() -> removebg::Result<()> {
//! let remover = ImglyRemover::new();
//! remove_background_file(
//!     Path::new("photo.png"),
//!     Path::new("photo_nobg.png"),
//!     &remover,
//! )
//! .await?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod error;
pub mod services;
pub mod tracing_config;
pub mod transform;

// Public API exports
pub use error::{RemovalError, Result};
pub use services::ImageIOService;
pub use tracing_config::{TracingConfig, TracingFormat};
pub use transform::{BackgroundRemover, ImglyRemover};

use std::path::Path;
use tracing::debug;

/// Remove the background of the image at `input_path`, writing the result to
/// `output_path`
///
/// The pipeline is: read the input in full, acquire the output handle
/// (creating or truncating the file), invoke the external transform, write
/// the result bytes in full. The output handle is acquired before the
/// transform runs, so a collaborator failure leaves the output file empty
/// but never with partial result bytes. No retries, no recovery.
///
/// # Errors
/// - `RemovalError::Io` if the input is missing or unreadable, or the output
///   is not writable
/// - `RemovalError::InvalidPath` if the output directory does not exist
/// - `RemovalError::Transform` for collaborator-defined failures
pub async fn remove_background_file(
    input_path: &Path,
    output_path: &Path,
    remover: &dyn BackgroundRemover,
) -> Result<()> {
    let input_bytes = ImageIOService::read_bytes(input_path)?;
    debug!(
        bytes = input_bytes.len(),
        input = %input_path.display(),
        "read input image"
    );

    let mut output_file = ImageIOService::create_output(output_path)?;

    let output_bytes = remover.remove(&input_bytes).await?;
    debug!(bytes = output_bytes.len(), "external transform complete");

    ImageIOService::write_bytes(&mut output_file, output_path, &output_bytes)?;
    debug!(output = %output_path.display(), "wrote output image");

    Ok(())
}
