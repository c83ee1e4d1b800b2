//! Image source resolution for pixvec.
//!
//! This crate turns an [`ImageSource`] reference (uploaded bytes, a local
//! path, or a remote URL) into a decoded RGB pixel buffer. One decode
//! strategy per source variant:
//!
//! - **Upload**: decode the received bytes in memory
//! - **LocalPath**: read the file, then decode
//! - **RemoteUrl**: validate the scheme, GET with a bounded timeout and a
//!   non-empty User-Agent, then decode the body
//!
//! All strategies convert to RGB8 and enforce the configured size cap.
//! There are no retries and no caching; the decoded buffer is consumed
//! once by the embedding stage.

pub mod config;
pub mod error;
pub mod types;

pub use config::AcquireConfig;
pub use error::AcquireError;
pub use types::ImageSource;

use image::RgbImage;
use std::path::Path;

/// Check that a remote reference uses an `http://` or `https://` scheme.
///
/// Callers must run this before dispatching any fetch; a violation is a
/// [`AcquireError::MalformedUrl`], distinct from fetch and decode failures.
pub fn validate_remote_url(url: &str) -> Result<(), AcquireError> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(AcquireError::MalformedUrl(url.to_string()))
    }
}

/// Decode raw bytes as an image and convert to RGB8.
fn decode_rgb(bytes: &[u8]) -> Result<RgbImage, AcquireError> {
    let decoded =
        image::load_from_memory(bytes).map_err(|e| AcquireError::Decode(e.to_string()))?;
    Ok(decoded.to_rgb8())
}

fn check_size(len: usize, cfg: &AcquireConfig) -> Result<(), AcquireError> {
    if len > cfg.max_image_bytes {
        return Err(AcquireError::TooLarge {
            got: len,
            max: cfg.max_image_bytes,
        });
    }
    Ok(())
}

/// Resolve uploaded bytes into an RGB buffer.
pub fn resolve_upload(
    filename: &str,
    bytes: &[u8],
    cfg: &AcquireConfig,
) -> Result<RgbImage, AcquireError> {
    check_size(bytes.len(), cfg)?;
    tracing::debug!(filename, size = bytes.len(), "decoding uploaded image");
    decode_rgb(bytes)
}

/// Resolve a local filesystem path into an RGB buffer. An unreadable path
/// is reported as a decode failure, the same as undecodable content.
pub fn resolve_local(path: &Path, cfg: &AcquireConfig) -> Result<RgbImage, AcquireError> {
    let bytes = std::fs::read(path)
        .map_err(|e| AcquireError::Decode(format!("{}: {e}", path.display())))?;
    check_size(bytes.len(), cfg)?;
    tracing::debug!(path = %path.display(), size = bytes.len(), "decoding local image");
    decode_rgb(&bytes)
}

/// Fetch a remote URL and resolve the body into an RGB buffer.
///
/// The scheme is re-validated here so the function is safe to call
/// directly; non-2xx statuses and transport errors surface as
/// [`AcquireError::Fetch`] with the upstream message attached. The
/// client's timeout and User-Agent come from
/// [`AcquireConfig::build_client`].
pub async fn resolve_remote(
    client: &reqwest::Client,
    url: &str,
    cfg: &AcquireConfig,
) -> Result<RgbImage, AcquireError> {
    validate_remote_url(url)?;

    let response = client
        .get(url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| AcquireError::Fetch(e.to_string()))?;

    if let Some(declared) = response.content_length() {
        check_size(declared as usize, cfg)?;
    }
    let body = response
        .bytes()
        .await
        .map_err(|e| AcquireError::Fetch(e.to_string()))?;
    check_size(body.len(), cfg)?;

    tracing::debug!(url, size = body.len(), "decoding fetched image");
    decode_rgb(&body)
}
