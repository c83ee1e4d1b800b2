//! Source kinds accepted by the resolver.

use std::path::PathBuf;

/// Where an image comes from. Exactly one variant is populated per
/// reference; each variant has its own decode strategy in [`crate`].
///
/// # Examples
///
/// ```rust
/// use acquire::ImageSource;
///
/// let upload = ImageSource::Upload {
///     filename: "photo.png".to_string(),
///     bytes: vec![0x89, 0x50, 0x4E, 0x47],
/// };
/// assert_eq!(upload.label(), "photo.png");
///
/// let remote = ImageSource::RemoteUrl("https://example.com/cat.jpg".to_string());
/// assert_eq!(remote.label(), "https://example.com/cat.jpg");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Bytes uploaded in the request body, with the client-supplied filename.
    Upload {
        /// Original filename, kept for correlation and error messages.
        filename: String,
        /// Raw file content as received.
        bytes: Vec<u8>,
    },
    /// A path readable from the local filesystem.
    LocalPath(PathBuf),
    /// A remote URL. Must start with `http://` or `https://`; validated by
    /// [`validate_remote_url`](crate::validate_remote_url) before any fetch.
    RemoteUrl(String),
}

impl ImageSource {
    /// Correlation label surfaced in responses and error messages: the
    /// filename for uploads, the path for local files, the URL otherwise.
    pub fn label(&self) -> String {
        match self {
            ImageSource::Upload { filename, .. } => filename.clone(),
            ImageSource::LocalPath(path) => path.display().to_string(),
            ImageSource::RemoteUrl(url) => url.clone(),
        }
    }
}
