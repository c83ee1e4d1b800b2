use thiserror::Error;

/// Failures surfaced while resolving an [`ImageSource`](crate::ImageSource)
/// into a decoded RGB buffer. Each variant maps to a distinct condition in
/// the HTTP error taxonomy.
#[derive(Debug, Error)]
pub enum AcquireError {
    /// The reference is not an `http://`/`https://` URL. Raised before any
    /// network call is made.
    #[error("invalid URL format: {0}. URL must start with http:// or https://")]
    MalformedUrl(String),
    /// The remote host returned a non-2xx status or the transport failed.
    /// Carries the upstream error message.
    #[error("failed to fetch image: {0}")]
    Fetch(String),
    /// The bytes could not be decoded as an image, or a local path was
    /// unreadable.
    #[error("invalid image: {0}")]
    Decode(String),
    /// The payload exceeds the configured size cap.
    #[error("image too large: {got} bytes (limit {max})")]
    TooLarge { got: usize, max: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_url_names_the_url() {
        let err = AcquireError::MalformedUrl("ftp://host/a.png".into());
        assert!(err.to_string().contains("ftp://host/a.png"));
        assert!(err.to_string().contains("http://"));
    }

    #[test]
    fn fetch_carries_upstream_detail() {
        let err = AcquireError::Fetch("connection refused".into());
        assert!(err.to_string().contains("failed to fetch image"));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn too_large_reports_both_sizes() {
        let err = AcquireError::TooLarge { got: 2048, max: 1024 };
        assert!(err.to_string().contains("2048"));
        assert!(err.to_string().contains("1024"));
    }
}
