use acquire::AcquireError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pixvec::PipelineError;
use serde_json::json;

pub type ServerResult<T> = Result<T, ServerError>;

/// Server error taxonomy. Every variant renders as `{"detail": <message>}`
/// with the status from [`ServerError::status_code`]; nothing is retried
/// or downgraded on the way out.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("{0}")]
    Authentication(String),

    #[error("no input provided")]
    NoInput,

    #[error("provide either 'file' or 'url', not both")]
    AmbiguousInput,

    /// Bad URL scheme; aborts the whole batch and names the offending URL.
    #[error("invalid URL format: {0}. URL must start with http:// or https://")]
    MalformedUrl(String),

    #[error("{0}")]
    BadRequest(String),

    /// Remote retrieval failed; message includes the upstream detail.
    #[error("{0}")]
    Fetch(String),

    /// Bytes could not be decoded as an image.
    #[error("{0}")]
    InvalidImage(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    /// Embedding computation failed, including the degenerate zero-norm
    /// case. 500-class, never retried.
    #[error("{0}")]
    Processing(String),

    #[error("not found")]
    NotFound,

    #[error("internal server error: {0}")]
    Internal(String),
}

impl ServerError {
    /// Get HTTP status code for this error
    fn status_code(&self) -> StatusCode {
        match self {
            ServerError::Authentication(_) => StatusCode::UNAUTHORIZED,
            ServerError::NoInput
            | ServerError::AmbiguousInput
            | ServerError::MalformedUrl(_)
            | ServerError::BadRequest(_)
            | ServerError::Fetch(_)
            | ServerError::InvalidImage(_) => StatusCode::BAD_REQUEST,
            ServerError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ServerError::NotFound => StatusCode::NOT_FOUND,
            ServerError::Processing(_) | ServerError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({ "detail": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<PipelineError> for ServerError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::NoInput => ServerError::NoInput,
            PipelineError::AmbiguousInput => ServerError::AmbiguousInput,
            PipelineError::MalformedUrl(url) => ServerError::MalformedUrl(url),
            PipelineError::Source { ref source, .. } => match source {
                AcquireError::MalformedUrl(_) | AcquireError::Decode(_) => {
                    ServerError::InvalidImage(err.to_string())
                }
                AcquireError::Fetch(_) => ServerError::Fetch(err.to_string()),
                AcquireError::TooLarge { .. } => ServerError::PayloadTooLarge(err.to_string()),
            },
            PipelineError::Embed { .. } => ServerError::Processing(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for ServerError {
    fn from(err: serde_json::Error) -> Self {
        ServerError::BadRequest(format!("JSON parse error: {err}"))
    }
}

impl From<axum::extract::multipart::MultipartError> for ServerError {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        ServerError::BadRequest(format!("multipart error: {err}"))
    }
}

impl From<anyhow::Error> for ServerError {
    fn from(err: anyhow::Error) -> Self {
        ServerError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vision::VisionError;

    #[test]
    fn auth_maps_to_401() {
        let err = ServerError::Authentication("Invalid token".into());
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn input_failures_map_to_400() {
        for err in [
            ServerError::NoInput,
            ServerError::AmbiguousInput,
            ServerError::MalformedUrl("x".into()),
            ServerError::Fetch("x".into()),
            ServerError::InvalidImage("x".into()),
        ] {
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn processing_maps_to_500() {
        let err = ServerError::Processing("zero norm".into());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn pipeline_fetch_failure_keeps_label_prefix() {
        let err: ServerError = PipelineError::Source {
            label: "http://x/a.png".into(),
            source: AcquireError::Fetch("503 upstream".into()),
        }
        .into();
        assert!(matches!(err, ServerError::Fetch(_)));
        assert!(err.to_string().starts_with("http://x/a.png: "));
        assert!(err.to_string().contains("503 upstream"));
    }

    #[test]
    fn pipeline_decode_failure_is_invalid_image() {
        let err: ServerError = PipelineError::Source {
            label: "junk.bin".into(),
            source: AcquireError::Decode("unsupported format".into()),
        }
        .into();
        assert!(matches!(err, ServerError::InvalidImage(_)));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn pipeline_embed_failure_is_processing() {
        let err: ServerError = PipelineError::Embed {
            label: "cat.png".into(),
            source: VisionError::ZeroNorm,
        }
        .into();
        assert!(matches!(err, ServerError::Processing(_)));
        assert!(err.to_string().starts_with("cat.png: "));
    }

    #[test]
    fn malformed_url_message_names_url() {
        let err: ServerError = PipelineError::MalformedUrl("ftp://bad".into()).into();
        assert!(err.to_string().contains("ftp://bad"));
        assert!(err.to_string().contains("http://"));
    }
}
