use thiserror::Error;

/// Failures surfaced while computing an embedding. Both variants are
/// 500-class conditions and are never retried automatically.
#[derive(Debug, Error)]
pub enum VisionError {
    /// The underlying model backend failed; carries its message.
    #[error("error processing image: {0}")]
    Inference(String),
    /// The backend produced an all-zero vector, which has no unit-norm form.
    #[error("embedding has zero norm and cannot be normalized")]
    ZeroNorm,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inference_carries_backend_message() {
        let err = VisionError::Inference("out of device memory".into());
        assert!(err.to_string().contains("error processing image"));
        assert!(err.to_string().contains("out of device memory"));
    }

    #[test]
    fn zero_norm_is_described() {
        assert!(VisionError::ZeroNorm.to_string().contains("zero norm"));
    }
}
