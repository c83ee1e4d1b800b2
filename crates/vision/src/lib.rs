//! Embedding computation for pixvec.
//!
//! The embedding model is an external, expensive-to-initialize resource.
//! It is modeled as a long-lived [`ImageEmbedder`] behind a trait so the
//! actual backend stays swappable and test-mockable; the bundled
//! [`StubEmbedder`] is deterministic and cheap.
//!
//! [`compute_embedding`] is the single entry point: it delegates to the
//! backend for the raw feature vector, then enforces the unit-norm
//! contract. A zero-norm raw vector is a hard failure, never a silent
//! divide-by-zero.

pub mod config;
pub mod error;
pub mod normalize;
pub mod stub;
pub mod types;

pub use config::VisionConfig;
pub use error::VisionError;
pub use stub::StubEmbedder;
pub use types::ImageEmbedding;

use image::RgbImage;
use normalize::l2_normalize_in_place;

/// Capability interface over the embedding model: given a decoded RGB
/// image, produce a raw feature vector of fixed dimension.
///
/// Implementations must be `Send + Sync` so a single instance can be
/// shared read-only across concurrent requests.
pub trait ImageEmbedder: Send + Sync {
    /// Compute the raw (pre-normalization) feature vector.
    fn embed(&self, image: &RgbImage) -> Result<Vec<f32>, VisionError>;

    /// Output dimensionality of this backend.
    fn dimensions(&self) -> usize;

    /// Model identifier surfaced on embeddings.
    fn model_name(&self) -> &str;
}

/// Compute a unit-norm embedding for a decoded image.
///
/// Backend failures surface as [`VisionError::Inference`]; an all-zero
/// raw vector surfaces as [`VisionError::ZeroNorm`]. Both are 500-class
/// conditions for the HTTP surface.
pub fn compute_embedding(
    embedder: &dyn ImageEmbedder,
    image: &RgbImage,
) -> Result<ImageEmbedding, VisionError> {
    let mut vector = embedder.embed(image)?;
    l2_normalize_in_place(&mut vector)?;
    Ok(ImageEmbedding {
        embedding_dim: vector.len(),
        model_name: embedder.model_name().to_string(),
        vector,
        normalized: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    struct FixedEmbedder(Vec<f32>);

    impl ImageEmbedder for FixedEmbedder {
        fn embed(&self, _image: &RgbImage) -> Result<Vec<f32>, VisionError> {
            Ok(self.0.clone())
        }
        fn dimensions(&self) -> usize {
            self.0.len()
        }
        fn model_name(&self) -> &str {
            "fixed"
        }
    }

    struct FailingEmbedder;

    impl ImageEmbedder for FailingEmbedder {
        fn embed(&self, _image: &RgbImage) -> Result<Vec<f32>, VisionError> {
            Err(VisionError::Inference("device lost".into()))
        }
        fn dimensions(&self) -> usize {
            0
        }
        fn model_name(&self) -> &str {
            "failing"
        }
    }

    fn test_image() -> RgbImage {
        RgbImage::from_pixel(4, 4, Rgb([17, 34, 51]))
    }

    #[test]
    fn compute_returns_unit_norm_vector() {
        let stub = StubEmbedder::new(&VisionConfig::default());
        let embedding = compute_embedding(&stub, &test_image()).unwrap();
        assert_eq!(embedding.vector.len(), 512);
        assert_eq!(embedding.embedding_dim, 512);
        assert!(embedding.normalized);
        let norm: f32 = embedding.vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-4, "norm was {norm}");
    }

    #[test]
    fn compute_is_idempotent_per_image() {
        let stub = StubEmbedder::new(&VisionConfig::default());
        let first = compute_embedding(&stub, &test_image()).unwrap();
        let second = compute_embedding(&stub, &test_image()).unwrap();
        assert_eq!(first.vector, second.vector);
    }

    #[test]
    fn compute_normalizes_raw_vectors() {
        let fixed = FixedEmbedder(vec![3.0, 4.0]);
        let embedding = compute_embedding(&fixed, &test_image()).unwrap();
        assert!((embedding.vector[0] - 0.6).abs() < 1e-6);
        assert!((embedding.vector[1] - 0.8).abs() < 1e-6);
    }

    #[test]
    fn compute_rejects_zero_norm_backend() {
        let zeros = FixedEmbedder(vec![0.0; 16]);
        let err = compute_embedding(&zeros, &test_image()).unwrap_err();
        assert!(matches!(err, VisionError::ZeroNorm));
    }

    #[test]
    fn compute_propagates_backend_failure() {
        let err = compute_embedding(&FailingEmbedder, &test_image()).unwrap_err();
        assert!(matches!(err, VisionError::Inference(_)));
        assert!(err.to_string().contains("device lost"));
    }

    #[test]
    fn compute_carries_model_name() {
        let stub = StubEmbedder::new(&VisionConfig {
            model_name: "clip-vit-large".into(),
            ..Default::default()
        });
        let embedding = compute_embedding(&stub, &test_image()).unwrap();
        assert_eq!(embedding.model_name, "clip-vit-large");
    }
}
