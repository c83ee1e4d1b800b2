use fxhash::hash64;
use image::RgbImage;

use crate::config::VisionConfig;
use crate::error::VisionError;
use crate::ImageEmbedder;

/// Deterministic backend used when no real model is wired in. Generates
/// sinusoid values derived from a hash of the RGB buffer so identical
/// pixels always yield identical vectors with minimal CPU cost.
#[derive(Debug)]
pub struct StubEmbedder {
    model_name: String,
    dim: usize,
}

impl StubEmbedder {
    pub fn new(cfg: &VisionConfig) -> Self {
        Self {
            model_name: cfg.model_name.clone(),
            dim: cfg.embedding_dim,
        }
    }
}

impl ImageEmbedder for StubEmbedder {
    fn embed(&self, image: &RgbImage) -> Result<Vec<f32>, VisionError> {
        let mut seed = image.as_raw().clone();
        seed.extend_from_slice(&image.width().to_le_bytes());
        seed.extend_from_slice(&image.height().to_le_bytes());
        let h = hash64(&seed);

        let mut v = vec![0f32; self.dim];
        for (idx, value) in v.iter_mut().enumerate() {
            *value = ((h >> (idx % 32)) as f32 * 0.0001).sin();
        }
        Ok(v)
    }

    fn dimensions(&self) -> usize {
        self.dim
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}
