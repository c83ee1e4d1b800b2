use serde::{Deserialize, Serialize};

/// Runtime configuration for the embedding backend. Loaded once at startup
/// and passed by reference; never re-read from the environment mid-request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VisionConfig {
    /// Friendly model identifier surfaced on every embedding.
    #[serde(default = "default_model_name")]
    pub model_name: String,
    /// Compute device hint for the backend (`"cpu"` is the only value the
    /// bundled stub understands; the field keeps real backends swappable).
    #[serde(default = "default_device")]
    pub device: String,
    /// Output dimension of the bundled stub backend.
    #[serde(default = "default_embedding_dim")]
    pub embedding_dim: usize,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            model_name: default_model_name(),
            device: default_device(),
            embedding_dim: default_embedding_dim(),
        }
    }
}

fn default_model_name() -> String {
    "clip-vit-base-patch32".to_string()
}

fn default_device() -> String {
    "cpu".to_string()
}

fn default_embedding_dim() -> usize {
    512
}
