use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use image::RgbImage;
use pixvec::{HttpResolver, ImageEmbedder, SourceResolver, StubEmbedder, VisionError};
use std::sync::Arc;
use subtle::ConstantTimeEq;

/// Shared application state: read-only configuration, the source
/// resolver, and the embedding capability. Safe for concurrent reads;
/// nothing here is mutated after startup.
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Source resolver (shared across requests)
    pub resolver: Arc<dyn SourceResolver>,

    /// Embedding capability (shared across requests)
    pub embedder: Arc<dyn ImageEmbedder>,
}

impl ServerState {
    /// Create new server state with the production resolver and the
    /// bundled embedding backend.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let resolver = HttpResolver::new(config.acquire_config())
            .map_err(|e| ServerError::Internal(e.to_string()))?;
        let embedder = SerialEmbedder::new(Box::new(StubEmbedder::new(&config.vision_config())));
        Ok(Self::with_components(
            config,
            Arc::new(resolver),
            Arc::new(embedder),
        ))
    }

    /// Assemble state from explicit components. Used by tests to inject
    /// mock resolvers and backends.
    pub fn with_components(
        config: ServerConfig,
        resolver: Arc<dyn SourceResolver>,
        embedder: Arc<dyn ImageEmbedder>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            resolver,
            embedder,
        }
    }

    /// Constant-time comparison of a presented bearer token against the
    /// configured shared secret.
    pub fn is_valid_token(&self, token: &str) -> bool {
        token
            .as_bytes()
            .ct_eq(self.config.app_key.as_bytes())
            .into()
    }
}

/// Wraps a backend behind a single process-wide computation slot. The
/// underlying model is not assumed to be safe to invoke concurrently;
/// queued requests take turns without corrupting each other's results.
pub struct SerialEmbedder {
    inner: Box<dyn ImageEmbedder>,
    slot: std::sync::Mutex<()>,
}

impl SerialEmbedder {
    pub fn new(inner: Box<dyn ImageEmbedder>) -> Self {
        Self {
            inner,
            slot: std::sync::Mutex::new(()),
        }
    }
}

impl ImageEmbedder for SerialEmbedder {
    fn embed(&self, image: &RgbImage) -> Result<Vec<f32>, VisionError> {
        let _guard = self
            .slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        self.inner.embed(image)
    }

    fn dimensions(&self) -> usize {
        self.inner.dimensions()
    }

    fn model_name(&self) -> &str {
        self.inner.model_name()
    }
}
