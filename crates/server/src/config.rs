use acquire::AcquireConfig;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;
use vision::VisionConfig;

/// Server configuration. Loaded once at startup, immutable thereafter,
/// and handed by reference into the components that need it.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server bind address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Shared secret expected in `Authorization: Bearer <token>`.
    /// An empty value fails [`ServerConfig::load`] at startup.
    #[serde(default)]
    pub app_key: String,

    /// Model identifier surfaced on embeddings
    #[serde(default = "default_model_name")]
    pub model_name: String,

    /// Compute device hint for the embedding backend
    #[serde(default = "default_device")]
    pub device: String,

    /// Embedding output dimension
    #[serde(default = "default_embedding_dim")]
    pub embedding_dim: usize,

    /// Whole-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Remote image fetch timeout in seconds
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// Maximum accepted size for a single image, in bytes
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: usize,

    /// Maximum request body size in MB
    #[serde(default = "default_max_body_size_mb")]
    pub max_body_size_mb: usize,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub enable_cors: bool,

    /// Log level / env-filter directive
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            app_key: String::new(),
            model_name: default_model_name(),
            device: default_device(),
            embedding_dim: default_embedding_dim(),
            request_timeout_secs: default_request_timeout_secs(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            max_image_bytes: default_max_image_bytes(),
            max_body_size_mb: default_max_body_size_mb(),
            enable_cors: default_true(),
            log_level: default_log_level(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from an optional `pixvec` config file and
    /// `PIXVEC_*` environment variables. A missing shared secret is a
    /// fatal startup error, not a per-request condition.
    pub fn load() -> anyhow::Result<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("pixvec").required(false))
            .add_source(config::Environment::with_prefix("PIXVEC"));

        let config: ServerConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the server must not start with.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.app_key.is_empty() {
            anyhow::bail!("PIXVEC_APP_KEY must be set");
        }
        Ok(())
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.host, self.port);
        Ok(addr_str.parse()?)
    }

    /// Whole-request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Get max body size in bytes
    pub fn max_body_size(&self) -> usize {
        self.max_body_size_mb * 1024 * 1024
    }

    /// Acquisition policy derived from this configuration.
    pub fn acquire_config(&self) -> AcquireConfig {
        AcquireConfig {
            fetch_timeout_secs: self.fetch_timeout_secs,
            max_image_bytes: self.max_image_bytes,
            ..Default::default()
        }
    }

    /// Embedding backend configuration derived from this configuration.
    pub fn vision_config(&self) -> VisionConfig {
        VisionConfig {
            model_name: self.model_name.clone(),
            device: self.device.clone(),
            embedding_dim: self.embedding_dim,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8787
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

fn default_request_timeout_secs() -> u64 {
    60
}

fn default_fetch_timeout_secs() -> u64 {
    15
}

fn default_max_image_bytes() -> usize {
    20 * 1024 * 1024
}

fn default_max_body_size_mb() -> usize {
    50
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}
