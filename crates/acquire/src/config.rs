use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::AcquireError;

/// Resolution policy: fetch timeout, size cap, and the User-Agent presented
/// to remote hosts. The size cap is a memory-bounding policy, not a format
/// rule; it applies to uploads, local files, and fetched bodies alike.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AcquireConfig {
    /// Overall timeout for a remote fetch, in seconds.
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
    /// Maximum accepted image payload, in bytes.
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: usize,
    /// User-Agent header sent with remote fetches. Must be non-empty.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for AcquireConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_secs: default_fetch_timeout_secs(),
            max_image_bytes: default_max_image_bytes(),
            user_agent: default_user_agent(),
        }
    }
}

impl AcquireConfig {
    /// Fetch timeout as a [`Duration`].
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Build the HTTP client used for remote fetches: configured timeout,
    /// non-empty User-Agent, default redirect policy, no retries.
    pub fn build_client(&self) -> Result<reqwest::Client, AcquireError> {
        let user_agent = if self.user_agent.is_empty() {
            default_user_agent()
        } else {
            self.user_agent.clone()
        };
        reqwest::Client::builder()
            .timeout(self.fetch_timeout())
            .user_agent(user_agent)
            .build()
            .map_err(|e| AcquireError::Fetch(e.to_string()))
    }
}

fn default_fetch_timeout_secs() -> u64 {
    15
}

fn default_max_image_bytes() -> usize {
    20 * 1024 * 1024
}

fn default_user_agent() -> String {
    concat!("pixvec/", env!("CARGO_PKG_VERSION")).to_string()
}
