//! pixvec server - HTTP API for image embedding
//!
//! This crate exposes the pixvec pipeline over HTTP:
//!
//! - **`POST /embed`**: batch embedding of uploaded files and/or remote
//!   URLs, with single-item response unwrapping and optional SQL
//!   rendering
//! - **`POST /search`**: single-image embedding (exactly one of
//!   `file`/`url`)
//! - **`GET /health`**, **`GET /ready`**, **`GET /metrics`**: service
//!   probes
//!
//! Every request passes the bearer-token gate before routing; the shared
//! secret is loaded once at startup and compared in constant time.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{build_router, start_server};
pub use state::ServerState;
