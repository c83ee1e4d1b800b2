//! Umbrella crate for the pixvec image embedding pipeline.
//!
//! This crate stitches together source acquisition and embedding
//! computation so callers can turn image references into unit-norm
//! vectors with a single API entry point. The HTTP surface lives in
//! `pixvec-server`; the stage implementations live in `pixvec-acquire`
//! and `pixvec-vision`.
//!
//! Batch semantics are all-or-nothing: items are processed sequentially
//! in submission order (files before URLs) and the first failure aborts
//! the whole batch with the failing item's label in the message. URL
//! schemes are validated before any network call is dispatched.

pub mod sql;

pub use acquire::{validate_remote_url, AcquireConfig, AcquireError, ImageSource};
pub use vision::{
    compute_embedding, ImageEmbedder, ImageEmbedding, StubEmbedder, VisionConfig, VisionError,
};

use async_trait::async_trait;
use image::RgbImage;
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur while driving an image reference through the
/// resolve/embed pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Neither files nor URLs were supplied.
    #[error("no input provided")]
    NoInput,
    /// Both a file and a URL were supplied where exactly one is accepted.
    #[error("provide either a file or a url, not both")]
    AmbiguousInput,
    /// A URL failed the scheme check. Aborts the whole batch before any
    /// resolver call; never a per-item failure.
    #[error("invalid URL format: {0}. URL must start with http:// or https://")]
    MalformedUrl(String),
    /// Source resolution failed for the labeled item.
    #[error("{label}: {source}")]
    Source {
        label: String,
        #[source]
        source: AcquireError,
    },
    /// Embedding computation failed for the labeled item.
    #[error("{label}: {source}")]
    Embed {
        label: String,
        #[source]
        source: VisionError,
    },
}

/// Resolver seam for the batch pipeline. The production implementation
/// is [`HttpResolver`]; tests substitute counting or failing mocks.
#[async_trait]
pub trait SourceResolver: Send + Sync {
    /// Produce a decoded RGB buffer for the given reference.
    async fn resolve(&self, source: &ImageSource) -> Result<RgbImage, AcquireError>;
}

/// Resolver backed by the `acquire` crate: in-memory decode for uploads,
/// filesystem reads for local paths, and a shared HTTP client (bounded
/// timeout, non-empty User-Agent) for remote URLs.
pub struct HttpResolver {
    client: reqwest::Client,
    config: AcquireConfig,
}

impl HttpResolver {
    pub fn new(config: AcquireConfig) -> Result<Self, AcquireError> {
        let client = config.build_client()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &AcquireConfig {
        &self.config
    }
}

#[async_trait]
impl SourceResolver for HttpResolver {
    async fn resolve(&self, source: &ImageSource) -> Result<RgbImage, AcquireError> {
        match source {
            ImageSource::Upload { filename, bytes } => {
                acquire::resolve_upload(filename, bytes, &self.config)
            }
            ImageSource::LocalPath(path) => acquire::resolve_local(path, &self.config),
            ImageSource::RemoteUrl(url) => {
                acquire::resolve_remote(&self.client, url, &self.config).await
            }
        }
    }
}

/// One successfully embedded batch item.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SourceEmbedding {
    /// Correlation label: the original filename or URL.
    pub label: String,
    /// The computed unit-norm embedding.
    pub embedding: ImageEmbedding,
    /// Reserved identifier for persistence paths; never set by the
    /// pipeline itself.
    pub id: Option<i64>,
}

/// Resolve one reference and compute its embedding. Failures carry the
/// item's label so batch callers surface `"<label>: <cause>"` messages.
pub async fn embed_source<R: SourceResolver + ?Sized>(
    resolver: &R,
    embedder: &dyn ImageEmbedder,
    source: &ImageSource,
) -> Result<SourceEmbedding, PipelineError> {
    let label = source.label();
    let image = resolver
        .resolve(source)
        .await
        .map_err(|e| PipelineError::Source {
            label: label.clone(),
            source: e,
        })?;
    let embedding = compute_embedding(embedder, &image).map_err(|e| PipelineError::Embed {
        label: label.clone(),
        source: e,
    })?;
    tracing::debug!(label = %label, dim = embedding.embedding_dim, "embedded source");
    Ok(SourceEmbedding {
        label,
        embedding,
        id: None,
    })
}

/// Drive a batch of uploads and URLs through the pipeline.
///
/// Files are processed first, then URLs, each sequentially in submission
/// order. Each URL's scheme is checked before that item is resolved; a
/// violation aborts the entire batch naming the offending URL. Any item
/// failure likewise aborts the batch, discarding results accumulated so
/// far. On full success the results come back in submission order,
/// never deduplicated.
pub async fn embed_batch<R: SourceResolver + ?Sized>(
    resolver: &R,
    embedder: &dyn ImageEmbedder,
    files: Vec<(String, Vec<u8>)>,
    urls: Vec<String>,
) -> Result<Vec<SourceEmbedding>, PipelineError> {
    if files.is_empty() && urls.is_empty() {
        return Err(PipelineError::NoInput);
    }

    let mut results = Vec::with_capacity(files.len() + urls.len());
    for (filename, bytes) in files {
        let source = ImageSource::Upload { filename, bytes };
        results.push(embed_source(resolver, embedder, &source).await?);
    }
    for url in urls {
        if validate_remote_url(&url).is_err() {
            return Err(PipelineError::MalformedUrl(url));
        }
        let source = ImageSource::RemoteUrl(url);
        results.push(embed_source(resolver, embedder, &source).await?);
    }
    Ok(results)
}

/// Single-image variant: accepts exactly one file or one URL.
pub async fn embed_single<R: SourceResolver + ?Sized>(
    resolver: &R,
    embedder: &dyn ImageEmbedder,
    file: Option<(String, Vec<u8>)>,
    url: Option<String>,
) -> Result<SourceEmbedding, PipelineError> {
    let source = match (file, url) {
        (Some(_), Some(_)) => return Err(PipelineError::AmbiguousInput),
        (None, None) => return Err(PipelineError::NoInput),
        (Some((filename, bytes)), None) => ImageSource::Upload { filename, bytes },
        (None, Some(url)) => {
            if validate_remote_url(&url).is_err() {
                return Err(PipelineError::MalformedUrl(url));
            }
            ImageSource::RemoteUrl(url)
        }
    };
    embed_source(resolver, embedder, &source).await
}
