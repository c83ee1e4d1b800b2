use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// JSON request body for `POST /embed`.
#[derive(Debug, Deserialize)]
pub struct EmbedBody {
    /// Remote image URLs, processed after any uploaded files.
    #[serde(default)]
    pub urls: Vec<String>,

    /// Render the batch as a SQL insert statement alongside the vectors.
    #[serde(default)]
    pub sql: bool,
}

/// Single-item response shape, kept for backward compatibility with
/// single-image callers.
#[derive(Debug, Serialize)]
pub struct SingleEmbedResponse {
    pub embedding: Vec<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sql_query: Option<String>,
}

/// Multi-item response shape.
#[derive(Debug, Serialize)]
pub struct MultiEmbedResponse {
    pub embeddings: Vec<EmbedEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sql_query: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EmbedEntry {
    pub path: String,
    pub embedding: Vec<f32>,
}

#[derive(Debug, Default)]
struct EmbedInputs {
    files: Vec<(String, Vec<u8>)>,
    urls: Vec<String>,
    sql: bool,
}

/// Embed a batch of images supplied as uploads and/or remote URLs.
///
/// Accepts either a JSON body (`{"urls": [...], "sql": bool}`) or a
/// multipart form (file parts plus repeated `url`/`urls` text parts and
/// an optional `sql` part). Files are processed before URLs, each in
/// submission order; the first failing item aborts the whole batch.
///
/// A one-item batch returns the unwrapped `{"embedding": [...]}` shape;
/// anything larger returns `{"embeddings": [{"path", "embedding"}, ...]}`.
pub async fn embed_images(
    State(state): State<Arc<ServerState>>,
    request: Request,
) -> ServerResult<Response> {
    let inputs = parse_embed_request(&state, request).await?;
    tracing::info!(
        files = inputs.files.len(),
        urls = inputs.urls.len(),
        "embed request received"
    );

    let mut results = pixvec::embed_batch(
        state.resolver.as_ref(),
        state.embedder.as_ref(),
        inputs.files,
        inputs.urls,
    )
    .await?;

    let sql_query = inputs.sql.then(|| pixvec::sql::render_insert(&results));

    if results.len() == 1 {
        let item = results.swap_remove(0);
        return Ok(Json(SingleEmbedResponse {
            embedding: item.embedding.vector,
            sql_query,
        })
        .into_response());
    }

    let embeddings = results
        .into_iter()
        .map(|item| EmbedEntry {
            path: item.label,
            embedding: item.embedding.vector,
        })
        .collect();
    Ok(Json(MultiEmbedResponse {
        embeddings,
        sql_query,
    })
    .into_response())
}

async fn parse_embed_request(
    state: &ServerState,
    request: Request,
) -> ServerResult<EmbedInputs> {
    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/json")
        .to_string();

    if content_type.starts_with("multipart/form-data") {
        let multipart = Multipart::from_request(request, &())
            .await
            .map_err(|e| ServerError::BadRequest(format!("multipart error: {e}")))?;
        parse_multipart(multipart).await
    } else if content_type.starts_with("application/json") {
        let bytes = axum::body::to_bytes(request.into_body(), state.config.max_body_size())
            .await
            .map_err(|e| ServerError::BadRequest(format!("failed to read request body: {e}")))?;
        let body: EmbedBody = serde_json::from_slice(&bytes)?;
        Ok(EmbedInputs {
            files: Vec::new(),
            urls: body.urls,
            sql: body.sql,
        })
    } else {
        Err(ServerError::BadRequest(format!(
            "unsupported content type '{content_type}': expected application/json or multipart/form-data"
        )))
    }
}

async fn parse_multipart(mut multipart: Multipart) -> ServerResult<EmbedInputs> {
    let mut inputs = EmbedInputs::default();
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        if let Some(filename) = field.file_name().map(|s| s.to_string()) {
            let bytes = field.bytes().await?;
            inputs.files.push((filename, bytes.to_vec()));
        } else {
            match name.as_str() {
                "url" | "urls" => {
                    let url = field.text().await?;
                    if !url.is_empty() {
                        inputs.urls.push(url);
                    }
                }
                "sql" => {
                    let value = field.text().await?;
                    inputs.sql = matches!(value.as_str(), "true" | "1");
                }
                other => {
                    tracing::debug!(field = other, "ignoring unknown multipart field");
                }
            }
        }
    }
    Ok(inputs)
}
