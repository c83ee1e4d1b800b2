use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::{Form, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Response for `POST /search`: the resolved source label and its
/// embedding, without the batch list/singleton branching.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub source: String,
    pub embedding: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct SearchForm {
    #[serde(default)]
    url: Option<String>,
}

/// Embed exactly one image, supplied as a `file` multipart part OR a
/// `url` form field. Supplying both is ambiguous; supplying neither is
/// a missing-input error. Both cases reject with 400.
pub async fn search_image(
    State(state): State<Arc<ServerState>>,
    request: Request,
) -> ServerResult<Json<SearchResponse>> {
    let (file, url) = parse_search_request(request).await?;
    let result = pixvec::embed_single(
        state.resolver.as_ref(),
        state.embedder.as_ref(),
        file,
        url,
    )
    .await?;
    Ok(Json(SearchResponse {
        source: result.label,
        embedding: result.embedding.vector,
    }))
}

type SearchInputs = (Option<(String, Vec<u8>)>, Option<String>);

async fn parse_search_request(request: Request) -> ServerResult<SearchInputs> {
    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    if content_type.starts_with("multipart/form-data") {
        let mut multipart = Multipart::from_request(request, &())
            .await
            .map_err(|e| ServerError::BadRequest(format!("multipart error: {e}")))?;

        let mut file = None;
        let mut url = None;
        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            if let Some(filename) = field.file_name().map(|s| s.to_string()) {
                file = Some((filename, field.bytes().await?.to_vec()));
            } else if name == "url" {
                let value = field.text().await?;
                if !value.is_empty() {
                    url = Some(value);
                }
            }
        }
        Ok((file, url))
    } else {
        // Plain form posts can only carry the url variant.
        let Form(form) = Form::<SearchForm>::from_request(request, &())
            .await
            .map_err(|e| ServerError::BadRequest(format!("form error: {e}")))?;
        Ok((None, form.url.filter(|u| !u.is_empty())))
    }
}
