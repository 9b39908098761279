//! Page endpoint.
//!
//! Serves a markdown page either raw (`text/markdown`) or rendered inside
//! the HTML layout (`text/html`), depending on the requested extension and
//! the caller's user agent. Bots and `.md`/`llms` requests get raw
//! markdown; everything else gets rendered HTML.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, header};
use axum::response::{IntoResponse, Response};
use mdgate_renderer::{HtmlRenderer, lowercase_md_hrefs};

use crate::error::ServerError;
use crate::layout;
use crate::routing::{self, OutputFormat};
use crate::state::AppState;

/// Handle GET / (readme page).
pub(crate) async fn get_root_page(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    serve_page("", &state, &headers)
}

/// Handle GET /{path}.
pub(crate) async fn get_page(
    Path(path): Path<String>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    serve_page(&path, &state, &headers)
}

/// Shared implementation for page serving.
fn serve_page(
    request_path: &str,
    state: &AppState,
    headers: &HeaderMap,
) -> Result<Response, ServerError> {
    let page = routing::resolve(request_path);
    let file_path = state
        .source_dir
        .join(format!("{}.md", page.name.to_uppercase()));
    if !file_path.exists() {
        tracing::error!(file = %file_path.display(), "File not found");
        return Err(ServerError::PageNotFound(page.name));
    }
    let markdown = std::fs::read_to_string(&file_path)?;

    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");
    if state.detector.is_bot(user_agent) || page.format == OutputFormat::Markdown {
        return Ok((
            [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
            markdown,
        )
            .into_response());
    }

    let result = HtmlRenderer::new()
        .with_title_extraction()
        .render_markdown(&markdown);
    let content = lowercase_md_hrefs(&result.html);
    let domain = state
        .domain
        .clone()
        .or_else(|| host_header(headers))
        .unwrap_or_default();
    let title = result.title.as_deref().unwrap_or(&page.name);

    let body = layout::render(&page.name, title, &domain, &content);
    Ok((
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        body,
    )
        .into_response())
}

/// Host header as a string, if present and valid UTF-8.
fn host_header(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}
