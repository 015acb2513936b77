use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, State},
    http::header,
    response::{Html, IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::debug;

use mdplain_export::{render_print_html, SAMPLE_MARKDOWN, TEXT_MIME_TYPE};
use mdplain_markdown::{ConversionReport, Converter};

/// Shared application state for API handlers.
pub struct AppState {
    pub converter: Converter,
    pub print_title: String,
    pub text_file_name: String,
}

#[derive(Debug, Deserialize)]
pub struct ConvertRequest {
    pub markdown: String,
    #[serde(default)]
    pub report: bool,
}

#[derive(Debug, Serialize)]
pub struct ConvertResponse {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<ConversionReport>,
}

#[derive(Debug, Deserialize)]
pub struct PrintRequest {
    pub markdown: String,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DownloadRequest {
    pub markdown: String,
}

/// Build the Axum router with all API routes.
pub fn build_router(state: Arc<AppState>, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/convert", post(convert))
        .route("/api/print", post(print))
        .route("/api/download", post(download))
        .route("/api/sample", get(sample))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "mdplain",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Convert Markdown to plain text, optionally with the per-rule report.
async fn convert(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ConvertRequest>,
) -> Json<ConvertResponse> {
    debug!(bytes = req.markdown.len(), report = req.report, "Convert request");
    let response = if req.report {
        let (text, report) = state.converter.convert_with_report(&req.markdown);
        ConvertResponse {
            text,
            report: Some(report),
        }
    } else {
        ConvertResponse {
            text: state.converter.convert(&req.markdown),
            report: None,
        }
    };
    Json(response)
}

/// Convert and wrap the result in the printable HTML document.
async fn print(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PrintRequest>,
) -> Html<String> {
    let text = state.converter.convert(&req.markdown);
    let title = req.title.as_deref().unwrap_or(&state.print_title);
    Html(render_print_html(title, &text))
}

/// Convert and return the text as a file attachment.
async fn download(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DownloadRequest>,
) -> impl IntoResponse {
    let text = state.converter.convert(&req.markdown);
    let disposition = format!("attachment; filename=\"{}\"", state.text_file_name);
    (
        [
            (header::CONTENT_TYPE, TEXT_MIME_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        text,
    )
}

/// Sample Markdown for trying the converter.
async fn sample() -> Json<Value> {
    Json(json!({ "markdown": SAMPLE_MARKDOWN }))
}
