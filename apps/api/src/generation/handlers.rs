//! Axum route handlers for the Generation API.

use std::net::SocketAddr;

use axum::{
    body::Body,
    extract::{ConnectInfo, Query, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use tokio_util::io::ReaderStream;
use tracing::info;

use crate::artifacts::{GuardedStream, RemovalGuard};
use crate::errors::AppError;
use crate::generation::generator::generate_document;
use crate::models::{DocumentKind, GenerationRequest, Language};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateBody {
    pub job_description: String,
    #[serde(default)]
    pub user_dossier: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct LangQuery {
    pub lang: Option<String>,
}

impl LangQuery {
    /// Absent → Serbian; unknown codes are a client error.
    fn language(&self) -> Result<Language, AppError> {
        match self.lang.as_deref() {
            None => Ok(Language::default()),
            Some(code) => code.parse().map_err(AppError::Validation),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /generate-pdf/?lang=sr|en
///
/// Tailors the dossier to the job description and returns the résumé as a PDF attachment.
pub async fn handle_generate_pdf(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Query(query): Query<LangQuery>,
    Json(body): Json<GenerateBody>,
) -> Result<Response, AppError> {
    generate_and_stream(state, addr, &query, body, DocumentKind::Resume).await
}

/// POST /generate-cover-letter/?lang=sr|en
pub async fn handle_generate_cover_letter(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Query(query): Query<LangQuery>,
    Json(body): Json<GenerateBody>,
) -> Result<Response, AppError> {
    generate_and_stream(state, addr, &query, body, DocumentKind::CoverLetter).await
}

async fn generate_and_stream(
    state: AppState,
    addr: SocketAddr,
    query: &LangQuery,
    body: GenerateBody,
    kind: DocumentKind,
) -> Result<Response, AppError> {
    // Malformed requests are rejected before they count against the client's quota.
    let language = query.language()?;
    state.limiter.check(addr.ip())?;

    let request =
        GenerationRequest::from_untrusted(&body.job_description, body.user_dossier, language, kind);
    if request.job_description.is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }

    info!(client = %addr.ip(), ?kind, lang = %language, "Generation requested");

    let rendered =
        generate_document(state.llm.as_ref(), &state.font, state.styles.clone(), request).await?;

    let store = state.artifacts.clone();
    let bytes = rendered.bytes;
    let size = bytes.len();
    let path = tokio::task::spawn_blocking(move || store.persist(&bytes, kind, language))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Artifact write task failed: {e}")))??;

    // The body owns the guard, so the file is deleted once the body is sent or dropped.
    let guard = RemovalGuard::new(path.clone());
    let file = tokio::fs::File::open(&path).await?;
    let stream = GuardedStream::new(ReaderStream::new(file), guard);

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/pdf")
        .header(header::CONTENT_LENGTH, size)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", kind.download_name(language)),
        )
        .body(Body::from_stream(stream))
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to build response: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lang_query_defaults_to_serbian() {
        let query = LangQuery { lang: None };
        assert_eq!(query.language().unwrap(), Language::Serbian);
    }

    #[test]
    fn test_lang_query_rejects_unknown_codes() {
        let query = LangQuery {
            lang: Some("de".to_string()),
        };
        assert!(matches!(query.language(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_body_dossier_is_optional() {
        let body: GenerateBody =
            serde_json::from_value(serde_json::json!({"job_description": "Rust"})).unwrap();
        assert!(body.user_dossier.is_none());
    }
}
