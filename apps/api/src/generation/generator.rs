//! Document Generation: orchestrates the full pipeline for one request.
//!
//! Flow: build_prompt → model completion → (blocking) header + body layout → PDF bytes.
//!
//! The model's text is rendered as-is. Layout never calls back into the model, so a reply
//! that drops sections or jobs produces a document that drops them too.

use std::sync::Arc;

use tracing::{debug, info};

use crate::errors::AppError;
use crate::generation::prompt_builder::build_prompt;
use crate::layout::{render_body, render_header, section_keywords, LayoutStats, StyleSheet, StyleSheets};
use crate::llm_client::CompletionService;
use crate::models::{DocumentKind, GenerationRequest, Profile};
use crate::render::{write_pdf, Document, DocumentError, FontSource};

/// A finished, serialized document.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub bytes: Vec<u8>,
    pub pages: usize,
    pub stats: LayoutStats,
}

/// Runs prompt construction, the model call, and rendering for `request`.
///
/// Rendering runs on the blocking pool; the request owns its `Document` end to end.
pub async fn generate_document(
    llm: &dyn CompletionService,
    font: &FontSource,
    styles: Arc<StyleSheets>,
    request: GenerationRequest,
) -> Result<RenderedDocument, AppError> {
    let prompt = build_prompt(&request)?;
    info!(
        kind = ?request.kind,
        lang = %request.language,
        "Requesting completion"
    );

    let text = llm
        .complete(&prompt.system, &prompt.user, prompt.temperature)
        .await?;
    debug!("Model returned {} chars", text.len());

    let font = font.clone();
    let kind = request.kind;
    let profile = request.profile;
    let rendered = tokio::task::spawn_blocking(move || {
        render_document(&text, &profile, kind, styles.for_kind(kind), &font)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Render task failed: {e}")))??;

    info!(
        kind = ?kind,
        pages = rendered.pages,
        bytes = rendered.bytes.len(),
        section_headers = rendered.stats.section_headers,
        job_subheadings = rendered.stats.job_subheadings,
        bullets = rendered.stats.bullets,
        "Document rendered"
    );

    Ok(rendered)
}

/// Lays out header and body on a fresh A4 document and serializes it. Synchronous.
pub fn render_document(
    text: &str,
    profile: &Profile,
    kind: DocumentKind,
    styles: &StyleSheet,
    font: &FontSource,
) -> Result<RenderedDocument, DocumentError> {
    let mut doc = Document::new();
    render_header(&mut doc, profile, &styles.header, &styles.body_default);
    let stats = render_body(&mut doc, text, section_keywords(kind), styles);

    let title = format!("{} - {}", kind.artifact_prefix(), profile.display_name());
    let bytes = write_pdf(&doc, font, &title)?;

    Ok(RenderedDocument {
        bytes,
        pages: doc.page_count(),
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmError;
    use crate::models::Language;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    const RESUME_TEXT: &str = "\
PROFESSIONAL SUMMARY
Backend engineer with eight years of **Rust** and Go.

SKILLS
Rust, Tokio, PostgreSQL

WORK EXPERIENCE
Backend Engineer | Acme Corp | 2019-2022
* Led migration of core services
• Cut p99 latency by 40%
Junior Developer | Initech | 2016-2019";

    /// Records the prompt it was given and replies with a canned text.
    struct CannedCompletion {
        reply: Result<String, ()>,
        seen: Mutex<Vec<(String, f32)>>,
    }

    impl CannedCompletion {
        fn ok(reply: &str) -> Self {
            Self {
                reply: Ok(reply.to_string()),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                reply: Err(()),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CompletionService for CannedCompletion {
        async fn complete(
            &self,
            _system: &str,
            user: &str,
            temperature: f32,
        ) -> Result<String, LlmError> {
            self.seen.lock().unwrap().push((user.to_string(), temperature));
            self.reply.clone().map_err(|_| LlmError::Api {
                status: 503,
                message: "over capacity".to_string(),
            })
        }
    }

    fn request(kind: DocumentKind) -> GenerationRequest {
        GenerationRequest::from_untrusted(
            "Senior Rust engineer",
            Some(json!({"full_name": "Marko Markovic", "email": "marko@example.com"})),
            Language::English,
            kind,
        )
    }

    #[tokio::test]
    async fn test_generate_resume_end_to_end() {
        let llm = CannedCompletion::ok(RESUME_TEXT);
        let styles = Arc::new(StyleSheets::default());

        let doc = generate_document(&llm, &FontSource::Builtin, styles, request(DocumentKind::Resume))
            .await
            .unwrap();

        assert!(doc.bytes.starts_with(b"%PDF"));
        assert_eq!(doc.pages, 1);
        assert_eq!(doc.stats.section_headers, 3);
        assert_eq!(doc.stats.job_subheadings, 2);
        assert_eq!(doc.stats.bullets, 2);

        let seen = llm.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].0.contains("Marko Markovic"));
        assert!((seen[0].1 - 0.2).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn test_cover_letter_has_no_section_headers() {
        let llm = CannedCompletion::ok("Dear Hiring Team,\n\nSKILLS\n\nSincerely,\nMarko");
        let doc = generate_document(
            &llm,
            &FontSource::Builtin,
            Arc::new(StyleSheets::default()),
            request(DocumentKind::CoverLetter),
        )
        .await
        .unwrap();

        assert_eq!(doc.stats.section_headers, 0);
        assert!(doc.stats.body_lines >= 4);
        assert!((llm.seen.lock().unwrap()[0].1 - 0.5).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn test_model_failure_surfaces_as_llm_error() {
        let llm = CannedCompletion::failing();
        let result = generate_document(
            &llm,
            &FontSource::Builtin,
            Arc::new(StyleSheets::default()),
            request(DocumentKind::Resume),
        )
        .await;
        assert!(matches!(result, Err(AppError::Llm(LlmError::Api { status: 503, .. }))));
    }

    #[tokio::test]
    async fn test_missing_font_is_a_document_error() {
        let llm = CannedCompletion::ok(RESUME_TEXT);
        let font = FontSource::File("/nonexistent/arial.ttf".into());
        let result = generate_document(
            &llm,
            &font,
            Arc::new(StyleSheets::default()),
            request(DocumentKind::Resume),
        )
        .await;
        assert!(matches!(result, Err(AppError::Document(DocumentError::FontMissing(_)))));
    }

    #[test]
    fn test_empty_text_yields_header_only_document() {
        let profile = Profile::anonymous();
        let doc = render_document(
            "",
            &profile,
            DocumentKind::Resume,
            &StyleSheet::resume(),
            &FontSource::Builtin,
        )
        .unwrap();
        assert!(doc.bytes.starts_with(b"%PDF"));
        assert_eq!(doc.pages, 1);
        assert_eq!(doc.stats, LayoutStats { blanks: 1, ..LayoutStats::default() });
    }

    #[tokio::test]
    async fn test_empty_completion_renders_header_only() {
        let llm = CannedCompletion::ok("");
        let doc = generate_document(
            &llm,
            &FontSource::Builtin,
            Arc::new(StyleSheets::default()),
            request(DocumentKind::Resume),
        )
        .await
        .unwrap();

        assert!(doc.bytes.starts_with(b"%PDF"));
        assert_eq!(doc.pages, 1);
        assert_eq!(doc.stats, LayoutStats { blanks: 1, ..LayoutStats::default() });
    }

    #[test]
    fn test_long_text_flows_onto_more_pages() {
        let text = "• Shipped another reliable service\n".repeat(120);
        let doc = render_document(
            &text,
            &Profile::default(),
            DocumentKind::Resume,
            &StyleSheet::resume(),
            &FontSource::Builtin,
        )
        .unwrap();
        assert!(doc.pages > 1);
        assert_eq!(doc.stats.bullets, 120);
    }

    #[tokio::test]
    async fn test_concurrent_requests_are_independent() {
        let llm = Arc::new(CannedCompletion::ok(RESUME_TEXT));
        let styles = Arc::new(StyleSheets::default());

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let llm = llm.clone();
                let styles = styles.clone();
                tokio::spawn(async move {
                    let mut req = request(DocumentKind::Resume);
                    req.profile.full_name = Some(format!("Candidate {i}"));
                    generate_document(llm.as_ref(), &FontSource::Builtin, styles, req).await
                })
            })
            .collect();

        for handle in handles {
            let doc = handle.await.unwrap().unwrap();
            assert!(doc.bytes.starts_with(b"%PDF"));
            assert_eq!(doc.stats.bullets, 2);
        }
        assert_eq!(llm.seen.lock().unwrap().len(), 4);
    }
}
