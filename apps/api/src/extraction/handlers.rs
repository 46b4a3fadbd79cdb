use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::extraction::jd_extractor::{extract_pdf_text, extract_required_skills, ExtractedJob};
use crate::llm_client::LlmClient;
use crate::state::AppState;

const UPLOAD_FIELD: &str = "file";

fn require_llm(state: &AppState) -> Result<&LlmClient, AppError> {
    state
        .llm
        .as_ref()
        .ok_or_else(|| AppError::Llm("ANTHROPIC_API_KEY is not configured".to_string()))
}

fn is_pdf_upload(content_type: Option<&str>, file_name: Option<&str>) -> bool {
    content_type == Some("application/pdf")
        || file_name.is_some_and(|name| name.to_ascii_lowercase().ends_with(".pdf"))
}

/// POST /api/v1/jobs/extract-skills
/// Multipart upload with the job description PDF in the `file` field.
pub async fn handle_extract_skills(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ExtractedJob>, AppError> {
    let llm = require_llm(&state)?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        if !is_pdf_upload(field.content_type(), file_name.as_deref()) {
            return Err(AppError::Validation(
                "Only PDF job descriptions are supported".to_string(),
            ));
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
        info!(
            "Extracting skills from {} ({} bytes)",
            file_name.as_deref().unwrap_or("upload"),
            data.len()
        );

        let text = extract_pdf_text(data).await?;
        return Ok(Json(extract_required_skills(&text, llm).await?));
    }

    Err(AppError::Validation(format!(
        "Missing '{UPLOAD_FIELD}' field in multipart body"
    )))
}

#[derive(Debug, Deserialize)]
pub struct ExtractTextRequest {
    pub jd_text: String,
}

/// POST /api/v1/jobs/extract-skills/text
pub async fn handle_extract_skills_text(
    State(state): State<AppState>,
    Json(req): Json<ExtractTextRequest>,
) -> Result<Json<ExtractedJob>, AppError> {
    let llm = require_llm(&state)?;
    Ok(Json(extract_required_skills(&req.jd_text, llm).await?))
}
