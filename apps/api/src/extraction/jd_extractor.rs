//! JD Extractor: turns a job description into the `RequiredSkill` list the matcher consumes.
//!
//! 1. PDF bytes → text with `pdf-extract` (blocking, so it runs on `spawn_blocking`).
//! 2. Text → `ExtractedJob` via one LLM call.
//! 3. Entries with a blank taxonomy field are dropped, values are trimmed and
//!    exact repeats removed. An empty result is an error.

use std::collections::HashSet;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::extraction::prompts::{JD_EXTRACT_PROMPT_TEMPLATE, JD_EXTRACT_ROLE};
use crate::llm_client::prompts::json_system;
use crate::llm_client::LlmClient;
use crate::matching::records::RequiredSkill;

/// Longest job description sent to the LLM, in characters.
pub const MAX_JD_CHARS: usize = 20_000;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedJob {
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub required_skills: Vec<RequiredSkill>,
}

/// Extracts plain text from an in-memory PDF.
pub async fn extract_pdf_text(pdf: Bytes) -> Result<String, AppError> {
    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&pdf))
        .await
        .map_err(|e| {
            AppError::Internal(anyhow::anyhow!(
                "spawn_blocking failed in PDF extraction: {e}"
            ))
        })?
        .map_err(|e| AppError::UnprocessableEntity(format!("Could not read PDF: {e}")))?;

    if text.trim().is_empty() {
        return Err(AppError::UnprocessableEntity(
            "PDF contains no extractable text".to_string(),
        ));
    }
    Ok(text)
}

pub fn build_extraction_prompt(jd_text: &str) -> String {
    let jd_text = truncate_chars(jd_text.trim(), MAX_JD_CHARS);
    JD_EXTRACT_PROMPT_TEMPLATE.replace("{jd_text}", jd_text)
}

/// Asks the LLM for the skills a job description requires.
pub async fn extract_required_skills(
    jd_text: &str,
    llm: &LlmClient,
) -> Result<ExtractedJob, AppError> {
    if jd_text.trim().is_empty() {
        return Err(AppError::Validation("Job description text is empty".to_string()));
    }

    let prompt = build_extraction_prompt(jd_text);
    let raw: ExtractedJob = llm
        .call_json(&prompt, &json_system(JD_EXTRACT_ROLE))
        .await
        .map_err(|e| AppError::Llm(format!("Skill extraction failed: {e}")))?;

    let job = clean_extracted_job(raw)?;
    info!(
        "Extracted {} required skills for '{}'",
        job.required_skills.len(),
        job.job_title
    );
    Ok(job)
}

/// Trims fields, drops incomplete or repeated skills, and rejects an empty list.
pub fn clean_extracted_job(raw: ExtractedJob) -> Result<ExtractedJob, AppError> {
    let received = raw.required_skills.len();
    let mut seen = HashSet::new();

    let required_skills: Vec<RequiredSkill> = raw
        .required_skills
        .into_iter()
        .map(|s| RequiredSkill {
            domain: s.domain.trim().to_string(),
            category: s.category.trim().to_string(),
            sub_category: s.sub_category.trim().to_string(),
            description: s.description.trim().to_string(),
        })
        .filter(|s| !s.domain.is_empty() && !s.category.is_empty() && !s.sub_category.is_empty())
        .filter(|s| seen.insert((s.domain.clone(), s.category.clone(), s.sub_category.clone())))
        .collect();

    if required_skills.len() < received {
        warn!(
            "Dropped {} incomplete or repeated extracted skills",
            received - required_skills.len()
        );
    }
    if required_skills.is_empty() {
        return Err(AppError::UnprocessableEntity(
            "No skills could be extracted from the job description".to_string(),
        ));
    }

    Ok(ExtractedJob {
        job_title: raw.job_title.trim().to_string(),
        department: raw.department.trim().to_string(),
        required_skills,
    })
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::records::tests::required;

    #[test]
    fn test_llm_output_deserializes_with_missing_fields() {
        let json = r#"{
            "required_skills": [
                {"domain": "Data", "category": "Tools and Platforms", "sub_category": "Spark"}
            ]
        }"#;
        let job: ExtractedJob = serde_json::from_str(json).unwrap();
        assert_eq!(job.job_title, "");
        assert_eq!(job.required_skills[0].description, "");
    }

    #[test]
    fn test_clean_trims_and_drops_incomplete_and_repeated() {
        let raw = ExtractedJob {
            job_title: "  Data Engineer ".to_string(),
            department: String::new(),
            required_skills: vec![
                required(" Data ", "Eng", "SQL"),
                required("Data", "Eng", "SQL"),
                required("Data", "", "Spark"),
                required("Data", "Eng", "Airflow"),
            ],
        };

        let job = clean_extracted_job(raw).unwrap();

        assert_eq!(job.job_title, "Data Engineer");
        let names: Vec<_> = job
            .required_skills
            .iter()
            .map(|s| s.sub_category.as_str())
            .collect();
        assert_eq!(names, vec!["SQL", "Airflow"]);
        assert_eq!(job.required_skills[0].domain, "Data");
    }

    #[test]
    fn test_clean_rejects_empty_skill_list() {
        let err = clean_extracted_job(ExtractedJob::default()).unwrap_err();
        assert!(matches!(err, AppError::UnprocessableEntity(_)));
    }

    #[test]
    fn test_prompt_embeds_and_truncates_text() {
        let prompt = build_extraction_prompt("Needs SQL and Spark");
        assert!(prompt.contains("Needs SQL and Spark"));
        assert!(!prompt.contains("{jd_text}"));

        let long = "é".repeat(MAX_JD_CHARS + 50);
        let prompt = build_extraction_prompt(&long);
        assert_eq!(prompt.matches('é').count(), MAX_JD_CHARS);
    }

    #[tokio::test]
    async fn test_non_pdf_bytes_are_rejected() {
        let result = extract_pdf_text(Bytes::from_static(b"definitely not a pdf")).await;
        assert!(result.is_err());
    }
}
