use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::recommendations::courses::{recommend_courses, CourseRecommendation};
use crate::state::AppState;
use crate::store::{canonical_employee_id, load_employee};

#[derive(Debug, Deserialize)]
pub struct CourseRequest {
    pub employee_id: String,
    /// Skill to focus the catalogue fallback on.
    pub sub_category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CourseResponse {
    pub employee_id: String,
    pub employee_name: String,
    #[serde(flatten)]
    pub recommendation: CourseRecommendation,
}

/// POST /api/v1/recommendations/courses
pub async fn handle_recommend_courses(
    State(state): State<AppState>,
    Json(req): Json<CourseRequest>,
) -> Result<Json<CourseResponse>, AppError> {
    let skills = load_employee(state.store.as_ref(), &req.employee_id).await?;
    let employee_name = skills
        .first()
        .map(|s| s.employee_name.clone())
        .unwrap_or_default();

    let recommendation = recommend_courses(
        &employee_name,
        &skills,
        req.sub_category.as_deref(),
        state.llm.as_ref(),
    )
    .await;

    Ok(Json(CourseResponse {
        employee_id: canonical_employee_id(&req.employee_id),
        employee_name,
        recommendation,
    }))
}
