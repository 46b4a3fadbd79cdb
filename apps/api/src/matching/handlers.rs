use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::candidates::{match_employees, EmployeeMatchResult, MatchOptions};
use crate::matching::gap_analysis::{
    analyze_skill_gap, build_upskill_plan, SkillGapAnalysis, UpskillItem,
};
use crate::matching::improvement::{rank_improvement_areas, ImprovementArea};
use crate::matching::mentors::{find_top_mentors, select_weak_skills, MentorMatch, MentorSearch};
use crate::matching::profile::{summarize_profile, ProfileSummary};
use crate::matching::records::{
    group_by_employee, records_for_employee, NormalizationReport, RequiredSkill, SkillRecord,
};
use crate::matching::weights::TOP_SKILLS_LIMIT;
use crate::state::AppState;
use crate::store::{canonical_employee_id, load_employee, load_snapshot};

/// UI rating controls are whole numbers on a 1–5 scale.
fn validate_rating(field: &str, value: u8) -> Result<f64, AppError> {
    if (1..=5).contains(&value) {
        Ok(f64::from(value))
    } else {
        Err(AppError::Validation(format!(
            "{field} must be between 1 and 5, got {value}"
        )))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Employees
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct EmployeeEntry {
    pub employee_id: String,
    pub employee_name: String,
    pub skill_count: usize,
}

#[derive(Debug, Serialize)]
pub struct EmployeeListResponse {
    pub employees: Vec<EmployeeEntry>,
    pub population_size: usize,
    pub report: NormalizationReport,
    pub loaded_at: DateTime<Utc>,
}

/// GET /api/v1/employees
pub async fn handle_list_employees(
    State(state): State<AppState>,
) -> Result<Json<EmployeeListResponse>, AppError> {
    let snapshot = load_snapshot(state.store.as_ref()).await?;

    let employees = group_by_employee(&snapshot.records)
        .into_iter()
        .map(|e| EmployeeEntry {
            employee_id: e.employee_id.to_string(),
            employee_name: e.employee_name.to_string(),
            skill_count: e.skills.len(),
        })
        .collect();

    Ok(Json(EmployeeListResponse {
        employees,
        population_size: snapshot.records.len(),
        report: snapshot.report,
        loaded_at: snapshot.loaded_at,
    }))
}

/// GET /api/v1/employees/:id/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> Result<Json<ProfileSummary>, AppError> {
    let skills = load_employee(state.store.as_ref(), &employee_id).await?;
    Ok(Json(summarize_profile(&skills, TOP_SKILLS_LIMIT)))
}

#[derive(Debug, Deserialize)]
pub struct ImprovementQuery {
    pub limit: Option<usize>,
    /// Rank only skills that pass the weak-skill filter. Defaults to false,
    /// which ranks every skill the employee holds.
    pub weak_only: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct ImprovementResponse {
    pub employee_id: String,
    pub areas: Vec<ImprovementArea>,
}

/// GET /api/v1/employees/:id/improvement-areas
pub async fn handle_improvement_areas(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    Query(params): Query<ImprovementQuery>,
) -> Result<Json<ImprovementResponse>, AppError> {
    let scoring = &state.config.scoring;
    let skills = load_employee(state.store.as_ref(), &employee_id).await?;

    let candidates: Vec<SkillRecord> = if params.weak_only.unwrap_or(false) {
        select_weak_skills(&skills, &scoring.weak_skill)
            .into_iter()
            .cloned()
            .collect()
    } else {
        skills
    };

    let limit = params.limit.unwrap_or(scoring.improvement_limit);
    let areas = rank_improvement_areas(&candidates, limit, &scoring.improvement_weights);

    Ok(Json(ImprovementResponse {
        employee_id: canonical_employee_id(&employee_id),
        areas,
    }))
}

#[derive(Debug, Deserialize)]
pub struct MentorQuery {
    pub threshold: Option<u8>,
    pub max: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct MentorResponse {
    pub employee_id: String,
    pub weak_skill_count: usize,
    pub mentors: Vec<MentorMatch>,
}

/// GET /api/v1/employees/:id/mentors
pub async fn handle_find_mentors(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    Query(params): Query<MentorQuery>,
) -> Result<Json<MentorResponse>, AppError> {
    let mut search = MentorSearch::from_config(&state.config.scoring);
    if let Some(threshold) = params.threshold {
        search.mentor_skill_threshold = validate_rating("threshold", threshold)?;
    }
    if let Some(max) = params.max {
        search.max_recommendations = max;
    }

    let employee_id = canonical_employee_id(&employee_id);
    let snapshot = load_snapshot(state.store.as_ref()).await?;
    let skills = records_for_employee(&snapshot.records, &employee_id);
    if skills.is_empty() {
        return Err(AppError::NotFound(format!(
            "No skills recorded for employee '{employee_id}'"
        )));
    }

    let weak_skill_count = select_weak_skills(&skills, &search.weak_skill).len();
    let mentors = find_top_mentors(&skills, &snapshot.records, &employee_id, &search);

    Ok(Json(MentorResponse {
        employee_id,
        weak_skill_count,
        mentors,
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Jobs
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub required_skills: Vec<RequiredSkill>,
    pub min_skill_rating: Option<u8>,
    #[serde(default)]
    pub include_unmatched: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchOutcome {
    /// The store returned no usable records.
    NoData,
    /// Records exist but nobody matched.
    NoMatches,
    Matched,
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub match_id: Uuid,
    pub outcome: MatchOutcome,
    pub population_size: usize,
    pub skipped_records: usize,
    pub matches: Vec<EmployeeMatchResult>,
}

/// POST /api/v1/jobs/match
pub async fn handle_match_job(
    State(state): State<AppState>,
    Json(req): Json<MatchRequest>,
) -> Result<Json<MatchResponse>, AppError> {
    let mut options = MatchOptions::from_config(&state.config.scoring);
    if let Some(min) = req.min_skill_rating {
        options.min_skill_rating = validate_rating("min_skill_rating", min)?;
    }
    options.include_unmatched = req.include_unmatched;

    let snapshot = load_snapshot(state.store.as_ref()).await?;
    let matches = match_employees(&req.required_skills, &snapshot.records, &options);

    let outcome = if snapshot.records.is_empty() {
        MatchOutcome::NoData
    } else if matches.iter().all(|m| m.matched_skills.is_empty()) {
        MatchOutcome::NoMatches
    } else {
        MatchOutcome::Matched
    };

    let match_id = Uuid::new_v4();
    info!(
        "Job match {match_id}: {} required skills, {} records, {} results ({:?})",
        req.required_skills.len(),
        snapshot.records.len(),
        matches.len(),
        outcome
    );
    if let Some(top) = matches.first() {
        debug!(
            "Top candidate for {match_id}: {} at {}% ({})",
            top.employee_name,
            top.rounded_match(),
            top.tier.label()
        );
    }

    Ok(Json(MatchResponse {
        match_id,
        outcome,
        population_size: snapshot.records.len(),
        skipped_records: snapshot.report.skipped(),
        matches,
    }))
}

#[derive(Debug, Deserialize)]
pub struct GapAnalysisRequest {
    pub employee_id: String,
    pub required_skills: Vec<RequiredSkill>,
    pub min_skill_rating: Option<u8>,
    /// Sub-categories that are high priority even when only weak.
    #[serde(default)]
    pub critical_skills: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct GapAnalysisResponse {
    pub employee_id: String,
    pub analysis: SkillGapAnalysis,
    pub upskill_plan: Vec<UpskillItem>,
}

/// POST /api/v1/jobs/gap-analysis
pub async fn handle_gap_analysis(
    State(state): State<AppState>,
    Json(req): Json<GapAnalysisRequest>,
) -> Result<Json<GapAnalysisResponse>, AppError> {
    let min_skill_rating = match req.min_skill_rating {
        Some(min) => validate_rating("min_skill_rating", min)?,
        None => state.config.scoring.min_skill_rating,
    };

    let skills = load_employee(state.store.as_ref(), &req.employee_id).await?;
    let analysis = analyze_skill_gap(&req.required_skills, &skills, min_skill_rating);
    let upskill_plan = build_upskill_plan(&analysis, &req.critical_skills);

    Ok(Json(GapAnalysisResponse {
        employee_id: canonical_employee_id(&req.employee_id),
        analysis,
        upskill_plan,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rating_bounds() {
        assert_eq!(validate_rating("min", 1).unwrap(), 1.0);
        assert_eq!(validate_rating("min", 5).unwrap(), 5.0);
        assert!(matches!(validate_rating("min", 0), Err(AppError::Validation(_))));
        assert!(matches!(validate_rating("min", 6), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_match_request_defaults() {
        let req: MatchRequest = serde_json::from_str(
            r#"{"required_skills":[{"Domain":"Data","Category":"Eng","Sub-category":"SQL"}]}"#,
        )
        .unwrap();
        assert!(!req.include_unmatched);
        assert!(req.min_skill_rating.is_none());
        assert_eq!(req.required_skills[0].sub_category, "SQL");
    }
}
