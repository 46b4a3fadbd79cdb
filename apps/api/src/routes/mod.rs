pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::extraction::handlers as extraction;
use crate::matching::handlers as matching;
use crate::recommendations::handlers as recommendations;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Employees
        .route("/api/v1/employees", get(matching::handle_list_employees))
        .route(
            "/api/v1/employees/:id/profile",
            get(matching::handle_get_profile),
        )
        .route(
            "/api/v1/employees/:id/improvement-areas",
            get(matching::handle_improvement_areas),
        )
        .route(
            "/api/v1/employees/:id/mentors",
            get(matching::handle_find_mentors),
        )
        // Jobs
        .route(
            "/api/v1/jobs/extract-skills",
            post(extraction::handle_extract_skills),
        )
        .route(
            "/api/v1/jobs/extract-skills/text",
            post(extraction::handle_extract_skills_text),
        )
        .route("/api/v1/jobs/match", post(matching::handle_match_job))
        .route(
            "/api/v1/jobs/gap-analysis",
            post(matching::handle_gap_analysis),
        )
        // Recommendations
        .route(
            "/api/v1/recommendations/courses",
            post(recommendations::handle_recommend_courses),
        )
        .with_state(state)
}
