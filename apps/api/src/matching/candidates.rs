//! Candidate matching: ranks employees against the required skills of a job.
//!
//! Algorithm:
//! 1. Group the population by employee.
//! 2. For each required skill, look up the employee's record with the exact
//!    (domain, category, sub-category) tuple:
//!    - found, rating ≥ min → matched (confidence 1.0)
//!    - found below min, or not found → sub-category listed as missing
//! 3. overall_match = matched / required × 100 (unrounded)
//! 4. Drop employees with no matches unless `include_unmatched` is set.
//! 5. Sort by overall_match descending, keep the top `max_results`.

use serde::{Deserialize, Serialize};

use crate::matching::records::{
    find_skill, group_by_employee, EmployeeSkills, RequiredSkill, SkillRecord,
};
use crate::matching::tier::MatchTier;
use crate::matching::weights::{
    ScoringConfig, DEFAULT_MIN_SKILL_RATING, EXACT_MATCH_CONFIDENCE, MAX_CANDIDATES,
};

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

/// A required skill the employee holds at or above the minimum rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedSkill {
    pub sub_category: String,
    pub skill_rating: f64,
    pub interest_rating: f64,
    pub match_confidence: f64, // 0.0 – 1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeMatchResult {
    pub employee_id: String,
    pub employee_name: String,
    pub matched_skills: Vec<MatchedSkill>,
    pub missing_skills: Vec<String>,
    pub overall_match: f64, // 0 – 100, unrounded
    pub tier: MatchTier,
}

impl EmployeeMatchResult {
    /// Percentage for display. Sorting always uses the unrounded value.
    pub fn rounded_match(&self) -> u32 {
        self.overall_match.round() as u32
    }
}

/// Knobs for one matching call.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOptions {
    pub min_skill_rating: f64,
    pub max_results: usize,
    /// Keep employees with zero matched skills, scored 0 and ranked last.
    pub include_unmatched: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            min_skill_rating: DEFAULT_MIN_SKILL_RATING,
            max_results: MAX_CANDIDATES,
            include_unmatched: false,
        }
    }
}

impl MatchOptions {
    pub fn from_config(config: &ScoringConfig) -> Self {
        Self {
            min_skill_rating: config.min_skill_rating,
            max_results: config.max_candidates,
            include_unmatched: false,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Per-skill classification
// ────────────────────────────────────────────────────────────────────────────

/// How one employee stands against one required skill.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SkillClassification<'a> {
    Matched(&'a SkillRecord),
    BelowThreshold(&'a SkillRecord),
    Missing,
}

/// Classifies a required skill against one employee's records.
pub fn classify_required_skill<'a>(
    skills: &[&'a SkillRecord],
    required: &RequiredSkill,
    min_skill_rating: f64,
) -> SkillClassification<'a> {
    match find_skill(skills, required.key()) {
        Some(found) if found.skill_rating >= min_skill_rating => {
            SkillClassification::Matched(found)
        }
        Some(found) => SkillClassification::BelowThreshold(found),
        None => SkillClassification::Missing,
    }
}

/// Share of required skills matched, as a percentage. Zero when nothing is required.
pub fn match_percentage(matched: usize, required: usize) -> f64 {
    if required == 0 {
        return 0.0;
    }
    (matched as f64 / required as f64 * 100.0).clamp(0.0, 100.0)
}

// ────────────────────────────────────────────────────────────────────────────
// Matching
// ────────────────────────────────────────────────────────────────────────────

/// Ranks employees of `population` against `required_skills`.
///
/// Duplicate required skills are evaluated independently and each counts in
/// the denominator.
pub fn match_employees(
    required_skills: &[RequiredSkill],
    population: &[SkillRecord],
    options: &MatchOptions,
) -> Vec<EmployeeMatchResult> {
    if required_skills.is_empty() || population.is_empty() {
        return Vec::new();
    }

    let mut results: Vec<EmployeeMatchResult> = group_by_employee(population)
        .iter()
        .filter_map(|employee| score_employee(employee, required_skills, options))
        .collect();

    // Stable: equal scores keep population order.
    results.sort_by(|a, b| b.overall_match.total_cmp(&a.overall_match));
    results.truncate(options.max_results);
    results
}

fn score_employee(
    employee: &EmployeeSkills<'_>,
    required_skills: &[RequiredSkill],
    options: &MatchOptions,
) -> Option<EmployeeMatchResult> {
    let mut matched_skills = Vec::new();
    let mut missing_skills = Vec::new();

    for required in required_skills {
        match classify_required_skill(&employee.skills, required, options.min_skill_rating) {
            SkillClassification::Matched(found) => matched_skills.push(MatchedSkill {
                sub_category: found.sub_category.clone(),
                skill_rating: found.skill_rating,
                interest_rating: found.interest_rating,
                match_confidence: EXACT_MATCH_CONFIDENCE,
            }),
            SkillClassification::BelowThreshold(_) | SkillClassification::Missing => {
                missing_skills.push(required.sub_category.clone())
            }
        }
    }

    if matched_skills.is_empty() && !options.include_unmatched {
        return None;
    }

    let overall_match = match_percentage(matched_skills.len(), required_skills.len());

    Some(EmployeeMatchResult {
        employee_id: employee.employee_id.to_string(),
        employee_name: employee.employee_name.to_string(),
        matched_skills,
        missing_skills,
        overall_match,
        tier: MatchTier::from_score(overall_match),
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
