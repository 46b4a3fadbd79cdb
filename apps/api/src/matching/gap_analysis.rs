//! Skill-gap analysis of one employee against a job, plus the upskill plan it implies.
//!
//! Uses the same per-skill classifier as candidate matching, so an employee's
//! analysis and their row in the candidate ranking always agree.

use serde::{Deserialize, Serialize};

use crate::matching::candidates::{classify_required_skill, match_percentage, SkillClassification};
use crate::matching::records::{RequiredSkill, SkillRecord};
use crate::matching::tier::MatchTier;
use crate::matching::weights::EXACT_MATCH_CONFIDENCE;

/// A required skill the employee holds, with their ratings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessedSkill {
    pub domain: String,
    pub category: String,
    pub sub_category: String,
    pub skill_rating: f64,
    pub interest_rating: f64,
    pub match_confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGapAnalysis {
    pub overall_match: f64, // 0 – 100
    pub tier: MatchTier,
    pub min_skill_rating: f64,
    pub strong_skills: Vec<AssessedSkill>,   // rating ≥ min
    pub weak_skills: Vec<AssessedSkill>,     // held, rating < min
    pub missing_skills: Vec<RequiredSkill>,  // not held
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillPriority {
    High,
    Medium,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapKind {
    Weak,
    Missing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpskillItem {
    pub skill_name: String,
    pub domain: String,
    pub category: String,
    pub kind: GapKind,
    pub priority: SkillPriority,
    pub current_rating: Option<f64>,
    pub suggestion: String,
}

/// Partitions `required_skills` into strong, weak and missing for one employee.
pub fn analyze_skill_gap(
    required_skills: &[RequiredSkill],
    employee_skills: &[SkillRecord],
    min_skill_rating: f64,
) -> SkillGapAnalysis {
    let held: Vec<&SkillRecord> = employee_skills.iter().collect();

    let mut strong_skills = Vec::new();
    let mut weak_skills = Vec::new();
    let mut missing_skills = Vec::new();

    for required in required_skills {
        match classify_required_skill(&held, required, min_skill_rating) {
            SkillClassification::Matched(found) => strong_skills.push(assess(found)),
            SkillClassification::BelowThreshold(found) => weak_skills.push(assess(found)),
            SkillClassification::Missing => missing_skills.push(required.clone()),
        }
    }

    let overall_match = match_percentage(strong_skills.len(), required_skills.len());

    SkillGapAnalysis {
        overall_match,
        tier: MatchTier::from_score(overall_match),
        min_skill_rating,
        strong_skills,
        weak_skills,
        missing_skills,
    }
}

fn assess(record: &SkillRecord) -> AssessedSkill {
    AssessedSkill {
        domain: record.domain.clone(),
        category: record.category.clone(),
        sub_category: record.sub_category.clone(),
        skill_rating: record.skill_rating,
        interest_rating: record.interest_rating,
        match_confidence: EXACT_MATCH_CONFIDENCE,
    }
}

/// Turns an analysis into a prioritized upskill list.
///
/// Missing skills and anything named in `critical_skills` are high priority;
/// other weak skills are medium. High comes first, then alphabetical.
pub fn build_upskill_plan(
    analysis: &SkillGapAnalysis,
    critical_skills: &[String],
) -> Vec<UpskillItem> {
    let is_critical = |name: &str| critical_skills.iter().any(|c| c == name);

    let weak = analysis.weak_skills.iter().map(|s| UpskillItem {
        skill_name: s.sub_category.clone(),
        domain: s.domain.clone(),
        category: s.category.clone(),
        kind: GapKind::Weak,
        priority: if is_critical(&s.sub_category) {
            SkillPriority::High
        } else {
            SkillPriority::Medium
        },
        current_rating: Some(s.skill_rating),
        suggestion: format!(
            "Improve your {} skills to reach at least rating {}.",
            s.sub_category.to_lowercase(),
            analysis.min_skill_rating
        ),
    });

    let missing = analysis.missing_skills.iter().map(|s| UpskillItem {
        skill_name: s.sub_category.clone(),
        domain: s.domain.clone(),
        category: s.category.clone(),
        kind: GapKind::Missing,
        priority: SkillPriority::High,
        current_rating: None,
        suggestion: format!(
            "Consider learning {} to improve job match.",
            s.sub_category.to_lowercase()
        ),
    });

    let mut plan: Vec<UpskillItem> = weak.chain(missing).collect();
    plan.sort_by(|a, b| {
        a.priority
            .cmp(&b.priority)
            .then_with(|| a.skill_name.cmp(&b.skill_name))
    });
    plan
}
