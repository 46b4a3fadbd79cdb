//! Improvement opportunities: skills where an employee's interest outruns their skill.
//!
//! Ratings are converted to percentages, then
//! `score = interest% × 0.6 + gap × 0.3 + skill% × 0.1` with
//! `gap = max(0, interest% − skill%)`. Selection of weak skills lives in
//! `mentors::select_weak_skills`; this module only ranks.

use serde::{Deserialize, Serialize};

use crate::matching::records::{SkillRecord, MAX_RATING};
use crate::matching::weights::ImprovementWeights;

/// A skill record annotated with its improvement score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImprovementArea {
    #[serde(flatten)]
    pub skill: SkillRecord,
    pub skill_percent: f64,
    pub interest_percent: f64,
    pub gap: f64,
    pub improvement_score: f64,
}

/// Converts a 0–5 rating to a whole percentage.
pub fn to_percent(rating: f64) -> f64 {
    (rating / MAX_RATING * 100.0).round()
}

pub fn score_improvement(skill: &SkillRecord, weights: &ImprovementWeights) -> ImprovementArea {
    let skill_percent = to_percent(skill.skill_rating);
    let interest_percent = to_percent(skill.interest_rating);
    let gap = (interest_percent - skill_percent).max(0.0);
    let improvement_score =
        interest_percent * weights.interest + gap * weights.gap + skill_percent * weights.skill;

    ImprovementArea {
        skill: skill.clone(),
        skill_percent,
        interest_percent,
        gap,
        improvement_score,
    }
}

/// Ranks `skills` by improvement score, highest first, keeping at most `limit`.
pub fn rank_improvement_areas(
    skills: &[SkillRecord],
    limit: usize,
    weights: &ImprovementWeights,
) -> Vec<ImprovementArea> {
    let mut areas: Vec<ImprovementArea> = skills
        .iter()
        .map(|s| score_improvement(s, weights))
        .collect();
    areas.sort_by(|a, b| b.improvement_score.total_cmp(&a.improvement_score));
    areas.truncate(limit);
    areas
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::records::tests::record;
    use crate::matching::weights::IMPROVEMENT_LIMIT;

    fn weights() -> ImprovementWeights {
        ImprovementWeights::default()
    }

    #[test]
    fn test_low_skill_high_interest_scores_86() {
        let area = score_improvement(&record("E1", "D", "C", "Go", 1.0, 5.0), &weights());
        assert_eq!(area.skill_percent, 20.0);
        assert_eq!(area.interest_percent, 100.0);
        assert_eq!(area.gap, 80.0);
        // 100×0.6 + 80×0.3 + 20×0.1 = 60 + 24 + 2
        assert!((area.improvement_score - 86.0).abs() < 1e-9);
    }

    #[test]
    fn test_gap_is_floored_at_zero() {
        let area = score_improvement(&record("E1", "D", "C", "Go", 5.0, 1.0), &weights());
        assert_eq!(area.gap, 0.0);
        // 20×0.6 + 0 + 100×0.1
        assert!((area.improvement_score - 22.0).abs() < 1e-9);
    }

    #[test]
    fn test_percent_rounds_fractional_ratings() {
        assert_eq!(to_percent(3.3), 66.0);
        assert_eq!(to_percent(0.0), 0.0);
        assert_eq!(to_percent(5.0), 100.0);
    }

    #[test]
    fn test_ranking_respects_limit_and_order() {
        let skills: Vec<SkillRecord> = (0..15)
            .map(|i| {
                record(
                    "E1",
                    "D",
                    "C",
                    &format!("S{i}"),
                    (i % 6) as f64,
                    ((i * 7) % 6) as f64,
                )
            })
            .collect();

        let ranked = rank_improvement_areas(&skills, IMPROVEMENT_LIMIT, &weights());

        assert_eq!(ranked.len(), IMPROVEMENT_LIMIT);
        assert!(ranked
            .windows(2)
            .all(|w| w[0].improvement_score >= w[1].improvement_score));
    }

    #[test]
    fn test_ranking_with_fewer_skills_than_limit() {
        let skills = vec![
            record("E1", "D", "C", "Rust", 4.0, 4.0),
            record("E1", "D", "C", "Go", 1.0, 5.0),
        ];
        let ranked = rank_improvement_areas(&skills, 10, &weights());
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].skill.sub_category, "Go");
    }

    #[test]
    fn test_zero_limit_returns_empty() {
        let skills = vec![record("E1", "D", "C", "Go", 1.0, 5.0)];
        assert!(rank_improvement_areas(&skills, 0, &weights()).is_empty());
    }

    #[test]
    fn test_area_serializes_flat() {
        let area = score_improvement(&record("E1", "D", "C", "Go", 1.0, 5.0), &weights());
        let json = serde_json::to_value(&area).unwrap();
        assert_eq!(json["sub_category"], "Go");
        assert_eq!(json["gap"], 80.0);
    }
}
