//! Named thresholds and weights for every scorer in `matching`.
//!
//! Scoring functions take these as parameters; nothing in the scorers hardcodes
//! a threshold, so tuning happens here or through `Config`.

use serde::{Deserialize, Serialize};

use crate::matching::records::SkillRecord;

/// Minimum rating a found skill needs to count as matched for a job.
pub const DEFAULT_MIN_SKILL_RATING: f64 = 3.0;
/// Candidates returned by job matching.
pub const MAX_CANDIDATES: usize = 10;
/// Confidence assigned to an exact taxonomy match.
pub const EXACT_MATCH_CONFIDENCE: f64 = 1.0;

/// A skill is "weak" at or below this rating...
pub const WEAK_SKILL_MAX_RATING: f64 = 3.0;
/// ...provided the employee's interest is at least this high.
pub const WEAK_SKILL_MIN_INTEREST: f64 = 3.0;

/// Minimum rating for a colleague to mentor a skill.
pub const MENTOR_SKILL_THRESHOLD: f64 = 4.0;
pub const MAX_MENTOR_RECOMMENDATIONS: usize = 3;

/// Improvement areas returned per employee.
pub const IMPROVEMENT_LIMIT: usize = 10;

/// Skills shown in a profile's top list.
pub const TOP_SKILLS_LIMIT: usize = 10;

/// Weights of the mentor match score:
/// `mentor_rating × mentor + rating_gap × (mentor − mentee) + mentee_interest × interest`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MentorWeights {
    pub mentor_rating: f64,
    pub rating_gap: f64,
    pub mentee_interest: f64,
}

impl Default for MentorWeights {
    fn default() -> Self {
        Self {
            mentor_rating: 0.5,
            rating_gap: 0.3,
            mentee_interest: 0.2,
        }
    }
}

/// Weights of the improvement score, applied to percentages.
/// Interest dominates; the skill term keeps zero-foundation areas from ranking first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImprovementWeights {
    pub interest: f64,
    pub gap: f64,
    pub skill: f64,
}

impl Default for ImprovementWeights {
    fn default() -> Self {
        Self {
            interest: 0.6,
            gap: 0.3,
            skill: 0.1,
        }
    }
}

/// Selection filter for skills an employee wants to grow but has not mastered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeakSkillCriteria {
    pub max_skill_rating: f64,
    pub min_interest_rating: f64,
}

impl Default for WeakSkillCriteria {
    fn default() -> Self {
        Self {
            max_skill_rating: WEAK_SKILL_MAX_RATING,
            min_interest_rating: WEAK_SKILL_MIN_INTEREST,
        }
    }
}

impl WeakSkillCriteria {
    pub fn matches(&self, record: &SkillRecord) -> bool {
        record.skill_rating <= self.max_skill_rating
            && record.interest_rating >= self.min_interest_rating
    }
}

/// Every tunable used by the scorers, carried in `Config`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub min_skill_rating: f64,
    pub max_candidates: usize,
    pub mentor_skill_threshold: f64,
    pub max_mentor_recommendations: usize,
    pub improvement_limit: usize,
    pub weak_skill: WeakSkillCriteria,
    pub mentor_weights: MentorWeights,
    pub improvement_weights: ImprovementWeights,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            min_skill_rating: DEFAULT_MIN_SKILL_RATING,
            max_candidates: MAX_CANDIDATES,
            mentor_skill_threshold: MENTOR_SKILL_THRESHOLD,
            max_mentor_recommendations: MAX_MENTOR_RECOMMENDATIONS,
            improvement_limit: IMPROVEMENT_LIMIT,
            weak_skill: WeakSkillCriteria::default(),
            mentor_weights: MentorWeights::default(),
            improvement_weights: ImprovementWeights::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::records::tests::record;

    #[test]
    fn test_mentor_weights_sum_to_one() {
        let w = MentorWeights::default();
        assert!((w.mentor_rating + w.rating_gap + w.mentee_interest - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_improvement_weights_sum_to_one() {
        let w = ImprovementWeights::default();
        assert!((w.interest + w.gap + w.skill - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_weak_skill_boundaries_are_inclusive() {
        let criteria = WeakSkillCriteria::default();
        assert!(criteria.matches(&record("E1", "D", "C", "S", 3.0, 3.0)));
        assert!(!criteria.matches(&record("E1", "D", "C", "S", 3.5, 5.0)));
        assert!(!criteria.matches(&record("E1", "D", "C", "S", 1.0, 2.0)));
    }
}
