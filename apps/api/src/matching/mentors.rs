//! Mentor matching: pairs an employee's weak skills with colleagues who excel at them.
//!
//! A weak skill is one the employee rates low but wants to grow
//! (`WeakSkillCriteria`). Every colleague holding the same taxonomy tuple at or
//! above the mentor threshold is a candidate; candidates across all weak skills
//! are ranked together by `match_score`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::matching::records::{group_by_employee, SkillKey, SkillRecord};
use crate::matching::weights::{
    MentorWeights, ScoringConfig, WeakSkillCriteria, MAX_MENTOR_RECOMMENDATIONS,
    MENTOR_SKILL_THRESHOLD,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MentorMatch {
    pub mentor_id: String,
    pub mentor_name: String,
    pub skill_name: String,
    pub domain: String,
    pub category: String,
    pub mentor_skill_rating: f64,
    pub mentee_skill_rating: f64,
    pub mentee_interest_rating: f64,
    pub match_score: f64,
}

/// Parameters of one mentor search.
#[derive(Debug, Clone, PartialEq)]
pub struct MentorSearch {
    pub mentor_skill_threshold: f64,
    pub max_recommendations: usize,
    pub weak_skill: WeakSkillCriteria,
    pub weights: MentorWeights,
}

impl Default for MentorSearch {
    fn default() -> Self {
        Self {
            mentor_skill_threshold: MENTOR_SKILL_THRESHOLD,
            max_recommendations: MAX_MENTOR_RECOMMENDATIONS,
            weak_skill: WeakSkillCriteria::default(),
            weights: MentorWeights::default(),
        }
    }
}

impl MentorSearch {
    pub fn from_config(config: &ScoringConfig) -> Self {
        Self {
            mentor_skill_threshold: config.mentor_skill_threshold,
            max_recommendations: config.max_mentor_recommendations,
            weak_skill: config.weak_skill,
            weights: config.mentor_weights,
        }
    }
}

/// Selects the skills worth mentoring, weakest first; ties go to higher interest.
pub fn select_weak_skills<'a>(
    skills: &'a [SkillRecord],
    criteria: &WeakSkillCriteria,
) -> Vec<&'a SkillRecord> {
    let mut weak: Vec<&SkillRecord> = skills.iter().filter(|s| criteria.matches(s)).collect();
    weak.sort_by(|a, b| {
        a.skill_rating
            .total_cmp(&b.skill_rating)
            .then(b.interest_rating.total_cmp(&a.interest_rating))
    });
    weak
}

/// `mentor × w1 + (mentor − mentee) × w2 + mentee_interest × w3`
pub fn mentor_match_score(
    mentor: &SkillRecord,
    mentee: &SkillRecord,
    weights: &MentorWeights,
) -> f64 {
    mentor.skill_rating * weights.mentor_rating
        + (mentor.skill_rating - mentee.skill_rating) * weights.rating_gap
        + mentee.interest_rating * weights.mentee_interest
}

/// Finds the best mentors in `population` for `employee_id`'s weak skills.
/// The employee never appears as their own mentor.
pub fn find_top_mentors(
    employee_skills: &[SkillRecord],
    population: &[SkillRecord],
    employee_id: &str,
    search: &MentorSearch,
) -> Vec<MentorMatch> {
    let weak_skills = select_weak_skills(employee_skills, &search.weak_skill);
    if weak_skills.is_empty() || search.max_recommendations == 0 {
        return Vec::new();
    }

    // Index qualified mentor records by taxonomy tuple once, in employee order.
    let mut experts: HashMap<SkillKey<'_>, Vec<&SkillRecord>> = HashMap::new();
    for colleague in group_by_employee(population) {
        if colleague.employee_id == employee_id {
            continue;
        }
        for skill in colleague.skills {
            if skill.skill_rating >= search.mentor_skill_threshold {
                experts.entry(skill.key()).or_default().push(skill);
            }
        }
    }

    let mut matches: Vec<MentorMatch> = weak_skills
        .iter()
        .flat_map(|weak| {
            experts
                .get(&weak.key())
                .into_iter()
                .flatten()
                .map(move |mentor| MentorMatch {
                    mentor_id: mentor.employee_id.clone(),
                    mentor_name: mentor.employee_name.clone(),
                    skill_name: weak.sub_category.clone(),
                    domain: weak.domain.clone(),
                    category: weak.category.clone(),
                    mentor_skill_rating: mentor.skill_rating,
                    mentee_skill_rating: weak.skill_rating,
                    mentee_interest_rating: weak.interest_rating,
                    match_score: mentor_match_score(mentor, weak, &search.weights),
                })
        })
        .collect();

    matches.sort_by(|a, b| b.match_score.total_cmp(&a.match_score));
    matches.truncate(search.max_recommendations);
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::records::records_for_employee;
    use crate::matching::records::tests::record;

    fn search() -> MentorSearch {
        MentorSearch::default()
    }

    #[test]
    fn test_select_weak_skills_orders_by_rating_then_interest() {
        let skills = vec![
            record("E1", "D", "C", "A", 3.0, 5.0),
            record("E1", "D", "C", "B", 1.0, 3.0),
            record("E1", "D", "C", "C", 1.0, 5.0),
            record("E1", "D", "C", "Strong", 5.0, 5.0),
            record("E1", "D", "C", "Bored", 1.0, 1.0),
        ];

        let weak = select_weak_skills(&skills, &WeakSkillCriteria::default());

        let names: Vec<_> = weak.iter().map(|s| s.sub_category.as_str()).collect();
        assert_eq!(names, vec!["C", "B", "A"]);
    }

    #[test]
    fn test_no_qualified_mentor_returns_empty() {
        let population = vec![
            record("E1", "X", "Y", "Z", 2.0, 4.0),
            record("E2", "X", "Y", "Z", 3.0, 4.0),
        ];
        let employee_skills = records_for_employee(&population, "E1");

        let mentors = find_top_mentors(&employee_skills, &population, "E1", &search());
        assert!(mentors.is_empty());
    }

    #[test]
    fn test_match_score_formula() {
        let population = vec![
            record("E1", "X", "Y", "Z", 2.0, 4.0),
            record("E2", "X", "Y", "Z", 5.0, 1.0),
        ];
        let employee_skills = records_for_employee(&population, "E1");

        let mentors = find_top_mentors(&employee_skills, &population, "E1", &search());

        assert_eq!(mentors.len(), 1);
        // 5×0.5 + (5−2)×0.3 + 4×0.2 = 2.5 + 0.9 + 0.8
        assert!((mentors[0].match_score - 4.2).abs() < 1e-9);
        assert_eq!(mentors[0].mentor_id, "E2");
        assert_eq!(mentors[0].skill_name, "Z");
        assert_eq!(mentors[0].mentor_skill_rating, 5.0);
    }

    #[test]
    fn test_target_employee_is_never_own_mentor() {
        // E1 holds the tuple at mentor level in the population but passes weak
        // records for it; the population copy must still be excluded.
        let population = vec![
            record("E1", "X", "Y", "Z", 5.0, 5.0),
            record("E2", "X", "Y", "Z", 4.0, 2.0),
        ];
        let employee_skills = vec![record("E1", "X", "Y", "Z", 1.0, 5.0)];

        let mentors = find_top_mentors(&employee_skills, &population, "E1", &search());

        assert!(!mentors.is_empty());
        assert!(mentors.iter().all(|m| m.mentor_id != "E1"));
    }

    #[test]
    fn test_mentors_ranked_across_weak_skills_and_truncated() {
        let population = vec![
            record("E1", "D", "C", "A", 1.0, 5.0),
            record("E1", "D", "C", "B", 3.0, 3.0),
            record("M1", "D", "C", "A", 4.0, 1.0),
            record("M2", "D", "C", "A", 5.0, 1.0),
            record("M3", "D", "C", "B", 5.0, 1.0),
            record("M4", "D", "C", "B", 4.0, 1.0),
        ];
        let employee_skills = records_for_employee(&population, "E1");

        let mentors = find_top_mentors(&employee_skills, &population, "E1", &search());

        assert_eq!(mentors.len(), MAX_MENTOR_RECOMMENDATIONS);
        // A: M2 = 2.5+1.2+1.0 = 4.7, M1 = 2.0+0.9+1.0 = 3.9
        // B: M3 = 2.5+0.6+0.6 = 3.7, M4 = 2.0+0.3+0.6 = 2.9
        let ids: Vec<_> = mentors.iter().map(|m| m.mentor_id.as_str()).collect();
        assert_eq!(ids, vec!["M2", "M1", "M3"]);
        assert!(mentors
            .windows(2)
            .all(|w| w[0].match_score >= w[1].match_score));
    }

    #[test]
    fn test_threshold_is_configurable() {
        let population = vec![
            record("E1", "X", "Y", "Z", 1.0, 4.0),
            record("E2", "X", "Y", "Z", 3.0, 1.0),
        ];
        let employee_skills = records_for_employee(&population, "E1");
        let relaxed = MentorSearch {
            mentor_skill_threshold: 3.0,
            ..MentorSearch::default()
        };

        assert!(find_top_mentors(&employee_skills, &population, "E1", &search()).is_empty());
        assert_eq!(
            find_top_mentors(&employee_skills, &population, "E1", &relaxed).len(),
            1
        );
    }

    #[test]
    fn test_no_weak_skills_returns_empty() {
        let population = vec![
            record("E1", "X", "Y", "Z", 5.0, 5.0),
            record("E2", "X", "Y", "Z", 5.0, 5.0),
        ];
        let employee_skills = records_for_employee(&population, "E1");
        assert!(find_top_mentors(&employee_skills, &population, "E1", &search()).is_empty());
    }
}
