use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::matching::records::SkillRecord;

/// Count of skills per proficiency band.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelDistribution {
    pub beginner: usize,     // rating ≤ 2
    pub intermediate: usize, // 2 < rating < 4
    pub advanced: usize,     // rating ≥ 4
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub employee_name: Option<String>,
    pub total_skills: usize,
    pub domain_count: usize,
    pub average_skill_rating: f64,
    pub average_interest_rating: f64,
    pub level_distribution: LevelDistribution,
    pub top_skills: Vec<SkillRecord>,
    /// domain → category → sub-categories
    pub domains: BTreeMap<String, BTreeMap<String, Vec<String>>>,
}

/// Summarizes one employee's skills. An empty slice yields an all-zero summary.
pub fn summarize_profile(skills: &[SkillRecord], top_limit: usize) -> ProfileSummary {
    let mut domains: BTreeMap<String, BTreeMap<String, Vec<String>>> = BTreeMap::new();
    let mut levels = LevelDistribution::default();

    for skill in skills {
        domains
            .entry(skill.domain.clone())
            .or_default()
            .entry(skill.category.clone())
            .or_default()
            .push(skill.sub_category.clone());

        match skill.skill_rating {
            r if r <= 2.0 => levels.beginner += 1,
            r if r < 4.0 => levels.intermediate += 1,
            _ => levels.advanced += 1,
        }
    }

    let mut top_skills = skills.to_vec();
    top_skills.sort_by(|a, b| b.skill_rating.total_cmp(&a.skill_rating));
    top_skills.truncate(top_limit);

    ProfileSummary {
        employee_name: skills.first().map(|s| s.employee_name.clone()),
        total_skills: skills.len(),
        domain_count: domains.len(),
        average_skill_rating: average(skills.iter().map(|s| s.skill_rating)),
        average_interest_rating: average(skills.iter().map(|s| s.interest_rating)),
        level_distribution: levels,
        top_skills,
        domains,
    }
}

/// Mean rounded to one decimal; 0.0 for no values.
fn average(values: impl ExactSizeIterator<Item = f64>) -> f64 {
    let count = values.len();
    if count == 0 {
        return 0.0;
    }
    let mean = values.sum::<f64>() / count as f64;
    (mean * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::records::tests::record;
    use crate::matching::weights::TOP_SKILLS_LIMIT;

    #[test]
    fn test_empty_profile_is_zeroed() {
        let summary = summarize_profile(&[], TOP_SKILLS_LIMIT);
        assert_eq!(summary.total_skills, 0);
        assert_eq!(summary.average_skill_rating, 0.0);
        assert!(summary.top_skills.is_empty());
        assert!(summary.employee_name.is_none());
    }

    #[test]
    fn test_summary_counts_and_averages() {
        let skills = vec![
            record("E1", "Data", "Eng", "SQL", 4.0, 3.0),
            record("E1", "Data", "Eng", "Spark", 2.0, 5.0),
            record("E1", "Data", "Viz", "Tableau", 3.0, 4.0),
            record("E1", "Cloud", "Tools", "Azure", 5.0, 1.0),
        ];

        let summary = summarize_profile(&skills, TOP_SKILLS_LIMIT);

        assert_eq!(summary.total_skills, 4);
        assert_eq!(summary.domain_count, 2);
        assert_eq!(summary.average_skill_rating, 3.5);
        assert_eq!(summary.average_interest_rating, 3.3);
        assert_eq!(
            summary.level_distribution,
            LevelDistribution {
                beginner: 1,
                intermediate: 1,
                advanced: 2,
            }
        );
        assert_eq!(summary.domains["Data"]["Eng"], vec!["SQL", "Spark"]);
        assert_eq!(summary.employee_name.as_deref(), Some("Name of E1"));
    }

    #[test]
    fn test_top_skills_sorted_and_limited() {
        let skills = vec![
            record("E1", "D", "C", "A", 2.0, 3.0),
            record("E1", "D", "C", "B", 5.0, 3.0),
            record("E1", "D", "C", "C", 4.0, 3.0),
        ];

        let summary = summarize_profile(&skills, 2);

        let names: Vec<_> = summary
            .top_skills
            .iter()
            .map(|s| s.sub_category.as_str())
            .collect();
        assert_eq!(names, vec!["B", "C"]);
    }
}
