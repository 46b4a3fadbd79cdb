//! Course recommender.
//!
//! The prompt lists skills rated below 3 and skills whose interest is above 3
//! and above the skill rating. Without an LLM, on LLM failure, or when the LLM
//! returns no courses, a static catalogue keyed by domain is used instead.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::llm_client::prompts::json_system;
use crate::llm_client::LlmClient;
use crate::matching::improvement::rank_improvement_areas;
use crate::matching::records::SkillRecord;
use crate::matching::weights::ImprovementWeights;
use crate::recommendations::prompts::{COURSE_ADVISOR_ROLE, COURSE_PROMPT_TEMPLATE};

/// Skills rated strictly below this are listed as weak in the prompt.
const PROMPT_WEAK_BELOW: f64 = 3.0;
/// Skills with interest strictly above this (and above the skill) are listed as interests.
const PROMPT_INTEREST_ABOVE: f64 = 3.0;
const MAX_COURSES: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub title: String,
    pub platform: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationSource {
    Llm,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseRecommendation {
    pub bio: String,
    pub courses: Vec<Course>,
    pub source: RecommendationSource,
}

#[derive(Debug, Deserialize)]
struct LlmCourseOutput {
    #[serde(default)]
    bio: String,
    #[serde(default)]
    courses: Vec<Course>,
}

// ────────────────────────────────────────────────────────────────────────────
// Fallback catalogue
// ────────────────────────────────────────────────────────────────────────────

type CatalogueEntry = (&'static str, &'static str, &'static str);

const DEFAULT_CATALOGUE_DOMAIN: &str = "Engineering";

/// Checked in order; the first key contained in the employee's domain wins.
const CATALOGUE: [(&str, [CatalogueEntry; 3]); 4] = [
    (
        "Engineering",
        [
            (
                "Advanced Software Architecture",
                "Coursera",
                "Learn design patterns and architecture principles.",
            ),
            (
                "Full Stack Development",
                "Udemy",
                "Build complete web applications from front to back end.",
            ),
            (
                "Cloud Native Applications",
                "LinkedIn Learning",
                "Deploy applications using modern cloud practices.",
            ),
        ],
    ),
    (
        "Data Science",
        [
            (
                "Machine Learning Fundamentals",
                "Coursera",
                "From algorithms to implementation in Python.",
            ),
            (
                "Advanced Data Analysis",
                "edX",
                "Statistical methods for complex datasets.",
            ),
            (
                "Big Data Processing",
                "Udemy",
                "Work with Spark and distributed computing.",
            ),
        ],
    ),
    (
        "Design",
        [
            (
                "UX Research Methods",
                "Coursera",
                "Learn to conduct effective user research.",
            ),
            (
                "UI Design Principles",
                "Udemy",
                "Create beautiful and functional interfaces.",
            ),
            (
                "Design Systems at Scale",
                "LinkedIn Learning",
                "Build and maintain design systems for organizations.",
            ),
        ],
    ),
    (
        "Management",
        [
            (
                "Agile Leadership",
                "Coursera",
                "Lead teams using agile methodologies.",
            ),
            (
                "Project Management Professional",
                "Udemy",
                "Prepare for PMP certification.",
            ),
            (
                "Team Building Strategies",
                "LinkedIn Learning",
                "Create high-performing cohesive teams.",
            ),
        ],
    ),
];

/// Picks the catalogue domain for a free-form domain name. Defaults to Engineering.
pub fn catalogue_domain(domain: &str) -> &'static str {
    let domain = domain.to_lowercase();
    CATALOGUE
        .iter()
        .map(|(key, _)| *key)
        .find(|key| domain.contains(&key.to_lowercase()))
        .unwrap_or(DEFAULT_CATALOGUE_DOMAIN)
}

pub fn catalogue_courses(domain: &str) -> Vec<Course> {
    let key = catalogue_domain(domain);
    CATALOGUE
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, entries)| {
            entries
                .iter()
                .map(|(title, platform, description)| Course {
                    title: title.to_string(),
                    platform: platform.to_string(),
                    description: description.to_string(),
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Catalogue-based recommendation focused on one domain and skill.
pub fn fallback_recommendation(
    employee_name: &str,
    domain: &str,
    sub_category: &str,
) -> CourseRecommendation {
    CourseRecommendation {
        bio: format!(
            "{employee_name} shows potential for growth in {domain}, \
             particularly in {sub_category}. With targeted learning, \
             they could develop expertise in this area."
        ),
        courses: catalogue_courses(domain),
        source: RecommendationSource::Fallback,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Recommendation
// ────────────────────────────────────────────────────────────────────────────

pub fn build_course_prompt(employee_name: &str, skills: &[SkillRecord]) -> String {
    let domains: BTreeSet<&str> = skills.iter().map(|s| s.domain.as_str()).collect();

    let weak: Vec<String> = skills
        .iter()
        .filter(|s| s.skill_rating < PROMPT_WEAK_BELOW)
        .map(|s| format!("{} (Rated {}/5)", s.sub_category, s.skill_rating))
        .collect();

    let interests: Vec<String> = skills
        .iter()
        .filter(|s| s.interest_rating > PROMPT_INTEREST_ABOVE && s.skill_rating < s.interest_rating)
        .map(|s| format!("{} (Interest {}/5)", s.sub_category, s.interest_rating))
        .collect();

    COURSE_PROMPT_TEMPLATE
        .replace("{employee_name}", employee_name)
        .replace("{domains}", &join_or_none(domains.into_iter()))
        .replace("{weak_skills}", &join_or_none(weak.iter().map(String::as_str)))
        .replace("{interest_skills}", &join_or_none(interests.iter().map(String::as_str)))
}

fn join_or_none<'a>(items: impl Iterator<Item = &'a str>) -> String {
    let joined = items.collect::<Vec<_>>().join(", ");
    if joined.is_empty() {
        "None".to_string()
    } else {
        joined
    }
}

/// The skill the fallback bio and catalogue focus on: the requested sub-category
/// when the employee holds it, else their top improvement area.
fn focus_skill<'a>(
    skills: &'a [SkillRecord],
    sub_category: Option<&str>,
) -> Option<&'a SkillRecord> {
    if let Some(wanted) = sub_category {
        if let Some(found) = skills.iter().find(|s| s.sub_category == wanted) {
            return Some(found);
        }
    }
    let top = rank_improvement_areas(skills, 1, &ImprovementWeights::default())
        .into_iter()
        .next()?;
    skills.iter().find(|s| **s == top.skill)
}

/// Recommends courses for one employee. Never fails: any LLM problem degrades
/// to the catalogue.
pub async fn recommend_courses(
    employee_name: &str,
    skills: &[SkillRecord],
    sub_category: Option<&str>,
    llm: Option<&LlmClient>,
) -> CourseRecommendation {
    let focus = focus_skill(skills, sub_category);
    let fallback = || {
        let domain = focus.map(|s| s.domain.as_str()).unwrap_or(DEFAULT_CATALOGUE_DOMAIN);
        let skill = focus
            .map(|s| s.sub_category.as_str())
            .or(sub_category)
            .unwrap_or("General Skills");
        fallback_recommendation(employee_name, domain, skill)
    };

    let Some(llm) = llm else {
        return fallback();
    };

    let prompt = build_course_prompt(employee_name, skills);
    match llm
        .call_json::<LlmCourseOutput>(&prompt, &json_system(COURSE_ADVISOR_ROLE))
        .await
    {
        Ok(output) => accept_llm_output(output).unwrap_or_else(|| {
            warn!("LLM returned no usable courses for {employee_name}, using catalogue");
            fallback()
        }),
        Err(e) => {
            warn!("Course recommendation LLM call failed: {e}; using catalogue");
            fallback()
        }
    }
}

fn accept_llm_output(output: LlmCourseOutput) -> Option<CourseRecommendation> {
    let mut courses: Vec<Course> = output
        .courses
        .into_iter()
        .filter(|c| !c.title.trim().is_empty())
        .collect();
    if courses.is_empty() {
        return None;
    }
    courses.truncate(MAX_COURSES);
    Some(CourseRecommendation {
        bio: output.bio.trim().to_string(),
        courses,
        source: RecommendationSource::Llm,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::records::tests::record;

    fn course(title: &str) -> Course {
        Course {
            title: title.to_string(),
            platform: "Udemy".to_string(),
            description: String::new(),
        }
    }

    #[test]
    fn test_catalogue_domain_by_keyword() {
        assert_eq!(catalogue_domain("Data Science & Analytics"), "Data Science");
        assert_eq!(catalogue_domain("product design"), "Design");
        assert_eq!(catalogue_domain("Project Management"), "Management");
        assert_eq!(catalogue_domain("Marketing"), "Engineering");
    }

    #[test]
    fn test_fallback_uses_domain_catalogue() {
        let rec = fallback_recommendation("Asha", "Data Science", "Spark");
        assert_eq!(rec.source, RecommendationSource::Fallback);
        assert_eq!(rec.courses.len(), 3);
        assert_eq!(rec.courses[0].title, "Machine Learning Fundamentals");
        assert!(rec.bio.contains("particularly in Spark"));
    }

    #[test]
    fn test_prompt_lists_weak_and_interest_skills() {
        let skills = vec![
            record("E1", "Data", "Eng", "SQL", 4.0, 5.0),
            record("E1", "Cloud", "Tools", "Azure", 2.0, 2.0),
            record("E1", "Data", "Eng", "Spark", 3.0, 3.0),
        ];

        let prompt = build_course_prompt("Asha", &skills);

        assert!(prompt.contains("Domains: Cloud, Data"));
        assert!(prompt.contains("Weak skills: Azure (Rated 2/5)"));
        assert!(prompt.contains("High interest areas: SQL (Interest 5/5)"));
        assert!(!prompt.contains("{employee_name}"));
    }

    #[test]
    fn test_prompt_says_none_when_nothing_qualifies() {
        let skills = vec![record("E1", "Data", "Eng", "SQL", 4.0, 3.0)];
        let prompt = build_course_prompt("Asha", &skills);
        assert!(prompt.contains("Weak skills: None"));
        assert!(prompt.contains("High interest areas: None"));
    }

    #[test]
    fn test_focus_prefers_requested_skill() {
        let skills = vec![
            record("E1", "Design", "UX", "Figma", 1.0, 5.0),
            record("E1", "Data Science", "ML", "PyTorch", 3.0, 3.0),
        ];
        assert_eq!(focus_skill(&skills, Some("PyTorch")).unwrap().sub_category, "PyTorch");
        assert_eq!(focus_skill(&skills, Some("Cobol")).unwrap().sub_category, "Figma");
        assert!(focus_skill(&[], None).is_none());
    }

    #[tokio::test]
    async fn test_recommend_without_llm_falls_back_to_focus_domain() {
        let skills = vec![record("E1", "Design", "UX", "Figma", 1.0, 5.0)];

        let rec = recommend_courses("Asha", &skills, None, None).await;

        assert_eq!(rec.source, RecommendationSource::Fallback);
        assert_eq!(rec.courses[0].title, "UX Research Methods");
        assert!(rec.bio.contains("Figma"));
    }

    #[test]
    fn test_llm_output_without_courses_is_rejected() {
        let output = LlmCourseOutput {
            bio: "bio".to_string(),
            courses: vec![course("  ")],
        };
        assert!(accept_llm_output(output).is_none());
    }

    #[test]
    fn test_llm_output_is_capped() {
        let output = LlmCourseOutput {
            bio: " A bio. ".to_string(),
            courses: (0..8).map(|i| course(&format!("Course {i}"))).collect(),
        };
        let rec = accept_llm_output(output).unwrap();
        assert_eq!(rec.courses.len(), MAX_COURSES);
        assert_eq!(rec.bio, "A bio.");
        assert_eq!(rec.source, RecommendationSource::Llm);
    }
}
