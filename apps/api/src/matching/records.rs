//! Skill records: the normalized population every scorer operates on.
//!
//! Rows arrive from the store with nullable columns. `normalize_rows` turns them
//! into immutable `SkillRecord`s, skipping malformed rows and repeated
//! (employee, domain, category, sub-category) tuples, and reports what it skipped.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::skill::SkillRow;

/// Upper bound of both rating scales.
pub const MAX_RATING: f64 = 5.0;

// ────────────────────────────────────────────────────────────────────────────
// Data model
// ────────────────────────────────────────────────────────────────────────────

/// A single self-assessed skill of one employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRecord {
    pub employee_id: String,
    pub employee_name: String,
    pub domain: String,
    pub category: String,
    pub sub_category: String,
    pub skill_rating: f64,    // 0.0 – 5.0
    pub interest_rating: f64, // 0.0 – 5.0
}

/// A skill required by a job description.
///
/// Aliases accept the capitalized field names used by skill-matrix exports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequiredSkill {
    #[serde(alias = "Domain")]
    pub domain: String,
    #[serde(alias = "Category")]
    pub category: String,
    #[serde(alias = "Sub-category")]
    pub sub_category: String,
    #[serde(default, alias = "Skill_Description")]
    pub description: String,
}

/// The three-level taxonomy tuple two skills must share to match.
/// Comparison is exact and case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SkillKey<'a> {
    pub domain: &'a str,
    pub category: &'a str,
    pub sub_category: &'a str,
}

impl SkillRecord {
    pub fn key(&self) -> SkillKey<'_> {
        SkillKey {
            domain: &self.domain,
            category: &self.category,
            sub_category: &self.sub_category,
        }
    }
}

impl RequiredSkill {
    pub fn key(&self) -> SkillKey<'_> {
        SkillKey {
            domain: &self.domain,
            category: &self.category,
            sub_category: &self.sub_category,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Normalization
// ────────────────────────────────────────────────────────────────────────────

/// Diagnostic counts from one normalization pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizationReport {
    pub loaded: usize,
    pub skipped_malformed: usize,
    pub skipped_duplicates: usize,
}

impl NormalizationReport {
    pub fn skipped(&self) -> usize {
        self.skipped_malformed + self.skipped_duplicates
    }
}

/// Converts raw store rows into a clean population, preserving row order.
pub fn normalize_rows(rows: Vec<SkillRow>) -> (Vec<SkillRecord>, NormalizationReport) {
    let mut report = NormalizationReport::default();
    let mut seen: HashSet<(String, String, String, String)> = HashSet::new();
    let mut records = Vec::with_capacity(rows.len());

    for row in rows {
        let row_id = row.id;
        let Some(record) = normalize_row(row) else {
            debug!("Skipping malformed skill row {row_id:?}");
            report.skipped_malformed += 1;
            continue;
        };

        let tuple = (
            record.employee_id.clone(),
            record.domain.clone(),
            record.category.clone(),
            record.sub_category.clone(),
        );
        if !seen.insert(tuple) {
            report.skipped_duplicates += 1;
            continue;
        }

        records.push(record);
    }

    report.loaded = records.len();
    if report.skipped() > 0 {
        warn!(
            "Skill normalization skipped {} rows ({} malformed, {} duplicate)",
            report.skipped(),
            report.skipped_malformed,
            report.skipped_duplicates
        );
    }

    (records, report)
}

/// Derives the employee identifier of a row: lowercased email, else the lowercased name.
pub fn row_employee_id(row: &SkillRow) -> Option<String> {
    non_blank(row.email.as_deref())
        .map(|email| email.to_lowercase())
        .or_else(|| non_blank(row.name.as_deref()).map(str::to_lowercase))
}

fn normalize_row(row: SkillRow) -> Option<SkillRecord> {
    let employee_id = row_employee_id(&row)?;
    let employee_name = non_blank(row.name.as_deref())
        .map(str::to_string)
        .unwrap_or_else(|| employee_id.clone());

    // Taxonomy values are kept exactly as stored; matching is case-sensitive.
    Some(SkillRecord {
        domain: row.domain.filter(|v| !v.trim().is_empty())?,
        category: row.category.filter(|v| !v.trim().is_empty())?,
        sub_category: row.sub_category.filter(|v| !v.trim().is_empty())?,
        skill_rating: valid_rating(row.skill_rating)?,
        interest_rating: valid_rating(row.interest_rating)?,
        employee_id,
        employee_name,
    })
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn valid_rating(value: Option<f64>) -> Option<f64> {
    value.filter(|r| r.is_finite() && (0.0..=MAX_RATING).contains(r))
}

// ────────────────────────────────────────────────────────────────────────────
// Grouping
// ────────────────────────────────────────────────────────────────────────────

/// All records of one employee, borrowed from the population.
#[derive(Debug, Clone)]
pub struct EmployeeSkills<'a> {
    pub employee_id: &'a str,
    pub employee_name: &'a str,
    pub skills: Vec<&'a SkillRecord>,
}

/// Looks up a record by exact taxonomy tuple.
pub fn find_skill<'a>(skills: &[&'a SkillRecord], key: SkillKey<'_>) -> Option<&'a SkillRecord> {
    skills.iter().copied().find(|s| s.key() == key)
}

/// Groups the population by employee, in order of first appearance.
pub fn group_by_employee(population: &[SkillRecord]) -> Vec<EmployeeSkills<'_>> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<EmployeeSkills<'_>> = Vec::new();

    for record in population {
        let slot = *index.entry(record.employee_id.as_str()).or_insert_with(|| {
            groups.push(EmployeeSkills {
                employee_id: &record.employee_id,
                employee_name: &record.employee_name,
                skills: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].skills.push(record);
    }

    groups
}

/// Returns the records belonging to one employee, cloned out of the population.
pub fn records_for_employee(population: &[SkillRecord], employee_id: &str) -> Vec<SkillRecord> {
    population
        .iter()
        .filter(|r| r.employee_id == employee_id)
        .cloned()
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
