use std::str::FromStr;

use anyhow::{bail, Context, Result};

use crate::matching::weights::{
    ScoringConfig, DEFAULT_MIN_SKILL_RATING, IMPROVEMENT_LIMIT, MAX_CANDIDATES,
    MAX_MENTOR_RECOMMENDATIONS, MENTOR_SKILL_THRESHOLD,
};

const DEFAULT_SKILLS_TABLE: &str = "employee_skills";

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Optional: without it, extraction is unavailable and course
    /// recommendations come from the fallback catalogue.
    pub anthropic_api_key: Option<String>,
    pub skills_table: String,
    pub port: u16,
    pub rust_log: String,
    pub scoring: ScoringConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let skills_table = env_or("SKILLS_TABLE", DEFAULT_SKILLS_TABLE.to_string())?;
        if !is_plain_identifier(&skills_table) {
            bail!("SKILLS_TABLE must be a plain SQL identifier, got '{skills_table}'");
        }

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            anthropic_api_key: std::env::var("ANTHROPIC_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            skills_table,
            port: env_or("PORT", 8080u16)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            scoring: scoring_from_env()?,
        })
    }
}

fn scoring_from_env() -> Result<ScoringConfig> {
    let min_skill_rating = env_or("MIN_SKILL_RATING", DEFAULT_MIN_SKILL_RATING)?;
    let mentor_skill_threshold = env_or("MENTOR_SKILL_THRESHOLD", MENTOR_SKILL_THRESHOLD)?;
    for (key, value) in [
        ("MIN_SKILL_RATING", min_skill_rating),
        ("MENTOR_SKILL_THRESHOLD", mentor_skill_threshold),
    ] {
        if !(1.0..=5.0).contains(&value) {
            bail!("{key} must be between 1 and 5, got {value}");
        }
    }

    Ok(ScoringConfig {
        min_skill_rating,
        mentor_skill_threshold,
        max_candidates: env_or("MAX_CANDIDATES", MAX_CANDIDATES)?,
        max_mentor_recommendations: env_or(
            "MAX_MENTOR_RECOMMENDATIONS",
            MAX_MENTOR_RECOMMENDATIONS,
        )?,
        improvement_limit: env_or("IMPROVEMENT_LIMIT", IMPROVEMENT_LIMIT)?,
        ..ScoringConfig::default()
    })
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}

fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
