//! Skill storage. The scoring core never touches the database; handlers load a
//! snapshot through `SkillStore` and hand plain slices to `matching`.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::matching::records::{normalize_rows, NormalizationReport, SkillRecord};
use crate::models::skill::SkillRow;

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Source of raw skill rows. Swappable so handlers can be tested without Postgres.
#[async_trait]
pub trait SkillStore: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<SkillRow>, AppError>;

    /// Rows whose derived employee id equals `employee_id`.
    async fn fetch_for_employee(&self, employee_id: &str) -> Result<Vec<SkillRow>, AppError>;
}

/// Reads the skill table through sqlx.
pub struct PgSkillStore {
    pool: PgPool,
    table: String,
}

impl PgSkillStore {
    /// `table` must already be validated as a plain identifier (see `Config`).
    pub fn new(pool: PgPool, table: String) -> Self {
        Self { pool, table }
    }

    fn select_clause(&self) -> String {
        format!(
            "SELECT id::int8 AS id, name, email, domain, category, sub_category, \
             skill_rating::float8 AS skill_rating, interest_rating::float8 AS interest_rating \
             FROM {}",
            self.table
        )
    }
}

#[async_trait]
impl SkillStore for PgSkillStore {
    async fn fetch_all(&self) -> Result<Vec<SkillRow>, AppError> {
        let sql = format!("{} ORDER BY id", self.select_clause());
        let rows: Vec<SkillRow> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        debug!("Fetched {} skill rows from {}", rows.len(), self.table);
        Ok(rows)
    }

    async fn fetch_for_employee(&self, employee_id: &str) -> Result<Vec<SkillRow>, AppError> {
        // Mirrors `row_employee_id`: lowercased email, or the lowercased name when email is blank.
        let sql = format!(
            "{} WHERE lower(trim(email)) = $1 \
             OR (coalesce(trim(email), '') = '' AND lower(trim(name)) = $1) \
             ORDER BY id",
            self.select_clause()
        );
        let rows: Vec<SkillRow> = sqlx::query_as(&sql)
            .bind(employee_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}

/// A normalized, point-in-time view of the whole population.
#[derive(Debug, Clone, Serialize)]
pub struct PopulationSnapshot {
    pub records: Vec<SkillRecord>,
    pub report: NormalizationReport,
    pub loaded_at: DateTime<Utc>,
}

pub async fn load_snapshot(store: &dyn SkillStore) -> Result<PopulationSnapshot, AppError> {
    let rows = store.fetch_all().await?;
    let (records, report) = normalize_rows(rows);
    Ok(PopulationSnapshot {
        records,
        report,
        loaded_at: Utc::now(),
    })
}

/// Loads one employee's records, or `NotFound` if they have none.
pub async fn load_employee(
    store: &dyn SkillStore,
    employee_id: &str,
) -> Result<Vec<SkillRecord>, AppError> {
    let employee_id = canonical_employee_id(employee_id);
    let rows = store.fetch_for_employee(&employee_id).await?;
    let (records, _) = normalize_rows(rows);
    if records.is_empty() {
        return Err(AppError::NotFound(format!(
            "No skills recorded for employee '{employee_id}'"
        )));
    }
    Ok(records)
}

/// Identifiers are case-insensitive, whether derived from an email or a name.
pub fn canonical_employee_id(raw: &str) -> String {
    raw.trim().to_lowercase()
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory store for handler tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod memory {
    use super::*;
    use crate::matching::records::row_employee_id;

    #[derive(Default)]
    pub(crate) struct MemorySkillStore {
        pub rows: Vec<SkillRow>,
    }

    #[async_trait]
    impl SkillStore for MemorySkillStore {
        async fn fetch_all(&self) -> Result<Vec<SkillRow>, AppError> {
            Ok(self.rows.clone())
        }

        async fn fetch_for_employee(&self, employee_id: &str) -> Result<Vec<SkillRow>, AppError> {
            Ok(self
                .rows
                .iter()
                .filter(|row| row_employee_id(row).as_deref() == Some(employee_id))
                .cloned()
                .collect())
        }
    }
}
