use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One row of the employee skill table, as stored.
///
/// Every column is nullable upstream; `matching::records::normalize_rows`
/// decides which rows are usable.
#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow)]
pub struct SkillRow {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub domain: Option<String>,
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub skill_rating: Option<f64>,
    pub interest_rating: Option<f64>,
}
