//! MySQL weight entry repository implementation.

use super::parse_uuid;
use crate::{traits::WeightRepository, DatabasePoolInterface, WeightQuery};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fitlog_core::{FitlogError, FitlogResult, UserId, Weight, WeightId, WeightUnit, WeightUpdate};
use sqlx::{FromRow, MySql, QueryBuilder};
use std::sync::Arc;
use tracing::debug;

const WEIGHT_COLUMNS: &str = "id, user_id, date, unit, weight, created_at";

/// MySQL weight entry repository implementation.
#[derive(Clone)]
pub struct MySqlWeightRepository {
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlWeightRepository {
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct WeightRow {
    id: String,
    user_id: String,
    date: DateTime<Utc>,
    unit: String,
    weight: u32,
    created_at: DateTime<Utc>,
}

impl TryFrom<WeightRow> for Weight {
    type Error = FitlogError;

    fn try_from(row: WeightRow) -> Result<Self, Self::Error> {
        let unit = WeightUnit::parse(&row.unit)
            .ok_or_else(|| FitlogError::Internal(format!("Invalid weight unit in database: {}", row.unit)))?;

        Ok(Weight {
            id: WeightId::from_uuid(parse_uuid(&row.id)?),
            user_id: UserId::from_uuid(parse_uuid(&row.user_id)?),
            date: row.date,
            unit,
            weight: row.weight,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl WeightRepository for MySqlWeightRepository {
    async fn find_by_id(&self, id: WeightId) -> FitlogResult<Option<Weight>> {
        debug!("Finding weight entry by id: {}", id);

        let row = sqlx::query_as::<_, WeightRow>(&format!("SELECT {WEIGHT_COLUMNS} FROM weights WHERE id = ?"))
            .bind(id.to_string())
            .fetch_optional(self.pool.inner())
            .await?;

        row.map(Weight::try_from).transpose()
    }

    async fn find_by_user(&self, query: &WeightQuery) -> FitlogResult<Vec<Weight>> {
        debug!(
            "Finding weight entries of user {}: start={:?}, end={:?}, skip={}, limit={}",
            query.user_id, query.date_start, query.date_end, query.window.skip, query.window.limit
        );

        let mut sql = QueryBuilder::<MySql>::new(format!("SELECT {WEIGHT_COLUMNS} FROM weights WHERE user_id = "));
        sql.push_bind(query.user_id.to_string());
        if let Some(start) = query.date_start {
            sql.push(" AND date >= ").push_bind(start);
        }
        if let Some(end) = query.date_end {
            sql.push(" AND date <= ").push_bind(end);
        }
        sql.push(" ORDER BY date DESC LIMIT ")
            .push_bind(query.window.limit)
            .push(" OFFSET ")
            .push_bind(query.window.offset());

        let rows = sql.build_query_as::<WeightRow>().fetch_all(self.pool.inner()).await?;

        rows.into_iter().map(Weight::try_from).collect()
    }

    async fn save(&self, weight: &Weight) -> FitlogResult<Weight> {
        debug!("Saving weight entry {} for user {}", weight.id, weight.user_id);

        sqlx::query(
            r"
            INSERT INTO weights (id, user_id, date, unit, weight, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(weight.id.to_string())
        .bind(weight.user_id.to_string())
        .bind(weight.date)
        .bind(weight.unit.as_str())
        .bind(weight.weight)
        .bind(weight.created_at)
        .execute(self.pool.inner())
        .await?;

        Ok(weight.clone())
    }

    async fn update(&self, id: WeightId, update: WeightUpdate) -> FitlogResult<Option<Weight>> {
        debug!("Updating weight entry: {}", id);

        if !update.is_empty() {
            let mut sql = QueryBuilder::<MySql>::new("UPDATE weights SET ");
            let mut fields = sql.separated(", ");
            if let Some(date) = update.date {
                fields.push("date = ").push_bind_unseparated(date);
            }
            if let Some(unit) = update.unit {
                fields.push("unit = ").push_bind_unseparated(unit.as_str());
            }
            if let Some(weight) = update.weight {
                fields.push("weight = ").push_bind_unseparated(weight);
            }
            sql.push(" WHERE id = ").push_bind(id.to_string());
            sql.build().execute(self.pool.inner()).await?;
        }

        self.find_by_id(id).await
    }

    async fn delete(&self, id: WeightId) -> FitlogResult<u64> {
        debug!("Deleting weight entry: {}", id);

        let result = sqlx::query("DELETE FROM weights WHERE id = ?")
            .bind(id.to_string())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected())
    }
}
