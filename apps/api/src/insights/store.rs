//! Persistence for the insight refresh: who is eligible, what exists, and the upsert.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::insights::error::InsightError;
use crate::insights::models::InsightRecord;
use crate::models::insight::IndustryInsightRow;
use crate::models::user::UserIndustryRef;

#[async_trait]
pub trait InsightStore: Send + Sync {
    /// Users whose industry is set and not blank. Users without one are never returned.
    async fn eligible_users(&self) -> Result<Vec<UserIndustryRef>, InsightError>;

    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<InsightRecord>, InsightError>;

    /// Id of the user's current record. Reads only the key, so a row whose
    /// other columns no longer decode can still be overwritten.
    async fn existing_id(&self, user_id: Uuid) -> Result<Option<Uuid>, InsightError>;

    /// Insert-or-update keyed by `user_id`. Returns the stored record; on
    /// conflict the stored `id` wins over the one in `record`.
    async fn upsert(&self, record: &InsightRecord) -> Result<InsightRecord, InsightError>;
}

#[derive(Clone)]
pub struct PgInsightStore {
    pool: PgPool,
}

impl PgInsightStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InsightStore for PgInsightStore {
    async fn eligible_users(&self) -> Result<Vec<UserIndustryRef>, InsightError> {
        Ok(sqlx::query_as::<_, UserIndustryRef>(
            r#"
            SELECT id, industry, job_title
            FROM users
            WHERE NULLIF(TRIM(industry), '') IS NOT NULL
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?)
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<InsightRecord>, InsightError> {
        sqlx::query_as::<_, IndustryInsightRow>(
            "SELECT * FROM industry_insights WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .map(InsightRecord::try_from)
        .transpose()
    }

    async fn existing_id(&self, user_id: Uuid) -> Result<Option<Uuid>, InsightError> {
        Ok(
            sqlx::query_scalar("SELECT id FROM industry_insights WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn upsert(&self, record: &InsightRecord) -> Result<InsightRecord, InsightError> {
        let row = sqlx::query_as::<_, IndustryInsightRow>(
            r#"
            INSERT INTO industry_insights
                (id, user_id, industry, salary_ranges, growth_rate, demand_level,
                 top_skills, market_outlook, key_trends, recommended_skills,
                 last_updated, next_update)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ON CONFLICT (user_id) DO UPDATE SET
                industry = EXCLUDED.industry,
                salary_ranges = EXCLUDED.salary_ranges,
                growth_rate = EXCLUDED.growth_rate,
                demand_level = EXCLUDED.demand_level,
                top_skills = EXCLUDED.top_skills,
                market_outlook = EXCLUDED.market_outlook,
                key_trends = EXCLUDED.key_trends,
                recommended_skills = EXCLUDED.recommended_skills,
                last_updated = EXCLUDED.last_updated,
                next_update = EXCLUDED.next_update
            RETURNING *
            "#,
        )
        .bind(record.id)
        .bind(record.user_id)
        .bind(&record.industry)
        .bind(Json(&record.salary_ranges))
        .bind(record.growth_rate)
        .bind(record.demand_level.as_str())
        .bind(&record.top_skills)
        .bind(record.market_outlook.as_str())
        .bind(&record.key_trends)
        .bind(&record.recommended_skills)
        .bind(record.last_updated)
        .bind(record.next_update)
        .fetch_one(&self.pool)
        .await?;

        InsightRecord::try_from(row)
    }
}
