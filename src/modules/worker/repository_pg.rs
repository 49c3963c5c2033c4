use chrono::{DateTime, Utc};
use sqlx::Postgres;
use uuid::Uuid;

use crate::{
    api::error,
    modules::worker::{
        filter::FilterState,
        model::{InsertWorkerProfile, UpdateWorkerProfileModel},
        repository::WorkerRepository,
        schema::WorkerProfileEntity,
    },
};

#[derive(Clone)]
pub struct WorkerRepositoryPg {
    pool: sqlx::PgPool,
}

impl WorkerRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

fn like_pattern(term: &str) -> String {
    format!("%{}%", term.replace('%', "\\%").replace('_', "\\_"))
}

#[async_trait::async_trait]
impl WorkerRepository for WorkerRepositoryPg {
    async fn find_all(
        &self,
        filter: &FilterState,
        now: DateTime<Utc>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<WorkerProfileEntity>, error::SystemError> {
        let mut qb = sqlx::QueryBuilder::<Postgres>::new(
            "SELECT * FROM worker_profiles WHERE hourly_rate_max >= ",
        );
        qb.push_bind(filter.min_rate);
        qb.push(" AND hourly_rate_min <= ");
        qb.push_bind(filter.max_rate);
        qb.push(" AND availability_hours BETWEEN ");
        qb.push_bind(filter.min_hours);
        qb.push(" AND ");
        qb.push_bind(filter.max_hours);

        let search = filter.search.trim();
        if !search.is_empty() {
            let pattern = like_pattern(search);
            qb.push(" AND (name ILIKE ");
            qb.push_bind(pattern.clone());
            qb.push(" OR headline ILIKE ");
            qb.push_bind(pattern.clone());
            qb.push(" OR EXISTS (SELECT 1 FROM unnest(skills) AS skill WHERE skill ILIKE ");
            qb.push_bind(pattern);
            qb.push("))");
        }

        if filter.has_country() {
            qb.push(" AND upper(country_code) = upper(");
            qb.push_bind(filter.country.clone());
            qb.push(")");
        }

        if filter.verified_only {
            qb.push(" AND is_verified");
        }

        if let Some(cutoff) = filter.last_active.cutoff(now) {
            qb.push(" AND last_active >= ");
            qb.push_bind(cutoff);
        }

        if !filter.skills.is_empty() {
            qb.push(" AND skills && ");
            qb.push_bind(filter.skills.clone());
        }

        qb.push(" ORDER BY last_active DESC, id ASC LIMIT ");
        qb.push_bind(limit);
        qb.push(" OFFSET ");
        qb.push_bind(offset);

        let workers =
            qb.build_query_as::<WorkerProfileEntity>().fetch_all(&self.pool).await?;
        Ok(workers)
    }

    async fn find_by_id(
        &self,
        id: &Uuid,
    ) -> Result<Option<WorkerProfileEntity>, error::SystemError> {
        let worker = sqlx::query_as::<_, WorkerProfileEntity>(
            "SELECT * FROM worker_profiles WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(worker)
    }

    async fn find_by_user_id(
        &self,
        user_id: &Uuid,
    ) -> Result<Option<WorkerProfileEntity>, error::SystemError> {
        let worker = sqlx::query_as::<_, WorkerProfileEntity>(
            "SELECT * FROM worker_profiles WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(worker)
    }

    async fn create(
        &self,
        profile: &InsertWorkerProfile,
    ) -> Result<WorkerProfileEntity, error::SystemError> {
        let id = Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext));
        let worker = sqlx::query_as::<_, WorkerProfileEntity>(
            r#"
            INSERT INTO worker_profiles (
                id, user_id, name, country, country_code, headline, skills,
                hourly_rate_min, hourly_rate_max, availability_hours,
                availability_type, bio
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(profile.user_id)
        .bind(&profile.name)
        .bind(&profile.country)
        .bind(&profile.country_code)
        .bind(&profile.headline)
        .bind(&profile.skills)
        .bind(profile.hourly_rate_min)
        .bind(profile.hourly_rate_max)
        .bind(profile.availability_hours)
        .bind(&profile.availability_type)
        .bind(&profile.bio)
        .fetch_one(&self.pool)
        .await?;
        Ok(worker)
    }

    async fn update_by_user_id(
        &self,
        user_id: &Uuid,
        changes: &UpdateWorkerProfileModel,
    ) -> Result<WorkerProfileEntity, error::SystemError> {
        let worker = sqlx::query_as::<_, WorkerProfileEntity>(
            r#"
            UPDATE worker_profiles
            SET
                name               = COALESCE($2, name),
                avatar_url         = CASE WHEN $3::boolean THEN $4 ELSE avatar_url END,
                country            = COALESCE($5, country),
                country_code       = COALESCE($6, country_code),
                headline           = COALESCE($7, headline),
                skills             = COALESCE($8, skills),
                hourly_rate_min    = COALESCE($9, hourly_rate_min),
                hourly_rate_max    = COALESCE($10, hourly_rate_max),
                availability_hours = COALESCE($11, availability_hours),
                availability_type  = COALESCE($12, availability_type),
                bio                = COALESCE($13, bio),
                last_active        = NOW()
            WHERE user_id = $1
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(&changes.name)
        .bind(changes.avatar_url.is_some())
        .bind(changes.avatar_url.as_ref().and_then(|v| v.as_ref()))
        .bind(&changes.country)
        .bind(&changes.country_code)
        .bind(&changes.headline)
        .bind(&changes.skills)
        .bind(changes.hourly_rate_min)
        .bind(changes.hourly_rate_max)
        .bind(changes.availability_hours)
        .bind(&changes.availability_type)
        .bind(&changes.bio)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| error::SystemError::not_found("Worker profile not found"))?;

        Ok(worker)
    }
}
