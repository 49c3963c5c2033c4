use sqlx::Postgres;
use uuid::Uuid;

use crate::{
    api::error,
    modules::job::{
        model::{InsertJob, JobSearch, JobSort, UpdateJobModel},
        repository::JobRepository,
        schema::JobEntity,
    },
};

#[derive(Clone)]
pub struct JobRepositoryPg {
    pool: sqlx::PgPool,
}

impl JobRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl JobRepository for JobRepositoryPg {
    async fn find_all(
        &self,
        search: &JobSearch,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<JobEntity>, error::SystemError> {
        let mut qb = sqlx::QueryBuilder::<Postgres>::new("SELECT * FROM jobs WHERE is_active");

        let term = search.search.trim();
        if !term.is_empty() {
            let pattern = format!("%{}%", term.replace('%', "\\%").replace('_', "\\_"));
            qb.push(" AND (title ILIKE ");
            qb.push_bind(pattern.clone());
            qb.push(" OR description ILIKE ");
            qb.push_bind(pattern);
            qb.push(")");
        }

        if let Some(skill) = &search.skill {
            qb.push(" AND ");
            qb.push_bind(skill.clone());
            qb.push(" = ANY(skills)");
        }

        qb.push(match search.sort {
            JobSort::Newest => " ORDER BY created_at DESC, id ASC",
            JobSort::RateHigh => " ORDER BY hourly_rate_max DESC, created_at DESC, id ASC",
            JobSort::RateLow => " ORDER BY hourly_rate_min ASC, created_at DESC, id ASC",
        });

        qb.push(" LIMIT ");
        qb.push_bind(limit);
        qb.push(" OFFSET ");
        qb.push_bind(offset);

        let jobs = qb.build_query_as::<JobEntity>().fetch_all(&self.pool).await?;
        Ok(jobs)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<JobEntity>, error::SystemError> {
        let job = sqlx::query_as::<_, JobEntity>("SELECT * FROM jobs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(job)
    }

    async fn find_by_employer(
        &self,
        employer_id: &Uuid,
    ) -> Result<Vec<JobEntity>, error::SystemError> {
        let jobs = sqlx::query_as::<_, JobEntity>(
            "SELECT * FROM jobs WHERE employer_id = $1 ORDER BY created_at DESC",
        )
        .bind(employer_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(jobs)
    }

    async fn create(&self, job: &InsertJob) -> Result<JobEntity, error::SystemError> {
        let id = Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext));
        let job = sqlx::query_as::<_, JobEntity>(
            r#"
            INSERT INTO jobs (
                id, employer_id, title, description, skills,
                hourly_rate_min, hourly_rate_max, availability_hours, country_preference
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(job.employer_id)
        .bind(&job.title)
        .bind(&job.description)
        .bind(&job.skills)
        .bind(job.hourly_rate_min)
        .bind(job.hourly_rate_max)
        .bind(job.availability_hours)
        .bind(&job.country_preference)
        .fetch_one(&self.pool)
        .await?;
        Ok(job)
    }

    async fn update(
        &self,
        id: &Uuid,
        changes: &UpdateJobModel,
    ) -> Result<JobEntity, error::SystemError> {
        let job = sqlx::query_as::<_, JobEntity>(
            r#"
            UPDATE jobs
            SET
                title              = COALESCE($2, title),
                description        = COALESCE($3, description),
                skills             = COALESCE($4, skills),
                hourly_rate_min    = COALESCE($5, hourly_rate_min),
                hourly_rate_max    = COALESCE($6, hourly_rate_max),
                availability_hours = COALESCE($7, availability_hours),
                country_preference = CASE WHEN $8::boolean THEN $9 ELSE country_preference END
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&changes.title)
        .bind(&changes.description)
        .bind(&changes.skills)
        .bind(changes.hourly_rate_min)
        .bind(changes.hourly_rate_max)
        .bind(changes.availability_hours)
        .bind(changes.country_preference.is_some())
        .bind(changes.country_preference.as_ref().and_then(|v| v.as_ref()))
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| error::SystemError::not_found("Job not found"))?;

        Ok(job)
    }

    async fn deactivate(&self, id: &Uuid) -> Result<bool, error::SystemError> {
        let rows = sqlx::query("UPDATE jobs SET is_active = false WHERE id = $1 AND is_active")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(rows > 0)
    }
}
