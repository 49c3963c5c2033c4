use uuid::Uuid;

use crate::{
    api::error,
    modules::{saved_worker::repository::SavedWorkerRepository, worker::schema::WorkerProfileEntity},
};

#[derive(Clone)]
pub struct SavedWorkerRepositoryPg {
    pool: sqlx::PgPool,
}

impl SavedWorkerRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl SavedWorkerRepository for SavedWorkerRepositoryPg {
    async fn save(&self, employer_id: &Uuid, worker_id: &Uuid) -> Result<(), error::SystemError> {
        sqlx::query(
            "INSERT INTO saved_workers (employer_id, worker_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(employer_id)
        .bind(worker_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn unsave(
        &self,
        employer_id: &Uuid,
        worker_id: &Uuid,
    ) -> Result<(), error::SystemError> {
        sqlx::query("DELETE FROM saved_workers WHERE employer_id = $1 AND worker_id = $2")
            .bind(employer_id)
            .bind(worker_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn is_saved(
        &self,
        employer_id: &Uuid,
        worker_id: &Uuid,
    ) -> Result<bool, error::SystemError> {
        let row: Option<(i32,)> = sqlx::query_as(
            "SELECT 1 FROM saved_workers WHERE employer_id = $1 AND worker_id = $2",
        )
        .bind(employer_id)
        .bind(worker_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.is_some())
    }

    async fn list_ids(&self, employer_id: &Uuid) -> Result<Vec<Uuid>, error::SystemError> {
        let rows: Vec<(Uuid,)> =
            sqlx::query_as("SELECT worker_id FROM saved_workers WHERE employer_id = $1")
                .bind(employer_id)
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    async fn list_saved(
        &self,
        employer_id: &Uuid,
    ) -> Result<Vec<WorkerProfileEntity>, error::SystemError> {
        let workers = sqlx::query_as::<_, WorkerProfileEntity>(
            r#"
            SELECT w.*
            FROM saved_workers s
            JOIN worker_profiles w
                ON w.id = s.worker_id
            WHERE s.employer_id = $1
            ORDER BY s.saved_at DESC
            "#,
        )
        .bind(employer_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(workers)
    }
}
