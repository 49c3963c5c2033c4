use uuid::Uuid;

use crate::{
    api::error,
    modules::review::{
        model::{InsertReview, ReviewResponse},
        repository::ReviewRepository,
        schema::ReviewEntity,
    },
};

#[derive(Clone)]
pub struct ReviewRepositoryPg {
    pool: sqlx::PgPool,
}

impl ReviewRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ReviewRepository for ReviewRepositoryPg {
    async fn find_by_worker(
        &self,
        worker_id: &Uuid,
    ) -> Result<Vec<ReviewResponse>, error::SystemError> {
        let reviews = sqlx::query_as::<_, ReviewResponse>(
            r#"
            SELECT
                r.id,
                r.worker_id,
                r.employer_id,
                e.company_name,
                e.avatar_url,
                r.rating,
                r.comment,
                r.created_at
            FROM reviews r
            JOIN employer_profiles e
                ON e.id = r.employer_id
            WHERE r.worker_id = $1
            ORDER BY r.created_at DESC
            "#,
        )
        .bind(worker_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(reviews)
    }

    async fn create(&self, review: &InsertReview) -> Result<ReviewEntity, error::SystemError> {
        let id = Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext));
        let review = sqlx::query_as::<_, ReviewEntity>(
            r#"
            INSERT INTO reviews (id, worker_id, employer_id, rating, comment)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(review.worker_id)
        .bind(review.employer_id)
        .bind(review.rating)
        .bind(&review.comment)
        .fetch_one(&self.pool)
        .await?;
        Ok(review)
    }
}
