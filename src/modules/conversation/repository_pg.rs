use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    api::error,
    modules::{
        conversation::{
            model::ConversationSummary, repository::ConversationRepository,
            schema::ConversationEntity,
        },
        session::UserRole,
    },
};

#[derive(Clone)]
pub struct ConversationRepositoryPg {
    pool: sqlx::PgPool,
}

impl ConversationRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ConversationRepository for ConversationRepositoryPg {
    async fn find_by_id(
        &self,
        id: &Uuid,
    ) -> Result<Option<ConversationEntity>, error::SystemError> {
        let conversation = sqlx::query_as::<_, ConversationEntity>(
            "SELECT * FROM conversations WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(conversation)
    }

    async fn find_by_pair(
        &self,
        worker_id: &Uuid,
        employer_id: &Uuid,
    ) -> Result<Option<ConversationEntity>, error::SystemError> {
        let conversation = sqlx::query_as::<_, ConversationEntity>(
            "SELECT * FROM conversations WHERE worker_id = $1 AND employer_id = $2",
        )
        .bind(worker_id)
        .bind(employer_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(conversation)
    }

    async fn create(
        &self,
        worker_id: &Uuid,
        employer_id: &Uuid,
    ) -> Result<ConversationEntity, error::SystemError> {
        let id = Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext));
        // Unique (worker_id, employer_id) index; a racing insert yields no
        // row here instead of an error.
        let conversation = sqlx::query_as::<_, ConversationEntity>(
            r#"
            INSERT INTO conversations (id, worker_id, employer_id)
            VALUES ($1, $2, $3)
            ON CONFLICT (worker_id, employer_id) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(worker_id)
        .bind(employer_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(error::SystemError::Conflict(None))?;

        Ok(conversation)
    }

    async fn list_for_profile(
        &self,
        profile_id: &Uuid,
        role: &UserRole,
    ) -> Result<Vec<ConversationSummary>, error::SystemError> {
        let filter_column = match role {
            UserRole::Worker => "c.worker_id",
            UserRole::Employer => "c.employer_id",
        };

        let sql = format!(
            r#"
            SELECT
                c.id,
                c.worker_id,
                c.employer_id,
                w.name AS worker_name,
                w.avatar_url AS worker_avatar_url,
                e.company_name AS employer_name,
                e.avatar_url AS employer_avatar_url,
                c.last_message,
                c.last_message_at,
                c.created_at,
                (
                    SELECT COUNT(*)
                    FROM messages m
                    WHERE m.conversation_id = c.id
                      AND NOT m.is_read
                      AND m.sender_id <> $1
                ) AS unread_count
            FROM conversations c
            JOIN worker_profiles w
                ON w.id = c.worker_id
            JOIN employer_profiles e
                ON e.id = c.employer_id
            WHERE {filter_column} = $1
            ORDER BY COALESCE(c.last_message_at, c.created_at) DESC
            "#
        );

        let summaries = sqlx::query_as::<_, ConversationSummary>(&sql)
            .bind(profile_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(summaries)
    }

    async fn record_last_message(
        &self,
        conversation_id: &Uuid,
        content: &str,
        at: DateTime<Utc>,
    ) -> Result<(), error::SystemError> {
        sqlx::query(
            "UPDATE conversations SET last_message = $2, last_message_at = $3 WHERE id = $1",
        )
        .bind(conversation_id)
        .bind(content)
        .bind(at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
