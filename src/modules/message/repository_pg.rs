use uuid::Uuid;

use crate::{
    api::error,
    modules::message::{
        model::InsertMessage, repository::MessageRepository, schema::MessageEntity,
    },
};

#[derive(Clone)]
pub struct MessageRepositoryPg {
    pool: sqlx::PgPool,
}

impl MessageRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl MessageRepository for MessageRepositoryPg {
    async fn create(&self, message: &InsertMessage) -> Result<MessageEntity, error::SystemError> {
        let id = Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext));
        let message = sqlx::query_as::<_, MessageEntity>(
            r#"
            INSERT INTO messages (id, conversation_id, sender_id, content)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(message.conversation_id)
        .bind(message.sender_id)
        .bind(&message.content)
        .fetch_one(&self.pool)
        .await?;
        Ok(message)
    }

    async fn history(
        &self,
        conversation_id: &Uuid,
    ) -> Result<Vec<MessageEntity>, error::SystemError> {
        let messages = sqlx::query_as::<_, MessageEntity>(
            "SELECT * FROM messages WHERE conversation_id = $1 ORDER BY created_at ASC, id ASC",
        )
        .bind(conversation_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(messages)
    }

    async fn mark_read(
        &self,
        conversation_id: &Uuid,
        reader_id: &Uuid,
    ) -> Result<u64, error::SystemError> {
        let rows = sqlx::query(
            r#"
            UPDATE messages
            SET is_read = true
            WHERE conversation_id = $1
              AND sender_id <> $2
              AND NOT is_read
            "#,
        )
        .bind(conversation_id)
        .bind(reader_id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(rows)
    }
}
