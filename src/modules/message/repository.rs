use uuid::Uuid;

use crate::{
    api::error,
    modules::message::{model::InsertMessage, schema::MessageEntity},
};

#[async_trait::async_trait]
pub trait MessageRepository {
    async fn create(&self, message: &InsertMessage) -> Result<MessageEntity, error::SystemError>;

    /// Full history, strictly ascending by (created_at, id).
    async fn history(
        &self,
        conversation_id: &Uuid,
    ) -> Result<Vec<MessageEntity>, error::SystemError>;

    /// Marks every unread message not sent by `reader_id` as read.
    /// Returns the number of rows changed.
    async fn mark_read(
        &self,
        conversation_id: &Uuid,
        reader_id: &Uuid,
    ) -> Result<u64, error::SystemError>;
}
