use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;

/// One conversation per (worker, employer) pair. `last_message` is a
/// denormalized snapshot kept for the conversation list.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ConversationEntity {
    pub id: Uuid,
    pub worker_id: Uuid,
    pub employer_id: Uuid,
    pub last_message: Option<String>,
    pub last_message_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl ConversationEntity {
    /// Message senders are identified by profile id, so participation is
    /// exactly membership in this pair.
    pub fn is_participant(&self, profile_id: &Uuid) -> bool {
        self.worker_id == *profile_id || self.employer_id == *profile_id
    }
}
