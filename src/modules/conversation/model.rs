use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct GetOrCreateConversationModel {
    pub worker_id: Uuid,
    pub employer_id: Uuid,
}

/// Conversation list row: both display names plus the viewer's unread count.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ConversationSummary {
    pub id: Uuid,
    pub worker_id: Uuid,
    pub employer_id: Uuid,
    pub worker_name: String,
    pub worker_avatar_url: Option<String>,
    pub employer_name: String,
    pub employer_avatar_url: Option<String>,
    pub last_message: Option<String>,
    pub last_message_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub unread_count: i64,
}
