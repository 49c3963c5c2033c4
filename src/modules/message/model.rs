use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct SendMessageModel {
    pub content: String,
}

pub struct InsertMessage {
    pub conversation_id: Uuid,
    pub sender_id: Uuid,
    pub content: String,
}
