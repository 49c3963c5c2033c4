use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;

/// Append-only. Rating aggregates on the worker profile are maintained
/// by an external job, not by this service.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ReviewEntity {
    pub id: Uuid,
    pub worker_id: Uuid,
    pub employer_id: Uuid,
    pub rating: i32,
    pub comment: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
