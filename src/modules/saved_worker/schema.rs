use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;

/// One row per (employer, worker) pair; the pair is unique in the store.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SavedWorkerEntity {
    pub employer_id: Uuid,
    pub worker_id: Uuid,
    pub saved_at: chrono::DateTime<chrono::Utc>,
}
