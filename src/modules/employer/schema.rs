use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EmployerProfileEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub company_name: String,
    pub avatar_url: Option<String>,
    pub country: String,
    pub country_code: String,
    pub bio: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
