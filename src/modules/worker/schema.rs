use serde::{Deserialize, Serialize};
use sqlx::prelude::{FromRow, Type};
use uuid::Uuid;

#[derive(Debug, PartialEq, Clone, Type, Serialize, Deserialize)]
#[sqlx(type_name = "availability_type", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum AvailabilityType {
    PartTime,
    FullTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WorkerProfileEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub avatar_url: Option<String>,
    pub country: String,
    pub country_code: String,
    pub headline: String,
    pub skills: Vec<String>,
    pub hourly_rate_min: f64,
    pub hourly_rate_max: f64,
    pub availability_hours: i32,
    pub availability_type: AvailabilityType,
    pub bio: String,
    pub last_active: chrono::DateTime<chrono::Utc>,
    pub is_verified: bool,
    /// Maintained by an external aggregation job, never recomputed here.
    pub review_count: i32,
    pub average_rating: f64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
