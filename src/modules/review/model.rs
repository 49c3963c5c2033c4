use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateReviewModel {
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,
    #[validate(length(min = 1, message = "Comment cannot be empty"))]
    pub comment: String,
}

/// Review joined with the reviewing employer's public fields.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct ReviewResponse {
    pub id: Uuid,
    pub worker_id: Uuid,
    pub employer_id: Uuid,
    pub company_name: String,
    pub avatar_url: Option<String>,
    pub rating: i32,
    pub comment: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

pub struct InsertReview {
    pub worker_id: Uuid,
    pub employer_id: Uuid,
    pub rating: i32,
    pub comment: String,
}
