use uuid::Uuid;

use crate::{
    api::error,
    modules::review::{
        model::{InsertReview, ReviewResponse},
        schema::ReviewEntity,
    },
};

#[async_trait::async_trait]
pub trait ReviewRepository {
    /// Newest first, with the reviewing employer's display fields joined in.
    async fn find_by_worker(
        &self,
        worker_id: &Uuid,
    ) -> Result<Vec<ReviewResponse>, error::SystemError>;

    async fn create(&self, review: &InsertReview) -> Result<ReviewEntity, error::SystemError>;
}
