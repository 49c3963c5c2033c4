use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    api::error,
    modules::worker::{
        filter::FilterState,
        model::{InsertWorkerProfile, UpdateWorkerProfileModel},
        schema::WorkerProfileEntity,
    },
};

#[async_trait::async_trait]
pub trait WorkerRepository {
    /// Both implementations must return the same id set for the same
    /// filter and `now`, ordered by last_active descending.
    async fn find_all(
        &self,
        filter: &FilterState,
        now: DateTime<Utc>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<WorkerProfileEntity>, error::SystemError>;

    async fn find_by_id(
        &self,
        id: &Uuid,
    ) -> Result<Option<WorkerProfileEntity>, error::SystemError>;

    async fn find_by_user_id(
        &self,
        user_id: &Uuid,
    ) -> Result<Option<WorkerProfileEntity>, error::SystemError>;

    async fn create(
        &self,
        profile: &InsertWorkerProfile,
    ) -> Result<WorkerProfileEntity, error::SystemError>;

    /// Partial update; also refreshes last_active.
    async fn update_by_user_id(
        &self,
        user_id: &Uuid,
        changes: &UpdateWorkerProfileModel,
    ) -> Result<WorkerProfileEntity, error::SystemError>;
}
