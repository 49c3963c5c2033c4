use uuid::Uuid;

use crate::{
    api::error,
    modules::job::{
        model::{InsertJob, JobSearch, UpdateJobModel},
        schema::JobEntity,
    },
};

#[async_trait::async_trait]
pub trait JobRepository {
    /// Active jobs only. Ties within the requested sort order keep
    /// created_at descending, then id, so pagination is stable.
    async fn find_all(
        &self,
        search: &JobSearch,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<JobEntity>, error::SystemError>;

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<JobEntity>, error::SystemError>;

    async fn find_by_employer(
        &self,
        employer_id: &Uuid,
    ) -> Result<Vec<JobEntity>, error::SystemError>;

    async fn create(&self, job: &InsertJob) -> Result<JobEntity, error::SystemError>;

    async fn update(
        &self,
        id: &Uuid,
        changes: &UpdateJobModel,
    ) -> Result<JobEntity, error::SystemError>;

    /// Soft delete; the row stays for history.
    async fn deactivate(&self, id: &Uuid) -> Result<bool, error::SystemError>;
}
