use uuid::Uuid;

use crate::{api::error, modules::worker::schema::WorkerProfileEntity};

#[async_trait::async_trait]
pub trait SavedWorkerRepository {
    /// Idempotent: saving an already-saved worker succeeds without change.
    async fn save(&self, employer_id: &Uuid, worker_id: &Uuid) -> Result<(), error::SystemError>;

    /// No-op when the pair is absent.
    async fn unsave(&self, employer_id: &Uuid, worker_id: &Uuid)
        -> Result<(), error::SystemError>;

    async fn is_saved(
        &self,
        employer_id: &Uuid,
        worker_id: &Uuid,
    ) -> Result<bool, error::SystemError>;

    async fn list_ids(&self, employer_id: &Uuid) -> Result<Vec<Uuid>, error::SystemError>;

    /// Saved workers with their full profiles, most recently saved first.
    async fn list_saved(
        &self,
        employer_id: &Uuid,
    ) -> Result<Vec<WorkerProfileEntity>, error::SystemError>;
}
