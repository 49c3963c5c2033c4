use log::info;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::error;
use crate::modules::saved_worker::repository::SavedWorkerRepository;
use crate::modules::worker::repository::WorkerRepository;
use crate::modules::worker::schema::WorkerProfileEntity;

#[derive(Clone)]
pub struct SavedWorkerService {
    repo: Arc<dyn SavedWorkerRepository + Send + Sync>,
    worker_repo: Arc<dyn WorkerRepository + Send + Sync>,
}

impl SavedWorkerService {
    pub fn with_dependencies(
        repo: Arc<dyn SavedWorkerRepository + Send + Sync>,
        worker_repo: Arc<dyn WorkerRepository + Send + Sync>,
    ) -> Self {
        info!("SavedWorkerService initialized with dependencies");
        SavedWorkerService { repo, worker_repo }
    }

    pub async fn save(&self, employer_id: &Uuid, worker_id: &Uuid) -> Result<(), error::SystemError> {
        if self.worker_repo.find_by_id(worker_id).await?.is_none() {
            return Err(error::SystemError::not_found("Worker profile not found"));
        }
        self.repo.save(employer_id, worker_id).await
    }

    pub async fn unsave(
        &self,
        employer_id: &Uuid,
        worker_id: &Uuid,
    ) -> Result<(), error::SystemError> {
        self.repo.unsave(employer_id, worker_id).await
    }

    pub async fn is_saved(
        &self,
        employer_id: &Uuid,
        worker_id: &Uuid,
    ) -> Result<bool, error::SystemError> {
        self.repo.is_saved(employer_id, worker_id).await
    }

    pub async fn list_ids(&self, employer_id: &Uuid) -> Result<Vec<Uuid>, error::SystemError> {
        self.repo.list_ids(employer_id).await
    }

    pub async fn list_saved(
        &self,
        employer_id: &Uuid,
    ) -> Result<Vec<WorkerProfileEntity>, error::SystemError> {
        self.repo.list_saved(employer_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::memory::MemStore;
    use crate::modules::worker::model::InsertWorkerProfile;
    use crate::modules::worker::schema::AvailabilityType;

    fn new_id() -> Uuid {
        Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext))
    }

    async fn seeded_worker(store: &MemStore, name: &str) -> WorkerProfileEntity {
        WorkerRepository::create(
            store,
            &InsertWorkerProfile {
                user_id: new_id(),
                name: name.to_string(),
                country: "Philippines".to_string(),
                country_code: "PH".to_string(),
                headline: "Virtual assistant".to_string(),
                skills: vec!["Data Entry".to_string()],
                hourly_rate_min: 2.0,
                hourly_rate_max: 4.0,
                availability_hours: 8,
                availability_type: AvailabilityType::FullTime,
                bio: String::new(),
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn save_list_unsave_lifecycle() {
        let store = Arc::new(MemStore::new());
        let service = SavedWorkerService::with_dependencies(store.clone(), store.clone());
        let employer_id = new_id();
        let worker = seeded_worker(store.as_ref(), "Maria").await;

        assert!(!service.is_saved(&employer_id, &worker.id).await.unwrap());

        service.save(&employer_id, &worker.id).await.unwrap();
        // saving twice keeps exactly one entry
        service.save(&employer_id, &worker.id).await.unwrap();

        assert!(service.is_saved(&employer_id, &worker.id).await.unwrap());
        assert_eq!(service.list_ids(&employer_id).await.unwrap(), vec![worker.id]);
        let listed = service.list_saved(&employer_id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Maria");

        service.unsave(&employer_id, &worker.id).await.unwrap();
        // unsaving what is already gone is a no-op
        service.unsave(&employer_id, &worker.id).await.unwrap();
        assert!(!service.is_saved(&employer_id, &worker.id).await.unwrap());
        assert!(service.list_saved(&employer_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn saving_an_unknown_worker_is_not_found() {
        let store = Arc::new(MemStore::new());
        let service = SavedWorkerService::with_dependencies(store.clone(), store);
        let err = service.save(&new_id(), &new_id()).await.unwrap_err();
        assert!(matches!(err, error::SystemError::NotFound(_)));
    }
}
