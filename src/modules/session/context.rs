use serde::Serialize;
use std::collections::HashSet;
use uuid::Uuid;

use crate::api::error;
use crate::modules::employer::model::{CreateEmployerProfileModel, UpdateEmployerProfileModel};
use crate::modules::employer::schema::EmployerProfileEntity;
use crate::modules::employer::service::EmployerService;
use crate::modules::saved_worker::service::SavedWorkerService;
use crate::modules::session::UserRole;
use crate::modules::worker::model::{CreateWorkerProfileModel, UpdateWorkerProfileModel};
use crate::modules::worker::schema::WorkerProfileEntity;
use crate::modules::worker::service::WorkerService;

/// Per-session state, built once at login (or per request at the HTTP
/// boundary) and handed explicitly to whatever needs it. Holds the caller's
/// profile and, for employers, an in-memory mirror of saved-worker ids for
/// O(1) membership checks. All profile and saved-worker mutations flow
/// through here so the mirror stays consistent with the store.
pub struct SessionContext {
    pub user_id: Uuid,
    pub role: UserRole,
    pub worker_profile: Option<WorkerProfileEntity>,
    pub employer_profile: Option<EmployerProfileEntity>,
    saved_worker_ids: HashSet<Uuid>,
    workers: WorkerService,
    employers: EmployerService,
    saved: SavedWorkerService,
}

#[derive(Serialize)]
pub struct SessionResponse {
    pub user_id: Uuid,
    pub role: UserRole,
    pub worker_profile: Option<WorkerProfileEntity>,
    pub employer_profile: Option<EmployerProfileEntity>,
    pub saved_worker_ids: Vec<Uuid>,
}

impl SessionContext {
    pub async fn load(
        user_id: Uuid,
        role: UserRole,
        workers: WorkerService,
        employers: EmployerService,
        saved: SavedWorkerService,
    ) -> Result<Self, error::SystemError> {
        let mut ctx = SessionContext {
            user_id,
            role,
            worker_profile: None,
            employer_profile: None,
            saved_worker_ids: HashSet::new(),
            workers,
            employers,
            saved,
        };

        match ctx.role {
            UserRole::Worker => {
                ctx.worker_profile = ctx.workers.get_by_user_id(&user_id).await?;
            }
            UserRole::Employer => {
                ctx.employer_profile = ctx.employers.get_by_user_id(&user_id).await?;
                if let Some(employer) = &ctx.employer_profile {
                    ctx.saved_worker_ids =
                        ctx.saved.list_ids(&employer.id).await?.into_iter().collect();
                }
            }
        }

        Ok(ctx)
    }

    /// The id other participants see: worker profile id or employer
    /// profile id, depending on role.
    pub fn profile_id(&self) -> Option<Uuid> {
        match self.role {
            UserRole::Worker => self.worker_profile.as_ref().map(|p| p.id),
            UserRole::Employer => self.employer_profile.as_ref().map(|p| p.id),
        }
    }

    pub fn require_profile_id(&self) -> Result<Uuid, error::SystemError> {
        self.profile_id().ok_or_else(|| error::SystemError::not_found("Profile not found"))
    }

    pub fn is_worker_saved(&self, worker_id: &Uuid) -> bool {
        self.saved_worker_ids.contains(worker_id)
    }

    fn require_employer_id(&self) -> Result<Uuid, error::SystemError> {
        self.employer_profile
            .as_ref()
            .map(|p| p.id)
            .ok_or_else(|| error::SystemError::forbidden("Employer profile required"))
    }

    /// Optimistic: the mirror is updated first and rolled back if the
    /// store write fails.
    pub async fn save_worker(&mut self, worker_id: Uuid) -> Result<(), error::SystemError> {
        let employer_id = self.require_employer_id()?;

        let inserted = self.saved_worker_ids.insert(worker_id);
        if let Err(err) = self.saved.save(&employer_id, &worker_id).await {
            if inserted {
                self.saved_worker_ids.remove(&worker_id);
            }
            return Err(err);
        }
        Ok(())
    }

    pub async fn unsave_worker(&mut self, worker_id: Uuid) -> Result<(), error::SystemError> {
        let employer_id = self.require_employer_id()?;

        let removed = self.saved_worker_ids.remove(&worker_id);
        if let Err(err) = self.saved.unsave(&employer_id, &worker_id).await {
            if removed {
                self.saved_worker_ids.insert(worker_id);
            }
            return Err(err);
        }
        Ok(())
    }

    pub async fn create_worker_profile(
        &mut self,
        model: CreateWorkerProfileModel,
    ) -> Result<WorkerProfileEntity, error::SystemError> {
        if self.role != UserRole::Worker {
            return Err(error::SystemError::forbidden("Worker role required"));
        }
        let created = self.workers.create_profile(self.user_id, model).await?;
        self.worker_profile = Some(created.clone());
        Ok(created)
    }

    pub async fn update_worker_profile(
        &mut self,
        changes: UpdateWorkerProfileModel,
    ) -> Result<WorkerProfileEntity, error::SystemError> {
        if self.role != UserRole::Worker {
            return Err(error::SystemError::forbidden("Worker role required"));
        }
        let updated = self.workers.update_by_user_id(self.user_id, changes).await?;
        self.worker_profile = Some(updated.clone());
        Ok(updated)
    }

    pub async fn create_employer_profile(
        &mut self,
        model: CreateEmployerProfileModel,
    ) -> Result<EmployerProfileEntity, error::SystemError> {
        if self.role != UserRole::Employer {
            return Err(error::SystemError::forbidden("Employer role required"));
        }
        let created = self.employers.create_profile(self.user_id, model).await?;
        self.employer_profile = Some(created.clone());
        Ok(created)
    }

    pub async fn update_employer_profile(
        &mut self,
        changes: UpdateEmployerProfileModel,
    ) -> Result<EmployerProfileEntity, error::SystemError> {
        if self.role != UserRole::Employer {
            return Err(error::SystemError::forbidden("Employer role required"));
        }
        let updated = self.employers.update_by_user_id(self.user_id, changes).await?;
        self.employer_profile = Some(updated.clone());
        Ok(updated)
    }

    pub fn into_response(self) -> SessionResponse {
        SessionResponse {
            user_id: self.user_id,
            role: self.role,
            worker_profile: self.worker_profile,
            employer_profile: self.employer_profile,
            saved_worker_ids: self.saved_worker_ids.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::modules::memory::MemStore;
    use crate::modules::saved_worker::repository::SavedWorkerRepository;
    use crate::modules::worker::repository::WorkerRepository;
    use crate::modules::worker::schema::AvailabilityType;

    fn new_id() -> Uuid {
        Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext))
    }

    fn worker_model(name: &str) -> CreateWorkerProfileModel {
        CreateWorkerProfileModel {
            name: name.to_string(),
            country: "Philippines".to_string(),
            country_code: "PH".to_string(),
            headline: "VA".to_string(),
            skills: vec![],
            hourly_rate_min: 2.0,
            hourly_rate_max: 3.0,
            availability_hours: 8,
            availability_type: AvailabilityType::FullTime,
            bio: String::new(),
        }
    }

    fn services(
        store: Arc<MemStore>,
        saved_repo: Arc<dyn SavedWorkerRepository + Send + Sync>,
    ) -> (WorkerService, EmployerService, SavedWorkerService) {
        (
            WorkerService::with_dependencies(store.clone(), None),
            EmployerService::with_dependencies(store.clone()),
            SavedWorkerService::with_dependencies(saved_repo, store),
        )
    }

    async fn employer_context(
        store: Arc<MemStore>,
        saved_repo: Arc<dyn SavedWorkerRepository + Send + Sync>,
    ) -> SessionContext {
        let (workers, employers, saved) = services(store, saved_repo);
        let user_id = new_id();
        employers
            .create_profile(
                user_id,
                CreateEmployerProfileModel {
                    company_name: "Acme".to_string(),
                    country: "United States".to_string(),
                    country_code: "US".to_string(),
                    bio: String::new(),
                },
            )
            .await
            .unwrap();
        SessionContext::load(user_id, UserRole::Employer, workers, employers, saved)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn saved_mirror_tracks_the_store() {
        let store = Arc::new(MemStore::new());
        let mut ctx = employer_context(store.clone(), store.clone()).await;
        let worker = WorkerRepository::create(
            store.as_ref(),
            &crate::modules::worker::model::InsertWorkerProfile {
                user_id: new_id(),
                name: "W".to_string(),
                country: "Philippines".to_string(),
                country_code: "PH".to_string(),
                headline: "VA".to_string(),
                skills: vec![],
                hourly_rate_min: 2.0,
                hourly_rate_max: 3.0,
                availability_hours: 8,
                availability_type: AvailabilityType::FullTime,
                bio: String::new(),
            },
        )
        .await
        .unwrap();

        assert!(!ctx.is_worker_saved(&worker.id));
        ctx.save_worker(worker.id).await.unwrap();
        assert!(ctx.is_worker_saved(&worker.id));
        // idempotent on both sides
        ctx.save_worker(worker.id).await.unwrap();
        assert!(store.is_saved(&ctx.employer_profile.as_ref().unwrap().id, &worker.id)
            .await
            .unwrap());

        ctx.unsave_worker(worker.id).await.unwrap();
        assert!(!ctx.is_worker_saved(&worker.id));
        ctx.unsave_worker(worker.id).await.unwrap();
    }

    /// Store that refuses writes so rollback paths can be observed.
    struct DownRepo;

    #[async_trait::async_trait]
    impl SavedWorkerRepository for DownRepo {
        async fn save(&self, _: &Uuid, _: &Uuid) -> Result<(), error::SystemError> {
            Err(error::SystemError::unavailable("down"))
        }
        async fn unsave(&self, _: &Uuid, _: &Uuid) -> Result<(), error::SystemError> {
            Err(error::SystemError::unavailable("down"))
        }
        async fn is_saved(&self, _: &Uuid, _: &Uuid) -> Result<bool, error::SystemError> {
            Ok(false)
        }
        async fn list_ids(&self, _: &Uuid) -> Result<Vec<Uuid>, error::SystemError> {
            Ok(Vec::new())
        }
        async fn list_saved(
            &self,
            _: &Uuid,
        ) -> Result<Vec<crate::modules::worker::schema::WorkerProfileEntity>, error::SystemError>
        {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn failed_store_writes_roll_the_mirror_back() {
        let store = Arc::new(MemStore::new());
        let mut ctx = employer_context(store.clone(), Arc::new(DownRepo)).await;
        let worker = WorkerRepository::create(
            store.as_ref(),
            &crate::modules::worker::model::InsertWorkerProfile {
                user_id: new_id(),
                name: "W".to_string(),
                country: "Philippines".to_string(),
                country_code: "PH".to_string(),
                headline: "VA".to_string(),
                skills: vec![],
                hourly_rate_min: 2.0,
                hourly_rate_max: 3.0,
                availability_hours: 8,
                availability_type: AvailabilityType::FullTime,
                bio: String::new(),
            },
        )
        .await
        .unwrap();

        let err = ctx.save_worker(worker.id).await.unwrap_err();
        assert!(matches!(err, error::SystemError::Unavailable(_)));
        assert!(!ctx.is_worker_saved(&worker.id));
    }

    #[tokio::test]
    async fn profile_mutations_are_role_gated_and_update_the_context() {
        let store = Arc::new(MemStore::new());
        let (workers, employers, saved) = services(store.clone(), store);
        let user_id = new_id();
        let mut ctx = SessionContext::load(
            user_id,
            UserRole::Worker,
            workers,
            employers,
            saved,
        )
        .await
        .unwrap();

        let err = ctx
            .create_employer_profile(CreateEmployerProfileModel {
                company_name: "Nope".to_string(),
                country: "US".to_string(),
                country_code: "US".to_string(),
                bio: String::new(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, error::SystemError::Forbidden(_)));

        let created = ctx.create_worker_profile(worker_model("Me")).await.unwrap();
        assert_eq!(ctx.profile_id(), Some(created.id));

        let updated = ctx
            .update_worker_profile(UpdateWorkerProfileModel {
                headline: Some("Senior VA".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(updated.headline, "Senior VA");
        assert_eq!(
            ctx.worker_profile.as_ref().map(|p| p.headline.clone()),
            Some("Senior VA".to_string())
        );
    }
}
