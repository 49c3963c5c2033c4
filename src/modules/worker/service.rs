use chrono::Utc;
use log::info;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::error;
use crate::configs::RedisCache;
use crate::constants::DEFAULT_PAGE_LIMIT;

use crate::modules::worker::filter::FilterState;
use crate::modules::worker::model::{
    CreateWorkerProfileModel, InsertWorkerProfile, UpdateWorkerProfileModel,
};
use crate::modules::worker::repository::WorkerRepository;
use crate::modules::worker::schema::WorkerProfileEntity;

#[derive(Clone)]
pub struct WorkerService {
    repo: Arc<dyn WorkerRepository + Send + Sync>,
    cache: Option<Arc<RedisCache>>,
}

impl WorkerService {
    pub fn with_dependencies(
        repo: Arc<dyn WorkerRepository + Send + Sync>,
        cache: Option<Arc<RedisCache>>,
    ) -> Self {
        info!("WorkerService initialized with dependencies");
        WorkerService { repo, cache }
    }

    pub async fn search(
        &self,
        filter: FilterState,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<WorkerProfileEntity>, error::SystemError> {
        if offset.is_some() && limit.is_none() {
            return Err(error::SystemError::validation("Offset requires a limit"));
        }

        // Inverted ranges are a legal client state: empty result, no store hit.
        if !filter.is_satisfiable() {
            return Ok(Vec::new());
        }

        let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT);
        let offset = offset.unwrap_or(0);
        self.repo.find_all(&filter, Utc::now(), limit, offset).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<WorkerProfileEntity, error::SystemError> {
        let key = format!("worker:{}", id);
        if let Some(cache) = &self.cache {
            if let Some(cached) = cache.get::<WorkerProfileEntity>(&key).await? {
                info!("Worker {} found in cache", id);
                return Ok(cached);
            }
        }

        let worker = self
            .repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Worker profile not found"))?;

        if let Some(cache) = &self.cache {
            cache.set(&key, &worker, 3600).await?;
        }
        Ok(worker)
    }

    pub async fn get_by_user_id(
        &self,
        user_id: &Uuid,
    ) -> Result<Option<WorkerProfileEntity>, error::SystemError> {
        self.repo.find_by_user_id(user_id).await
    }

    pub async fn create_profile(
        &self,
        user_id: Uuid,
        model: CreateWorkerProfileModel,
    ) -> Result<WorkerProfileEntity, error::SystemError> {
        if model.hourly_rate_min > model.hourly_rate_max {
            return Err(error::SystemError::validation(
                "Minimum rate cannot exceed maximum rate",
            ));
        }
        if self.repo.find_by_user_id(&user_id).await?.is_some() {
            return Err(error::SystemError::Conflict(None));
        }

        let insert = InsertWorkerProfile {
            user_id,
            name: model.name,
            country: model.country,
            country_code: model.country_code,
            headline: model.headline,
            skills: model.skills,
            hourly_rate_min: model.hourly_rate_min,
            hourly_rate_max: model.hourly_rate_max,
            availability_hours: model.availability_hours,
            availability_type: model.availability_type,
            bio: model.bio,
        };
        self.repo.create(&insert).await
    }

    pub async fn update_by_user_id(
        &self,
        user_id: Uuid,
        changes: UpdateWorkerProfileModel,
    ) -> Result<WorkerProfileEntity, error::SystemError> {
        if changes.is_empty() {
            return Err(error::SystemError::validation("No fields to update"));
        }
        if let (Some(min), Some(max)) = (changes.hourly_rate_min, changes.hourly_rate_max) {
            if min > max {
                return Err(error::SystemError::validation(
                    "Minimum rate cannot exceed maximum rate",
                ));
            }
        }

        let worker = self.repo.update_by_user_id(&user_id, &changes).await?;

        if let Some(cache) = &self.cache {
            let key = format!("worker:{}", worker.id);
            cache.delete(&key).await?;
        }
        Ok(worker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::memory::MemStore;
    use crate::modules::worker::schema::AvailabilityType;

    fn create_model(name: &str) -> CreateWorkerProfileModel {
        CreateWorkerProfileModel {
            name: name.to_string(),
            country: "Philippines".to_string(),
            country_code: "PH".to_string(),
            headline: "WordPress developer".to_string(),
            skills: vec!["WordPress".to_string()],
            hourly_rate_min: 3.0,
            hourly_rate_max: 5.0,
            availability_hours: 8,
            availability_type: AvailabilityType::FullTime,
            bio: String::new(),
        }
    }

    fn service() -> WorkerService {
        WorkerService::with_dependencies(Arc::new(MemStore::new()), None)
    }

    #[tokio::test]
    async fn offset_without_limit_is_a_validation_error() {
        let err =
            service().search(FilterState::default(), None, Some(10)).await.unwrap_err();
        assert!(matches!(err, error::SystemError::Validation(_)));
    }

    #[tokio::test]
    async fn unsatisfiable_filters_return_empty_not_error() {
        let service = service();
        service
            .create_profile(Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext)), create_model("Match Me"))
            .await
            .unwrap();

        let inverted = FilterState { min_rate: 8.0, max_rate: 1.0, ..Default::default() };
        let hits = service.search(inverted, None, None).await.unwrap();
        assert!(hits.is_empty());

        // sanity: the default filter does find the profile
        let hits = service.search(FilterState::default(), None, None).await.unwrap();
        assert_eq!(hits.len(), 1);
    }

    #[tokio::test]
    async fn one_profile_per_account() {
        let service = service();
        let user_id = Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext));
        service.create_profile(user_id, create_model("First")).await.unwrap();
        let err = service.create_profile(user_id, create_model("Second")).await.unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn rate_order_is_checked_before_the_store() {
        let service = service();
        let mut model = create_model("Backwards");
        model.hourly_rate_min = 6.0;
        model.hourly_rate_max = 2.0;
        let err = service
            .create_profile(Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext)), model)
            .await
            .unwrap_err();
        assert!(matches!(err, error::SystemError::Validation(_)));
    }

    #[tokio::test]
    async fn empty_updates_are_rejected() {
        let service = service();
        let err = service
            .update_by_user_id(
                Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext)),
                UpdateWorkerProfileModel::default(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, error::SystemError::Validation(_)));
    }

    #[tokio::test]
    async fn avatar_can_be_cleared_with_an_explicit_null() {
        let service = service();
        let user_id = Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext));
        service.create_profile(user_id, create_model("Avatar")).await.unwrap();

        let set = UpdateWorkerProfileModel {
            avatar_url: Some(Some("https://cdn.example/a.png".to_string())),
            ..Default::default()
        };
        let updated = service.update_by_user_id(user_id, set).await.unwrap();
        assert!(updated.avatar_url.is_some());

        let clear =
            UpdateWorkerProfileModel { avatar_url: Some(None), ..Default::default() };
        let updated = service.update_by_user_id(user_id, clear).await.unwrap();
        assert!(updated.avatar_url.is_none());
    }
}
