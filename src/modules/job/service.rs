use log::info;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::error;
use crate::constants::DEFAULT_PAGE_LIMIT;
use crate::modules::job::model::{CreateJobModel, InsertJob, JobSearch, UpdateJobModel};
use crate::modules::job::repository::JobRepository;
use crate::modules::job::schema::JobEntity;

#[derive(Clone)]
pub struct JobService {
    repo: Arc<dyn JobRepository + Send + Sync>,
}

impl JobService {
    pub fn with_dependencies(repo: Arc<dyn JobRepository + Send + Sync>) -> Self {
        info!("JobService initialized with dependencies");
        JobService { repo }
    }

    pub async fn search(
        &self,
        search: JobSearch,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<JobEntity>, error::SystemError> {
        if offset.is_some() && limit.is_none() {
            return Err(error::SystemError::validation("Offset requires a limit"));
        }
        let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT);
        let offset = offset.unwrap_or(0);
        self.repo.find_all(&search, limit, offset).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<JobEntity, error::SystemError> {
        self.repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Job not found"))
    }

    pub async fn list_by_employer(
        &self,
        employer_id: &Uuid,
    ) -> Result<Vec<JobEntity>, error::SystemError> {
        self.repo.find_by_employer(employer_id).await
    }

    pub async fn create_job(
        &self,
        employer_id: Uuid,
        model: CreateJobModel,
    ) -> Result<JobEntity, error::SystemError> {
        if model.hourly_rate_min > model.hourly_rate_max {
            return Err(error::SystemError::validation(
                "Minimum rate cannot exceed maximum rate",
            ));
        }
        let insert = InsertJob {
            employer_id,
            title: model.title,
            description: model.description,
            skills: model.skills,
            hourly_rate_min: model.hourly_rate_min,
            hourly_rate_max: model.hourly_rate_max,
            availability_hours: model.availability_hours,
            country_preference: model.country_preference,
        };
        self.repo.create(&insert).await
    }

    pub async fn update_job(
        &self,
        employer_id: &Uuid,
        job_id: Uuid,
        changes: UpdateJobModel,
    ) -> Result<JobEntity, error::SystemError> {
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
        self.require_owner(employer_id, &job_id).await?;
        self.repo.update(&job_id, &changes).await
    }

    pub async fn deactivate_job(
        &self,
        employer_id: &Uuid,
        job_id: Uuid,
    ) -> Result<(), error::SystemError> {
        self.require_owner(employer_id, &job_id).await?;
        self.repo.deactivate(&job_id).await?;
        Ok(())
    }

    async fn require_owner(
        &self,
        employer_id: &Uuid,
        job_id: &Uuid,
    ) -> Result<(), error::SystemError> {
        let job = self
            .repo
            .find_by_id(job_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Job not found"))?;
        if job.employer_id != *employer_id {
            return Err(error::SystemError::forbidden("Not the owner of this job"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::memory::MemStore;

    fn new_id() -> Uuid {
        Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext))
    }

    fn create_model(title: &str) -> CreateJobModel {
        CreateJobModel {
            title: title.to_string(),
            description: "desc".to_string(),
            skills: vec!["WordPress".to_string()],
            hourly_rate_min: 2.0,
            hourly_rate_max: 4.0,
            availability_hours: 6,
            country_preference: None,
        }
    }

    fn service() -> JobService {
        JobService::with_dependencies(Arc::new(MemStore::new()))
    }

    #[tokio::test]
    async fn offset_without_limit_is_a_validation_error() {
        let err = service().search(JobSearch::default(), None, Some(5)).await.unwrap_err();
        assert!(matches!(err, error::SystemError::Validation(_)));
    }

    #[tokio::test]
    async fn only_the_owner_can_update_or_deactivate() {
        let service = service();
        let owner = new_id();
        let job = service.create_job(owner, create_model("Mine")).await.unwrap();

        let stranger = new_id();
        let changes =
            UpdateJobModel { title: Some("Theirs".to_string()), ..Default::default() };
        let err = service.update_job(&stranger, job.id, changes).await.unwrap_err();
        assert!(matches!(err, error::SystemError::Forbidden(_)));

        let err = service.deactivate_job(&stranger, job.id).await.unwrap_err();
        assert!(matches!(err, error::SystemError::Forbidden(_)));

        service.deactivate_job(&owner, job.id).await.unwrap();
        assert!(!service.get_by_id(job.id).await.unwrap().is_active);
    }

    #[tokio::test]
    async fn deleting_a_job_keeps_it_readable() {
        let service = service();
        let owner = new_id();
        let job = service.create_job(owner, create_model("Soft")).await.unwrap();
        service.deactivate_job(&owner, job.id).await.unwrap();

        // direct lookup still works, search no longer lists it
        assert_eq!(service.get_by_id(job.id).await.unwrap().id, job.id);
        let listed = service.search(JobSearch::default(), None, None).await.unwrap();
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn country_preference_can_be_cleared() {
        let service = service();
        let owner = new_id();
        let mut model = create_model("Located");
        model.country_preference = Some("Philippines".to_string());
        let job = service.create_job(owner, model).await.unwrap();

        let changes =
            UpdateJobModel { country_preference: Some(None), ..Default::default() };
        let updated = service.update_job(&owner, job.id, changes).await.unwrap();
        assert!(updated.country_preference.is_none());
    }
}
