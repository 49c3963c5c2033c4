use log::info;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::error;
use crate::modules::employer::model::{
    CreateEmployerProfileModel, InsertEmployerProfile, UpdateEmployerProfileModel,
};
use crate::modules::employer::repository::EmployerRepository;
use crate::modules::employer::schema::EmployerProfileEntity;

#[derive(Clone)]
pub struct EmployerService {
    repo: Arc<dyn EmployerRepository + Send + Sync>,
}

impl EmployerService {
    pub fn with_dependencies(repo: Arc<dyn EmployerRepository + Send + Sync>) -> Self {
        info!("EmployerService initialized with dependencies");
        EmployerService { repo }
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<EmployerProfileEntity, error::SystemError> {
        self.repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Employer profile not found"))
    }

    pub async fn get_by_user_id(
        &self,
        user_id: &Uuid,
    ) -> Result<Option<EmployerProfileEntity>, error::SystemError> {
        self.repo.find_by_user_id(user_id).await
    }

    pub async fn create_profile(
        &self,
        user_id: Uuid,
        model: CreateEmployerProfileModel,
    ) -> Result<EmployerProfileEntity, error::SystemError> {
        if self.repo.find_by_user_id(&user_id).await?.is_some() {
            return Err(error::SystemError::Conflict(None));
        }
        let insert = InsertEmployerProfile {
            user_id,
            company_name: model.company_name,
            country: model.country,
            country_code: model.country_code,
            bio: model.bio,
        };
        self.repo.create(&insert).await
    }

    pub async fn update_by_user_id(
        &self,
        user_id: Uuid,
        changes: UpdateEmployerProfileModel,
    ) -> Result<EmployerProfileEntity, error::SystemError> {
        if changes.is_empty() {
            return Err(error::SystemError::validation("No fields to update"));
        }
        self.repo.update_by_user_id(&user_id, &changes).await
    }
}
