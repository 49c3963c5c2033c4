use uuid::Uuid;

use crate::{
    api::error,
    modules::employer::{
        model::{InsertEmployerProfile, UpdateEmployerProfileModel},
        schema::EmployerProfileEntity,
    },
};

#[async_trait::async_trait]
pub trait EmployerRepository {
    async fn find_by_id(
        &self,
        id: &Uuid,
    ) -> Result<Option<EmployerProfileEntity>, error::SystemError>;

    async fn find_by_user_id(
        &self,
        user_id: &Uuid,
    ) -> Result<Option<EmployerProfileEntity>, error::SystemError>;

    async fn create(
        &self,
        profile: &InsertEmployerProfile,
    ) -> Result<EmployerProfileEntity, error::SystemError>;

    async fn update_by_user_id(
        &self,
        user_id: &Uuid,
        changes: &UpdateEmployerProfileModel,
    ) -> Result<EmployerProfileEntity, error::SystemError>;
}
