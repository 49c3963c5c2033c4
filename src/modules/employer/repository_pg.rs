use uuid::Uuid;

use crate::{
    api::error,
    modules::employer::{
        model::{InsertEmployerProfile, UpdateEmployerProfileModel},
        repository::EmployerRepository,
        schema::EmployerProfileEntity,
    },
};

#[derive(Clone)]
pub struct EmployerRepositoryPg {
    pool: sqlx::PgPool,
}

impl EmployerRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl EmployerRepository for EmployerRepositoryPg {
    async fn find_by_id(
        &self,
        id: &Uuid,
    ) -> Result<Option<EmployerProfileEntity>, error::SystemError> {
        let employer = sqlx::query_as::<_, EmployerProfileEntity>(
            "SELECT * FROM employer_profiles WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(employer)
    }

    async fn find_by_user_id(
        &self,
        user_id: &Uuid,
    ) -> Result<Option<EmployerProfileEntity>, error::SystemError> {
        let employer = sqlx::query_as::<_, EmployerProfileEntity>(
            "SELECT * FROM employer_profiles WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(employer)
    }

    async fn create(
        &self,
        profile: &InsertEmployerProfile,
    ) -> Result<EmployerProfileEntity, error::SystemError> {
        let id = Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext));
        let employer = sqlx::query_as::<_, EmployerProfileEntity>(
            r#"
            INSERT INTO employer_profiles (id, user_id, company_name, country, country_code, bio)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(profile.user_id)
        .bind(&profile.company_name)
        .bind(&profile.country)
        .bind(&profile.country_code)
        .bind(&profile.bio)
        .fetch_one(&self.pool)
        .await?;
        Ok(employer)
    }

    async fn update_by_user_id(
        &self,
        user_id: &Uuid,
        changes: &UpdateEmployerProfileModel,
    ) -> Result<EmployerProfileEntity, error::SystemError> {
        let employer = sqlx::query_as::<_, EmployerProfileEntity>(
            r#"
            UPDATE employer_profiles
            SET
                company_name = COALESCE($2, company_name),
                avatar_url   = CASE WHEN $3::boolean THEN $4 ELSE avatar_url END,
                country      = COALESCE($5, country),
                country_code = COALESCE($6, country_code),
                bio          = COALESCE($7, bio)
            WHERE user_id = $1
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(&changes.company_name)
        .bind(changes.avatar_url.is_some())
        .bind(changes.avatar_url.as_ref().and_then(|v| v.as_ref()))
        .bind(&changes.country)
        .bind(&changes.country_code)
        .bind(&changes.bio)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| error::SystemError::not_found("Employer profile not found"))?;

        Ok(employer)
    }
}
