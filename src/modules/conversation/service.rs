use log::info;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::error;
use crate::modules::conversation::model::ConversationSummary;
use crate::modules::conversation::repository::ConversationRepository;
use crate::modules::conversation::schema::ConversationEntity;
use crate::modules::employer::repository::EmployerRepository;
use crate::modules::session::UserRole;
use crate::modules::worker::repository::WorkerRepository;

#[derive(Clone)]
pub struct ConversationService {
    repo: Arc<dyn ConversationRepository + Send + Sync>,
    worker_repo: Arc<dyn WorkerRepository + Send + Sync>,
    employer_repo: Arc<dyn EmployerRepository + Send + Sync>,
}

impl ConversationService {
    pub fn with_dependencies(
        repo: Arc<dyn ConversationRepository + Send + Sync>,
        worker_repo: Arc<dyn WorkerRepository + Send + Sync>,
        employer_repo: Arc<dyn EmployerRepository + Send + Sync>,
    ) -> Self {
        info!("ConversationService initialized with dependencies");
        ConversationService { repo, worker_repo, employer_repo }
    }

    /// Idempotent under racing callers: both sides end up with the same
    /// conversation id. A create that loses the race surfaces as Conflict
    /// and is resolved by one re-fetch.
    pub async fn get_or_create(
        &self,
        worker_id: Uuid,
        employer_id: Uuid,
    ) -> Result<ConversationEntity, error::SystemError> {
        if self.worker_repo.find_by_id(&worker_id).await?.is_none() {
            return Err(error::SystemError::not_found("Worker profile not found"));
        }
        if self.employer_repo.find_by_id(&employer_id).await?.is_none() {
            return Err(error::SystemError::not_found("Employer profile not found"));
        }

        if let Some(existing) = self.repo.find_by_pair(&worker_id, &employer_id).await? {
            return Ok(existing);
        }

        match self.repo.create(&worker_id, &employer_id).await {
            Ok(created) => Ok(created),
            Err(err) if err.is_conflict() => self
                .repo
                .find_by_pair(&worker_id, &employer_id)
                .await?
                .ok_or_else(|| error::SystemError::not_found("Conversation not found")),
            Err(err) => Err(err),
        }
    }

    pub async fn get_by_id(&self, id: &Uuid) -> Result<ConversationEntity, error::SystemError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Conversation not found"))
    }

    /// The caller must already hold the viewer's profile id for `role`.
    pub async fn list_for_profile(
        &self,
        profile_id: &Uuid,
        role: &UserRole,
    ) -> Result<Vec<ConversationSummary>, error::SystemError> {
        self.repo.list_for_profile(profile_id, role).await
    }

    pub async fn require_participant(
        &self,
        conversation_id: &Uuid,
        profile_id: &Uuid,
    ) -> Result<ConversationEntity, error::SystemError> {
        let conversation = self.get_by_id(conversation_id).await?;
        if !conversation.is_participant(profile_id) {
            return Err(error::SystemError::forbidden(
                "Not a participant of this conversation",
            ));
        }
        Ok(conversation)
    }
}
