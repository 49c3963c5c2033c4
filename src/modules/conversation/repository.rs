use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    api::error,
    modules::{
        conversation::{model::ConversationSummary, schema::ConversationEntity},
        session::UserRole,
    },
};

#[async_trait::async_trait]
pub trait ConversationRepository {
    async fn find_by_id(
        &self,
        id: &Uuid,
    ) -> Result<Option<ConversationEntity>, error::SystemError>;

    async fn find_by_pair(
        &self,
        worker_id: &Uuid,
        employer_id: &Uuid,
    ) -> Result<Option<ConversationEntity>, error::SystemError>;

    /// Returns Conflict when the pair already exists; the service resolves
    /// that by re-fetching once.
    async fn create(
        &self,
        worker_id: &Uuid,
        employer_id: &Uuid,
    ) -> Result<ConversationEntity, error::SystemError>;

    /// The viewer's side (worker or employer) decides which column the
    /// profile id is matched against and whose messages count as unread.
    async fn list_for_profile(
        &self,
        profile_id: &Uuid,
        role: &UserRole,
    ) -> Result<Vec<ConversationSummary>, error::SystemError>;

    async fn record_last_message(
        &self,
        conversation_id: &Uuid,
        content: &str,
        at: DateTime<Utc>,
    ) -> Result<(), error::SystemError>;
}
