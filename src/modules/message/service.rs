use log::{info, warn};
use std::sync::Arc;
use uuid::Uuid;

use crate::api::error;
use crate::constants::MAX_MESSAGE_LEN;
use crate::modules::conversation::repository::ConversationRepository;
use crate::modules::message::model::InsertMessage;
use crate::modules::message::repository::MessageRepository;
use crate::modules::message::schema::MessageEntity;
use crate::modules::realtime::hub::MessageHub;

#[derive(Clone)]
pub struct MessageService {
    repo: Arc<dyn MessageRepository + Send + Sync>,
    conversation_repo: Arc<dyn ConversationRepository + Send + Sync>,
    hub: Arc<MessageHub>,
}

impl MessageService {
    pub fn with_dependencies(
        repo: Arc<dyn MessageRepository + Send + Sync>,
        conversation_repo: Arc<dyn ConversationRepository + Send + Sync>,
        hub: Arc<MessageHub>,
    ) -> Self {
        info!("MessageService initialized with dependencies");
        MessageService { repo, conversation_repo, hub }
    }

    pub fn hub(&self) -> Arc<MessageHub> {
        Arc::clone(&self.hub)
    }

    /// Validates, persists, then publishes, in that order. Nothing reaches
    /// the live feed that is not already in the store.
    pub async fn send_message(
        &self,
        conversation_id: &Uuid,
        sender_id: &Uuid,
        content: &str,
    ) -> Result<MessageEntity, error::SystemError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(error::SystemError::validation("Message cannot be empty"));
        }
        if content.chars().count() > MAX_MESSAGE_LEN {
            return Err(error::SystemError::validation(
                "Message cannot exceed 2000 characters",
            ));
        }

        let conversation = self
            .conversation_repo
            .find_by_id(conversation_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Conversation not found"))?;
        if !conversation.is_participant(sender_id) {
            return Err(error::SystemError::forbidden(
                "Not a participant of this conversation",
            ));
        }

        let insert = InsertMessage {
            conversation_id: *conversation_id,
            sender_id: *sender_id,
            content: content.to_string(),
        };
        let message = self.repo.create(&insert).await?;

        // The snapshot is denormalized list data; the message itself is
        // already durable, so a failure here must not fail the send.
        if let Err(err) = self
            .conversation_repo
            .record_last_message(conversation_id, &message.content, message.created_at)
            .await
        {
            warn!("Failed to update conversation snapshot for {conversation_id}: {err:?}");
        }

        self.hub.publish(conversation_id, message.clone());

        Ok(message)
    }

    pub async fn history(
        &self,
        conversation_id: &Uuid,
        viewer_id: &Uuid,
    ) -> Result<Vec<MessageEntity>, error::SystemError> {
        self.require_participant(conversation_id, viewer_id).await?;
        self.repo.history(conversation_id).await
    }

    /// Bulk read receipt. Never published on the live feed.
    pub async fn mark_read(
        &self,
        conversation_id: &Uuid,
        reader_id: &Uuid,
    ) -> Result<u64, error::SystemError> {
        self.require_participant(conversation_id, reader_id).await?;
        self.repo.mark_read(conversation_id, reader_id).await
    }

    async fn require_participant(
        &self,
        conversation_id: &Uuid,
        profile_id: &Uuid,
    ) -> Result<(), error::SystemError> {
        let conversation = self
            .conversation_repo
            .find_by_id(conversation_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Conversation not found"))?;
        if !conversation.is_participant(profile_id) {
            return Err(error::SystemError::forbidden(
                "Not a participant of this conversation",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::modules::conversation::schema::ConversationEntity;
    use crate::modules::memory::MemStore;
    use crate::modules::realtime::subscription::FeedEvent;

    async fn service() -> (MessageService, ConversationEntity) {
        let store = Arc::new(MemStore::new());
        let conversation = ConversationRepository::create(
            store.as_ref(),
            &Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext)),
            &Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext)),
        )
        .await
        .unwrap();
        let service = MessageService::with_dependencies(
            store.clone(),
            store,
            Arc::new(MessageHub::new()),
        );
        (service, conversation)
    }

    #[tokio::test]
    async fn empty_and_whitespace_messages_are_rejected() {
        let (service, conversation) = service().await;
        for content in ["", "   ", "\n\t"] {
            let err = service
                .send_message(&conversation.id, &conversation.worker_id, content)
                .await
                .unwrap_err();
            assert!(matches!(err, error::SystemError::Validation(_)));
        }
    }

    #[tokio::test]
    async fn length_limit_is_2000_chars_and_rejections_write_nothing() {
        let (service, conversation) = service().await;

        let at_limit = "x".repeat(MAX_MESSAGE_LEN);
        service
            .send_message(&conversation.id, &conversation.worker_id, &at_limit)
            .await
            .unwrap();

        let over = "x".repeat(MAX_MESSAGE_LEN + 1);
        let err = service
            .send_message(&conversation.id, &conversation.worker_id, &over)
            .await
            .unwrap_err();
        assert!(matches!(err, error::SystemError::Validation(_)));

        let history = service.history(&conversation.id, &conversation.worker_id).await.unwrap();
        assert_eq!(history.len(), 1);
    }

    #[tokio::test]
    async fn outsiders_cannot_send_or_read() {
        let (service, conversation) = service().await;
        let outsider = Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext));

        let err =
            service.send_message(&conversation.id, &outsider, "hello").await.unwrap_err();
        assert!(matches!(err, error::SystemError::Forbidden(_)));

        let err = service.history(&conversation.id, &outsider).await.unwrap_err();
        assert!(matches!(err, error::SystemError::Forbidden(_)));
    }

    #[tokio::test]
    async fn sent_messages_are_durable_before_they_reach_the_feed() {
        let (service, conversation) = service().await;
        let mut feed = service.hub().subscribe(conversation.id);

        let sent = service
            .send_message(&conversation.id, &conversation.worker_id, "  hello there  ")
            .await
            .unwrap();
        assert_eq!(sent.content, "hello there");

        match feed.next().await {
            FeedEvent::Message(published) => {
                assert_eq!(published, sent);
                let history =
                    service.history(&conversation.id, &conversation.worker_id).await.unwrap();
                assert!(history.contains(&published));
            }
            other => panic!("unexpected feed event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn mark_read_never_reaches_the_feed() {
        let (service, conversation) = service().await;

        service
            .send_message(&conversation.id, &conversation.employer_id, "ping")
            .await
            .unwrap();

        let mut feed = service.hub().subscribe(conversation.id);
        let updated =
            service.mark_read(&conversation.id, &conversation.worker_id).await.unwrap();
        assert_eq!(updated, 1);

        let quiet = tokio::time::timeout(Duration::from_millis(50), feed.next()).await;
        assert!(quiet.is_err(), "read receipts must not be published");
    }
}
