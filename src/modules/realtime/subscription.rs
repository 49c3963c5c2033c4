use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;
use uuid::Uuid;

use crate::modules::message::schema::MessageEntity;
use crate::modules::realtime::hub::MessageHub;

/// Pause before re-attaching a dropped feed.
const RECONNECT_DELAY: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, PartialEq)]
pub enum FeedEvent {
    Message(MessageEntity),
    /// The feed lost continuity (lag or channel teardown). The subscriber
    /// is already re-attached; the caller must re-fetch history to fill
    /// the gap. Silent loss is not an option.
    Resync,
}

/// Live handle on one conversation's feed. Dropping it cancels the
/// subscription; no events are delivered after that.
pub struct FeedSubscription {
    conversation_id: Uuid,
    hub: Arc<MessageHub>,
    rx: tokio::sync::broadcast::Receiver<MessageEntity>,
}

impl FeedSubscription {
    pub(crate) fn new(
        conversation_id: Uuid,
        hub: Arc<MessageHub>,
        rx: tokio::sync::broadcast::Receiver<MessageEntity>,
    ) -> Self {
        FeedSubscription { conversation_id, hub, rx }
    }

    pub fn conversation_id(&self) -> Uuid {
        self.conversation_id
    }

    /// Next event on the feed. Cancel-safe: no event is consumed when the
    /// returned future is dropped before completion.
    pub async fn next(&mut self) -> FeedEvent {
        match self.rx.recv().await {
            Ok(message) => FeedEvent::Message(message),
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(
                    conversation_id = %self.conversation_id,
                    skipped,
                    "feed lagged, requesting resync"
                );
                FeedEvent::Resync
            }
            Err(RecvError::Closed) => {
                tracing::warn!(
                    conversation_id = %self.conversation_id,
                    "feed channel closed, re-attaching"
                );
                tokio::time::sleep(RECONNECT_DELAY).await;
                self.rx = self.hub.attach(&self.conversation_id);
                FeedEvent::Resync
            }
        }
    }
}

impl Drop for FeedSubscription {
    fn drop(&mut self) {
        self.hub.detach(&self.conversation_id);
    }
}
