use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::modules::message::schema::MessageEntity;
use crate::modules::realtime::subscription::FeedSubscription;

/// Buffered events per conversation feed before a slow subscriber lags.
pub const FEED_CAPACITY: usize = 256;

/// Per-conversation fan-out of persisted messages. Publishing happens only
/// after the row is stored; subscribers receive content messages and
/// nothing else (read receipts never travel here).
pub struct MessageHub {
    channels: RwLock<HashMap<Uuid, broadcast::Sender<MessageEntity>>>,
}

impl MessageHub {
    pub fn new() -> Self {
        MessageHub { channels: RwLock::new(HashMap::new()) }
    }

    pub fn publish(&self, conversation_id: &Uuid, message: MessageEntity) {
        let channels = self.channels.read().unwrap_or_else(|e| e.into_inner());
        if let Some(tx) = channels.get(conversation_id) {
            // Send only fails when no subscriber is listening; that is fine,
            // the message is already persisted.
            let _ = tx.send(message);
        }
    }

    pub fn subscribe(self: &Arc<Self>, conversation_id: Uuid) -> FeedSubscription {
        let rx = self.attach(&conversation_id);
        FeedSubscription::new(conversation_id, Arc::clone(self), rx)
    }

    pub(crate) fn attach(&self, conversation_id: &Uuid) -> broadcast::Receiver<MessageEntity> {
        let mut channels = self.channels.write().unwrap_or_else(|e| e.into_inner());
        channels
            .entry(*conversation_id)
            .or_insert_with(|| broadcast::channel(FEED_CAPACITY).0)
            .subscribe()
    }

    /// Called when a subscription is dropped. Removes the conversation's
    /// channel once the departing receiver is its last one, so the map
    /// does not accumulate dead feeds over the server's lifetime.
    pub(crate) fn detach(&self, conversation_id: &Uuid) {
        let mut channels = self.channels.write().unwrap_or_else(|e| e.into_inner());
        if let Some(tx) = channels.get(conversation_id) {
            // the departing receiver is still counted here, so 1 means last
            if tx.receiver_count() <= 1 {
                channels.remove(conversation_id);
            }
        }
    }

    /// Number of live subscribers on a conversation feed.
    pub fn subscriber_count(&self, conversation_id: &Uuid) -> usize {
        let channels = self.channels.read().unwrap_or_else(|e| e.into_inner());
        channels.get(conversation_id).map(|tx| tx.receiver_count()).unwrap_or(0)
    }
}

impl Default for MessageHub {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::realtime::subscription::FeedEvent;

    fn new_id() -> Uuid {
        Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext))
    }

    fn message(conversation_id: Uuid) -> MessageEntity {
        MessageEntity {
            id: new_id(),
            conversation_id,
            sender_id: new_id(),
            content: "still here".to_string(),
            is_read: false,
            created_at: chrono::Utc::now(),
        }
    }

    fn channel_count(hub: &MessageHub) -> usize {
        hub.channels.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    #[tokio::test]
    async fn a_feed_is_dropped_with_its_last_subscriber() {
        let hub = Arc::new(MessageHub::new());
        let conversation_id = new_id();
        let first = hub.subscribe(conversation_id);
        let second = hub.subscribe(conversation_id);
        assert_eq!(channel_count(&hub), 1);

        drop(first);
        assert_eq!(channel_count(&hub), 1);
        assert_eq!(hub.subscriber_count(&conversation_id), 1);

        drop(second);
        assert_eq!(channel_count(&hub), 0);
        assert_eq!(hub.subscriber_count(&conversation_id), 0);
    }

    #[tokio::test]
    async fn remaining_subscribers_keep_receiving_after_one_leaves() {
        let hub = Arc::new(MessageHub::new());
        let conversation_id = new_id();
        let first = hub.subscribe(conversation_id);
        let mut second = hub.subscribe(conversation_id);
        drop(first);

        let sent = message(conversation_id);
        hub.publish(&conversation_id, sent.clone());
        assert_eq!(second.next().await, FeedEvent::Message(sent));
    }
}
