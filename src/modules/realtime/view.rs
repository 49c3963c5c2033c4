use std::collections::HashSet;
use std::time::Duration;
use log::warn;
use uuid::Uuid;

use crate::api::error;
use crate::modules::message::schema::MessageEntity;
use crate::modules::message::service::MessageService;
use crate::modules::realtime::subscription::{FeedEvent, FeedSubscription};

/// How long `send` waits for its own message to come back on the feed
/// before falling back to a history re-fetch.
const ECHO_WAIT: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Closed,
    Loading,
    Live,
}

/// Change surfaced by the view after processing a feed event.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    /// A new message was appended to the timeline.
    Appended(MessageEntity),
    /// The timeline was rebuilt from the store after a feed gap.
    Resynced,
}

/// One viewer's window onto a single conversation: an ordered,
/// deduplicated timeline kept current from the live feed. At most one
/// conversation is open at a time; opening another closes the first.
pub struct ConversationView {
    viewer_id: Uuid,
    messages: MessageService,
    state: ViewState,
    conversation_id: Option<Uuid>,
    timeline: Vec<MessageEntity>,
    seen: HashSet<Uuid>,
    feed: Option<FeedSubscription>,
    conversations_stale: bool,
}

impl ConversationView {
    pub fn new(viewer_id: Uuid, messages: MessageService) -> Self {
        ConversationView {
            viewer_id,
            messages,
            state: ViewState::Closed,
            conversation_id: None,
            timeline: Vec::new(),
            seen: HashSet::new(),
            feed: None,
            conversations_stale: false,
        }
    }

    pub fn is_live(&self) -> bool {
        self.state == ViewState::Live
    }

    pub fn conversation_id(&self) -> Option<Uuid> {
        self.conversation_id
    }

    pub fn timeline(&self) -> &[MessageEntity] {
        &self.timeline
    }

    /// Returns true once since the last check if the conversation list
    /// snapshot (last message, unread counts) may be out of date.
    pub fn take_conversations_stale(&mut self) -> bool {
        std::mem::take(&mut self.conversations_stale)
    }

    /// Opens a conversation: loads history, marks it read, then goes
    /// live on its feed. The subscription is taken out before the
    /// history fetch so no message published in between is missed.
    pub async fn open(
        &mut self,
        conversation_id: Uuid,
    ) -> Result<Vec<MessageEntity>, error::SystemError> {
        self.close();
        self.state = ViewState::Loading;

        let feed = self.messages.hub().subscribe(conversation_id);
        let history = match self.messages.history(&conversation_id, &self.viewer_id).await {
            Ok(history) => history,
            Err(err) => {
                self.close();
                return Err(err);
            }
        };

        // Opening counts as reading. A failed receipt does not block the
        // view; the next open will retry it.
        if let Err(err) = self.messages.mark_read(&conversation_id, &self.viewer_id).await {
            warn!("Failed to mark conversation {conversation_id} as read: {err:?}");
        }

        self.seen = history.iter().map(|m| m.id).collect();
        self.timeline = history.clone();
        self.conversation_id = Some(conversation_id);
        self.feed = Some(feed);
        self.state = ViewState::Live;

        Ok(history)
    }

    /// Drops the feed and clears all view state immediately. Events
    /// already in flight on the old feed are discarded with it.
    pub fn close(&mut self) {
        self.feed = None;
        self.conversation_id = None;
        self.timeline.clear();
        self.seen.clear();
        self.state = ViewState::Closed;
    }

    /// Waits for the next feed event and folds it into the timeline.
    /// Returns `None` when the event was a duplicate of a message the
    /// view already holds.
    pub async fn next_event(&mut self) -> Result<Option<ViewEvent>, error::SystemError> {
        let event = match self.feed.as_mut() {
            Some(feed) if self.state == ViewState::Live => feed.next().await,
            _ => return Ok(None),
        };
        match event {
            FeedEvent::Message(message) => Ok(self.apply(message).map(ViewEvent::Appended)),
            FeedEvent::Resync => {
                self.resync().await?;
                Ok(Some(ViewEvent::Resynced))
            }
        }
    }

    /// Sends through the store, then waits (bounded) until the echo of
    /// the sent message arrives on the feed, folding in whatever else
    /// comes first. The caller gets the persisted message plus any view
    /// changes observed while waiting.
    pub async fn send(
        &mut self,
        content: &str,
    ) -> Result<(MessageEntity, Vec<ViewEvent>), error::SystemError> {
        let conversation_id = self
            .conversation_id
            .filter(|_| self.state == ViewState::Live)
            .ok_or_else(|| error::SystemError::validation("No conversation is open"))?;

        let sent = self
            .messages
            .send_message(&conversation_id, &self.viewer_id, content)
            .await?;

        let mut changes = Vec::new();
        let deadline = tokio::time::Instant::now() + ECHO_WAIT;
        while !self.seen.contains(&sent.id) {
            let feed = match self.feed.as_mut() {
                Some(feed) => feed,
                None => break,
            };
            match tokio::time::timeout_at(deadline, feed.next()).await {
                Ok(FeedEvent::Message(message)) => {
                    if let Some(message) = self.apply(message) {
                        changes.push(ViewEvent::Appended(message));
                    }
                }
                Ok(FeedEvent::Resync) | Err(_) => {
                    self.resync().await?;
                    changes.push(ViewEvent::Resynced);
                    break;
                }
            }
        }

        Ok((sent, changes))
    }

    /// Inserts a message in (created_at, id) order, skipping duplicates.
    /// Returns the message when it was actually appended.
    fn apply(&mut self, message: MessageEntity) -> Option<MessageEntity> {
        if self.state != ViewState::Live || !self.seen.insert(message.id) {
            return None;
        }
        self.conversations_stale = true;
        let key = (message.created_at, message.id);
        let at = self
            .timeline
            .iter()
            .rposition(|m| (m.created_at, m.id) <= key)
            .map(|i| i + 1)
            .unwrap_or(0);
        self.timeline.insert(at, message.clone());
        Some(message)
    }

    /// Rebuilds the timeline from the store after the feed lost
    /// continuity.
    async fn resync(&mut self) -> Result<(), error::SystemError> {
        let conversation_id = match self.conversation_id {
            Some(id) => id,
            None => return Ok(()),
        };
        let history = self.messages.history(&conversation_id, &self.viewer_id).await?;
        self.seen = history.iter().map(|m| m.id).collect();
        self.timeline = history;
        self.conversations_stale = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::modules::conversation::repository::ConversationRepository;
    use crate::modules::conversation::schema::ConversationEntity;
    use crate::modules::memory::MemStore;
    use crate::modules::realtime::hub::{MessageHub, FEED_CAPACITY};

    fn new_id() -> Uuid {
        Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext))
    }

    async fn fixture() -> (ConversationView, MessageService, ConversationEntity) {
        let store = Arc::new(MemStore::new());
        let conversation =
            ConversationRepository::create(store.as_ref(), &new_id(), &new_id())
                .await
                .unwrap();
        let messages = MessageService::with_dependencies(
            store.clone(),
            store,
            Arc::new(MessageHub::new()),
        );
        let view = ConversationView::new(conversation.worker_id, messages.clone());
        (view, messages, conversation)
    }

    fn feed_message(conversation_id: Uuid, seconds_ago: i64) -> MessageEntity {
        MessageEntity {
            id: new_id(),
            conversation_id,
            sender_id: new_id(),
            content: "live".to_string(),
            is_read: false,
            created_at: chrono::Utc::now() - chrono::Duration::seconds(seconds_ago),
        }
    }

    #[tokio::test]
    async fn open_loads_history_and_marks_it_read() {
        let (mut view, messages, conversation) = fixture().await;
        messages
            .send_message(&conversation.id, &conversation.employer_id, "one")
            .await
            .unwrap();
        messages
            .send_message(&conversation.id, &conversation.employer_id, "two")
            .await
            .unwrap();

        let history = view.open(conversation.id).await.unwrap();
        assert_eq!(history.len(), 2);
        assert!(view.is_live());

        // everything the counterpart sent is already read
        let remaining =
            messages.mark_read(&conversation.id, &conversation.worker_id).await.unwrap();
        assert_eq!(remaining, 0);
    }

    #[tokio::test]
    async fn out_of_order_feed_events_are_reordered_by_timestamp() {
        let (mut view, messages, conversation) = fixture().await;
        view.open(conversation.id).await.unwrap();

        let newer = feed_message(conversation.id, 0);
        let older = feed_message(conversation.id, 10);
        messages.hub().publish(&conversation.id, newer.clone());
        messages.hub().publish(&conversation.id, older.clone());

        assert_eq!(view.next_event().await.unwrap(), Some(ViewEvent::Appended(newer.clone())));
        assert_eq!(view.next_event().await.unwrap(), Some(ViewEvent::Appended(older.clone())));

        let ids: Vec<Uuid> = view.timeline().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![older.id, newer.id]);
    }

    #[tokio::test]
    async fn duplicate_feed_events_are_dropped() {
        let (mut view, messages, conversation) = fixture().await;
        view.open(conversation.id).await.unwrap();

        let message = feed_message(conversation.id, 0);
        messages.hub().publish(&conversation.id, message.clone());
        messages.hub().publish(&conversation.id, message.clone());

        assert_eq!(view.next_event().await.unwrap(), Some(ViewEvent::Appended(message)));
        assert_eq!(view.next_event().await.unwrap(), None);
        assert_eq!(view.timeline().len(), 1);
    }

    #[tokio::test]
    async fn send_waits_for_its_own_echo() {
        let (mut view, _messages, conversation) = fixture().await;
        view.open(conversation.id).await.unwrap();

        let (sent, changes) = view.send("hello").await.unwrap();
        assert_eq!(changes, vec![ViewEvent::Appended(sent.clone())]);
        assert_eq!(view.timeline().last(), Some(&sent));
    }

    #[tokio::test]
    async fn send_requires_an_open_conversation() {
        let (mut view, _, _) = fixture().await;
        let err = view.send("hello").await.unwrap_err();
        assert!(matches!(err, error::SystemError::Validation(_)));
    }

    #[tokio::test]
    async fn close_clears_everything_immediately() {
        let (mut view, messages, conversation) = fixture().await;
        messages
            .send_message(&conversation.id, &conversation.employer_id, "hi")
            .await
            .unwrap();
        view.open(conversation.id).await.unwrap();
        assert_eq!(view.timeline().len(), 1);

        view.close();
        assert!(!view.is_live());
        assert!(view.timeline().is_empty());
        assert_eq!(view.conversation_id(), None);

        // events published after close never mutate the view
        messages.hub().publish(&conversation.id, feed_message(conversation.id, 0));
        assert_eq!(view.next_event().await.unwrap(), None);
        assert!(view.timeline().is_empty());
    }

    #[tokio::test]
    async fn feed_overflow_resyncs_from_the_store() {
        let (mut view, messages, conversation) = fixture().await;
        messages
            .send_message(&conversation.id, &conversation.employer_id, "kept")
            .await
            .unwrap();
        view.open(conversation.id).await.unwrap();

        // more events than the feed buffers; the receiver lags
        for _ in 0..FEED_CAPACITY + 16 {
            messages.hub().publish(&conversation.id, feed_message(conversation.id, 0));
        }

        assert_eq!(view.next_event().await.unwrap(), Some(ViewEvent::Resynced));
        assert!(view.is_live());
        let contents: Vec<&str> =
            view.timeline().iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["kept"]);
        assert!(view.take_conversations_stale());
    }

    #[tokio::test]
    async fn feed_activity_flags_the_conversation_list_as_stale() {
        let (mut view, messages, conversation) = fixture().await;
        view.open(conversation.id).await.unwrap();
        assert!(!view.take_conversations_stale());

        messages.hub().publish(&conversation.id, feed_message(conversation.id, 0));
        view.next_event().await.unwrap();
        assert!(view.take_conversations_stale());
        assert!(!view.take_conversations_stale());
    }
}
