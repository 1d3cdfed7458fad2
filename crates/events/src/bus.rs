//! In-process content event bus backed by a `tokio::sync::broadcast` channel.
//!
//! Published content changes are announced here after commit so that
//! downstream consumers (the search-index forwarder) learn about them
//! without the workflow depending on any of them.

use chrono::{DateTime, Utc};
use faircms_core::cache::CacheScope;
use faircms_core::types::DbId;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// ContentEvent
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentEventKind {
    #[serde(rename = "faq.published")]
    FaqPublished,
    #[serde(rename = "faq.updated")]
    FaqUpdated,
    #[serde(rename = "faq.deleted")]
    FaqDeleted,
    #[serde(rename = "glossary.published")]
    GlossaryPublished,
    #[serde(rename = "glossary.updated")]
    GlossaryUpdated,
    #[serde(rename = "glossary.deleted")]
    GlossaryDeleted,
}

impl ContentEventKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FaqPublished => "faq.published",
            Self::FaqUpdated => "faq.updated",
            Self::FaqDeleted => "faq.deleted",
            Self::GlossaryPublished => "glossary.published",
            Self::GlossaryUpdated => "glossary.updated",
            Self::GlossaryDeleted => "glossary.deleted",
        }
    }

    /// The public cache scope this change makes stale.
    pub const fn scope(self) -> CacheScope {
        match self {
            Self::FaqPublished | Self::FaqUpdated | Self::FaqDeleted => CacheScope::Faq,
            Self::GlossaryPublished | Self::GlossaryUpdated | Self::GlossaryDeleted => {
                CacheScope::Glossary
            }
        }
    }
}

/// A change to published content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentEvent {
    pub event_type: ContentEventKind,
    /// FAQ entry id or glossary term id.
    pub entity_id: DbId,
    pub slug: String,
    pub actor_email: String,
    pub timestamp: DateTime<Utc>,
}

impl ContentEvent {
    pub fn new(
        event_type: ContentEventKind,
        entity_id: DbId,
        slug: impl Into<String>,
        actor_email: impl Into<String>,
    ) -> Self {
        Self {
            event_type,
            entity_id,
            slug: slug.into(),
            actor_email: actor_email.into(),
            timestamp: Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

const DEFAULT_CAPACITY: usize = 256;

/// In-process fan-out bus for [`ContentEvent`]s. Share it via `Arc<EventBus>`.
pub struct EventBus {
    sender: broadcast::Sender<ContentEvent>,
}

impl EventBus {
    /// When the buffer is full the oldest events are dropped and slow
    /// receivers observe `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish to all current subscribers. With no subscribers the event is dropped.
    pub fn publish(&self, event: ContentEvent) {
        tracing::debug!(
            event_type = event.event_type.as_str(),
            entity_id = event.entity_id,
            "Content event published"
        );
        // SendError only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ContentEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_each_receive_the_event() {
        let bus = EventBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(ContentEvent::new(
            ContentEventKind::FaqPublished,
            42,
            "park-hours",
            "reviewer@fair.example.com",
        ));

        let e1 = rx1.recv().await.unwrap();
        let e2 = rx2.recv().await.unwrap();
        assert_eq!(e1.event_type, ContentEventKind::FaqPublished);
        assert_eq!(e1.entity_id, 42);
        assert_eq!(e2.slug, "park-hours");
    }

    #[test]
    fn publish_without_subscribers_is_a_no_op() {
        let bus = EventBus::default();
        bus.publish(ContentEvent::new(ContentEventKind::GlossaryDeleted, 1, "aza", "a@b.c"));
    }

    #[test]
    fn kinds_map_to_scopes() {
        assert_eq!(ContentEventKind::FaqDeleted.scope(), CacheScope::Faq);
        assert_eq!(ContentEventKind::GlossaryUpdated.scope(), CacheScope::Glossary);
    }

    #[test]
    fn event_type_serializes_dotted() {
        let e = ContentEvent::new(ContentEventKind::FaqDeleted, 3, "x", "a@b.c");
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["event_type"], "faq.deleted");
        assert_eq!(json["entity_id"], 3);
    }
}
