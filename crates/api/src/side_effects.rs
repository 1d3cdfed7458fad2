//! Post-commit side effects.
//!
//! These run only after the database transaction has committed. None of them
//! can fail the request: a failure is logged and the response stands.

use faircms_core::cache::CacheScope;
use faircms_core::notification::NotificationMessage;
use faircms_core::types::DbId;
use faircms_events::{ContentEvent, ContentEventKind};

use crate::state::AppState;

/// Drop cached public responses for `scope`.
pub async fn invalidate(state: &AppState, scope: CacheScope) {
    if let Err(e) = state.cache.invalidate(scope).await {
        tracing::warn!(%scope, error = %e, "Cache invalidation failed");
    }
}

/// Store and deliver a notification.
pub async fn notify(state: &AppState, message: &NotificationMessage) {
    if let Err(e) = state.notifier.send(message).await {
        tracing::warn!(
            recipient = %message.recipient_email,
            notification_type = %message.notification_type,
            error = %e,
            "Notification failed"
        );
    }
}

/// Invalidate the affected scope, then announce the change on the event bus.
pub async fn content_changed(
    state: &AppState,
    kind: ContentEventKind,
    entity_id: DbId,
    slug: &str,
    actor_email: &str,
) {
    invalidate(state, kind.scope()).await;
    state
        .event_bus
        .publish(ContentEvent::new(kind, entity_id, slug, actor_email));
}
