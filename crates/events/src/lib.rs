//! Side-effect collaborators for the FAQ/glossary CMS.
//!
//! Everything here runs after a database commit and is best-effort: a
//! failure is logged and never undoes or fails the content operation.
//!
//! - [`EventBus`]: in-process publish/subscribe for [`ContentEvent`]s.
//! - [`CacheInvalidator`]: drop derived public responses for a [`CacheScope`](faircms_core::cache::CacheScope).
//! - [`ResponseCache`]: in-process TTL cache for public responses.
//! - [`NotificationSender`]: persist an inbox notification and mail it.
//! - [`delivery`]: SMTP email and webhook channels.
//! - [`SearchIndexForwarder`]: pushes content events to the search indexer.

pub mod bus;
pub mod cache;
pub mod delivery;
pub mod forwarder;
pub mod notifier;

pub use bus::{ContentEvent, ContentEventKind, EventBus};
pub use cache::{
    CacheError, CacheInvalidator, FanoutInvalidator, HttpPurgeInvalidator, ResponseCache,
};
pub use delivery::email::{EmailConfig, EmailDelivery};
pub use delivery::webhook::WebhookDelivery;
pub use forwarder::SearchIndexForwarder;
pub use notifier::{DbNotificationSender, NotificationSender, NotifyError};
