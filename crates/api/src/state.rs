use std::sync::Arc;
use std::time::Duration;

use faircms_events::{
    CacheError, CacheInvalidator, DbNotificationSender, EmailDelivery, EventBus,
    FanoutInvalidator, HttpPurgeInvalidator, NotificationSender, ResponseCache,
};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: faircms_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// In-process read-through cache for public responses.
    pub response_cache: Arc<ResponseCache>,
    /// Invalidates `response_cache` and, when configured, the external edge cache.
    pub cache: Arc<dyn CacheInvalidator>,
    /// Inbox + email notifications.
    pub notifier: Arc<dyn NotificationSender>,
    /// Content events for the search-index forwarder.
    pub event_bus: Arc<EventBus>,
}

impl AppState {
    /// Wire the default collaborators from configuration.
    ///
    /// Fails only if the HTTP client for the external cache purge cannot be built.
    pub fn new(
        pool: faircms_db::DbPool,
        config: ServerConfig,
        email: Option<Arc<EmailDelivery>>,
        event_bus: Arc<EventBus>,
    ) -> Result<Self, CacheError> {
        let response_cache = Arc::new(ResponseCache::new(Duration::from_secs(
            config.public_cache_ttl_secs,
        )));

        let mut targets: Vec<Arc<dyn CacheInvalidator>> = vec![response_cache.clone()];
        if let Some(url) = &config.cache_purge_url {
            targets.push(Arc::new(HttpPurgeInvalidator::new(url.clone())?));
        }

        let notifier = Arc::new(DbNotificationSender::new(pool.clone(), email));

        Ok(Self {
            pool,
            config: Arc::new(config),
            response_cache,
            cache: Arc::new(FanoutInvalidator::new(targets)),
            notifier,
            event_bus,
        })
    }
}
