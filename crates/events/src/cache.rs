//! Public response caching and invalidation.
//!
//! The cache is derived state: content operations call
//! [`CacheInvalidator::invalidate`] after commit and ignore the outcome
//! beyond logging it.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use faircms_core::cache::CacheScope;

const PURGE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache purge request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Cache purge returned HTTP {0}")]
    HttpStatus(u16),
}

/// Drops every cached public response in a scope.
#[async_trait]
pub trait CacheInvalidator: Send + Sync {
    async fn invalidate(&self, scope: CacheScope) -> Result<(), CacheError>;
}

// ---------------------------------------------------------------------------
// HTTP purge
// ---------------------------------------------------------------------------

/// Asks an external edge cache to purge a scope by POSTing `{"scope": "faq"}`.
pub struct HttpPurgeInvalidator {
    client: reqwest::Client,
    url: String,
}

impl HttpPurgeInvalidator {
    pub fn new(url: impl Into<String>) -> Result<Self, CacheError> {
        let client = reqwest::Client::builder().timeout(PURGE_TIMEOUT).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl CacheInvalidator for HttpPurgeInvalidator {
    async fn invalidate(&self, scope: CacheScope) -> Result<(), CacheError> {
        let response = self
            .client
            .post(&self.url)
            .json(&serde_json::json!({ "scope": scope }))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(CacheError::HttpStatus(response.status().as_u16()));
        }
        tracing::debug!(%scope, url = %self.url, "Cache purge sent");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// In-process response cache
// ---------------------------------------------------------------------------

struct CachedValue {
    value: serde_json::Value,
    expires_at: Instant,
}

#[derive(Default)]
struct CacheState {
    entries: HashMap<String, CachedValue>,
    /// Bumped on every invalidation of a scope.
    generations: HashMap<CacheScope, u64>,
}

impl CacheState {
    fn generation_of(&self, key: &str) -> u64 {
        CacheScope::of_key(key)
            .and_then(|scope| self.generations.get(&scope).copied())
            .unwrap_or(0)
    }
}

/// Read-through TTL cache for serialized public responses, keyed by the
/// builders in [`faircms_core::cache`].
///
/// A reader that loaded its body before an invalidation must not store it
/// afterwards: take [`ResponseCache::generation`] before loading and store
/// with [`ResponseCache::set_if_current`].
pub struct ResponseCache {
    ttl: Duration,
    state: RwLock<CacheState>,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            state: RwLock::new(CacheState::default()),
        }
    }

    /// A live entry for `key`, or `None` if absent or expired.
    pub fn get(&self, key: &str) -> Option<serde_json::Value> {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        state
            .entries
            .get(key)
            .filter(|c| c.expires_at > Instant::now())
            .map(|c| c.value.clone())
    }

    /// Invalidation generation of the scope that owns `key`.
    pub fn generation(&self, key: &str) -> u64 {
        self.state
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .generation_of(key)
    }

    pub fn set(&self, key: impl Into<String>, value: serde_json::Value) {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        self.insert(&mut state, key.into(), value);
    }

    /// Store `value` only if the key's scope has not been invalidated since
    /// `generation` was read. Returns whether it was stored.
    pub fn set_if_current(
        &self,
        key: impl Into<String>,
        value: serde_json::Value,
        generation: u64,
    ) -> bool {
        let key = key.into();
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        if state.generation_of(&key) != generation {
            return false;
        }
        self.insert(&mut state, key, value);
        true
    }

    fn insert(&self, state: &mut CacheState, key: String, value: serde_json::Value) {
        state.entries.insert(
            key,
            CachedValue {
                value,
                expires_at: Instant::now() + self.ttl,
            },
        );
    }

    /// Remove every key in `scope`. Returns how many were removed.
    pub fn invalidate_scope(&self, scope: CacheScope) -> usize {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        *state.generations.entry(scope).or_default() += 1;
        let before = state.entries.len();
        state.entries.retain(|key, _| !scope.covers(key));
        before - state.entries.len()
    }

    /// Drop expired entries.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        let before = state.entries.len();
        state.entries.retain(|_, c| c.expires_at > now);
        before - state.entries.len()
    }

    pub fn len(&self) -> usize {
        self.state.read().unwrap_or_else(|e| e.into_inner()).entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CacheInvalidator for ResponseCache {
    async fn invalidate(&self, scope: CacheScope) -> Result<(), CacheError> {
        let removed = self.invalidate_scope(scope);
        tracing::debug!(%scope, removed, "Response cache invalidated");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Fan-out
// ---------------------------------------------------------------------------

/// Invalidates every inner cache. One failing target does not stop the rest;
/// the first error is returned after all have been tried.
pub struct FanoutInvalidator {
    targets: Vec<Arc<dyn CacheInvalidator>>,
}

impl FanoutInvalidator {
    pub fn new(targets: Vec<Arc<dyn CacheInvalidator>>) -> Self {
        Self { targets }
    }
}

#[async_trait]
impl CacheInvalidator for FanoutInvalidator {
    async fn invalidate(&self, scope: CacheScope) -> Result<(), CacheError> {
        let mut first_err = None;
        for target in &self.targets {
            if let Err(e) = target.invalidate(scope).await {
                tracing::warn!(%scope, error = %e, "Cache invalidation target failed");
                first_err.get_or_insert(e);
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use assert_matches::assert_matches;
    use faircms_core::cache::{faq_detail_key, faq_list_key, glossary_terms_index_key};

    use super::*;

    #[test]
    fn get_returns_fresh_values_only() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        cache.set(faq_detail_key("park-hours"), serde_json::json!({"slug": "park-hours"}));
        assert_eq!(cache.get("faq:detail:park-hours").unwrap()["slug"], "park-hours");
        assert!(cache.get("faq:detail:other").is_none());

        let expired = ResponseCache::new(Duration::ZERO);
        expired.set("faq:categories", serde_json::json!([]));
        assert!(expired.get("faq:categories").is_none());
        assert_eq!(expired.purge_expired(), 1);
        assert!(expired.is_empty());
    }

    #[tokio::test]
    async fn invalidate_drops_only_the_scope() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        cache.set(faq_list_key(1, 20, None, None), serde_json::json!([]));
        cache.set(faq_detail_key("a"), serde_json::json!({}));
        cache.set(glossary_terms_index_key(), serde_json::json!([]));

        cache.invalidate(CacheScope::Faq).await.unwrap();
        assert_eq!(cache.len(), 1);
        assert!(cache.get(&glossary_terms_index_key()).is_some());
    }

    #[test]
    fn loads_started_before_an_invalidation_are_not_stored() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        let key = faq_detail_key("park-hours");

        let before = cache.generation(&key);
        cache.invalidate_scope(CacheScope::Faq);
        assert!(!cache.set_if_current(key.clone(), serde_json::json!({"answer": "old"}), before));
        assert!(cache.get(&key).is_none());

        let after = cache.generation(&key);
        assert!(cache.set_if_current(key.clone(), serde_json::json!({"answer": "new"}), after));
        assert_eq!(cache.get(&key).unwrap()["answer"], "new");

        // Other scopes are unaffected.
        let index = glossary_terms_index_key();
        let glossary_gen = cache.generation(&index);
        cache.invalidate_scope(CacheScope::Faq);
        assert!(cache.set_if_current(index, serde_json::json!([]), glossary_gen));
    }

    struct Recording {
        calls: Mutex<Vec<CacheScope>>,
        fail: bool,
    }

    #[async_trait]
    impl CacheInvalidator for Recording {
        async fn invalidate(&self, scope: CacheScope) -> Result<(), CacheError> {
            self.calls.lock().unwrap().push(scope);
            if self.fail {
                Err(CacheError::HttpStatus(503))
            } else {
                Ok(())
            }
        }
    }

    #[tokio::test]
    async fn fanout_tries_every_target() {
        let failing = Arc::new(Recording { calls: Mutex::new(vec![]), fail: true });
        let ok = Arc::new(Recording { calls: Mutex::new(vec![]), fail: false });
        let fanout = FanoutInvalidator::new(vec![failing.clone(), ok.clone()]);

        let result = fanout.invalidate(CacheScope::Glossary).await;
        assert_matches!(result, Err(CacheError::HttpStatus(503)));
        assert_eq!(*ok.calls.lock().unwrap(), vec![CacheScope::Glossary]);
        assert_eq!(*failing.calls.lock().unwrap(), vec![CacheScope::Glossary]);
    }
}
