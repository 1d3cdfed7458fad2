//! Read-through helper for cached public responses.

use std::future::Future;

use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Return the cached body under `key`, or run `load`, cache its serialized
/// result and return it. Errors are never cached.
///
/// A body loaded across an invalidation of its scope is returned but not
/// cached, so it cannot outlive the write that made it stale.
pub async fn cached<T, F, Fut>(state: &AppState, key: String, load: F) -> AppResult<serde_json::Value>
where
    T: Serialize,
    F: FnOnce() -> Fut,
    Fut: Future<Output = AppResult<T>>,
{
    if let Some(hit) = state.response_cache.get(&key) {
        tracing::debug!(%key, "Public cache hit");
        return Ok(hit);
    }

    let generation = state.response_cache.generation(&key);
    let body = serde_json::to_value(load().await?)
        .map_err(|e| AppError::InternalError(format!("Failed to serialize response: {e}")))?;
    if !state.response_cache.set_if_current(key.clone(), body.clone(), generation) {
        tracing::debug!(%key, "Scope invalidated during load; response not cached");
    }
    Ok(body)
}
