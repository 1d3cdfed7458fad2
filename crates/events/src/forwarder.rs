//! Forwards content events to the search indexer's webhook.

use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use crate::bus::ContentEvent;
use crate::delivery::webhook::WebhookDelivery;

pub struct SearchIndexForwarder {
    webhook: WebhookDelivery,
    url: String,
}

impl SearchIndexForwarder {
    pub fn new(webhook: WebhookDelivery, url: impl Into<String>) -> Self {
        Self {
            webhook,
            url: url.into(),
        }
    }

    /// Deliver every event from `receiver` until `cancel` fires or the bus closes.
    ///
    /// Delivery failures are logged; the loop keeps going.
    pub async fn run(self, mut receiver: broadcast::Receiver<ContentEvent>, cancel: CancellationToken) {
        tracing::info!(url = %self.url, "Search index forwarder started");
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Search index forwarder stopping");
                    break;
                }
                received = receiver.recv() => match received {
                    Ok(event) => {
                        if self.webhook.deliver(&self.url, &event).await.is_ok() {
                            tracing::debug!(
                                event_type = event.event_type.as_str(),
                                entity_id = event.entity_id,
                                "Content event forwarded"
                            );
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(skipped = n, "Search index forwarder lagged, events dropped");
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        tracing::info!("Event bus closed, search index forwarder shutting down");
                        break;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::bus::EventBus;

    #[tokio::test]
    async fn stops_on_cancel() {
        let bus = EventBus::default();
        let cancel = CancellationToken::new();
        let forwarder = SearchIndexForwarder::new(
            WebhookDelivery::new().unwrap(),
            "http://127.0.0.1:9/index",
        );
        let handle = tokio::spawn(forwarder.run(bus.subscribe(), cancel.clone()));

        cancel.cancel();
        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("forwarder should stop promptly")
            .unwrap();
    }

    #[tokio::test]
    async fn stops_when_bus_is_dropped() {
        let bus = EventBus::default();
        let rx = bus.subscribe();
        drop(bus);
        let forwarder = SearchIndexForwarder::new(
            WebhookDelivery::new().unwrap(),
            "http://127.0.0.1:9/index",
        );
        tokio::time::timeout(Duration::from_secs(5), forwarder.run(rx, CancellationToken::new()))
            .await
            .expect("forwarder should stop when the bus closes");
    }
}
