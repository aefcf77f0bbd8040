use crate::error::{EventLogError, Result};
use crate::event::{EventKind, LogEvent};
use shortly_core::{Clock, KeyValueStore};
use tokio::sync::Mutex;
use tracing::{info, warn};
use typed_builder::TypedBuilder;

/// Key under which the event log is persisted.
pub const LOG_KEY: &str = "shortly_logs_v1";

#[derive(Debug, Clone, TypedBuilder)]
pub struct EventLoggerSettings {
    /// Key the log is stored under.
    #[builder(default = LOG_KEY.to_string(), setter(into))]
    pub key: String,
    /// Maximum number of retained events; the oldest are dropped first.
    #[builder(default = 1000)]
    pub capacity: usize,
}

impl Default for EventLoggerSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Appends structured events to a JSON array in a [`KeyValueStore`].
#[derive(Debug)]
pub struct EventLogger<S, C> {
    store: S,
    clock: C,
    settings: EventLoggerSettings,
    write_lock: Mutex<()>,
}

impl<S: KeyValueStore, C: Clock> EventLogger<S, C> {
    pub fn new(store: S, clock: C) -> Self {
        Self::with_settings(store, clock, EventLoggerSettings::default())
    }

    pub fn with_settings(store: S, clock: C, settings: EventLoggerSettings) -> Self {
        Self {
            store,
            clock,
            settings,
            write_lock: Mutex::new(()),
        }
    }

    /// Appends an event, reporting failures through `tracing` only.
    ///
    /// The event log is a debugging aid; losing an entry must never fail the
    /// operation that produced it.
    pub async fn log(&self, kind: EventKind, meta: serde_json::Value) {
        if let Err(error) = self.try_log(kind, meta).await {
            warn!(event = %kind, %error, "failed to persist event");
        }
    }

    /// Appends an event and returns any storage failure.
    pub async fn try_log(&self, kind: EventKind, meta: serde_json::Value) -> Result<()> {
        if kind.is_error() {
            warn!(event = %kind, %meta, "event");
        } else {
            info!(event = %kind, %meta, "event");
        }

        let _guard = self.write_lock.lock().await;

        let mut events = self.load().await?;
        events.push(LogEvent {
            ts: self.clock.now(),
            kind,
            meta,
        });

        let overflow = events.len().saturating_sub(self.settings.capacity);
        if overflow > 0 {
            events.drain(..overflow);
        }

        let raw = serde_json::to_string(&events)
            .map_err(|e| EventLogError::Corrupt(e.to_string()))?;
        self.store.set_item(&self.settings.key, raw).await?;
        Ok(())
    }

    /// Returns every retained event, oldest first.
    pub async fn list(&self) -> Result<Vec<LogEvent>> {
        self.load().await
    }

    /// Drops the whole log.
    pub async fn clear(&self) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.store.remove_item(&self.settings.key).await?;
        Ok(())
    }

    async fn load(&self) -> Result<Vec<LogEvent>> {
        match self.store.get_item(&self.settings.key).await? {
            Some(raw) => {
                serde_json::from_str(&raw).map_err(|e| EventLogError::Corrupt(e.to_string()))
            }
            None => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::{SignedDuration, Timestamp};
    use serde_json::json;
    use shortly_core::ManualClock;
    use shortly_storage::InMemoryStore;
    use std::sync::Arc;

    fn clock() -> ManualClock {
        ManualClock::new(Timestamp::from_millisecond(1_000).unwrap())
    }

    #[tokio::test]
    async fn appends_in_order() {
        let clock = clock();
        let logger = EventLogger::new(InMemoryStore::new(), clock.clone());

        logger
            .log(EventKind::RedirectAttempt, json!({ "shortcode": "abc" }))
            .await;
        clock.advance(SignedDuration::from_millis(5));
        logger
            .log(EventKind::RedirectNotfound, json!({ "shortcode": "abc" }))
            .await;

        let events = logger.list().await.unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].kind, EventKind::RedirectAttempt);
        assert_eq!(events[0].ts.as_millisecond(), 1_000);
        assert_eq!(events[1].kind, EventKind::RedirectNotfound);
        assert_eq!(events[1].ts.as_millisecond(), 1_005);
        assert_eq!(events[1].meta, json!({ "shortcode": "abc" }));
    }

    #[tokio::test]
    async fn persists_under_log_key() {
        let store = Arc::new(InMemoryStore::new());
        let logger = EventLogger::new(Arc::clone(&store), clock());

        logger.log(EventKind::StoreCleared, json!({})).await;

        let raw = store.get_item(LOG_KEY).await.unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            value,
            json!([{ "ts": 1000, "type": "store_cleared", "meta": {} }])
        );
    }

    #[tokio::test]
    async fn capacity_drops_oldest() {
        let settings = EventLoggerSettings::builder().capacity(3).build();
        let logger = EventLogger::with_settings(InMemoryStore::new(), clock(), settings);

        for row in 1..=5 {
            logger
                .log(EventKind::ValidationError, json!({ "row": row }))
                .await;
        }

        let rows: Vec<serde_json::Value> = logger
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.meta["row"].clone())
            .collect();
        assert_eq!(rows, vec![json!(3), json!(4), json!(5)]);
    }

    #[tokio::test]
    async fn clear_empties_log() {
        let logger = EventLogger::new(InMemoryStore::new(), clock());
        logger.log(EventKind::ShortCreated, json!({})).await;

        logger.clear().await.unwrap();

        assert!(logger.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn corrupt_log_is_reported_but_log_does_not_panic() {
        let store = Arc::new(InMemoryStore::new());
        store.set_item(LOG_KEY, "{".to_string()).await.unwrap();
        let logger = EventLogger::new(Arc::clone(&store), clock());

        let err = logger
            .try_log(EventKind::ShortCreated, json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, EventLogError::Corrupt(_)));

        // The infallible variant swallows the same failure.
        logger.log(EventKind::ShortCreated, json!({})).await;
        assert_eq!(store.get_item(LOG_KEY).await.unwrap().as_deref(), Some("{"));
    }

    #[tokio::test]
    async fn separate_from_table_key() {
        let store = Arc::new(InMemoryStore::new());
        let logger = EventLogger::new(Arc::clone(&store), clock());

        logger.log(EventKind::ShortCreated, json!({})).await;

        assert!(store
            .get_item(shortly_storage::STORE_KEY)
            .await
            .unwrap()
            .is_none());
    }
}
