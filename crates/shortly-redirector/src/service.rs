use std::sync::Arc;

use crate::redirector::Redirector;
use crate::state::RedirectState;
use async_trait::async_trait;
use serde_json::json;
use shortly_core::{ClickMetadata, ClickRecord, Clock, KeyValueStore, ShortCode};
use shortly_events::{EventKind, EventLogger};
use shortly_storage::ShortcodeTable;
use tracing::{debug, trace};

/// Service for handling visits of short codes.
///
/// Existence, expiry and the click append are decided in one table
/// transaction against a single clock reading, so expired links never
/// accumulate clicks.
#[derive(Debug)]
pub struct RedirectorService<S, C> {
    table: Arc<ShortcodeTable<S>>,
    events: Arc<EventLogger<S, C>>,
    clock: C,
}

impl<S: KeyValueStore, C: Clock> RedirectorService<S, C> {
    /// Creates a new RedirectorService over the shared table and event log.
    pub fn new(table: Arc<ShortcodeTable<S>>, events: Arc<EventLogger<S, C>>, clock: C) -> Self {
        Self {
            table,
            events,
            clock,
        }
    }
}

#[async_trait]
impl<S: KeyValueStore, C: Clock> Redirector for RedirectorService<S, C> {
    async fn visit(&self, code: &str, metadata: ClickMetadata) -> crate::Result<RedirectState> {
        let now = self.clock.now();
        trace!(code, %now, "visiting short code");
        self.events
            .log(EventKind::RedirectAttempt, json!({ "shortcode": code }))
            .await;

        let meta = json!({ "shortcode": code, "metadata": metadata });

        // Anything outside the shortcode pattern can never have been stored.
        let state = match ShortCode::new(code) {
            Ok(parsed) => {
                self.table
                    .transact(|tx| {
                        let state = RedirectState::Checking.resolve(tx.get(&parsed), now);
                        if matches!(state, RedirectState::Redirecting { .. }) {
                            if let Some(entry) = tx.get_mut(&parsed) {
                                entry.clicks.push(ClickRecord::new(now, metadata));
                            }
                        }
                        state
                    })
                    .await?
            }
            Err(_) => RedirectState::NotFound,
        };

        match &state {
            RedirectState::NotFound => {
                debug!(code, "short code not found");
                self.events
                    .log(EventKind::RedirectNotfound, json!({ "shortcode": code }))
                    .await;
            }
            RedirectState::Expired => {
                debug!(code, "short code has expired");
                self.events
                    .log(EventKind::RedirectExpired, json!({ "shortcode": code }))
                    .await;
            }
            RedirectState::Redirecting { long_url } => {
                self.events.log(EventKind::ClickRecorded, meta).await;
                debug!(code, url = %long_url, "redirecting");
            }
            RedirectState::Checking => {}
        }

        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::{SignedDuration, Timestamp};
    use shortly_core::{ManualClock, ShortcodeEntry};
    use shortly_storage::InMemoryStore;
    use std::sync::atomic::{AtomicI64, Ordering};

    /// Moves forward one millisecond every time it is read.
    #[derive(Debug, Clone)]
    struct TickingClock(Arc<AtomicI64>);

    impl Clock for TickingClock {
        fn now(&self) -> Timestamp {
            Timestamp::from_millisecond(self.0.fetch_add(1, Ordering::SeqCst)).unwrap()
        }
    }

    struct Fixture {
        table: Arc<ShortcodeTable<Arc<InMemoryStore>>>,
        events: Arc<EventLogger<Arc<InMemoryStore>, ManualClock>>,
        clock: ManualClock,
        service: RedirectorService<Arc<InMemoryStore>, ManualClock>,
    }

    impl Fixture {
        fn new() -> Self {
            let store = Arc::new(InMemoryStore::new());
            let clock = ManualClock::new(Timestamp::from_millisecond(1_000_000).unwrap());
            let table = Arc::new(ShortcodeTable::new(Arc::clone(&store)));
            let events = Arc::new(EventLogger::new(Arc::clone(&store), clock.clone()));
            let service =
                RedirectorService::new(Arc::clone(&table), Arc::clone(&events), clock.clone());
            Self {
                table,
                events,
                clock,
                service,
            }
        }

        async fn insert(&self, code: &str, validity: SignedDuration) {
            let now = self.clock.now();
            let entry = ShortcodeEntry::new("https://example.com", now, now + validity, false);
            assert!(self
                .table
                .insert(ShortCode::new(code).unwrap(), entry)
                .await
                .unwrap());
        }

        async fn clicks(&self, code: &str) -> usize {
            self.table
                .lookup(&ShortCode::new(code).unwrap())
                .await
                .unwrap()
                .map(|e| e.click_count())
                .unwrap_or_default()
        }

        async fn event_kinds(&self) -> Vec<EventKind> {
            self.events
                .list()
                .await
                .unwrap()
                .into_iter()
                .map(|e| e.kind)
                .collect()
        }
    }

    #[tokio::test]
    async fn live_code_redirects_and_records_click() {
        let fx = Fixture::new();
        fx.insert("abc123", SignedDuration::from_mins(30)).await;

        let state = fx
            .service
            .visit(
                "abc123",
                ClickMetadata {
                    referrer: Some("https://ref.example".to_string()),
                    language: Some("fr-FR".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(
            state,
            RedirectState::Redirecting {
                long_url: "https://example.com".to_string()
            }
        );
        let entry = fx
            .table
            .lookup(&ShortCode::new("abc123").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(entry.clicks.len(), 1);
        assert_eq!(entry.clicks[0].referrer, "https://ref.example");
        assert_eq!(entry.clicks[0].language, "fr-FR");
        assert_eq!(
            fx.event_kinds().await,
            vec![EventKind::RedirectAttempt, EventKind::ClickRecorded]
        );
    }

    #[tokio::test]
    async fn unknown_code_is_not_found() {
        let fx = Fixture::new();

        let state = fx
            .service
            .visit("nope123", ClickMetadata::default())
            .await
            .unwrap();

        assert_eq!(state.status(), "notfound");
        assert_eq!(
            fx.event_kinds().await,
            vec![EventKind::RedirectAttempt, EventKind::RedirectNotfound]
        );
    }

    #[tokio::test]
    async fn malformed_segment_is_not_found() {
        let fx = Fixture::new();

        for segment in ["x", "has space", "favicon.ico"] {
            let state = fx
                .service
                .visit(segment, ClickMetadata::default())
                .await
                .unwrap();
            assert_eq!(state, RedirectState::NotFound, "{segment}");
        }
    }

    #[tokio::test]
    async fn expired_code_records_no_click() {
        let fx = Fixture::new();
        fx.insert("old123", SignedDuration::from_mins(1)).await;
        fx.clock.advance(SignedDuration::from_mins(2));

        let state = fx
            .service
            .visit("old123", ClickMetadata::default())
            .await
            .unwrap();

        assert_eq!(state.status(), "expired");
        assert_eq!(fx.clicks("old123").await, 0);
        assert_eq!(
            fx.event_kinds().await,
            vec![EventKind::RedirectAttempt, EventKind::RedirectExpired]
        );
    }

    #[tokio::test]
    async fn every_visit_adds_one_click() {
        let fx = Fixture::new();
        fx.insert("abc123", SignedDuration::from_mins(30)).await;

        for _ in 0..3 {
            fx.service
                .visit("abc123", ClickMetadata::default())
                .await
                .unwrap();
            fx.clock.advance(SignedDuration::from_secs(1));
        }

        assert_eq!(fx.clicks("abc123").await, 3);
    }

    #[tokio::test]
    async fn click_stamp_uses_clock() {
        let fx = Fixture::new();
        fx.insert("abc123", SignedDuration::from_mins(30)).await;
        fx.clock.advance(SignedDuration::from_secs(10));

        fx.service
            .visit("abc123", ClickMetadata::default())
            .await
            .unwrap();

        let entry = fx
            .table
            .lookup(&ShortCode::new("abc123").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(entry.clicks[0].ts.as_millisecond(), 1_010_000);
    }

    #[tokio::test]
    async fn click_is_stamped_with_the_instant_expiry_was_checked() {
        let store = Arc::new(InMemoryStore::new());
        let clock = TickingClock(Arc::new(AtomicI64::new(1)));
        let table = Arc::new(ShortcodeTable::new(Arc::clone(&store)));
        let events = Arc::new(EventLogger::new(Arc::clone(&store), clock.clone()));
        let service = RedirectorService::new(Arc::clone(&table), events, clock);

        let expires_at = Timestamp::from_millisecond(1).unwrap();
        let entry =
            ShortcodeEntry::new("https://example.com", Timestamp::UNIX_EPOCH, expires_at, false);
        let code = ShortCode::new("edge01").unwrap();
        assert!(table.insert(code.clone(), entry).await.unwrap());

        // First read of the clock lands exactly on the expiry instant.
        let state = service
            .visit("edge01", ClickMetadata::default())
            .await
            .unwrap();
        assert_eq!(state.status(), "redirecting");

        // Every later read is past it.
        let state = service
            .visit("edge01", ClickMetadata::default())
            .await
            .unwrap();
        assert_eq!(state.status(), "expired");

        let stored = table.lookup(&code).await.unwrap().unwrap();
        assert_eq!(stored.clicks.len(), 1);
        assert!(stored.clicks.iter().all(|click| click.ts <= expires_at));
    }
}
