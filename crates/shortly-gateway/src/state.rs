use std::sync::Arc;

use shortly_core::{Clock, KeyValueStore, Shortener};
use shortly_events::EventLogger;
use shortly_generator::RandomGenerator;
use shortly_redirector::{Redirector, RedirectorService};
use shortly_shortener::{ShortenerService, ShortenerSettings};
use shortly_storage::ShortcodeTable;

pub type SharedStore = Arc<dyn KeyValueStore>;
pub type SharedClock = Arc<dyn Clock>;
pub type SharedEvents = Arc<EventLogger<SharedStore, SharedClock>>;

#[derive(Clone)]
pub struct AppState {
    shortener: Arc<dyn Shortener>,
    redirector: Arc<dyn Redirector>,
    events: SharedEvents,
    clock: SharedClock,
    base_url: String,
    default_validity_minutes: i64,
}

impl AppState {
    /// Wires the services over one store: the mapping table and the event log
    /// live under separate keys of `store`.
    pub fn new(
        store: SharedStore,
        clock: SharedClock,
        settings: ShortenerSettings,
        public_base_url: impl Into<String>,
    ) -> Self {
        let table = Arc::new(ShortcodeTable::new(Arc::clone(&store)));
        let events = Arc::new(EventLogger::new(store, Arc::clone(&clock)));
        let default_validity_minutes = settings.default_validity.as_mins();

        let shortener = ShortenerService::with_settings(
            Arc::clone(&table),
            RandomGenerator::new(),
            Arc::clone(&clock),
            settings,
        );
        let redirector = RedirectorService::new(table, Arc::clone(&events), Arc::clone(&clock));

        Self {
            shortener: Arc::new(shortener),
            redirector: Arc::new(redirector),
            events,
            clock,
            base_url: public_base_url.into(),
            default_validity_minutes,
        }
    }

    pub fn shortener(&self) -> &dyn Shortener {
        self.shortener.as_ref()
    }

    pub fn redirector(&self) -> &dyn Redirector {
        self.redirector.as_ref()
    }

    pub fn events(&self) -> &SharedEvents {
        &self.events
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn default_validity_minutes(&self) -> i64 {
        self.default_validity_minutes
    }
}
