use crate::settings::ShortenerSettings;
use async_trait::async_trait;
use jiff::SignedDuration;
use shortly_core::{
    ClickMetadata, ClickRecord, Clock, KeyValueStore, ShortCode, ShortcodeEntry, Shortened,
    ShortenParams, Shortener, ShortenerError, Table,
};
use shortly_generator::Generator;
use shortly_storage::ShortcodeTable;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A concrete implementation of the `Shortener` trait.
///
/// This service wraps a [`ShortcodeTable`] and a [`Generator`] to handle:
/// - URL validation
/// - Preferred code validation and uniqueness
/// - Generated code allocation with bounded, escalating retries
/// - Validity window conversion
#[derive(Debug)]
pub struct ShortenerService<S, G, C> {
    table: Arc<ShortcodeTable<S>>,
    generator: Arc<G>,
    clock: C,
    settings: ShortenerSettings,
}

impl<S: KeyValueStore, G: Generator, C: Clock> ShortenerService<S, G, C> {
    /// Creates a new `ShortenerService` with default settings.
    pub fn new(table: Arc<ShortcodeTable<S>>, generator: G, clock: C) -> Self {
        Self::with_settings(table, generator, clock, ShortenerSettings::default())
    }

    pub fn with_settings(
        table: Arc<ShortcodeTable<S>>,
        generator: G,
        clock: C,
        settings: ShortenerSettings,
    ) -> Self {
        Self {
            table,
            generator: Arc::new(generator),
            clock,
            settings,
        }
    }

    pub fn settings(&self) -> &ShortenerSettings {
        &self.settings
    }

    /// Checks that the URL is an absolute http(s) URL and returns it trimmed.
    fn validate_url(url: &str) -> Result<String, ShortenerError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(ShortenerError::EmptyUrl);
        }

        // The URL parser drops tabs and newlines, but the stored string must
        // still be usable verbatim as a redirect target.
        if url.chars().any(char::is_control) {
            return Err(ShortenerError::InvalidUrl(format!(
                "contains control characters: {}",
                url.escape_debug()
            )));
        }

        let has_http_scheme = ["http://", "https://"].iter().any(|prefix| {
            url.get(..prefix.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
        });
        if !has_http_scheme {
            return Err(ShortenerError::InvalidUrl(format!(
                "scheme must be http or https: {}",
                url
            )));
        }

        url::Url::parse(url).map_err(|e| ShortenerError::InvalidUrl(format!("{e}: {url}")))?;

        Ok(url.to_string())
    }

    fn validity(&self, minutes: Option<u32>) -> SignedDuration {
        minutes
            .filter(|m| *m > 0)
            .map(|m| SignedDuration::from_mins(i64::from(m)))
            .unwrap_or(self.settings.default_validity)
    }

    async fn insert_preferred(
        &self,
        code: ShortCode,
        entry: ShortcodeEntry,
    ) -> Result<Shortened, ShortenerError> {
        if self.settings.is_reserved(code.as_str()) {
            return Err(ShortenerError::AliasConflict(code.to_string()));
        }

        let inserted = self
            .table
            .transact(|tx| tx.insert(code.clone(), entry.clone()))
            .await?;
        if !inserted {
            return Err(ShortenerError::AliasConflict(code.to_string()));
        }

        Ok(Shortened { code, entry })
    }

    /// Draws generated codes until one is free, all inside one transaction.
    async fn insert_generated(&self, entry: ShortcodeEntry) -> Result<Shortened, ShortenerError> {
        let policy = self.settings.generation;

        let allocated = self
            .table
            .transact(|tx| {
                for failed in 0..policy.max_attempts {
                    let code: ShortCode = self.generator.generate(policy.length_after(failed)).into();
                    if self.settings.is_reserved(code.as_str()) || tx.contains(&code) {
                        debug!(code = %code, attempt = failed + 1, "generated code collided");
                        continue;
                    }
                    tx.insert(code.clone(), entry.clone());
                    return Some(code);
                }
                None
            })
            .await?;

        match allocated {
            Some(code) => Ok(Shortened { code, entry }),
            None => {
                warn!(attempts = policy.max_attempts, "short code generation exhausted");
                Err(ShortenerError::Exhausted {
                    attempts: policy.max_attempts,
                })
            }
        }
    }
}

#[async_trait]
impl<S: KeyValueStore, G: Generator, C: Clock> Shortener for ShortenerService<S, G, C> {
    async fn create(&self, params: ShortenParams) -> Result<Shortened, ShortenerError> {
        let long_url = Self::validate_url(&params.long_url)?;

        let preferred = params
            .preferred_code
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .map(ShortCode::new)
            .transpose()?;

        let created_at = self.clock.now();
        let expires_at = created_at
            .checked_add(self.validity(params.validity_minutes))
            .map_err(|e| ShortenerError::InvalidValidity(e.to_string()))?;

        let custom = preferred.is_some();
        let entry = ShortcodeEntry::new(long_url, created_at, expires_at, custom);

        let shortened = match preferred {
            Some(code) => self.insert_preferred(code, entry).await?,
            None => self.insert_generated(entry).await?,
        };

        info!(
            code = %shortened.code,
            url = %shortened.entry.long_url,
            custom,
            expires_at = %shortened.entry.expires_at,
            "created short link"
        );
        Ok(shortened)
    }

    async fn lookup(&self, code: &ShortCode) -> Result<Option<ShortcodeEntry>, ShortenerError> {
        Ok(self.table.lookup(code).await?)
    }

    async fn record_click(
        &self,
        code: &ShortCode,
        metadata: ClickMetadata,
    ) -> Result<bool, ShortenerError> {
        let click = ClickRecord::new(self.clock.now(), metadata);
        Ok(self.table.record_click(code, click).await?)
    }

    async fn remove(&self, code: &ShortCode) -> Result<bool, ShortenerError> {
        let removed = self.table.remove(code).await?;
        debug!(code = %code, removed, "remove short link");
        Ok(removed)
    }

    async fn clear_all(&self) -> Result<(), ShortenerError> {
        self.table.clear_all().await?;
        info!("cleared all short links");
        Ok(())
    }

    async fn list_all(&self) -> Result<Table, ShortenerError> {
        Ok(self.table.list_all().await?)
    }
}
