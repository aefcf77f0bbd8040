use crate::entry::{ClickMetadata, ShortcodeEntry, Table};
use crate::shortcode::ShortCode;
use async_trait::async_trait;

type Result<T> = std::result::Result<T, crate::error::ShortenerError>;

/// Parameters for creating a shortened URL.
#[derive(Debug, Clone, Default)]
pub struct ShortenParams {
    /// The original URL to be shortened.
    pub long_url: String,
    /// How long the short link stays valid. `None` or zero selects the
    /// configured default.
    pub validity_minutes: Option<u32>,
    /// Optional user-chosen short code. Blank strings count as absent.
    pub preferred_code: Option<String>,
}

impl ShortenParams {
    pub fn new(long_url: impl Into<String>) -> Self {
        Self {
            long_url: long_url.into(),
            ..Self::default()
        }
    }

    pub fn validity_minutes(mut self, minutes: u32) -> Self {
        self.validity_minutes = Some(minutes);
        self
    }

    pub fn preferred_code(mut self, code: impl Into<String>) -> Self {
        self.preferred_code = Some(code.into());
        self
    }
}

/// A successfully created short link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortened {
    pub code: ShortCode,
    pub entry: ShortcodeEntry,
}

#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Creates a shortened URL and returns the allocated code with its entry.
    async fn create(&self, params: ShortenParams) -> Result<Shortened>;

    /// Returns the entry for `code`, expired or not.
    async fn lookup(&self, code: &ShortCode) -> Result<Option<ShortcodeEntry>>;

    /// Appends a click to `code`. Returns `false` if the code does not exist.
    async fn record_click(&self, code: &ShortCode, metadata: ClickMetadata) -> Result<bool>;

    /// Deletes a shortened URL. Returns `true` if the entry existed.
    async fn remove(&self, code: &ShortCode) -> Result<bool>;

    /// Deletes every entry.
    async fn clear_all(&self) -> Result<()>;

    /// Returns a snapshot of the whole table.
    async fn list_all(&self) -> Result<Table>;
}
