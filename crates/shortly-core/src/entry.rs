use crate::shortcode::ShortCode;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The whole mapping table, keyed by short code.
pub type Table = BTreeMap<ShortCode, ShortcodeEntry>;

/// A stored mapping from a short code to its long URL.
///
/// Timestamps are persisted as integer milliseconds since the Unix epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortcodeEntry {
    /// The original URL that was shortened.
    pub long_url: String,
    #[serde(with = "jiff::fmt::serde::timestamp::millisecond::required")]
    pub created_at: Timestamp,
    #[serde(with = "jiff::fmt::serde::timestamp::millisecond::required")]
    pub expires_at: Timestamp,
    /// Whether the code was chosen by the user rather than generated.
    pub custom: bool,
    /// Recorded visits, oldest first.
    #[serde(default)]
    pub clicks: Vec<ClickRecord>,
}

impl ShortcodeEntry {
    pub fn new(
        long_url: impl Into<String>,
        created_at: Timestamp,
        expires_at: Timestamp,
        custom: bool,
    ) -> Self {
        Self {
            long_url: long_url.into(),
            created_at,
            expires_at,
            custom,
            clicks: Vec::new(),
        }
    }

    /// An entry is expired once `now` is strictly past its expiry time.
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        now > self.expires_at
    }

    pub fn click_count(&self) -> usize {
        self.clicks.len()
    }
}

/// One recorded visit of a short code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickRecord {
    #[serde(with = "jiff::fmt::serde::timestamp::millisecond::required")]
    pub ts: Timestamp,
    #[serde(default)]
    pub referrer: String,
    #[serde(default)]
    pub language: String,
}

impl ClickRecord {
    pub fn new(ts: Timestamp, metadata: ClickMetadata) -> Self {
        Self {
            ts,
            referrer: metadata.referrer.unwrap_or_default(),
            language: metadata.language.unwrap_or_default(),
        }
    }
}

/// Visitor details captured alongside a click.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickMetadata {
    pub referrer: Option<String>,
    pub language: Option<String>,
}
