use jiff::Timestamp;
use serde::Serialize;
use shortly_core::ShortcodeEntry;

/// Where a visit stands.
///
/// `Checking` is the only non-terminal state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RedirectState {
    Checking,
    Redirecting { long_url: String },
    NotFound,
    Expired,
}

impl RedirectState {
    /// Decides the outcome of a `Checking` visit from the looked-up entry.
    ///
    /// Any other state is already terminal and is returned unchanged.
    pub fn resolve(self, entry: Option<&ShortcodeEntry>, now: Timestamp) -> Self {
        if self != RedirectState::Checking {
            return self;
        }

        match entry {
            None => RedirectState::NotFound,
            Some(entry) if entry.is_expired_at(now) => RedirectState::Expired,
            Some(entry) => RedirectState::Redirecting {
                long_url: entry.long_url.clone(),
            },
        }
    }

    pub fn status(&self) -> &'static str {
        match self {
            RedirectState::Checking => "checking",
            RedirectState::Redirecting { .. } => "redirecting",
            RedirectState::NotFound => "notfound",
            RedirectState::Expired => "expired",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            RedirectState::Checking => "Checking link...",
            RedirectState::Redirecting { .. } => "Redirecting...",
            RedirectState::NotFound => "Shortcode not found.",
            RedirectState::Expired => "Short link has expired.",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, RedirectState::Checking)
    }
}
