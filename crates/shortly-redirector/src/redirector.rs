use crate::state::RedirectState;
use crate::Result;
use async_trait::async_trait;
use shortly_core::ClickMetadata;

#[async_trait]
pub trait Redirector: Send + Sync + 'static {
    /// Resolves a visited path segment to a terminal [`RedirectState`].
    ///
    /// A click is recorded only when the result is `Redirecting`.
    async fn visit(&self, code: &str, metadata: ClickMetadata) -> Result<RedirectState>;
}
