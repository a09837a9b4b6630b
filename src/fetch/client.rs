use async_trait::async_trait;
use reqwest::{Request, Response, Url};

/// Transport used by the artifact fetchers.
///
/// Wrapper clients (see [`crate::fetch::auth`]) decorate requests and
/// delegate to an inner implementation.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;

    /// Base URL that relative artifact locations are resolved against.
    fn base_url(&self) -> Option<&Url> {
        None
    }
}
