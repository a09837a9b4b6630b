use super::client::HttpClient;
use async_trait::async_trait;
use reqwest::Url;
use reqwest::redirect::Policy;

const MAX_REDIRECTS: usize = 10;

/// Plain reqwest-backed client that follows redirects.
pub struct BasicClient {
    client: reqwest::Client,
    base_url: Option<Url>,
}

impl BasicClient {
    pub fn new() -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .redirect(Policy::limited(MAX_REDIRECTS))
            .build()?;
        Ok(Self::from_client(client))
    }

    /// Wraps an already configured reqwest client.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: None,
        }
    }

    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }
}

#[async_trait]
impl HttpClient for BasicClient {
    async fn execute(&self, req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        self.client.execute(req).await
    }

    fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }
}
