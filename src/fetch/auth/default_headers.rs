use crate::fetch::client::HttpClient;
use async_trait::async_trait;
use reqwest::header::HeaderMap;

use super::cookie::headers_from_cookie;

/// An [`HttpClient`] wrapper that sets a fixed group of headers on every
/// request before handing it to `inner`.
///
/// Headers already present on the request are overwritten.
pub struct DefaultHeaders<C> {
    pub inner: C,
    pub headers: HeaderMap,
}

impl<C> DefaultHeaders<C> {
    pub fn new(inner: C, headers: HeaderMap) -> Self {
        Self { inner, headers }
    }

    /// Derives the headers from a cookie string, see [`headers_from_cookie`].
    pub fn from_cookie(inner: C, cookie: &str) -> Self {
        Self::new(inner, headers_from_cookie(cookie))
    }
}

#[async_trait]
impl<C: HttpClient> HttpClient for DefaultHeaders<C> {
    async fn execute(&self, mut req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        for (name, value) in &self.headers {
            req.headers_mut().insert(name.clone(), value.clone());
        }
        self.inner.execute(req).await
    }

    fn base_url(&self) -> Option<&reqwest::Url> {
        self.inner.base_url()
    }
}
