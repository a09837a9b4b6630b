mod basic;
mod blob;
mod client;
mod reader;
pub mod auth;

pub use basic::BasicClient;
pub use blob::Blob;
pub use client::HttpClient;
pub use reader::{Content, ReadMode, read_blob};

use hyper::ext::ReasonPhrase;
use reqwest::header::CONTENT_TYPE;
use std::future::Future;
use tracing::{debug, error};

use crate::error::{DecodeError, FetchError, RequestError};
use crate::location::resolve_location;

/// Fetches the artifact at `location` and returns its raw payload.
///
/// Redirects are followed by the client. A non-success status becomes a
/// [`RequestError`] whose message is the response body, or the status text
/// when the body is empty.
#[tracing::instrument(skip(client))]
pub async fn fetch_artifact_blob<C: HttpClient>(
    client: &C,
    location: &str,
) -> Result<Blob, FetchError> {
    let url = resolve_location(client.base_url(), location)?;
    let req = reqwest::Request::new(reqwest::Method::GET, url);

    let resp = client.execute(req).await?;
    let status = resp.status();

    if !status.is_success() {
        // The wire reason phrase is only kept when it differs from the canonical one.
        let status_text = resp
            .extensions()
            .get::<ReasonPhrase>()
            .map(|reason| String::from_utf8_lossy(reason.as_bytes()).into_owned())
            .unwrap_or_else(|| status.canonical_reason().unwrap_or_default().to_string());

        let body = resp.text().await?;
        let message = if body.is_empty() { status_text } else { body };
        debug!(status = status.as_u16(), "Artifact request rejected");
        return Err(RequestError::new(message, status.as_u16()).into());
    }

    let content_type = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = resp.bytes().await?;

    debug!(size = bytes.len(), content_type = ?content_type, "Artifact blob received");
    Ok(Blob::new(bytes, content_type))
}

/// Fetches the artifact and decodes it as text or bytes depending on `mode`.
///
/// Failures are logged before being returned.
#[tracing::instrument(skip(client))]
pub async fn fetch_artifact_content<C: HttpClient>(
    client: &C,
    location: &str,
    mode: ReadMode,
) -> Result<Content, FetchError> {
    fetch_and_decode(client, location, |blob| read_blob(blob, mode)).await
}

/// Fetches the blob and hands it to `decode`, logging either failure.
pub(crate) async fn fetch_and_decode<C, F, Fut>(
    client: &C,
    location: &str,
    decode: F,
) -> Result<Content, FetchError>
where
    C: HttpClient,
    F: FnOnce(Blob) -> Fut,
    Fut: Future<Output = Result<Content, DecodeError>>,
{
    let blob = fetch_artifact_blob(client, location).await.map_err(|e| {
        error!(error = %e, "Artifact fetch failed");
        e
    })?;

    decode(blob).await.map_err(|e| {
        error!(error = %e, "Artifact decode failed");
        FetchError::from(e)
    })
}

/// Fetches the artifact decoded as text.
pub async fn fetch_artifact_text<C: HttpClient>(
    client: &C,
    location: &str,
) -> Result<String, FetchError> {
    Ok(fetch_artifact_content(client, location, ReadMode::Text)
        .await?
        .into_string())
}

/// Fetches the artifact as raw bytes.
pub async fn fetch_artifact_bytes<C: HttpClient>(
    client: &C,
    location: &str,
) -> Result<Vec<u8>, FetchError> {
    Ok(fetch_artifact_content(client, location, ReadMode::Binary)
        .await?
        .into_bytes())
}
