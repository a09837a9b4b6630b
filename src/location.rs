//! Resolution of artifact locations into request URLs.

use reqwest::Url;

use crate::error::FetchError;

/// Turns an artifact location into an absolute URL.
///
/// Absolute URLs pass through unchanged. Anything else is joined onto
/// `base`, and fails without one.
pub fn resolve_location(base: Option<&Url>, location: &str) -> Result<Url, FetchError> {
    let resolved = match base {
        Some(base) => base.join(location),
        None => Url::parse(location),
    };

    resolved.map_err(|e| FetchError::InvalidLocation {
        location: location.to_string(),
        reason: e.to_string(),
    })
}
