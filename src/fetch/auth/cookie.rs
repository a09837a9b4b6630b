use percent_encoding::percent_decode_str;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::warn;

/// Cookies with this prefix are forwarded as request headers.
pub const HEADER_COOKIE_PREFIX: &str = "mlflow-request-header-";

/// Builds the default request headers from a `name=value; ...` cookie string.
///
/// Only cookies named `mlflow-request-header-<header>` contribute; the
/// header name is the remainder after the prefix and the value is the
/// percent-decoded cookie value. The first occurrence of a name wins.
/// Pairs that do not form a valid header are skipped.
pub fn headers_from_cookie(cookie: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();

    for (name, value) in parse_cookie(cookie) {
        let Some(header) = name.strip_prefix(HEADER_COOKIE_PREFIX) else {
            continue;
        };

        let header_name = match HeaderName::from_bytes(header.as_bytes()) {
            Ok(h) => h,
            Err(e) => {
                warn!(cookie = name, error = %e, "Skipping cookie with invalid header name");
                continue;
            }
        };
        let header_value = match HeaderValue::from_str(&value) {
            Ok(v) => v,
            Err(e) => {
                warn!(cookie = name, error = %e, "Skipping cookie with invalid header value");
                continue;
            }
        };

        if !headers.contains_key(&header_name) {
            headers.insert(header_name, header_value);
        }
    }

    headers
}

/// Splits a cookie string into `(name, decoded value)` pairs.
fn parse_cookie(cookie: &str) -> impl Iterator<Item = (&str, String)> {
    cookie.split(';').filter_map(|pair| {
        let (name, value) = pair.split_once('=')?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        let mut value = value.trim();
        if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
            value = &value[1..value.len() - 1];
        }

        // Undecodable values are kept verbatim.
        let decoded = percent_decode_str(value)
            .decode_utf8()
            .map(|v| v.into_owned())
            .unwrap_or_else(|_| value.to_string());

        Some((name, decoded))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_cookie_has_no_headers() {
        assert!(headers_from_cookie("").is_empty());
    }

    #[test]
    fn test_only_prefixed_cookies_become_headers() {
        let headers = headers_from_cookie(
            "session=abc; mlflow-request-header-X-Trace-Id=42; theme=dark",
        );

        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("x-trace-id").unwrap(), "42");
    }

    #[test]
    fn test_values_are_percent_decoded_and_unquoted() {
        let headers = headers_from_cookie(
            "mlflow-request-header-Authorization=Bearer%20tok%3Den; mlflow-request-header-X-Team=\"ml%20infra\"",
        );

        assert_eq!(headers.get("authorization").unwrap(), "Bearer tok=en");
        assert_eq!(headers.get("x-team").unwrap(), "ml infra");
    }

    #[test]
    fn test_first_occurrence_wins() {
        let headers = headers_from_cookie(
            "mlflow-request-header-X-Env=prod; mlflow-request-header-X-Env=dev",
        );

        assert_eq!(headers.get("x-env").unwrap(), "prod");
    }

    #[test]
    fn test_invalid_header_entries_are_skipped() {
        let headers = headers_from_cookie(
            "mlflow-request-header-Bad Name=1; mlflow-request-header-X-Ok=yes; mlflow-request-header-X-Ctl=a%0Ab",
        );

        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("x-ok").unwrap(), "yes");
    }

    #[test]
    fn test_malformed_pairs_are_ignored() {
        let headers = headers_from_cookie(";;novalue; =x; mlflow-request-header-X-A=1");

        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("x-a").unwrap(), "1");
    }
}
