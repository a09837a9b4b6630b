//! Request decoration for artifact fetches.
//!
//! [`headers_from_cookie`] turns a browser-style cookie string into the
//! default request headers, and [`DefaultHeaders`] injects them into every
//! request sent through an inner [`HttpClient`](crate::fetch::HttpClient).

mod cookie;
mod default_headers;

pub use cookie::{HEADER_COOKIE_PREFIX, headers_from_cookie};
pub use default_headers::DefaultHeaders;
