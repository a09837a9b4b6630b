pub mod config;
pub mod error;
pub mod fetch;
pub mod location;

pub use error::{DecodeError, FetchError, RequestError};
pub use fetch::{
    Blob, Content, ReadMode, fetch_artifact_blob, fetch_artifact_bytes, fetch_artifact_content,
    fetch_artifact_text,
};
