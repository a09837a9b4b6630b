//! Off-task decoding of fetched blobs.
//!
//! Each read hands the blob to a blocking worker and waits on a one-shot
//! channel for its single completion, so a read settles exactly once.

use encoding_rs::{Encoding, UTF_8};
use mime::Mime;
use tokio::sync::oneshot;

use super::blob::Blob;
use crate::error::DecodeError;

/// How a fetched artifact should be decoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReadMode {
    #[default]
    Text,
    Binary,
}

impl ReadMode {
    pub fn from_binary_flag(is_binary: bool) -> Self {
        if is_binary {
            ReadMode::Binary
        } else {
            ReadMode::Text
        }
    }
}

/// Decoded artifact content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Text(String),
    Bytes(Vec<u8>),
}

impl Content {
    /// Converts into a string; binary content is decoded lossily as UTF-8.
    pub fn into_string(self) -> String {
        match self {
            Content::Text(text) => text,
            Content::Bytes(bytes) => decode_text(&bytes, None),
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Content::Text(text) => text.into_bytes(),
            Content::Bytes(bytes) => bytes,
        }
    }
}

/// Reads the blob in the requested mode.
pub async fn read_blob(blob: Blob, mode: ReadMode) -> Result<Content, DecodeError> {
    match mode {
        ReadMode::Text => {
            read_with(blob, |b| Content::Text(decode_text(b.as_bytes(), b.content_type()))).await
        }
        ReadMode::Binary => read_with(blob, |b| Content::Bytes(Vec::from(b.into_bytes()))).await,
    }
}

pub(crate) async fn read_with<T, F>(blob: Blob, decode: F) -> Result<T, DecodeError>
where
    T: Send + 'static,
    F: FnOnce(Blob) -> T + Send + 'static,
{
    let (tx, rx) = oneshot::channel();

    tokio::task::spawn_blocking(move || {
        let decoded = decode(blob);
        // The receiver is gone only if the caller stopped waiting.
        let _ = tx.send(decoded);
    });

    rx.await.map_err(|_| DecodeError::Aborted)
}

/// Decodes text the way a browser reads a blob: a byte-order mark wins,
/// then the `charset` of the content type, then UTF-8. Malformed sequences
/// become U+FFFD.
fn decode_text(bytes: &[u8], content_type: Option<&str>) -> String {
    let encoding = content_type
        .and_then(|ct| ct.parse::<Mime>().ok())
        .and_then(|mime| {
            mime.get_param(mime::CHARSET)
                .and_then(|charset| Encoding::for_label(charset.as_str().as_bytes()))
        })
        .unwrap_or(UTF_8);

    let (text, _, _) = encoding.decode(bytes);
    text.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_text_mode_decodes_utf8() {
        let blob = Blob::new(&b"hello"[..], None);
        let content = read_blob(blob, ReadMode::Text).await.unwrap();
        assert_eq!(content, Content::Text("hello".to_string()));
    }

    #[tokio::test]
    async fn test_binary_mode_keeps_bytes() {
        let blob = Blob::new(vec![0x00, 0x01, 0xFF], None);
        let content = read_blob(blob, ReadMode::Binary).await.unwrap();
        assert_eq!(content, Content::Bytes(vec![0x00, 0x01, 0xFF]));
    }

    #[tokio::test]
    async fn test_text_mode_strips_bom_and_replaces_invalid_bytes() {
        let blob = Blob::new(&b"\xEF\xBB\xBFa\xFFb"[..], None);
        let content = read_blob(blob, ReadMode::Text).await.unwrap();
        assert_eq!(content, Content::Text("a\u{FFFD}b".to_string()));
    }

    #[tokio::test]
    async fn test_text_mode_sniffs_utf16_bom() {
        let blob = Blob::new(
            vec![0xFF, 0xFE, 0x68, 0x00, 0x69, 0x00],
            Some("text/plain".to_string()),
        );
        let content = read_blob(blob, ReadMode::Text).await.unwrap();
        assert_eq!(content, Content::Text("hi".to_string()));

        let blob = Blob::new(vec![0xFE, 0xFF, 0x00, 0x68, 0x00, 0x69], None);
        let content = read_blob(blob, ReadMode::Text).await.unwrap();
        assert_eq!(content, Content::Text("hi".to_string()));
    }

    #[tokio::test]
    async fn test_text_mode_honours_content_type_charset() {
        let blob = Blob::new(
            vec![0x63, 0x61, 0x66, 0xE9],
            Some("text/plain; charset=iso-8859-1".to_string()),
        );
        let content = read_blob(blob, ReadMode::Text).await.unwrap();
        assert_eq!(content, Content::Text("café".to_string()));
    }

    #[tokio::test]
    async fn test_unknown_charset_falls_back_to_utf8() {
        let blob = Blob::new(
            "naïve".as_bytes().to_vec(),
            Some("text/plain; charset=no-such-charset".to_string()),
        );
        let content = read_blob(blob, ReadMode::Text).await.unwrap();
        assert_eq!(content, Content::Text("naïve".to_string()));
    }

    #[tokio::test]
    async fn test_empty_blob_reads_as_empty() {
        let text = read_blob(Blob::new(Vec::new(), None), ReadMode::Text).await.unwrap();
        assert_eq!(text, Content::Text(String::new()));

        let bytes = read_blob(Blob::new(Vec::new(), None), ReadMode::Binary).await.unwrap();
        assert_eq!(bytes, Content::Bytes(Vec::new()));
    }

    #[tokio::test]
    async fn test_panicking_decoder_reports_aborted() {
        let blob = Blob::new(&b"x"[..], None);
        let result: Result<(), _> = read_with(blob, |_| panic!("decoder blew up")).await;
        assert!(matches!(result, Err(DecodeError::Aborted)));
    }

    #[test]
    fn test_binary_flag_maps_to_mode() {
        assert_eq!(ReadMode::from_binary_flag(true), ReadMode::Binary);
        assert_eq!(ReadMode::from_binary_flag(false), ReadMode::Text);
        assert_eq!(ReadMode::default(), ReadMode::Text);
    }

    #[test]
    fn test_content_conversions() {
        assert_eq!(Content::Text("ab".into()).into_bytes(), b"ab".to_vec());
        assert_eq!(Content::Bytes(b"ab".to_vec()).into_string(), "ab");
    }
}
