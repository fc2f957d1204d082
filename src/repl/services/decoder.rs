//! # Response Body Decoder
//!
//! The client is built without reqwest's decompression features, so bodies
//! are decompressed here according to `content-encoding` and then decoded to
//! text using the `content-type` charset when they are not UTF-8.

use crate::repl::error::ReqlineError;
use bytes::Bytes;
use encoding_rs::{Encoding, SHIFT_JIS};
use flate2::read::{DeflateDecoder, GzDecoder};
use std::io::Read;

pub const ENC_GZIP: &str = "gzip";
pub const ENC_DEFLATE: &str = "deflate";
pub const ENC_ZSTD: &str = "zstd";

pub fn decode_gzip(data: &[u8]) -> Result<Bytes, ReqlineError> {
    let mut decoded = Vec::new();
    GzDecoder::new(data)
        .read_to_end(&mut decoded)
        .map_err(|e| ReqlineError::Decode(e.to_string()))?;
    Ok(Bytes::from(decoded))
}

pub fn decode_deflate(data: &[u8]) -> Result<Bytes, ReqlineError> {
    let mut decoded = Vec::new();
    DeflateDecoder::new(data)
        .read_to_end(&mut decoded)
        .map_err(|e| ReqlineError::Decode(e.to_string()))?;
    Ok(Bytes::from(decoded))
}

pub fn decode_zstd(data: &[u8]) -> Result<Bytes, ReqlineError> {
    zstd::decode_all(data)
        .map(Bytes::from)
        .map_err(|e| ReqlineError::Decode(e.to_string()))
}

/// Undo `content-encoding`; unknown or absent encodings pass through
pub fn decompress(data: Bytes, content_encoding: Option<&str>) -> Result<Bytes, ReqlineError> {
    match content_encoding.map(|e| e.trim().to_ascii_lowercase()).as_deref() {
        Some(ENC_GZIP) => decode_gzip(&data),
        Some(ENC_DEFLATE) => decode_deflate(&data),
        Some(ENC_ZSTD) => decode_zstd(&data),
        _ => Ok(data),
    }
}

/// Charset label from a `content-type` value, e.g. `text/html; charset=EUC-JP`
fn charset_of(content_type: &str) -> Option<&'static Encoding> {
    content_type
        .split(';')
        .filter_map(|param| param.trim().split_once('='))
        .find(|(key, _)| key.trim().eq_ignore_ascii_case("charset"))
        .and_then(|(_, label)| Encoding::for_label(label.trim().trim_matches('"').as_bytes()))
}

/// Decode a body to text: UTF-8 first, then the declared charset, then Shift_JIS
pub fn decode_text(data: &[u8], content_type: Option<&str>) -> Result<String, ReqlineError> {
    if let Ok(text) = std::str::from_utf8(data) {
        return Ok(text.to_string());
    }

    let encoding = content_type.and_then(charset_of).unwrap_or(SHIFT_JIS);
    let (text, _, had_errors) = encoding.decode(data);
    if had_errors {
        return Err(ReqlineError::Decode(format!(
            "body is neither UTF-8 nor {}",
            encoding.name()
        )));
    }
    Ok(text.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_gzip_should_return_correct_string() {
        let data = vec![
            31, 139, 8, 0, 0, 0, 0, 0, 0, 255, 43, 73, 45, 46, 137, 55, 52, 50, 6, 0, 21, 191, 53,
            241, 8, 0, 0, 0,
        ];
        let result = decode_gzip(&data).unwrap();
        assert_eq!(&result[..], b"test_123");
    }

    #[test]
    fn decompress_should_round_trip_zstd() {
        let compressed = zstd::encode_all(&b"{\"id\":1}"[..], 0).unwrap();
        let result = decompress(Bytes::from(compressed), Some("zstd")).unwrap();
        assert_eq!(&result[..], b"{\"id\":1}");
    }

    #[test]
    fn decompress_should_pass_through_identity() {
        let result = decompress(Bytes::from_static(b"plain"), None).unwrap();
        assert_eq!(&result[..], b"plain");
        let result = decompress(Bytes::from_static(b"plain"), Some("identity")).unwrap();
        assert_eq!(&result[..], b"plain");
    }

    #[test]
    fn corrupt_gzip_should_be_a_decode_error() {
        let err = decompress(Bytes::from_static(b"not gzip"), Some("gzip")).unwrap_err();
        assert!(matches!(err, ReqlineError::Decode(_)));
    }

    #[test]
    fn decode_text_should_use_declared_charset() {
        // "café" in ISO-8859-1
        let latin1 = [0x63, 0x61, 0x66, 0xE9];
        let text = decode_text(&latin1, Some("text/plain; charset=ISO-8859-1")).unwrap();
        assert_eq!(text, "café");
    }

    #[test]
    fn decode_text_should_prefer_utf8() {
        let text = decode_text("日本".as_bytes(), Some("text/plain; charset=Shift_JIS")).unwrap();
        assert_eq!(text, "日本");
    }
}
