//! Binary sniffing and text decoding with UTF-8 fallback logic.
//!
//! This module turns raw file bytes into text:
//! - BOM detection (UTF-8, UTF-16 LE/BE)
//! - UTF-8 fast-path with strict validation
//! - Fallback encoding detection using chardetng
//! - Binary detection via NUL bytes
//! - Clean handling of multi-byte sequences cut by a byte limit

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};

/// Number of leading bytes inspected when sniffing for binary content.
pub const DEFAULT_SAMPLE_SIZE: usize = 8192;

/// Detect if a byte sample is binary (not text).
///
/// A NUL byte in the first [`DEFAULT_SAMPLE_SIZE`] bytes is treated as a
/// strong binary indicator.
pub fn is_binary_sample(bytes: &[u8]) -> bool {
    let sample = &bytes[..bytes.len().min(DEFAULT_SAMPLE_SIZE)];
    sample.contains(&0)
}

/// Guess the encoding of non-UTF-8 bytes.
///
/// Strategy:
/// 1. Check for BOM markers first (most reliable)
/// 2. Fall back to chardetng on a leading sample
///
/// `truncated` marks `bytes` as a prefix of the file, so a sequence split at
/// the end is not held against any encoding.
pub fn detect_encoding(bytes: &[u8], truncated: bool) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return encoding;
    }

    let sample = &bytes[..bytes.len().min(DEFAULT_SAMPLE_SIZE)];
    let at_end = !truncated && sample.len() == bytes.len();
    let mut detector = EncodingDetector::new();
    detector.feed(sample, at_end);
    detector.guess(None, true)
}

/// Decode file bytes to text, returning the content and the encoding label.
///
/// `truncated` signals that `bytes` is a prefix of the file; a multi-byte
/// UTF-8 sequence split at the end is then dropped instead of replaced.
pub fn decode_text(bytes: &[u8], truncated: bool) -> (String, &'static str) {
    let body = bytes.strip_prefix(&[0xef, 0xbb, 0xbf][..]).unwrap_or(bytes);

    // Try UTF-8 first (fast path) - most source files are UTF-8
    match std::str::from_utf8(body) {
        Ok(text) => return (text.to_string(), "utf-8"),
        Err(e) if truncated && e.error_len().is_none() => {
            // Incomplete trailing sequence from the byte limit
            if let Ok(text) = std::str::from_utf8(&body[..e.valid_up_to()]) {
                return (text.to_string(), "utf-8");
            }
        }
        Err(_) => {}
    }

    let encoding = detect_encoding(bytes, truncated);

    if truncated {
        // Streaming decode without `last` keeps a cut trailing sequence pending
        let mut decoder = encoding.new_decoder_with_bom_removal();
        let capacity = decoder.max_utf8_buffer_length(bytes.len()).unwrap_or(bytes.len() * 3);
        let mut out = String::with_capacity(capacity);
        let _ = decoder.decode_to_string(bytes, &mut out, false);
        return (out, label(decoder.encoding()));
    }

    // Decode with replacement for invalid sequences
    let (decoded, used, _had_errors) = encoding.decode(bytes);
    (decoded.into_owned(), label(used))
}

fn label(encoding: &'static Encoding) -> &'static str {
    if encoding == UTF_8 {
        "utf-8"
    } else {
        encoding.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_binary_null_byte() {
        assert!(is_binary_sample(&[0x00, 0x01, 0x02]));
    }

    #[test]
    fn test_is_not_binary_text() {
        assert!(!is_binary_sample("Normal text file".as_bytes()));
        assert!(!is_binary_sample(b""));
    }

    #[test]
    fn test_null_past_sample_is_ignored() {
        let mut bytes = vec![b'a'; DEFAULT_SAMPLE_SIZE];
        bytes.push(0);
        assert!(!is_binary_sample(&bytes));
    }

    #[test]
    fn test_decode_utf8() {
        let (text, enc) = decode_text("Test content 🚀".as_bytes(), false);
        assert_eq!(text, "Test content 🚀");
        assert_eq!(enc, "utf-8");
    }

    #[test]
    fn test_decode_strips_utf8_bom() {
        let mut bytes = vec![0xef, 0xbb, 0xbf];
        bytes.extend_from_slice(b"Hello");
        let (text, enc) = decode_text(&bytes, false);
        assert_eq!(text, "Hello");
        assert_eq!(enc, "utf-8");
    }

    #[test]
    fn test_truncated_multibyte_sequence_is_dropped() {
        let full = "ab🚀".as_bytes();
        // cut inside the 4-byte rocket
        let (text, enc) = decode_text(&full[..4], true);
        assert_eq!(text, "ab");
        assert_eq!(enc, "utf-8");
    }

    #[test]
    fn test_truncated_shift_jis_keeps_its_encoding() {
        let source = "日本語のテキストです。これは長い文章です。".repeat(20);
        let (full, _, had_errors) = encoding_rs::SHIFT_JIS.encode(&source);
        assert!(!had_errors);

        let (whole, enc_whole) = decode_text(&full, false);
        let (cut, enc_cut) = decode_text(&full[..full.len() - 1], true);

        assert_eq!(enc_whole, "Shift_JIS");
        assert_eq!(enc_cut, enc_whole);
        assert_eq!(whole, source);
        // Only the split trailing "。" is lost
        assert_eq!(cut, source.strip_suffix('。').unwrap());
    }

    #[test]
    fn test_latin1_falls_back_to_detection() {
        // "café" in windows-1252
        let bytes = [b'c', b'a', b'f', 0xe9];
        let (text, enc) = decode_text(&bytes, false);
        assert_eq!(text, "café");
        assert_ne!(enc, "utf-8");
    }
}
