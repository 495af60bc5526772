//! Log sanitization utilities
//!
//! Keeps credentials and oversized response bodies out of debug/error logs.

/// Maximum number of bytes of a body to include in log output.
const TRUNCATE_LIMIT: usize = 256;

/// Number of trailing characters of a secret left visible by [`mask_secret`].
const VISIBLE_SECRET_CHARS: usize = 4;

/// Cut `s` to at most `limit` bytes without splitting a UTF-8 sequence.
fn head(s: &str, limit: usize) -> &str {
    let end = s
        .char_indices()
        .map(|(i, c)| i + c.len_utf8())
        .take_while(|&end| end <= limit)
        .last()
        .unwrap_or(0);
    &s[..end]
}

/// Shorten a response body before it goes into a log line.
///
/// Bodies up to `TRUNCATE_LIMIT` bytes are returned whole; longer ones keep
/// their head and note the original size.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        return s.to_string();
    }
    format!("{}... [truncated, total {} bytes]", head(s, TRUNCATE_LIMIT), s.len())
}

/// Mask a credential, keeping only its last few characters.
///
/// Secrets too short to keep a suffix are masked entirely.
pub fn mask_secret(secret: &str) -> String {
    let count = secret.chars().count();
    if count <= VISIBLE_SECRET_CHARS * 2 {
        return "****".to_string();
    }
    let tail: String = secret.chars().skip(count - VISIBLE_SECRET_CHARS).collect();
    format!("****{tail}")
}
