//! Utility modules.

/// RFC 3339 timestamp (de)serialization for optional fields.
pub mod datetime;

/// Log sanitization utilities to prevent sensitive data exposure.
pub mod log_sanitizer;
