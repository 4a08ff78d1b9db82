//! Utility modules.

/// Log sanitization helpers (truncation, secret redaction).
pub mod log_sanitizer;

/// Domain-name qualification helpers shared by the record model and the providers.
pub mod names;
