//! Log sanitization utilities
//!
//! Response bodies can carry long TXT payloads (DKIM keys) and request headers carry the
//! API token; neither may end up verbatim in debug/error logs.

/// Maximum number of bytes of a body included in log output.
const TRUNCATE_LIMIT: usize = 256;

/// Number of leading characters of a secret kept visible by [`redact_secret`].
const VISIBLE_SECRET_PREFIX: usize = 4;

fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    let mut i = index;
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Shortens `s` to at most [`TRUNCATE_LIMIT`] bytes, appending the original length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        return s.to_string();
    }
    format!(
        "{}... [truncated, total {} bytes]",
        &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
        s.len()
    )
}

/// Masks a credential, keeping only a short prefix so two tokens can be told apart.
pub fn redact_secret(secret: &str) -> String {
    let visible: String = secret.chars().take(VISIBLE_SECRET_PREFIX).collect();
    if secret.chars().count() <= VISIBLE_SECRET_PREFIX * 2 {
        "<REDACTED>".to_string()
    } else {
        format!("{visible}…<REDACTED>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_body_unchanged() {
        assert_eq!(truncate_for_log("[]"), "[]");
    }

    #[test]
    fn long_body_truncated_on_char_boundary() {
        let s = "é".repeat(TRUNCATE_LIMIT);
        let out = truncate_for_log(&s);
        assert!(out.contains(&format!("total {} bytes", s.len())));
        assert!(out.len() < s.len());
    }

    #[test]
    fn secrets_are_masked() {
        assert_eq!(redact_secret("abc"), "<REDACTED>");
        let masked = redact_secret("nfp_1234567890abcdef");
        assert!(masked.starts_with("nfp_"));
        assert!(!masked.contains("1234567890"));
    }
}
