//! Shared provider helpers

use std::time::Duration;

use reqwest::Client;

use crate::error::{ProviderError, Result, SyncError, SyncResult};
use crate::types::RecordType;

// ============ HTTP Client ============

/// Connect timeout (seconds)
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Request timeout (seconds)
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Creates an HTTP client with the default timeouts.
pub fn create_http_client() -> SyncResult<Client> {
    Client::builder()
        .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
        .build()
        .map_err(|e| SyncError::Configuration(format!("failed to create HTTP client: {e}")))
}

// ============ Record type conversion ============

/// Parses a provider record type string.
pub fn parse_record_type(record_type: &str, provider: &str) -> Result<RecordType> {
    match record_type.to_uppercase().as_str() {
        "A" => Ok(RecordType::A),
        "AAAA" => Ok(RecordType::Aaaa),
        "CNAME" => Ok(RecordType::Cname),
        "MX" => Ok(RecordType::Mx),
        "NS" => Ok(RecordType::Ns),
        "SRV" => Ok(RecordType::Srv),
        "TXT" => Ok(RecordType::Txt),
        "CAA" => Ok(RecordType::Caa),
        "SSHFP" => Ok(RecordType::Sshfp),
        "PTR" => Ok(RecordType::Ptr),
        "NAPTR" => Ok(RecordType::Naptr),
        "DS" => Ok(RecordType::Ds),
        "TLSA" => Ok(RecordType::Tlsa),
        "ALIAS" => Ok(RecordType::Alias),
        _ => Err(ProviderError::UnsupportedRecordType {
            provider: provider.to_string(),
            record_type: record_type.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_types_case_insensitively() {
        assert_eq!(parse_record_type("aaaa", "t").unwrap(), RecordType::Aaaa);
        assert_eq!(parse_record_type("SSHFP", "t").unwrap(), RecordType::Sshfp);
        for t in ["A", "CNAME", "MX", "NS", "SRV", "TXT", "CAA"] {
            assert_eq!(parse_record_type(t, "t").unwrap().as_str(), t);
        }
    }

    #[test]
    fn unknown_type_is_unsupported() {
        let err = parse_record_type("LOC", "netlify").unwrap_err();
        assert!(matches!(
            err,
            ProviderError::UnsupportedRecordType { record_type, .. } if record_type == "LOC"
        ));
    }

    #[test]
    fn http_client_builds() {
        assert!(create_http_client().is_ok());
    }
}
