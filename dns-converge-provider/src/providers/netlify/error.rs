//! Netlify error mapping

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::{NetlifyClient, PROVIDER_NAME};

/// Netlify reports failures through the HTTP status; the body carries `{code, message}`.
/// 429 and 502-504 never get here, `HttpUtils::execute_request` handles them.
impl ProviderErrorMapper for NetlifyClient {
    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        match raw.code.as_deref() {
            Some("401") => ProviderError::InvalidCredentials {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },

            Some("403") => ProviderError::PermissionDenied {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },

            // A 404 on a record path means the record is gone, otherwise the zone is
            Some("404") => match context.record_id {
                Some(record_id) => ProviderError::RecordNotFound {
                    provider: self.provider_name().to_string(),
                    record_id,
                    raw_message: Some(raw.message),
                },
                None => ProviderError::DomainNotFound {
                    provider: self.provider_name().to_string(),
                    domain: context.domain.unwrap_or_else(|| "<unknown>".to_string()),
                    raw_message: Some(raw.message),
                },
            },

            Some("400" | "422") => ProviderError::InvalidParameter {
                provider: self.provider_name().to_string(),
                param: context
                    .record_name
                    .unwrap_or_else(|| "request".to_string()),
                detail: raw.message,
            },

            _ => self.unknown_error(raw),
        }
    }
}
