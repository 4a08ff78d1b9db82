//! Shared test helpers: a wiremock-backed Netlify API.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use dns_converge_provider::{DnsServiceProvider, create_provider_from_settings};
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

pub const ZONE: &str = "example.com";
pub const ZONE_ID: &str = "5f2a0c";
pub const TOKEN: &str = "nfp_integration_test_token";

/// Assert that a `Result` is `Ok` and unwrap it (fails the test otherwise).
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// Starts a fake API serving [`ZONE`] with the given records.
pub async fn netlify_with_records(records: Value) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/dns_zones"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": ZONE_ID, "name": ZONE, "account_slug": "team" },
            { "id": "other", "name": "example.org", "account_slug": "team" }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/api/v1/dns_zones/{ZONE_ID}/dns_records")))
        .respond_with(ResponseTemplate::new(200).set_body_json(records))
        .mount(&server)
        .await;
    server
}

/// A provider pointed at `server`, built the way a credentials file would build it.
pub fn provider_for(server: &MockServer) -> Arc<dyn DnsServiceProvider> {
    let settings: HashMap<String, String> = [
        ("token".to_string(), TOKEN.to_string()),
        ("api_base".to_string(), format!("{}/api/v1", server.uri())),
    ]
    .into();
    match create_provider_from_settings("NETLIFY", &settings) {
        Ok(provider) => provider,
        Err(e) => panic!("provider construction failed: {e}"),
    }
}

/// A managed native record as the API returns it.
pub fn native(id: &str, hostname: &str, record_type: &str, value: &str) -> Value {
    json!({
        "id": id,
        "hostname": hostname,
        "type": record_type,
        "value": value,
        "ttl": 3600,
        "priority": null,
        "weight": null,
        "port": null,
        "flag": null,
        "tag": null,
        "managed": true,
        "dns_zone_id": ZONE_ID,
        "site_id": null
    })
}

/// Requests that changed state, as `"METHOD path"`.
pub async fn mutations(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.method.as_str() != "GET")
        .map(describe)
        .collect()
}

fn describe(request: &Request) -> String {
    format!("{} {}", request.method, request.url.path())
}
