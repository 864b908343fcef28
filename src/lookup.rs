//! Externally visible address lookup.
//!
//! One GET per URL-generating invocation, no cache, no retry. The endpoint
//! answers with a JSON object carrying an `ip` field.

use std::time::Duration;

use crate::error::{Error, Result};

const LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct LookupBody {
    ip: String,
}

pub async fn resolve_ip(url: &str) -> Result<String> {
    let client = reqwest::Client::builder()
        .timeout(LOOKUP_TIMEOUT)
        .build()
        .map_err(|e| Error::NetworkUnavailable(e.to_string()))?;
    let body: LookupBody = client
        .get(url)
        .send()
        .await
        .and_then(|resp| resp.error_for_status())
        .map_err(|e| Error::NetworkUnavailable(format!("{}: {}", url, e)))?
        .json()
        .await
        .map_err(|e| Error::NetworkUnavailable(format!("{}: {}", url, e)))?;
    log::debug!("resolved external address {}", body.ip);
    Ok(body.ip)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_wants_only_the_ip_field() {
        let body: LookupBody = serde_json::from_str(
            r#"{"ip": "203.0.113.7", "city": "Nowhere", "org": "AS0 Example"}"#,
        )
        .unwrap();
        assert_eq!(body.ip, "203.0.113.7");
    }

    #[test]
    fn missing_ip_field_fails_deserialization() {
        assert!(serde_json::from_str::<LookupBody>(r#"{"city": "Nowhere"}"#).is_err());
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_network_unavailable() {
        let err = resolve_ip("http://127.0.0.1:1/json").await.unwrap_err();
        assert!(matches!(err, Error::NetworkUnavailable(_)));
    }
}
