//! WMP config API client.

use std::sync::Arc;

use moka::future::Cache;
use tracing::{debug, error, instrument, warn};
use wmp_core::{DomainRecord, SiteDomain};

use crate::config::WmpConfig;

use super::error::WmpError;

/// Upper bound on distinct domains kept in the record cache.
///
/// A deployment reports on a single domain; the headroom only matters when
/// the fixture domain and a handful of test lookups share the process.
const MAX_CACHED_DOMAINS: u64 = 64;

/// Upper bound on response-body characters carried in a parse error.
const MAX_LOGGED_BODY_CHARS: usize = 500;

/// Client for the WMP config API.
///
/// Looks up the hosted-domain record for a site and caches successful,
/// non-empty answers for the configured TTL. Failures are absorbed: every
/// lookup returns a record, possibly the empty one, so rendering never
/// depends on upstream availability.
#[derive(Clone)]
pub struct WmpClient {
    inner: Arc<WmpClientInner>,
}

struct WmpClientInner {
    client: reqwest::Client,
    base_url: String,
    cache: Cache<String, DomainRecord>,
}

impl std::fmt::Debug for WmpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WmpClient")
            .field("base_url", &self.inner.base_url)
            .finish_non_exhaustive()
    }
}

impl WmpClient {
    /// User agent sent with every upstream request.
    const USER_AGENT: &'static str = concat!("wmp-panel/", env!("CARGO_PKG_VERSION"));

    /// Create a new WMP client.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying HTTP client cannot be built
    /// (for example when the TLS backend fails to initialize).
    pub fn new(config: &WmpConfig) -> Result<Self, WmpError> {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .user_agent(Self::USER_AGENT)
            .build()?;

        let cache = Cache::builder()
            .max_capacity(MAX_CACHED_DOMAINS)
            .time_to_live(config.cache_ttl)
            .build();

        Ok(Self {
            inner: Arc::new(WmpClientInner {
                client,
                base_url: config.api_base_url.clone(),
                cache,
            }),
        })
    }

    /// Get the domain record for `domain`.
    ///
    /// Serves from the cache when possible; otherwise fetches from the WMP
    /// API and caches a non-empty result for the configured TTL. Transport
    /// failures, error statuses and unusable bodies all degrade to the
    /// empty record, which is never cached so the next lookup retries.
    #[instrument(skip(self), fields(domain = %domain))]
    pub async fn domain_data(&self, domain: &SiteDomain) -> DomainRecord {
        // Check cache
        if let Some(record) = self.inner.cache.get(domain.as_str()).await {
            debug!("Cache hit for domain record");
            return record;
        }

        let record = match self.fetch(domain).await {
            Ok(record) => record,
            Err(WmpError::Parse { source, body }) => {
                warn!(error = %source, body = %body, "WMP response was not valid JSON");
                return DomainRecord::default();
            }
            Err(e @ WmpError::Envelope) => {
                warn!(error = %e, "WMP response was unusable");
                return DomainRecord::default();
            }
            Err(e) => {
                error!(error = %e, "WMP request failed");
                return DomainRecord::default();
            }
        };

        // An empty record means WMP does not know the domain. Returned as-is
        // but not cached, so the answer recovers as soon as upstream does.
        if record.is_empty() {
            debug!("WMP returned an empty record");
            return record;
        }

        self.inner
            .cache
            .insert(domain.as_str().to_owned(), record.clone())
            .await;

        record
    }

    /// Fetch the record from the WMP API, bypassing the cache.
    async fn fetch(&self, domain: &SiteDomain) -> Result<DomainRecord, WmpError> {
        let url = format!(
            "{}{}",
            self.inner.base_url,
            urlencoding::encode(domain.as_str())
        );

        let response = self.inner.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WmpError::Status(status));
        }

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        let envelope: serde_json::Value =
            serde_json::from_str(&response_text).map_err(|e| WmpError::Parse {
                source: e,
                body: response_text.chars().take(MAX_LOGGED_BODY_CHARS).collect(),
            })?;

        DomainRecord::from_envelope(envelope).ok_or(WmpError::Envelope)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;

    fn test_config(base_url: &str, cache_ttl: Duration) -> WmpConfig {
        WmpConfig {
            api_base_url: base_url.to_string(),
            portal_url: "https://www.wmp.rrze.fau.de".to_string(),
            fixture_domain: "www.wp.rrze.fau.de".to_string(),
            http_timeout: Duration::from_secs(2),
            cache_ttl,
        }
    }

    fn client_for(server: &MockServer, cache_ttl: Duration) -> WmpClient {
        let base_url = server.url("/api/cms/config/servername/");
        WmpClient::new(&test_config(&base_url, cache_ttl)).unwrap()
    }

    #[tokio::test]
    async fn test_envelope_becomes_record() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/cms/config/servername/www.blogs.fau.de");
                then.status(200).json_body(json!({
                    "4711": {
                        "id": 4711,
                        "servername": "www.blogs.fau.de",
                        "server": "web07.rrze.uni-erlangen.de",
                        "aktivseit": "2020-01-15",
                        "instanz": { "kunu": "1000123", "dienste": ["cms", "mail"] }
                    }
                }));
            })
            .await;

        let client = client_for(&server, Duration::from_secs(60));
        let record = client
            .domain_data(&SiteDomain::new("www.blogs.fau.de"))
            .await;

        mock.assert_async().await;
        assert_eq!(record.id, Some(4711));
        assert_eq!(record.servername.as_deref(), Some("www.blogs.fau.de"));
        assert_eq!(record.services(), ["cms", "mail"]);
    }

    #[tokio::test]
    async fn test_second_lookup_is_served_from_cache() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/cms/config/servername/www.blogs.fau.de");
                then.status(200)
                    .json_body(json!({ "1": { "id": 1, "servername": "www.blogs.fau.de" } }));
            })
            .await;

        let client = client_for(&server, Duration::from_secs(60));
        let domain = SiteDomain::new("www.blogs.fau.de");

        let first = client.domain_data(&domain).await;
        let second = client.domain_data(&domain).await;

        assert_eq!(first, second);
        assert_eq!(mock.hits_async().await, 1);
    }

    #[tokio::test]
    async fn test_cache_expires_after_ttl() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/cms/config/servername/www.blogs.fau.de");
                then.status(200)
                    .json_body(json!({ "1": { "id": 1, "servername": "www.blogs.fau.de" } }));
            })
            .await;

        let client = client_for(&server, Duration::from_millis(100));
        let domain = SiteDomain::new("www.blogs.fau.de");

        client.domain_data(&domain).await;
        tokio::time::sleep(Duration::from_millis(250)).await;
        client.domain_data(&domain).await;

        assert_eq!(mock.hits_async().await, 2);
    }

    #[tokio::test]
    async fn test_server_error_returns_empty_record_without_caching() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/cms/config/servername/www.blogs.fau.de");
                then.status(503);
            })
            .await;

        let client = client_for(&server, Duration::from_secs(60));
        let domain = SiteDomain::new("www.blogs.fau.de");

        assert!(client.domain_data(&domain).await.is_empty());
        assert!(client.domain_data(&domain).await.is_empty());

        // Failures are not cached, so both lookups hit the upstream.
        assert_eq!(mock.hits_async().await, 2);
    }

    #[tokio::test]
    async fn test_invalid_json_returns_empty_record() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/cms/config/servername/www.blogs.fau.de");
                then.status(200).body("<html>maintenance</html>");
            })
            .await;

        let client = client_for(&server, Duration::from_secs(60));
        let record = client
            .domain_data(&SiteDomain::new("www.blogs.fau.de"))
            .await;

        assert!(record.is_empty());
    }

    #[tokio::test]
    async fn test_parse_failure_carries_bounded_body_snippet() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/cms/config/servername/www.blogs.fau.de");
                then.status(200).body("x".repeat(MAX_LOGGED_BODY_CHARS + 200));
            })
            .await;

        let client = client_for(&server, Duration::from_secs(60));
        let err = client
            .fetch(&SiteDomain::new("www.blogs.fau.de"))
            .await
            .unwrap_err();

        // The error transports the snippet, so the caller logs it once.
        match err {
            WmpError::Parse { body, .. } => {
                assert_eq!(body.chars().count(), MAX_LOGGED_BODY_CHARS);
            }
            other => panic!("expected a parse error, got: {other}"),
        }
    }

    #[tokio::test]
    async fn test_empty_envelope_returns_empty_record_without_caching() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/cms/config/servername/unknown.fau.de");
                then.status(200).json_body(json!({}));
            })
            .await;

        let client = client_for(&server, Duration::from_secs(60));
        let domain = SiteDomain::new("unknown.fau.de");

        assert!(client.domain_data(&domain).await.is_empty());
        assert!(client.domain_data(&domain).await.is_empty());

        // "Domain unknown" answers are not cached either.
        assert_eq!(mock.hits_async().await, 2);
    }

    #[tokio::test]
    async fn test_connection_refused_returns_empty_record() {
        // Port 1 is never listening.
        let config = test_config("http://127.0.0.1:1/api/", Duration::from_secs(60));
        let client = WmpClient::new(&config).unwrap();

        let record = client.domain_data(&SiteDomain::new("www.fau.de")).await;
        assert!(record.is_empty());
    }
}
