//! HTTP transport for the shop admin API

use log::{debug, error, warn};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use crate::config::defaults;
use crate::error::{Result, ShopError};
use crate::shop::credentials::ShopCredentials;

/// Notify operators about a 429 from the API.
///
/// The API enforces a call budget; hitting it is worth an alert, but the
/// call itself is treated like any other failed request and never retried.
fn notify_rate_limited(verb: &str, path: &str) {
    let message = format!(
        "Error 429 returned for \"{}\" call [{}]; the API call budget is exhausted.",
        verb, path
    );
    warn!("429 detected! Message sent to admins: {}", message);
}

/// Trim stray leading/trailing slashes and backslashes from an API path.
///
/// Paths are joined onto the base URL with exactly one separator, so a
/// caller-supplied `/admin/shop.json/` must normalize to `admin/shop.json`.
pub fn prepare_path(path: &str) -> &str {
    path.trim_matches(|c| c == '/' || c == '\\')
}

/// Shop admin API transport with the full verb surface
///
/// Extraction code never holds one of these directly; it goes through
/// [`ReadOnlyShop`], which exposes only the non-mutating calls.
pub struct ShopTransport {
    client: Client,
    creds: ShopCredentials,
    /// Custom base URL override (for testing with mock servers)
    base_url_override: Option<String>,
}

impl ShopTransport {
    /// Create a new transport with connection settings tuned for a long
    /// sequential extraction run
    pub fn new(creds: ShopCredentials) -> Self {
        let client = Client::builder()
            .pool_max_idle_per_host(2)
            .pool_idle_timeout(Duration::from_secs(90))
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            creds,
            base_url_override: None,
        }
    }

    /// Create a transport with a custom base URL (for testing with mock servers)
    #[cfg(test)]
    pub fn with_base_url(creds: ShopCredentials, base_url: String) -> Self {
        let client = Client::builder().build().unwrap_or_else(|_| Client::new());

        Self {
            client,
            creds,
            base_url_override: Some(base_url),
        }
    }

    /// Demote this transport to the read-only view used by extraction code
    pub fn into_read_only(self) -> ReadOnlyShop {
        ReadOnlyShop { transport: self }
    }

    /// Build the base URL for API requests
    pub(crate) fn base_url(&self) -> String {
        if let Some(ref url) = self.base_url_override {
            return url.clone();
        }
        format!(
            "https://{}{}",
            self.creds.shop,
            defaults::SHOP_DOMAIN_SUFFIX
        )
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url(), prepare_path(path))
    }

    /// Make a GET call against the admin API
    pub async fn get(&self, path: &str) -> Result<Value> {
        let url = self.url_for(path);
        debug!("GET {}", url);
        let response = self
            .client
            .get(&url)
            .basic_auth(&self.creds.key, Some(&self.creds.password))
            .send()
            .await?;
        self.parse_response("get", path, response).await
    }

    /// Make a POST call against the admin API
    pub async fn post(&self, path: &str, body: &Value) -> Result<Value> {
        let url = self.url_for(path);
        debug!("POST {}", url);
        let response = self
            .client
            .post(&url)
            .basic_auth(&self.creds.key, Some(&self.creds.password))
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await?;
        self.parse_response("post", path, response).await
    }

    /// Make a PUT call against the admin API
    pub async fn put(&self, path: &str, body: &Value) -> Result<Value> {
        let url = self.url_for(path);
        debug!("PUT {}", url);
        let response = self
            .client
            .put(&url)
            .basic_auth(&self.creds.key, Some(&self.creds.password))
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await?;
        self.parse_response("put", path, response).await
    }

    /// Make a DELETE call against the admin API
    pub async fn delete(&self, path: &str) -> Result<Value> {
        let url = self.url_for(path);
        debug!("DELETE {}", url);
        let response = self
            .client
            .delete(&url)
            .basic_auth(&self.creds.key, Some(&self.creds.password))
            .send()
            .await?;
        self.parse_response("delete", path, response).await
    }

    /// Check the shop answers at all (any 2xx on the bare shop URL)
    ///
    /// Failures are logged, never fatal; callers decide whether to abort.
    pub async fn ping(&self) -> bool {
        let url = self.base_url();
        debug!("Pinging shop at {}", url);
        match self.client.get(&url).send().await {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                error!(
                    "The request to {} did not return a 2xx status code (got {})",
                    url,
                    response.status()
                );
                false
            }
            Err(e) => {
                error!("The request to {} failed: {}", url, e);
                false
            }
        }
    }

    /// Parse an API response; 200 and 201 are the only accepted statuses
    async fn parse_response(
        &self,
        verb: &str,
        path: &str,
        response: reqwest::Response,
    ) -> Result<Value> {
        let status = response.status().as_u16();
        if status == 429 {
            notify_rate_limited(verb, path);
        }
        match status {
            200 | 201 => Ok(response.json().await?),
            _ => {
                let body = response.text().await.unwrap_or_default();
                debug!("bad status {} for {} [{}]: {}", status, verb, path, body);
                Err(ShopError::Api {
                    status,
                    message: format!("{} call to [{}] failed", verb, path),
                })
            }
        }
    }
}

/// Read-only view of the shop transport
///
/// The extraction path takes one of these, so mutating verbs are
/// unreachable from it by construction rather than by runtime guard.
pub struct ReadOnlyShop {
    transport: ShopTransport,
}

impl ReadOnlyShop {
    /// Make a GET call against the admin API
    pub async fn get(&self, path: &str) -> Result<Value> {
        self.transport.get(path).await
    }

    /// Check the shop answers at all
    pub async fn ping(&self) -> bool {
        self.transport.ping().await
    }
}

#[cfg(test)]
impl ShopTransport {
    /// Create a test transport against a mock base URL
    pub fn test_client(base_url: &str) -> Self {
        Self::with_base_url(
            ShopCredentials {
                key: "test-key".to_string(),
                password: "test-password".to_string(),
                shop: "unit-testing-store".to_string(),
            },
            base_url.to_string(),
        )
    }
}
