use std::time::Duration;

use log::warn;
use reqwest::Client;

use super::Collect;

/// Default endpoint answering with the caller's public address
pub const DEFAULT_IP_URL: &str = "https://icanhazip.com";

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Public IP fetched over HTTP
///
/// Failures yield an empty string so the segment disappears from the bar
/// instead of showing stale noise.
pub struct ExternalIpCollector {
    client: Client,
    url: String,
}

impl ExternalIpCollector {
    /// Create a collector against the given endpoint
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait::async_trait]
impl Collect for ExternalIpCollector {
    async fn collect(&self, _parent: &str) -> String {
        let response = match self
            .client
            .get(&self.url)
            .timeout(FETCH_TIMEOUT)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!("failed to get external ip: {}", e);
                return String::new();
            }
        };

        let response = match response.error_for_status() {
            Ok(response) => response,
            Err(e) => {
                warn!("external ip endpoint refused: {}", e);
                return String::new();
            }
        };

        match response.text().await {
            Ok(body) => body.trim().to_string(),
            Err(e) => {
                warn!("failed to read external ip: {}", e);
                String::new()
            }
        }
    }
}
