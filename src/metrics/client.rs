//! HTTP client for the real-time database REST endpoint.

use reqwest::blocking::Client;
use std::time::Duration;

use super::NetworkMetrics;
use crate::config::MetricsConfig;

/// Reads the live metrics record.
pub struct MetricsClient {
    client: Client,
    config: MetricsConfig,
}

impl MetricsClient {
    /// Create a new MetricsClient with the given configuration.
    pub fn new(config: MetricsConfig) -> Result<Self, String> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| format!("Failed to create HTTP client: {}", e))?;

        Ok(Self { client, config })
    }

    /// URL of the record, without the auth parameter.
    pub fn record_url(&self) -> String {
        record_url(&self.config.database_url, &self.config.path)
    }

    /// Fetch the record.
    ///
    /// # Returns
    /// * `Ok(Some(metrics))` when the record exists
    /// * `Ok(None)` when the database holds no record at the path
    /// * `Err(String)` with error details otherwise
    pub fn fetch(&self) -> Result<Option<NetworkMetrics>, String> {
        let url = self.record_url();
        log::debug!("Fetching live metrics from {}", url);

        let mut request = self.client.get(&url);
        if let Some(token) = &self.config.auth_token {
            request = request.query(&[("auth", token)]);
        }
        let response = request.send().map_err(|e| format!("Network error: {}", e))?;

        let status = response.status();
        if status.is_success() {
            let body = response.text().map_err(|e| format!("Failed to read response: {}", e))?;
            parse_record(&body)
        } else if status.as_u16() == 401 || status.as_u16() == 403 {
            Err("Access denied. Check auth-token in config.toml".to_string())
        } else {
            let body = response.text().unwrap_or_default();
            Err(format!("Server error ({}): {}", status.as_u16(), body))
        }
    }
}

/// Join the database URL and record path into the REST URL (`<base>/<path>.json`).
pub fn record_url(database_url: &str, path: &str) -> String {
    format!("{}/{}.json", database_url.trim_end_matches('/'), path.trim_matches('/'))
}

/// Decode a response body; JSON `null` means the record does not exist.
pub fn parse_record(body: &str) -> Result<Option<NetworkMetrics>, String> {
    serde_json::from_str::<Option<NetworkMetrics>>(body).map_err(|e| format!("Unexpected response: {}", e))
}
