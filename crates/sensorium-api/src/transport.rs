// Shared transport configuration for building reqwest::Client instances.
//
// The station endpoint is plain HTTP on the local network, so this is only
// timeout and user-agent settings, kept in one place so the client and the
// tests build identical transports.

use std::time::Duration;

/// Transport configuration for the station HTTP client.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, crate::error::Error> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent("sensorium/0.1.0")
            .build()?;
        Ok(client)
    }
}
