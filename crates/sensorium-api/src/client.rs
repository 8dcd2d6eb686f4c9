// Station HTTP client
//
// Wraps `reqwest::Client` with the one request the dashboard makes: a GET
// against the station's data endpoint, decoded strictly into a `Reading`.

use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::reading::Reading;
use crate::transport::TransportConfig;

/// HTTP client for the sensor station's data endpoint.
///
/// Holds the fully resolved endpoint URL (scheme, host, port, path). The
/// endpoint is fixed for the lifetime of the client -- the dashboard polls a
/// single station and is never parameterized at runtime.
#[derive(Debug, Clone)]
pub struct StationClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl StationClient {
    /// Create a new station client from a `TransportConfig`.
    pub fn new(endpoint: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, endpoint })
    }

    /// Create a station client with a pre-built `reqwest::Client`.
    ///
    /// Used by tests that point the client at a mock server.
    pub fn from_reqwest(endpoint: &str, http: reqwest::Client) -> Result<Self, Error> {
        let endpoint = Url::parse(endpoint)?;
        Ok(Self { http, endpoint })
    }

    /// The configured endpoint URL.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Fetch one reading from the station.
    ///
    /// A non-2xx status is [`Error::Status`]; a body that is not a valid
    /// reading (non-JSON, missing field, wrong type, undefined water level
    /// code) is [`Error::Decode`] with the raw body attached.
    pub async fn fetch_reading(&self) -> Result<Reading, Error> {
        let response = self.http.get(self.endpoint.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let reading: Reading = serde_json::from_str(&body).map_err(|e| Error::Decode {
            message: e.to_string(),
            body: body.clone(),
        })?;

        debug!(
            temperature = reading.temperature,
            humidity = reading.humidity,
            air_quality = reading.air_quality,
            water_level = %reading.water_level,
            "fetched reading"
        );

        Ok(reading)
    }
}
