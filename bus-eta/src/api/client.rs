//! Citybus open-data HTTP client.
//!
//! Provides the four remote lookups (route, route-stop, stop directory,
//! arrivals) as independent, idempotent async operations. The client holds
//! no mutable state; callers decide what to cache.

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::{ArrivalEstimate, Direction, Route, RouteCode, RouteStop, StopDetails, StopId};

use super::convert::{convert_arrivals, convert_route, convert_route_stops, convert_stops};
use super::error::{EtaError, FetchError};
use super::types::{Envelope, EtaDto, RouteDto, RouteStopDto, StopDto};

/// Default base URL for the Citybus open-data API.
const DEFAULT_BASE_URL: &str = "https://rt.data.gov.hk/v2/transport/citybus";

/// Default operator company code.
const DEFAULT_COMPANY: &str = "CTB";

/// Configuration for the ETA client.
#[derive(Debug, Clone)]
pub struct EtaClientConfig {
    /// Base URL for the API (defaults to the production feed)
    pub base_url: String,
    /// Operator company code used in URL paths
    pub company: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl EtaClientConfig {
    /// Create a config with production defaults.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            company: DEFAULT_COMPANY.to_string(),
            timeout_secs: 15,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the operator company code.
    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = company.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for EtaClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Citybus open-data API client.
#[derive(Debug, Clone)]
pub struct EtaClient {
    http: reqwest::Client,
    base_url: String,
    company: String,
}

impl EtaClient {
    /// Create a new client with the given configuration.
    pub fn new(config: EtaClientConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            company: config.company,
        })
    }

    /// The operator company code this client queries.
    pub fn company(&self) -> &str {
        &self.company
    }

    /// Verify a route exists and fetch its terminus names.
    ///
    /// Any transport failure or missing payload reports as
    /// [`EtaError::RouteNotFound`]; the upstream signals an unknown route by
    /// non-success status or an empty envelope, not an error code.
    pub async fn get_route(&self, route: &RouteCode) -> Result<Route, EtaError> {
        let url = format!("{}/route/{}/{}", self.base_url, self.company, route);

        let dto: RouteDto = self
            .fetch_data(&url)
            .await
            .map_err(|_| EtaError::RouteNotFound {
                route: route.clone(),
            })?;

        convert_route(&dto).map_err(|_| EtaError::RouteNotFound {
            route: route.clone(),
        })
    }

    /// Fetch a route's ordered stop sequence.
    ///
    /// With `direction` set, only that direction's stops are returned;
    /// without it, the feed returns both directions merged. An empty result
    /// is returned as-is — distinguishing "no stops" from transport failure
    /// is the caller's concern.
    pub async fn get_route_stops(
        &self,
        route: &RouteCode,
        direction: Option<Direction>,
    ) -> Result<Vec<RouteStop>, EtaError> {
        let url = match direction {
            Some(dir) => format!(
                "{}/route-stop/{}/{}/{}",
                self.base_url,
                self.company,
                route,
                dir.code()
            ),
            None => format!("{}/route-stop/{}/{}", self.base_url, self.company, route),
        };

        let dtos: Vec<RouteStopDto> = self
            .fetch_data(&url)
            .await
            .map_err(|source| EtaError::StopsUnavailable { source })?;

        Ok(convert_route_stops(&dtos))
    }

    /// Fetch the full global stop directory.
    ///
    /// Callers must tolerate [`EtaError::DirectoryUnavailable`] by falling
    /// back to identifier-only display rather than aborting the lookup.
    pub async fn get_all_stops(&self) -> Result<Vec<StopDetails>, EtaError> {
        let url = format!("{}/stop", self.base_url);

        let dtos: Vec<StopDto> = self
            .fetch_data(&url)
            .await
            .map_err(|source| EtaError::DirectoryUnavailable { source })?;

        Ok(convert_stops(&dtos))
    }

    /// Fetch arrival estimates for a stop+route pair.
    ///
    /// An empty vector is a valid "no upcoming buses" outcome; it is
    /// distinct from [`EtaError::ArrivalsUnavailable`].
    pub async fn get_arrivals(
        &self,
        stop: &StopId,
        route: &RouteCode,
    ) -> Result<Vec<ArrivalEstimate>, EtaError> {
        let url = format!("{}/eta/{}/{}/{}", self.base_url, self.company, stop, route);

        let dtos: Vec<EtaDto> = self
            .fetch_data(&url)
            .await
            .map_err(|source| EtaError::ArrivalsUnavailable { source })?;

        Ok(convert_arrivals(&dtos))
    }

    /// Issue one GET and unwrap the response envelope.
    async fn fetch_data<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        debug!("GET {url}: {status}, {} bytes", body.len());

        let envelope: Envelope<T> =
            serde_json::from_str(&body).map_err(|e| FetchError::Json {
                message: e.to_string(),
            })?;

        envelope.data.ok_or(FetchError::MissingData)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = EtaClientConfig::new();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.company, "CTB");
        assert_eq!(config.timeout_secs, 15);
    }

    #[test]
    fn config_builder() {
        let config = EtaClientConfig::new()
            .with_base_url("http://localhost:8080")
            .with_company("NWFB")
            .with_timeout(60);

        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.company, "NWFB");
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn client_creation() {
        let client = EtaClient::new(EtaClientConfig::new());
        assert!(client.is_ok());
        assert_eq!(client.unwrap().company(), "CTB");
    }

    // Network tests would require a live feed or a local stub server and
    // are deliberately absent; the conversion and envelope layers carry
    // the decoding coverage.
}
