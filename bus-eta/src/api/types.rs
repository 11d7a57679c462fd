//! Wire DTOs for the Citybus open-data API.
//!
//! These types map directly onto the upstream JSON. Fields are `Option`
//! liberally because the feed omits or blanks fields rather than
//! guaranteeing them; note that coordinates arrive as strings.

use serde::Deserialize;

/// The envelope wrapping every API response.
///
/// `data` is the only field the client interprets; its absence is treated
/// as a failed call.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub version: Option<String>,
    pub generated_timestamp: Option<String>,
    pub data: Option<T>,
}

/// Response payload of `GET /route/{company}/{route}`.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteDto {
    pub co: Option<String>,
    pub route: String,
    pub orig_tc: Option<String>,
    pub orig_en: Option<String>,
    pub dest_tc: Option<String>,
    pub dest_en: Option<String>,
    pub data_timestamp: Option<String>,
}

/// One element of `GET /route-stop/{company}/{route}[/{direction}]`.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteStopDto {
    pub co: Option<String>,
    pub route: String,
    pub dir: String,
    pub seq: u32,
    pub stop: String,
    pub data_timestamp: Option<String>,
}

/// One element of `GET /stop`, the global stop directory.
#[derive(Debug, Clone, Deserialize)]
pub struct StopDto {
    pub stop: String,
    pub name_tc: Option<String>,
    pub name_en: Option<String>,
    /// Latitude as a decimal string, e.g. `"22.2800"`.
    pub lat: Option<String>,
    /// Longitude as a decimal string.
    pub long: Option<String>,
    pub data_timestamp: Option<String>,
}

/// One element of `GET /eta/{company}/{stop}/{route}`.
#[derive(Debug, Clone, Deserialize)]
pub struct EtaDto {
    pub co: Option<String>,
    pub route: String,
    pub dir: Option<String>,
    pub seq: Option<u32>,
    pub stop: Option<String>,
    pub dest_tc: Option<String>,
    pub dest_en: Option<String>,
    pub eta_seq: Option<u32>,
    /// ISO 8601 instant with offset, or null/empty when no live estimate.
    pub eta: Option<String>,
    pub rmk_tc: Option<String>,
    pub rmk_en: Option<String>,
    pub data_timestamp: Option<String>,
}
