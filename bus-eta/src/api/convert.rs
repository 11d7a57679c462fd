//! Conversion from wire DTOs to domain types.
//!
//! Single records convert fallibly; list conversions skip invalid records
//! with a warning rather than failing the whole payload, since one bad
//! record should not take down a lookup.

use chrono::{DateTime, FixedOffset};
use tracing::warn;

use crate::domain::{
    ArrivalEstimate, BilingualText, Coordinates, Direction, Route, RouteCode, RouteStop,
    StopDetails, StopId,
};

use super::types::{EtaDto, RouteDto, RouteStopDto, StopDto};

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConversionError {
    /// Route code failed validation
    #[error("invalid route code: {0:?}")]
    InvalidRoute(String),

    /// Stop id failed validation
    #[error("invalid stop id: {0:?}")]
    InvalidStop(String),

    /// Unknown direction code
    #[error("invalid direction code: {0:?}")]
    InvalidDirection(String),

    /// Unparseable arrival instant
    #[error("invalid time: {0:?}")]
    InvalidTime(String),
}

/// Convert a route payload.
pub fn convert_route(dto: &RouteDto) -> Result<Route, ConversionError> {
    let code = RouteCode::parse(&dto.route)
        .map_err(|_| ConversionError::InvalidRoute(dto.route.clone()))?;

    Ok(Route {
        code,
        origin: bilingual(dto.orig_tc.as_deref(), dto.orig_en.as_deref()),
        destination: bilingual(dto.dest_tc.as_deref(), dto.dest_en.as_deref()),
    })
}

/// Convert a single route-stop record.
pub fn convert_route_stop(dto: &RouteStopDto) -> Result<RouteStop, ConversionError> {
    let route = RouteCode::parse(&dto.route)
        .map_err(|_| ConversionError::InvalidRoute(dto.route.clone()))?;
    let direction = Direction::parse_code(&dto.dir)
        .map_err(|_| ConversionError::InvalidDirection(dto.dir.clone()))?;
    let stop =
        StopId::parse(&dto.stop).map_err(|_| ConversionError::InvalidStop(dto.stop.clone()))?;

    Ok(RouteStop {
        route,
        direction,
        sequence: dto.seq,
        stop,
        data_timestamp: parse_instant_lenient(dto.data_timestamp.as_deref()),
    })
}

/// Convert a single stop directory record.
pub fn convert_stop(dto: &StopDto) -> Result<StopDetails, ConversionError> {
    let id =
        StopId::parse(&dto.stop).map_err(|_| ConversionError::InvalidStop(dto.stop.clone()))?;

    Ok(StopDetails {
        id,
        name: bilingual(dto.name_tc.as_deref(), dto.name_en.as_deref()),
        position: parse_coordinates(dto.lat.as_deref(), dto.long.as_deref()),
    })
}

/// Convert a single arrival estimate record.
pub fn convert_arrival(dto: &EtaDto) -> Result<ArrivalEstimate, ConversionError> {
    let route = RouteCode::parse(&dto.route)
        .map_err(|_| ConversionError::InvalidRoute(dto.route.clone()))?;

    // Direction is informational on arrival records; an unknown code
    // degrades to None rather than dropping the record.
    let direction = dto.dir.as_deref().and_then(|d| Direction::parse_code(d).ok());

    // A null or blank eta means "no live estimate"; a non-blank value that
    // fails to parse is a malformed record.
    let eta = match dto.eta.as_deref() {
        None | Some("") => None,
        Some(raw) => Some(
            DateTime::parse_from_rfc3339(raw)
                .map_err(|_| ConversionError::InvalidTime(raw.to_string()))?,
        ),
    };

    Ok(ArrivalEstimate {
        company: dto.co.clone().unwrap_or_default(),
        route,
        direction,
        destination: bilingual(dto.dest_tc.as_deref(), dto.dest_en.as_deref()),
        eta,
        remark: bilingual(dto.rmk_tc.as_deref(), dto.rmk_en.as_deref()),
    })
}

/// Convert a route-stop list, skipping invalid records.
pub fn convert_route_stops(dtos: &[RouteStopDto]) -> Vec<RouteStop> {
    dtos.iter()
        .filter_map(|dto| match convert_route_stop(dto) {
            Ok(stop) => Some(stop),
            Err(e) => {
                warn!("skipping route-stop record: {e}");
                None
            }
        })
        .collect()
}

/// Convert a stop directory list, skipping invalid records.
pub fn convert_stops(dtos: &[StopDto]) -> Vec<StopDetails> {
    dtos.iter()
        .filter_map(|dto| match convert_stop(dto) {
            Ok(stop) => Some(stop),
            Err(e) => {
                warn!("skipping stop directory record: {e}");
                None
            }
        })
        .collect()
}

/// Convert an arrival list, skipping invalid records.
pub fn convert_arrivals(dtos: &[EtaDto]) -> Vec<ArrivalEstimate> {
    dtos.iter()
        .filter_map(|dto| match convert_arrival(dto) {
            Ok(arrival) => Some(arrival),
            Err(e) => {
                warn!("skipping arrival record: {e}");
                None
            }
        })
        .collect()
}

fn bilingual(tc: Option<&str>, en: Option<&str>) -> BilingualText {
    BilingualText::new(tc.unwrap_or_default(), en.unwrap_or_default())
}

/// Best-effort instant parse; the feed's bookkeeping timestamps are not
/// worth failing a record over.
fn parse_instant_lenient(raw: Option<&str>) -> Option<DateTime<FixedOffset>> {
    raw.and_then(|s| DateTime::parse_from_rfc3339(s).ok())
}

fn parse_coordinates(lat: Option<&str>, long: Option<&str>) -> Option<Coordinates> {
    let latitude = lat?.trim().parse::<f64>().ok()?;
    let longitude = long?.trim().parse::<f64>().ok()?;
    Some(Coordinates {
        latitude,
        longitude,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route_stop_dto(route: &str, dir: &str, seq: u32, stop: &str) -> RouteStopDto {
        RouteStopDto {
            co: Some("CTB".to_string()),
            route: route.to_string(),
            dir: dir.to_string(),
            seq,
            stop: stop.to_string(),
            data_timestamp: Some("2024-06-01T05:00:00+08:00".to_string()),
        }
    }

    #[test]
    fn convert_route_basic() {
        let dto = RouteDto {
            co: Some("CTB".to_string()),
            route: "1".to_string(),
            orig_tc: Some("摩星嶺".to_string()),
            orig_en: Some("Felix Villas".to_string()),
            dest_tc: Some("跑馬地(上)".to_string()),
            dest_en: Some("Happy Valley (Upper)".to_string()),
            data_timestamp: None,
        };

        let route = convert_route(&dto).unwrap();
        assert_eq!(route.code.as_str(), "1");
        assert_eq!(route.origin.en, "Felix Villas");
        assert_eq!(route.destination.tc, "跑馬地(上)");
    }

    #[test]
    fn convert_route_stop_basic() {
        let dto = route_stop_dto("1", "I", 3, "002403");
        let stop = convert_route_stop(&dto).unwrap();

        assert_eq!(stop.route.as_str(), "1");
        assert_eq!(stop.direction, Direction::Inbound);
        assert_eq!(stop.sequence, 3);
        assert_eq!(stop.stop.as_str(), "002403");
        assert!(stop.data_timestamp.is_some());
    }

    #[test]
    fn convert_route_stop_rejects_bad_direction() {
        let dto = route_stop_dto("1", "X", 1, "002403");
        assert!(matches!(
            convert_route_stop(&dto),
            Err(ConversionError::InvalidDirection(_))
        ));
    }

    #[test]
    fn convert_stop_parses_string_coordinates() {
        let dto = StopDto {
            stop: "001032".to_string(),
            name_tc: Some("置富花園".to_string()),
            name_en: Some("Chi Fu Fa Yuen".to_string()),
            lat: Some("22.2589".to_string()),
            long: Some("114.1359".to_string()),
            data_timestamp: None,
        };

        let stop = convert_stop(&dto).unwrap();
        let position = stop.position.unwrap();
        assert!((position.latitude - 22.2589).abs() < 1e-9);
        assert!((position.longitude - 114.1359).abs() < 1e-9);
    }

    #[test]
    fn convert_stop_tolerates_missing_coordinates() {
        let dto = StopDto {
            stop: "001032".to_string(),
            name_tc: None,
            name_en: Some("Chi Fu Fa Yuen".to_string()),
            lat: None,
            long: Some("114.1359".to_string()),
            data_timestamp: None,
        };

        let stop = convert_stop(&dto).unwrap();
        assert!(stop.position.is_none());
        assert_eq!(stop.name.tc, "");
    }

    fn eta_dto(eta: Option<&str>, rmk_en: &str) -> EtaDto {
        EtaDto {
            co: Some("CTB".to_string()),
            route: "1".to_string(),
            dir: Some("I".to_string()),
            seq: Some(1),
            stop: Some("002403".to_string()),
            dest_tc: Some("跑馬地(上)".to_string()),
            dest_en: Some("Happy Valley (Upper)".to_string()),
            eta_seq: Some(1),
            eta: eta.map(str::to_string),
            rmk_tc: None,
            rmk_en: Some(rmk_en.to_string()),
            data_timestamp: None,
        }
    }

    #[test]
    fn convert_arrival_with_estimate() {
        let arrival = convert_arrival(&eta_dto(Some("2024-06-01T12:05:00+08:00"), "")).unwrap();
        assert!(arrival.eta.is_some());
        assert_eq!(arrival.direction, Some(Direction::Inbound));
        assert_eq!(arrival.destination.en, "Happy Valley (Upper)");
        assert_eq!(arrival.company, "CTB");
    }

    #[test]
    fn convert_arrival_null_and_blank_eta_mean_no_estimate() {
        assert!(convert_arrival(&eta_dto(None, "Scheduled")).unwrap().eta.is_none());
        assert!(convert_arrival(&eta_dto(Some(""), "Scheduled")).unwrap().eta.is_none());
    }

    #[test]
    fn convert_arrival_rejects_garbage_eta() {
        assert!(matches!(
            convert_arrival(&eta_dto(Some("not-a-time"), "")),
            Err(ConversionError::InvalidTime(_))
        ));
    }

    #[test]
    fn list_conversion_skips_invalid_records() {
        let dtos = vec![
            route_stop_dto("1", "I", 1, "002403"),
            route_stop_dto("1", "?", 2, "002402"), // bad direction, skipped
            route_stop_dto("1", "I", 3, "002401"),
        ];

        let stops = convert_route_stops(&dtos);
        assert_eq!(stops.len(), 2);
        assert_eq!(stops[0].sequence, 1);
        assert_eq!(stops[1].sequence, 3);
    }
}
