//! Route resolution: validate a route, fetch its ordered stop list, and
//! join it against the stop directory.
//!
//! The join is keyed solely on the stop identifier and preserves the feed's
//! sequence order exactly; directory misses fall back to sentinel names
//! instead of failing, and a wholly unavailable directory degrades the
//! result to identifier-only display.

use std::collections::HashMap;

use futures::join;
use tracing::warn;

use crate::api::{EtaError, TransitFeed};
use crate::directory::StopDirectory;
use crate::domain::{
    BilingualText, Direction, EnrichedStop, Route, RouteCode, RouteStop, StopDetails, StopId,
};

/// A validated route together with its enriched, ordered stop list.
#[derive(Debug, Clone)]
pub struct ResolvedRoute {
    pub route: Route,
    pub stops: Vec<EnrichedStop>,
}

/// Resolve a route code to its enriched stop sequence.
///
/// Steps: verify the route exists (propagating [`EtaError::RouteNotFound`]
/// unchanged), fetch the stop sequence and ensure the directory is loaded
/// concurrently, then join. An empty stop sequence is [`EtaError::NoStops`];
/// a failed directory load is logged and tolerated.
pub async fn resolve_route<F: TransitFeed>(
    client: &F,
    directory: &StopDirectory<F>,
    code: &RouteCode,
    direction: Option<Direction>,
) -> Result<ResolvedRoute, EtaError> {
    let route = client.get_route(code).await?;

    // No data dependency between these two; the directory result is only
    // needed at the join step.
    let (route_stops, directory_ready) = join!(
        client.get_route_stops(code, direction),
        directory.ensure_loaded(),
    );

    let route_stops = route_stops?;
    if route_stops.is_empty() {
        return Err(EtaError::NoStops {
            route: code.clone(),
        });
    }

    if let Err(e) = directory_ready {
        warn!("proceeding with stop ids only: {e}");
    }

    let index = directory.snapshot().await;
    let stops = join_stops(route_stops, &index);

    Ok(ResolvedRoute { route, stops })
}

/// Join route-stop records against the directory, preserving input order.
pub fn join_stops(
    route_stops: Vec<RouteStop>,
    index: &HashMap<StopId, StopDetails>,
) -> Vec<EnrichedStop> {
    route_stops
        .into_iter()
        .map(|rs| {
            let details = index.get(&rs.stop).cloned();
            enrich(rs, details)
        })
        .collect()
}

/// Enrich one route-stop record with its directory entry, if any.
fn enrich(route_stop: RouteStop, details: Option<StopDetails>) -> EnrichedStop {
    let (name, position) = match details {
        Some(details) => (details.name, details.position),
        None => (BilingualText::unknown(), None),
    };

    EnrichedStop {
        route: route_stop.route,
        direction: route_stop.direction,
        sequence: route_stop.sequence,
        stop: route_stop.stop,
        name,
        position,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockEtaClient;
    use crate::domain::Coordinates;

    fn route_stop(seq: u32, stop: &str) -> RouteStop {
        RouteStop {
            route: RouteCode::parse("1").unwrap(),
            direction: Direction::Inbound,
            sequence: seq,
            stop: StopId::parse(stop).unwrap(),
            data_timestamp: None,
        }
    }

    fn directory_entry(id: &str, tc: &str, en: &str) -> (StopId, StopDetails) {
        let stop_id = StopId::parse(id).unwrap();
        (
            stop_id.clone(),
            StopDetails {
                id: stop_id,
                name: BilingualText::new(tc, en),
                position: Some(Coordinates {
                    latitude: 22.5,
                    longitude: 114.1,
                }),
            },
        )
    }

    #[test]
    fn join_preserves_length_and_order() {
        let index: HashMap<_, _> = [
            directory_entry("A1", "甲", "First"),
            directory_entry("B2", "乙", "Second"),
            directory_entry("C3", "丙", "Third"),
        ]
        .into_iter()
        .collect();

        // Feed order deliberately unrelated to any directory ordering.
        let stops = join_stops(
            vec![route_stop(1, "C3"), route_stop(2, "A1"), route_stop(3, "B2")],
            &index,
        );

        assert_eq!(stops.len(), 3);
        assert_eq!(
            stops.iter().map(|s| s.stop.as_str()).collect::<Vec<_>>(),
            vec!["C3", "A1", "B2"]
        );
        assert_eq!(
            stops.iter().map(|s| s.sequence).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn join_enriches_by_id_not_position() {
        let index: HashMap<_, _> = [directory_entry("B2", "乙", "Second")].into_iter().collect();

        let stops = join_stops(vec![route_stop(1, "B2")], &index);
        assert_eq!(stops[0].name.en, "Second");
        assert!(stops[0].position.is_some());
        // Invariant: the enriched record keeps the id it was derived from.
        assert_eq!(stops[0].stop.as_str(), "B2");
    }

    #[test]
    fn join_miss_falls_back_to_sentinel() {
        let index = HashMap::new();

        let stops = join_stops(vec![route_stop(1, "A1"), route_stop(2, "B2")], &index);
        assert_eq!(stops.len(), 2);
        for stop in &stops {
            assert_eq!(stop.name.en, "Unknown");
            assert_eq!(stop.name.tc, "未知");
            assert!(stop.position.is_none());
        }
    }

    #[test]
    fn join_single_stop_scenario() {
        // Route "1", directory knows SX01 as 上水 / Sheung Shui.
        let index: HashMap<_, _> = [directory_entry("SX01", "上水", "Sheung Shui")]
            .into_iter()
            .collect();

        let stops = join_stops(vec![route_stop(1, "SX01")], &index);

        assert_eq!(stops.len(), 1);
        assert_eq!(stops[0].sequence, 1);
        assert_eq!(stops[0].name.tc, "上水");
        assert_eq!(stops[0].name.en, "Sheung Shui");
    }

    #[tokio::test]
    async fn resolve_join_through_directory_snapshot() {
        let (_client, directory) = mock_pipeline();
        directory
            .install(vec![directory_entry("SX01", "上水", "Sheung Shui").1])
            .await;

        let index = directory.snapshot().await;
        let stops = join_stops(vec![route_stop(1, "SX01"), route_stop(2, "SX99")], &index);

        assert_eq!(stops[0].name.en, "Sheung Shui");
        assert_eq!(stops[1].name.en, "Unknown");
    }

    fn mock_pipeline() -> (MockEtaClient, StopDirectory<MockEtaClient>) {
        let client = MockEtaClient::new();
        let directory = StopDirectory::new(client.clone());
        (client, directory)
    }

    fn route(code: &str) -> Route {
        Route {
            code: RouteCode::parse(code).unwrap(),
            origin: BilingualText::new("摩星嶺", "Felix Villas"),
            destination: BilingualText::new("跑馬地(上)", "Happy Valley (Upper)"),
        }
    }

    #[tokio::test]
    async fn resolve_enriches_route_end_to_end() {
        let (client, directory) = mock_pipeline();
        let code = RouteCode::parse("1").unwrap();
        client.add_route(route("1")).await;
        client
            .add_route_stops(code.clone(), vec![route_stop(1, "SX01"), route_stop(2, "SX02")])
            .await;
        client
            .add_stops(vec![
                directory_entry("SX01", "上水", "Sheung Shui").1,
                directory_entry("SX02", "粉嶺", "Fanling").1,
            ])
            .await;

        let resolved = resolve_route(&client, &directory, &code, None).await.unwrap();

        assert_eq!(resolved.route.origin.en, "Felix Villas");
        assert_eq!(resolved.stops.len(), 2);
        assert_eq!(resolved.stops[0].name.en, "Sheung Shui");
        assert_eq!(resolved.stops[1].name.en, "Fanling");
        assert_eq!(
            resolved.stops.iter().map(|s| s.sequence).collect::<Vec<_>>(),
            vec![1, 2]
        );
    }

    #[tokio::test]
    async fn resolve_unknown_route_propagates_not_found() {
        let (client, directory) = mock_pipeline();
        let code = RouteCode::parse("999").unwrap();

        let err = resolve_route(&client, &directory, &code, None).await.unwrap_err();
        assert!(matches!(err, EtaError::RouteNotFound { route } if route == code));
    }

    #[tokio::test]
    async fn resolve_empty_stop_list_is_no_stops() {
        let (client, directory) = mock_pipeline();
        let code = RouteCode::parse("1").unwrap();
        // Route exists but serves no stop sequence; distinct from a
        // transport failure.
        client.add_route(route("1")).await;

        let err = resolve_route(&client, &directory, &code, None).await.unwrap_err();
        assert!(matches!(err, EtaError::NoStops { route } if route == code));
    }

    #[tokio::test]
    async fn resolve_tolerates_directory_failure_with_sentinels() {
        let (client, directory) = mock_pipeline();
        let code = RouteCode::parse("1").unwrap();
        client.add_route(route("1")).await;
        client
            .add_route_stops(code.clone(), vec![route_stop(1, "SX01"), route_stop(2, "SX02")])
            .await;
        client.fail_directory(true).await;

        let resolved = resolve_route(&client, &directory, &code, None).await.unwrap();

        assert_eq!(resolved.stops.len(), 2);
        for stop in &resolved.stops {
            assert_eq!(stop.name.en, "Unknown");
            assert!(stop.position.is_none());
        }
        // The ids themselves are still usable for a follow-up arrival query.
        assert_eq!(resolved.stops[0].stop.as_str(), "SX01");
    }
}
