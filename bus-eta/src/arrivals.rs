//! Arrival normalization: group estimates by destination, ready for display.
//!
//! Grouping is stable on first occurrence of each destination in the feed
//! (not alphabetic); within a group, timed estimates sort ascending and
//! estimate-less entries keep their feed order after them.

use std::cmp::Ordering;

use crate::domain::{ArrivalEstimate, BilingualText};

/// Arrival estimates for one destination, in display order.
#[derive(Debug, Clone)]
pub struct DestinationArrivals {
    pub destination: BilingualText,
    pub arrivals: Vec<ArrivalEstimate>,
}

/// All arrivals for a stop+route pair, grouped by destination.
///
/// An empty board is the valid "no upcoming buses" outcome.
#[derive(Debug, Clone, Default)]
pub struct ArrivalBoard {
    pub groups: Vec<DestinationArrivals>,
}

impl ArrivalBoard {
    /// True when the feed reported no upcoming buses.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of estimates across all groups.
    pub fn total(&self) -> usize {
        self.groups.iter().map(|g| g.arrivals.len()).sum()
    }
}

/// Group raw arrival estimates into a display-ready board.
pub fn group_by_destination(arrivals: Vec<ArrivalEstimate>) -> ArrivalBoard {
    let mut groups: Vec<DestinationArrivals> = Vec::new();

    for arrival in arrivals {
        match groups
            .iter_mut()
            .find(|g| g.destination == arrival.destination)
        {
            Some(group) => group.arrivals.push(arrival),
            None => groups.push(DestinationArrivals {
                destination: arrival.destination.clone(),
                arrivals: vec![arrival],
            }),
        }
    }

    for group in &mut groups {
        // Stable sort: equal keys (all the estimate-less entries) keep
        // their relative feed order.
        group.arrivals.sort_by(|a, b| match (a.eta, b.eta) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
    }

    ArrivalBoard { groups }
}
