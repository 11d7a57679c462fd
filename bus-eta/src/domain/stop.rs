//! Stop identifiers and stop records.

use std::fmt;

use chrono::{DateTime, FixedOffset};

use super::direction::Direction;
use super::route::RouteCode;
use super::text::BilingualText;

/// Error returned when parsing an invalid stop identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid stop id: {reason}")]
pub struct InvalidStopId {
    reason: &'static str,
}

/// A validated stop identifier.
///
/// Stop ids are opaque stable codes assigned by the operator (the current
/// feed uses 6-digit strings, but the format is not contractual). Parsing
/// trims whitespace and accepts 1 to 16 ASCII alphanumerics.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct StopId(String);

impl StopId {
    /// Parse a stop id from user or feed input.
    pub fn parse(s: &str) -> Result<Self, InvalidStopId> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(InvalidStopId {
                reason: "must not be empty",
            });
        }

        if trimmed.len() > 16 {
            return Err(InvalidStopId {
                reason: "must be at most 16 characters",
            });
        }

        if !trimmed.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(InvalidStopId {
                reason: "must be ASCII letters and digits only",
            });
        }

        Ok(StopId(trimmed.to_string()))
    }

    /// Returns the stop id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopId({})", self.0)
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Geographic position of a stop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// A stop directory entry: one physical stop, independent of any route.
///
/// Loaded once per session into the stop directory and never mutated.
#[derive(Debug, Clone)]
pub struct StopDetails {
    pub id: StopId,
    pub name: BilingualText,
    /// Absent for unlisted stops or when the feed sends unparseable values.
    pub position: Option<Coordinates>,
}

/// One entry of a route's ordered stop sequence.
///
/// Produced fresh per route+direction query; not cached.
#[derive(Debug, Clone)]
pub struct RouteStop {
    pub route: RouteCode,
    pub direction: Direction,
    /// 1-based position along the route in this direction.
    pub sequence: u32,
    pub stop: StopId,
    pub data_timestamp: Option<DateTime<FixedOffset>>,
}

/// A [`RouteStop`] joined with its directory entry.
///
/// `stop` always equals the id of the route-stop record it was derived
/// from; a directory miss substitutes sentinel names instead of failing.
#[derive(Debug, Clone)]
pub struct EnrichedStop {
    pub route: RouteCode,
    pub direction: Direction,
    pub sequence: u32,
    pub stop: StopId,
    pub name: BilingualText,
    pub position: Option<Coordinates>,
}
