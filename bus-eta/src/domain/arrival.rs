//! Arrival estimate records.

use std::fmt;

use chrono::{DateTime, FixedOffset, Utc};

use super::direction::Direction;
use super::route::RouteCode;
use super::text::BilingualText;

/// A single real-time arrival estimate for a stop+route pair.
///
/// `eta` is absent when the feed has no live estimate; `remark` carries the
/// operator's explanation ("Scheduled", "Last bus departed", ...) for
/// display in that case.
#[derive(Debug, Clone)]
pub struct ArrivalEstimate {
    pub company: String,
    pub route: RouteCode,
    pub direction: Option<Direction>,
    pub destination: BilingualText,
    pub eta: Option<DateTime<FixedOffset>>,
    pub remark: BilingualText,
}

impl ArrivalEstimate {
    /// Whole minutes until the estimated arrival, `floor((eta - now) / 60s)`.
    ///
    /// `None` when there is no live estimate. The value may be negative for
    /// estimates already in the past; clamping is a display concern, see
    /// [`ArrivalEstimate::display`].
    pub fn minutes_until(&self, now: DateTime<Utc>) -> Option<i64> {
        self.eta
            .map(|eta| (eta.with_timezone(&Utc) - now).num_seconds().div_euclid(60))
    }

    /// Display classification at the given instant.
    ///
    /// An estimate at or before `now` renders as "arriving now" rather than
    /// a negative duration; the stored instant itself is never clamped.
    pub fn display(&self, now: DateTime<Utc>) -> ArrivalDisplay<'_> {
        match self.minutes_until(now) {
            None => ArrivalDisplay::Remark(&self.remark),
            Some(mins) if mins <= 0 => ArrivalDisplay::Arriving,
            Some(mins) => ArrivalDisplay::Minutes(mins),
        }
    }
}

/// Display-ready classification of one arrival estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrivalDisplay<'a> {
    /// Estimate is at or before now.
    Arriving,
    /// Estimate is this many whole minutes away (always positive).
    Minutes(i64),
    /// No live estimate; show the feed remark instead.
    Remark(&'a BilingualText),
}

impl fmt::Display for ArrivalDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrivalDisplay::Arriving => f.write_str("Arriving"),
            ArrivalDisplay::Minutes(mins) => write!(f, "{} mins", mins),
            ArrivalDisplay::Remark(remark) => write!(f, "{}", remark),
        }
    }
}
