//! Route code and route types.

use std::fmt;

use super::text::BilingualText;

/// Error returned when parsing an invalid route code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid route code: {reason}")]
pub struct InvalidRouteCode {
    reason: &'static str,
}

/// A validated bus route code.
///
/// Route codes are 1 to 8 ASCII alphanumerics; parsing trims surrounding
/// whitespace and normalizes to uppercase, so any `RouteCode` value is
/// canonical by construction.
///
/// # Examples
///
/// ```
/// use bus_eta::domain::RouteCode;
///
/// let route = RouteCode::parse(" 5b ").unwrap();
/// assert_eq!(route.as_str(), "5B");
///
/// assert!(RouteCode::parse("").is_err());
/// assert!(RouteCode::parse("N-11").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct RouteCode(String);

impl RouteCode {
    /// Parse a route code from user or feed input.
    pub fn parse(s: &str) -> Result<Self, InvalidRouteCode> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(InvalidRouteCode {
                reason: "must not be empty",
            });
        }

        if trimmed.len() > 8 {
            return Err(InvalidRouteCode {
                reason: "must be at most 8 characters",
            });
        }

        if !trimmed.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(InvalidRouteCode {
                reason: "must be ASCII letters and digits only",
            });
        }

        Ok(RouteCode(trimmed.to_ascii_uppercase()))
    }

    /// Returns the canonical (uppercase) code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RouteCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RouteCode({})", self.0)
    }
}

impl fmt::Display for RouteCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A bus route as reported by the feed.
///
/// Immutable once fetched; the origin/destination names describe the
/// outbound direction of travel.
#[derive(Debug, Clone)]
pub struct Route {
    pub code: RouteCode,
    pub origin: BilingualText,
    pub destination: BilingualText,
}
