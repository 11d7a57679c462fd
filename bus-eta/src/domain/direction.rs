//! Travel direction along a route.

use std::fmt;

/// Error returned when parsing an unknown direction code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid direction code: {0:?}")]
pub struct InvalidDirection(pub String);

/// Direction of travel along a route's path.
///
/// The feed uses the single-letter codes `I` (inbound) and `O` (outbound)
/// both in URL segments and in record fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Inbound,
    Outbound,
}

impl Direction {
    /// The wire code for this direction.
    pub const fn code(self) -> &'static str {
        match self {
            Direction::Inbound => "I",
            Direction::Outbound => "O",
        }
    }

    /// Parse a wire direction code (`I` / `O`, case-insensitive).
    pub fn parse_code(s: &str) -> Result<Self, InvalidDirection> {
        match s.trim() {
            "I" | "i" => Ok(Direction::Inbound),
            "O" | "o" => Ok(Direction::Outbound),
            other => Err(InvalidDirection(other.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Inbound => f.write_str("inbound"),
            Direction::Outbound => f.write_str("outbound"),
        }
    }
}
