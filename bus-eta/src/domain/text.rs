//! Bilingual display text.

use std::fmt;

/// A Traditional Chinese / English text pair.
///
/// The upstream feed carries every display name in both languages; the two
/// strings travel together and are compared as a pair (arrival grouping is
/// keyed on the full pair, not one language).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BilingualText {
    /// Traditional Chinese text.
    pub tc: String,
    /// English text.
    pub en: String,
}

impl BilingualText {
    /// Create a bilingual text pair.
    pub fn new(tc: impl Into<String>, en: impl Into<String>) -> Self {
        Self {
            tc: tc.into(),
            en: en.into(),
        }
    }

    /// The fallback pair used when a stop id has no directory entry.
    pub fn unknown() -> Self {
        Self::new("未知", "Unknown")
    }

    /// True when both languages are empty.
    pub fn is_empty(&self) -> bool {
        self.tc.is_empty() && self.en.is_empty()
    }
}

impl fmt::Display for BilingualText {
    /// Renders as `中文 (English)`, dropping whichever side is empty.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.tc.is_empty(), self.en.is_empty()) {
            (false, false) => write!(f, "{} ({})", self.tc, self.en),
            (false, true) => f.write_str(&self.tc),
            _ => f.write_str(&self.en),
        }
    }
}
