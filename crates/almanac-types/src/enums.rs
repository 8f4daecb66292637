//! Enumeration types shared across the workspace.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Seasons
// ---------------------------------------------------------------------------

/// A season of the calendar year (Northern-hemisphere convention).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    /// March through May.
    Spring,
    /// June through August.
    Summer,
    /// September through November.
    Autumn,
    /// December through February.
    Winter,
}

impl Season {
    /// All four seasons in calendar order starting from spring.
    pub const ALL: [Self; 4] = [Self::Spring, Self::Summer, Self::Autumn, Self::Winter];

    /// Lowercase key used in configuration files (`"spring"`, ...).
    pub const fn key(self) -> &'static str {
        match self {
            Self::Spring => "spring",
            Self::Summer => "summer",
            Self::Autumn => "autumn",
            Self::Winter => "winter",
        }
    }

    /// Capitalised display name (`"Spring"`, ...).
    pub const fn title(self) -> &'static str {
        match self {
            Self::Spring => "Spring",
            Self::Summer => "Summer",
            Self::Autumn => "Autumn",
            Self::Winter => "Winter",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Error returned when a string does not name a season.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSeason(pub String);

impl fmt::Display for UnknownSeason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown season '{}'", self.0)
    }
}

impl std::error::Error for UnknownSeason {}

impl FromStr for Season {
    type Err = UnknownSeason;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "spring" => Ok(Self::Spring),
            "summer" => Ok(Self::Summer),
            // "fall" appears in hand-written configs often enough to accept it.
            "autumn" | "fall" => Ok(Self::Autumn),
            "winter" => Ok(Self::Winter),
            _ => Err(UnknownSeason(s.to_owned())),
        }
    }
}

// ---------------------------------------------------------------------------
// Selection policy
// ---------------------------------------------------------------------------

/// Default bias exponent for [`SelectionPolicy::Weighted`].
pub const DEFAULT_BIAS_POWER: f64 = 2.0;

/// How a condition is picked from a season's ordered list.
///
/// ```yaml
/// selection:
///   policy: weighted
///   power: 2.0
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// Every entry is equally likely.
    Uniform,
    /// Earlier entries are favoured: `index = floor(u^power * len)`.
    Weighted {
        /// Bias exponent. Larger values favour the front of the list more.
        #[serde(default = "default_bias_power")]
        power: f64,
    },
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self::Weighted {
            power: DEFAULT_BIAS_POWER,
        }
    }
}

const fn default_bias_power() -> f64 {
    DEFAULT_BIAS_POWER
}
