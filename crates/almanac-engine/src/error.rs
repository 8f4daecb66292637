//! Error types for the `almanac-engine` crate.
//!
//! Generation primitives (generator, seed derivation, season lookup) are
//! total and never fail. Everything that reads a region profile returns
//! [`WeatherError`], as does a forecast that would run past the end of the
//! calendar.

use almanac_types::Season;
use chrono::NaiveDate;

/// Errors that can occur while generating weather from a region profile.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WeatherError {
    /// The region's configuration cannot produce weather.
    #[error("configuration error in region '{region}'{}: {field}: {reason}", season_suffix(.season.as_ref()))]
    Configuration {
        /// Region id the problem was found in.
        region: String,
        /// Season involved, if the problem is season-specific.
        season: Option<Season>,
        /// Configuration field at fault (e.g. `conditions`).
        field: String,
        /// What is wrong.
        reason: String,
    },

    /// The requested region is not configured.
    #[error("region not found: '{region}'")]
    NotFound {
        /// The unknown region id.
        region: String,
    },

    /// A date past the end of the supported calendar was requested.
    #[error("date out of range: {start} + {days} days is past {}", NaiveDate::MAX)]
    DateOutOfRange {
        /// First date of the requested span.
        start: NaiveDate,
        /// Days added to `start`.
        days: u64,
    },
}

impl WeatherError {
    /// Build a [`WeatherError::Configuration`].
    pub fn configuration(
        region: impl Into<String>,
        season: Option<Season>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Configuration {
            region: region.into(),
            season,
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Attach region and season context to a configuration error raised
    /// below the region level. Context already present is kept.
    #[must_use]
    pub fn within(self, region_id: &str, in_season: Season) -> Self {
        match self {
            Self::Configuration {
                region,
                season,
                field,
                reason,
            } => Self::Configuration {
                region: if region.is_empty() {
                    region_id.to_owned()
                } else {
                    region
                },
                season: season.or(Some(in_season)),
                field,
                reason,
            },
            other @ (Self::NotFound { .. } | Self::DateOutOfRange { .. }) => other,
        }
    }

    /// Build a [`WeatherError::DateOutOfRange`].
    pub const fn date_out_of_range(start: NaiveDate, days: u64) -> Self {
        Self::DateOutOfRange { start, days }
    }

    /// Build a [`WeatherError::NotFound`].
    pub fn not_found(region: impl Into<String>) -> Self {
        Self::NotFound {
            region: region.into(),
        }
    }
}

fn season_suffix(season: Option<&Season>) -> String {
    season.map_or_else(String::new, |s| format!(" ({s})"))
}
