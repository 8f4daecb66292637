//! One day of weather for one region.
//!
//! [`build_day`] is the atomic unit of generation: it derives the seed from
//! `(date, region id)`, creates a fresh [`SeededGenerator`], performs exactly
//! one selection and returns the finished record. No stream outlives the
//! call, so any date in any region can be generated independently and in
//! any order.

use almanac_types::{RegionProfile, WeatherRecord};
use chrono::{FixedOffset, NaiveDate, Utc};
use tracing::trace;

use crate::error::WeatherError;
use crate::rng::SeededGenerator;
use crate::season::season_for;
use crate::seed::derive_seed;
use crate::selector::select;

/// `strftime` pattern for the human-readable date (`June 15, 2024`).
pub const DATE_FORMAT: &str = "%B %-d, %Y";

/// `strftime` pattern for the weekday name (`Saturday`).
pub const WEEKDAY_FORMAT: &str = "%A";

/// Generate the weather for `date` in `profile`'s region.
///
/// # Errors
///
/// [`WeatherError::Configuration`] if the profile has no condition set for
/// the date's season, the set is empty, or the selection policy is invalid.
pub fn build_day(date: NaiveDate, profile: &RegionProfile) -> Result<WeatherRecord, WeatherError> {
    let season = season_for(date);
    let set = profile.condition_set(season).ok_or_else(|| {
        WeatherError::configuration(
            profile.id.as_str(),
            Some(season),
            "seasons",
            format!("no condition set defined for {season}"),
        )
    })?;
    if set.is_empty() {
        return Err(WeatherError::configuration(
            profile.id.as_str(),
            Some(season),
            "conditions",
            "condition list is empty",
        ));
    }

    let seed = derive_seed(date, Some(profile.id.as_str()));
    let mut stream = SeededGenerator::new(seed);
    let selection = select(&mut stream, set, profile.selection)
        .map_err(|e| e.within(&profile.id, season))?;

    trace!(
        region = profile.id,
        %date,
        seed,
        %season,
        index = selection.index,
        "weather generated"
    );

    let (formatted_date, day_of_week) = format_date(date);
    Ok(WeatherRecord {
        date,
        formatted_date,
        day_of_week,
        season,
        condition: selection.condition,
        impacts: selection.impacts,
    })
}

/// Today's calendar date at the given UTC offset.
pub fn today_at(offset: FixedOffset) -> NaiveDate {
    Utc::now().with_timezone(&offset).date_naive()
}

/// Generate today's weather for `profile`, with "today" taken at `offset`.
pub fn build_today(
    profile: &RegionProfile,
    offset: FixedOffset,
) -> Result<WeatherRecord, WeatherError> {
    build_day(today_at(offset), profile)
}

/// `(June 15, 2024, Saturday)` for 2024-06-15.
pub fn format_date(date: NaiveDate) -> (String, String) {
    (
        date.format(DATE_FORMAT).to_string(),
        date.format(WEEKDAY_FORMAT).to_string(),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use almanac_types::{
        DeliveryTarget, ImpactEntry, Season, SeasonalConditionSet, SelectionPolicy,
    };

    use super::*;

    const SUMMER: [&str; 7] = [
        "Warm and sunny",
        "Hot with clear skies",
        "Partly cloudy",
        "Light breeze with sunshine",
        "Hazy sunshine",
        "Occasional summer showers",
        "Thunderstorms in the afternoon",
    ];

    fn profile(id: &str, selection: SelectionPolicy) -> RegionProfile {
        let mut seasons = BTreeMap::new();
        for season in Season::ALL {
            let set = if season == Season::Summer {
                SeasonalConditionSet::new(SUMMER).with_impact(
                    "Warm and sunny",
                    ImpactEntry::List(vec!["Long rests need shade".to_owned()]),
                )
            } else {
                SeasonalConditionSet::new([format!("{season} weather")])
            };
            seasons.insert(season, set);
        }
        RegionProfile {
            id: id.to_owned(),
            name: "Test".to_owned(),
            seasons,
            selection,
            delivery: DeliveryTarget::default(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn reference_day_in_default_region() {
        let d = date(2024, 6, 15);
        let weighted = build_day(d, &profile("default", SelectionPolicy::default())).unwrap();
        assert_eq!(weighted.formatted_date, "June 15, 2024");
        assert_eq!(weighted.day_of_week, "Saturday");
        assert_eq!(weighted.season, Season::Summer);
        assert_eq!(weighted.condition, "Warm and sunny");
        assert_eq!(weighted.impacts, vec!["Long rests need shade".to_owned()]);

        let uniform = build_day(d, &profile("default", SelectionPolicy::Uniform)).unwrap();
        assert_eq!(uniform.condition, "Hot with clear skies");
        assert!(uniform.impacts.is_empty());
    }

    #[test]
    fn same_inputs_give_identical_records() {
        let p = profile("southern_coast", SelectionPolicy::default());
        let d = date(2025, 8, 2);
        let a = build_day(d, &p).unwrap();
        let b = build_day(d, &p).unwrap();
        assert_eq!(a, b);
        assert_eq!(serde_json::to_string(&a).unwrap(), serde_json::to_string(&b).unwrap());
    }

    #[test]
    fn missing_season_is_a_configuration_error() {
        let mut p = profile("northern_reaches", SelectionPolicy::default());
        p.seasons.remove(&Season::Winter);
        let err = build_day(date(2024, 1, 15), &p).unwrap_err();
        assert_eq!(
            err,
            WeatherError::configuration(
                "northern_reaches",
                Some(Season::Winter),
                "seasons",
                "no condition set defined for winter",
            )
        );
    }

    #[test]
    fn empty_season_is_a_configuration_error() {
        let mut p = profile("northern_reaches", SelectionPolicy::default());
        p.seasons.insert(Season::Spring, SeasonalConditionSet::default());
        let err = build_day(date(2024, 4, 10), &p).unwrap_err();
        assert!(matches!(
            err,
            WeatherError::Configuration { season: Some(Season::Spring), ref field, .. } if field == "conditions"
        ));
    }

    #[test]
    fn bad_power_error_carries_region_context() {
        let p = profile("eastern_wilds", SelectionPolicy::Weighted { power: -2.0 });
        let err = build_day(date(2024, 7, 4), &p).unwrap_err();
        assert!(matches!(
            err,
            WeatherError::Configuration { ref region, season: Some(Season::Summer), .. } if region == "eastern_wilds"
        ));
    }

    #[test]
    fn date_formatting_drops_leading_zero() {
        let (formatted, weekday) = format_date(date(2024, 3, 5));
        assert_eq!(formatted, "March 5, 2024");
        assert_eq!(weekday, "Tuesday");
    }
}
