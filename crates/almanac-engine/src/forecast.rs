//! Weekly and multi-region aggregation.
//!
//! Each day of a forecast is an independent [`build_day`] call, so a week is
//! exactly the seven daily records a user would see by asking on each of
//! those days. Across regions, one region's failure is recorded next to the
//! others' results instead of aborting the batch.

use std::collections::BTreeMap;

use almanac_types::{ForecastDay, ForecastSequence, RegionProfile, WeatherRecord};
use chrono::{Days, NaiveDate};
use tracing::{debug, warn};

use crate::daily::build_day;
use crate::error::WeatherError;

/// Number of days in a forecast.
pub const FORECAST_DAYS: u64 = 7;

/// Label of the first forecast entry.
pub const TODAY_LABEL: &str = "Today";

/// Seven consecutive days of weather starting at `today`.
///
/// # Errors
///
/// The first [`WeatherError`] raised by any day. A season-specific
/// misconfiguration only surfaces when the week reaches that season.
/// [`WeatherError::DateOutOfRange`] if the week runs past
/// [`NaiveDate::MAX`].
pub fn build_week(
    profile: &RegionProfile,
    today: NaiveDate,
) -> Result<ForecastSequence, WeatherError> {
    let mut days = Vec::with_capacity(7);
    for offset in 0..FORECAST_DAYS {
        let date = today
            .checked_add_days(Days::new(offset))
            .ok_or_else(|| WeatherError::date_out_of_range(today, offset))?;
        let weather = build_day(date, profile)?;
        let label = if offset == 0 {
            TODAY_LABEL.to_owned()
        } else {
            weather.day_of_week.clone()
        };
        days.push(ForecastDay { label, weather });
    }
    Ok(ForecastSequence {
        region_id: profile.id.clone(),
        days,
    })
}

/// A week for every profile, keyed by region id.
pub fn build_all_regions<'a, I>(
    profiles: I,
    today: NaiveDate,
) -> BTreeMap<String, Result<ForecastSequence, WeatherError>>
where
    I: IntoIterator<Item = &'a RegionProfile>,
{
    per_region(profiles, |profile| build_week(profile, today), "weekly forecast")
}

/// The weather on `date` for every profile, keyed by region id.
pub fn build_all_days<'a, I>(
    profiles: I,
    date: NaiveDate,
) -> BTreeMap<String, Result<WeatherRecord, WeatherError>>
where
    I: IntoIterator<Item = &'a RegionProfile>,
{
    per_region(profiles, |profile| build_day(date, profile), "daily weather")
}

fn per_region<'a, I, T, F>(
    profiles: I,
    mut build: F,
    what: &str,
) -> BTreeMap<String, Result<T, WeatherError>>
where
    I: IntoIterator<Item = &'a RegionProfile>,
    F: FnMut(&RegionProfile) -> Result<T, WeatherError>,
{
    let mut results = BTreeMap::new();
    for profile in profiles {
        let result = build(profile);
        match &result {
            Ok(_) => debug!(region = profile.id, what, "generated"),
            Err(e) => warn!(region = profile.id, what, error = %e, "generation failed"),
        }
        results.insert(profile.id.clone(), result);
    }
    results
}
