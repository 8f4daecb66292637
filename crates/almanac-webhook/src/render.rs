//! Discord-flavoured markdown for daily updates and weekly forecasts.
//!
//! Rendering is pure: the same records always produce the same text.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use almanac_engine::WeatherError;
use almanac_types::{ForecastSequence, RegionProfile, WeatherRecord};

use crate::emoji::condition_emoji;

/// Horizontal rule between regions in the weekly forecast.
pub const SEPARATOR: &str = "─────────────────────────────";

/// Last line of the weekly forecast.
pub const WEEKLY_FOOTER: &str = "*Consolidated weather forecast for all campaign regions*";

/// Header of the weekly forecast.
pub const WEEKLY_HEADER: &str = "📅 **Weekly Weather Forecast - All Regions**";

/// A region's daily weather update.
///
/// ```text
/// 📅 **Weather Update - Southern Coast**
/// **Date:** June 15, 2024
/// **Season:** Summer
/// ☀️ **Weather:** Warm and sunny
/// ⚠️ **Effect:** *Long rests need shade*
/// ```
pub fn render_daily(profile: &RegionProfile, record: &WeatherRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "📅 **Weather Update - {}**", display_name(profile));
    let _ = writeln!(out, "**Date:** {}", record.formatted_date);
    let _ = writeln!(out, "**Season:** {}", record.season.title());
    let _ = writeln!(
        out,
        "{} **Weather:** {}",
        condition_emoji(&record.condition),
        record.condition
    );
    for impact in &record.impacts {
        let _ = writeln!(out, "⚠️ **Effect:** *{impact}*");
    }
    out
}

/// The consolidated weekly forecast for every region in `order`.
///
/// A region whose forecast failed, or that has no entry in `results`, gets
/// an error line in place of its days; the other regions are unaffected.
pub fn render_weekly<'a, I>(
    order: I,
    results: &BTreeMap<String, Result<ForecastSequence, WeatherError>>,
) -> String
where
    I: IntoIterator<Item = &'a RegionProfile>,
{
    let mut out = String::new();
    let _ = write!(out, "{WEEKLY_HEADER}\n\n");

    for profile in order {
        let name = display_name(profile);
        match results.get(&profile.id) {
            Some(Ok(forecast)) => {
                let _ = write!(out, "🌍 **{name}**\n\n");
                render_forecast_days(&mut out, forecast);
            }
            Some(Err(_)) | None => {
                let _ = writeln!(out, "🌍 **{name}**");
                out.push_str("❌ *Error generating forecast for this region*\n\n");
            }
        }
        let _ = write!(out, "{SEPARATOR}\n\n");
    }

    out.push_str(WEEKLY_FOOTER);
    out
}

/// The region's name, or its id when the name is blank.
fn display_name(profile: &RegionProfile) -> &str {
    let name = profile.name.trim();
    if name.is_empty() {
        profile.id.as_str()
    } else {
        name
    }
}

fn render_forecast_days(out: &mut String, forecast: &ForecastSequence) {
    for day in forecast {
        let weather = &day.weather;
        let _ = writeln!(out, "**{} - {}**", day.label, weather.formatted_date);
        let _ = writeln!(out, "Season: {}", weather.season.title());
        let _ = writeln!(
            out,
            "{} {}",
            condition_emoji(&weather.condition),
            weather.condition
        );
        for impact in &weather.impacts {
            let _ = writeln!(out, "⚠️ **Effect:** *{impact}*");
        }
        out.push('\n');
    }
}
