//! Built-in region used when no regions are configured.
//!
//! A temperate, Western European climate. Its id is the sentinel
//! [`DEFAULT_REGION_ID`], so its seeds are the plain date base and its
//! weather matches deployments that predate named regions.

use std::collections::BTreeMap;

use almanac_engine::DEFAULT_REGION_ID;
use almanac_types::{
    DeliveryTarget, ImpactEntry, RegionProfile, Season, SeasonalConditionSet, SelectionPolicy,
};

/// Display name of the built-in region.
pub const DEFAULT_REGION_NAME: &str = "Campaign Weather";

const SPRING: [&str; 7] = [
    "Mild and sunny",
    "Partly cloudy with occasional showers",
    "Light rain",
    "Overcast with drizzle",
    "Bright with scattered clouds",
    "Cool and breezy",
    "Fresh with morning mist",
];

const SUMMER: [&str; 7] = [
    "Warm and sunny",
    "Hot with clear skies",
    "Partly cloudy",
    "Thunderstorms in the afternoon",
    "Light breeze with sunshine",
    "Hazy sunshine",
    "Occasional summer showers",
];

const AUTUMN: [&str; 7] = [
    "Cool and crisp",
    "Overcast with light rain",
    "Foggy morning clearing to sun",
    "Blustery with heavy showers",
    "Misty and damp",
    "Grey skies with drizzle",
    "Windy with scattered clouds",
];

const WINTER: [&str; 7] = [
    "Cold and frosty",
    "Overcast with sleet",
    "Light snow flurries",
    "Icy conditions",
    "Thick fog",
    "Cold rain",
    "Bright but freezing",
];

fn one(line: &str) -> ImpactEntry {
    ImpactEntry::Single(line.to_owned())
}

fn many(lines: &[&str]) -> ImpactEntry {
    ImpactEntry::List(lines.iter().map(|l| (*l).to_owned()).collect())
}

/// The built-in default region.
///
/// Delivery is left unconfigured; the registry fills it from
/// `WEBHOOK_URL` or `delivery.default_webhook_url`.
pub fn default_profile() -> RegionProfile {
    let spring = SeasonalConditionSet::new(SPRING)
        .with_impact(
            "Light rain",
            one("Disadvantage on Wisdom (Perception) checks relying on hearing"),
        )
        .with_impact(
            "Fresh with morning mist",
            one("Lightly obscured until mid-morning"),
        );

    let summer = SeasonalConditionSet::new(SUMMER)
        .with_impact(
            "Hot with clear skies",
            one("Constitution save (DC 10) each hour of travel without water"),
        )
        .with_impact(
            "Thunderstorms in the afternoon",
            many(&[
                "Heavily obscured during the storm",
                "Ranged weapon attacks at disadvantage",
            ]),
        );

    let autumn = SeasonalConditionSet::new(AUTUMN)
        .with_impact("Foggy morning clearing to sun", one("Lightly obscured until noon"))
        .with_impact(
            "Blustery with heavy showers",
            many(&[
                "Ranged weapon attacks at disadvantage",
                "Open flames are extinguished",
            ]),
        );

    let winter = SeasonalConditionSet::new(WINTER)
        .with_impact("Icy conditions", one("Roads count as difficult terrain"))
        .with_impact("Thick fog", one("Heavily obscured beyond 30 feet"))
        .with_impact(
            "Bright but freezing",
            one("Constitution save (DC 10) each hour without cold weather gear"),
        );

    let seasons = BTreeMap::from([
        (Season::Spring, spring),
        (Season::Summer, summer),
        (Season::Autumn, autumn),
        (Season::Winter, winter),
    ]);

    RegionProfile {
        id: DEFAULT_REGION_ID.to_owned(),
        name: DEFAULT_REGION_NAME.to_owned(),
        seasons,
        selection: SelectionPolicy::default(),
        delivery: DeliveryTarget::default(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use almanac_engine::build_day;
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn every_season_has_seven_conditions() {
        let profile = default_profile();
        for season in Season::ALL {
            assert_eq!(profile.condition_set(season).unwrap().len(), 7, "{season}");
        }
    }

    #[test]
    fn impacts_reference_known_conditions() {
        let profile = default_profile();
        for set in profile.seasons.values() {
            for condition in set.impacts.keys() {
                assert!(set.conditions.contains(condition), "{condition}");
            }
        }
    }

    #[test]
    fn midsummer_reference_day() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let record = build_day(date, &default_profile()).unwrap();
        assert_eq!(record.condition, "Warm and sunny");
        assert!(record.impacts.is_empty());
    }
}
