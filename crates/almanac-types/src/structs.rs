//! Core value types: validated region profiles and generated weather.
//!
//! Everything in this module is immutable once built. Profiles are produced
//! by the validation layer in `almanac-engine`; records and forecasts are
//! produced fresh per request by the generation layer.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::enums::{Season, SelectionPolicy};

// ---------------------------------------------------------------------------
// Condition sets
// ---------------------------------------------------------------------------

/// Mechanical impact annotation attached to a condition.
///
/// Configuration may give either a single string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImpactEntry {
    /// One impact line.
    Single(String),
    /// Several impact lines.
    List(Vec<String>),
}

/// Ordered condition labels for one season plus optional impact annotations.
///
/// Order matters under weighted selection: earlier entries are more common.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonalConditionSet {
    /// Condition labels, most common first.
    pub conditions: Vec<String>,
    /// Condition label -> mechanical impacts.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub impacts: BTreeMap<String, ImpactEntry>,
}

impl SeasonalConditionSet {
    /// Create a set with the given conditions and no impacts.
    pub fn new<I, S>(conditions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            conditions: conditions.into_iter().map(Into::into).collect(),
            impacts: BTreeMap::new(),
        }
    }

    /// Attach an impact entry to a condition label.
    #[must_use]
    pub fn with_impact(mut self, condition: impl Into<String>, entry: ImpactEntry) -> Self {
        self.impacts.insert(condition.into(), entry);
        self
    }

    /// Number of conditions.
    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    /// Whether the condition list is empty.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Look up the impact entry for a condition label.
    pub fn impact_for(&self, condition: &str) -> Option<&ImpactEntry> {
        self.impacts.get(condition)
    }
}

// ---------------------------------------------------------------------------
// Region profiles
// ---------------------------------------------------------------------------

/// Where a region's messages are delivered. Opaque to the generation core.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryTarget {
    /// Webhook URL, if one is configured.
    #[serde(default)]
    pub webhook_url: Option<String>,
}

impl DeliveryTarget {
    /// A target that posts to `url`.
    pub fn webhook(url: impl Into<String>) -> Self {
        Self {
            webhook_url: Some(url.into()),
        }
    }

    /// Whether a non-blank webhook URL is present.
    pub fn is_configured(&self) -> bool {
        self.webhook_url
            .as_deref()
            .is_some_and(|url| !url.trim().is_empty())
    }
}

/// A named bundle of per-season condition sets.
///
/// Built once at the configuration boundary and passed by reference
/// afterwards. See `almanac_engine::validation::build_profile`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionProfile {
    /// Stable identifier (also folded into the seed).
    pub id: String,
    /// Human-readable region name.
    pub name: String,
    /// One condition set per season.
    pub seasons: BTreeMap<Season, SeasonalConditionSet>,
    /// How conditions are picked.
    #[serde(default)]
    pub selection: SelectionPolicy,
    /// Delivery target for this region's messages.
    #[serde(default)]
    pub delivery: DeliveryTarget,
}

impl RegionProfile {
    /// The condition set for `season`, if present.
    pub fn condition_set(&self, season: Season) -> Option<&SeasonalConditionSet> {
        self.seasons.get(&season)
    }

    /// Replace the delivery target.
    #[must_use]
    pub fn with_delivery(mut self, delivery: DeliveryTarget) -> Self {
        self.delivery = delivery;
        self
    }
}

// ---------------------------------------------------------------------------
// Generated weather
// ---------------------------------------------------------------------------

/// One generated day of weather for one region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherRecord {
    /// Calendar date the record was generated for.
    pub date: NaiveDate,
    /// Human-readable date, e.g. `June 15, 2024`.
    pub formatted_date: String,
    /// Weekday name, e.g. `Saturday`.
    pub day_of_week: String,
    /// Season the date falls in.
    pub season: Season,
    /// Selected condition label.
    pub condition: String,
    /// Mechanical impacts of the condition (possibly empty).
    pub impacts: Vec<String>,
}

/// A labelled entry of a [`ForecastSequence`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastDay {
    /// `Today` for the first entry, the weekday name otherwise.
    pub label: String,
    /// The day's weather.
    pub weather: WeatherRecord,
}

/// Seven consecutive days of weather for one region, index 0 = today.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastSequence {
    /// Region the forecast was generated for.
    pub region_id: String,
    /// Forecast days in calendar order.
    pub days: Vec<ForecastDay>,
}

impl ForecastSequence {
    /// Number of days in the forecast.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Whether the forecast is empty.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// The first entry (today), if any.
    pub fn today(&self) -> Option<&ForecastDay> {
        self.days.first()
    }

    /// Iterate over the forecast days in order.
    pub fn iter(&self) -> std::slice::Iter<'_, ForecastDay> {
        self.days.iter()
    }
}

impl<'a> IntoIterator for &'a ForecastSequence {
    type Item = &'a ForecastDay;
    type IntoIter = std::slice::Iter<'a, ForecastDay>;

    fn into_iter(self) -> Self::IntoIter {
        self.days.iter()
    }
}
