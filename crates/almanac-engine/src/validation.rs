//! Region definition validation and profile construction.
//!
//! Validation never stops at the first problem: every check runs and every
//! failure becomes one message. Checks, per region:
//!
//! 1. Id -- non-blank.
//! 2. Seasons -- all four present, no unknown or duplicated keys.
//! 3. Conditions -- a list of strings, present, non-empty, no blank or
//!    duplicate labels.
//! 4. Impacts -- a map whose keys name a listed condition and whose values
//!    are a string or an array of strings.
//! 5. Selection -- weighted power is positive and finite.
//! 6. Delivery -- webhook URL, when given, is `http(s)://`.
//!
//! [`build_profile`] runs the same checks and converts a clean definition
//! into a [`RegionProfile`]; it is the only way the configuration layer
//! produces profiles.

use std::collections::{BTreeMap, BTreeSet};

use almanac_types::{
    DeliveryTarget, ImpactEntry, RegionDefinition, RegionProfile, Season, SeasonDefinition,
    SeasonalConditionSet, SelectionPolicy,
};
use serde_json::Value;

use crate::error::WeatherError;
use crate::seed::region_fold;

/// Every problem with one region definition. Empty means valid.
pub fn validate_region_definition(region_id: &str, definition: &RegionDefinition) -> Vec<String> {
    let mut problems = Vec::new();
    let prefix = format!("region '{region_id}'");

    if region_id.trim().is_empty() {
        problems.push("region id must not be blank".to_owned());
    }

    let (seasons, mut season_problems) = resolve_season_keys(&prefix, definition);
    problems.append(&mut season_problems);

    for season in Season::ALL {
        match seasons.get(&season) {
            None => problems.push(format!("{prefix}: missing season '{season}'")),
            Some(season_def) => {
                check_season(&format!("{prefix}: season '{season}'"), season_def, &mut problems);
            }
        }
    }

    if let SelectionPolicy::Weighted { power } = definition.selection {
        if !power.is_finite() || power <= 0.0 {
            problems.push(format!(
                "{prefix}: selection power must be a positive finite number, got {power}"
            ));
        }
    }

    if let Some(url) = definition.webhook_url.as_deref() {
        let url = url.trim();
        if !url.is_empty() && !(url.starts_with("https://") || url.starts_with("http://")) {
            problems.push(format!(
                "{prefix}: webhook_url must start with http:// or https://"
            ));
        }
    }

    problems
}

/// Every problem across all region definitions, in region-id order.
pub fn validate_all_regions(definitions: &BTreeMap<String, RegionDefinition>) -> Vec<String> {
    definitions
        .iter()
        .flat_map(|(id, definition)| validate_region_definition(id, definition))
        .collect()
}

/// Pairs of region ids that share a seed band and will therefore draw the
/// same random values on every date.
///
/// Not an error (regions with different condition lists still differ), but
/// worth a warning when regions are meant to diverge.
pub fn shared_seed_bands<'a, I>(region_ids: I) -> Vec<(String, String)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut by_band: BTreeMap<i32, Vec<&str>> = BTreeMap::new();
    for id in region_ids {
        by_band.entry(region_fold(id)).or_default().push(id);
    }
    let mut pairs = Vec::new();
    for ids in by_band.values() {
        for (i, a) in ids.iter().enumerate() {
            for b in ids.iter().skip(i.saturating_add(1)) {
                pairs.push(((*a).to_owned(), (*b).to_owned()));
            }
        }
    }
    pairs
}

/// Validate `definition` and convert it into a [`RegionProfile`].
///
/// A blank name falls back to the region id.
///
/// # Errors
///
/// [`WeatherError::Configuration`] listing every validation problem.
pub fn build_profile(
    region_id: &str,
    definition: &RegionDefinition,
) -> Result<RegionProfile, WeatherError> {
    let problems = validate_region_definition(region_id, definition);
    if !problems.is_empty() {
        return Err(WeatherError::configuration(
            region_id,
            None,
            "region",
            problems.join("; "),
        ));
    }

    let (season_defs, _) = resolve_season_keys("", definition);
    let seasons = season_defs
        .into_iter()
        .map(|(season, season_def)| (season, convert_season(season_def)))
        .collect();

    let name = if definition.name.trim().is_empty() {
        region_id.to_owned()
    } else {
        definition.name.trim().to_owned()
    };

    let delivery = DeliveryTarget {
        webhook_url: definition
            .webhook_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(ToOwned::to_owned),
    };

    Ok(RegionProfile {
        id: region_id.to_owned(),
        name,
        seasons,
        selection: definition.selection,
        delivery,
    })
}

/// Map season keys to [`Season`]s, reporting unknown and duplicate keys.
fn resolve_season_keys<'a>(
    prefix: &str,
    definition: &'a RegionDefinition,
) -> (BTreeMap<Season, &'a SeasonDefinition>, Vec<String>) {
    let mut seasons = BTreeMap::new();
    let mut problems = Vec::new();
    for (key, season_def) in &definition.seasons {
        match key.parse::<Season>() {
            Ok(season) => {
                if seasons.insert(season, season_def).is_some() {
                    problems.push(format!("{prefix}: season '{season}' is defined more than once"));
                }
            }
            Err(e) => problems.push(format!("{prefix}: {e}")),
        }
    }
    (seasons, problems)
}

fn check_season(prefix: &str, season_def: &SeasonDefinition, problems: &mut Vec<String>) {
    let mut seen = BTreeSet::new();
    match season_def.conditions.as_ref() {
        None | Some(Value::Null) => problems.push(format!("{prefix}: missing 'conditions' list")),
        Some(Value::Array(items)) => {
            if items.is_empty() {
                problems.push(format!("{prefix}: 'conditions' list is empty"));
            }
            for (index, item) in items.iter().enumerate() {
                match item.as_str() {
                    None => problems.push(format!(
                        "{prefix}: condition #{index} must be a string, got {}",
                        json_kind(item)
                    )),
                    Some(label) if label.trim().is_empty() => {
                        problems.push(format!("{prefix}: condition #{index} is blank"));
                    }
                    Some(label) => {
                        if !seen.insert(label) {
                            problems.push(format!(
                                "{prefix}: condition '{label}' is listed more than once"
                            ));
                        }
                    }
                }
            }
        }
        Some(other) => problems.push(format!(
            "{prefix}: 'conditions' must be a list of strings, got {}",
            json_kind(other)
        )),
    }

    let impacts = match season_def.mechanical_impacts.as_ref() {
        None | Some(Value::Null) => return,
        Some(Value::Object(map)) => map,
        Some(other) => {
            problems.push(format!(
                "{prefix}: 'mechanical_impacts' must be a map of condition to impact, got {}",
                json_kind(other)
            ));
            return;
        }
    };

    for (label, value) in impacts {
        if !seen.contains(label.as_str()) {
            problems.push(format!(
                "{prefix}: mechanical impact references unknown condition '{label}'"
            ));
        }
        match value {
            Value::String(_) => {}
            Value::Array(items) => {
                for (index, item) in items.iter().enumerate() {
                    if !item.is_string() {
                        problems.push(format!(
                            "{prefix}: mechanical impact for '{label}' has a non-string entry at #{index}"
                        ));
                    }
                }
            }
            other => problems.push(format!(
                "{prefix}: mechanical impact for '{label}' must be a string or a list of strings, got {}",
                json_kind(other)
            )),
        }
    }
}

fn convert_season(season_def: &SeasonDefinition) -> SeasonalConditionSet {
    let conditions = season_def
        .conditions
        .as_ref()
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(ToOwned::to_owned)
                .collect()
        })
        .unwrap_or_default();
    let impacts = season_def
        .mechanical_impacts
        .as_ref()
        .and_then(Value::as_object)
        .into_iter()
        .flatten()
        .filter_map(|(label, value)| {
            let entry = match value {
                Value::String(text) => ImpactEntry::Single(text.clone()),
                Value::Array(items) => ImpactEntry::List(
                    items
                        .iter()
                        .filter_map(Value::as_str)
                        .map(ToOwned::to_owned)
                        .collect(),
                ),
                _ => return None,
            };
            Some((label.clone(), entry))
        })
        .collect();
    SeasonalConditionSet {
        conditions,
        impacts,
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a map",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::unreachable, clippy::indexing_slicing)]
mod tests {
    use serde_json::json;

    use super::*;

    fn season(conditions: &[&str]) -> SeasonDefinition {
        SeasonDefinition::new(conditions.iter().copied())
    }

    fn complete() -> RegionDefinition {
        let mut seasons = BTreeMap::new();
        for key in ["spring", "summer", "autumn", "winter"] {
            seasons.insert(key.to_owned(), season(&["Clear", "Rain"]));
        }
        RegionDefinition {
            name: "Southern Coast".to_owned(),
            webhook_url: Some("https://discord.com/api/webhooks/1/abc".to_owned()),
            selection: SelectionPolicy::default(),
            seasons,
        }
    }

    #[test]
    fn complete_definition_is_valid() {
        assert!(validate_region_definition("southern_coast", &complete()).is_empty());
    }

    #[test]
    fn reports_every_problem_not_just_the_first() {
        let mut def = complete();
        def.seasons.remove("spring");
        def.seasons.remove("winter");
        def.seasons
            .get_mut("summer")
            .unwrap()
            .insert_impact("Hail", json!("Disadvantage on Perception"));

        let problems = validate_region_definition("southern_coast", &def);
        assert!(problems.len() >= 3, "{problems:?}");
        assert!(problems.iter().any(|p| p.contains("missing season 'spring'")));
        assert!(problems.iter().any(|p| p.contains("missing season 'winter'")));
        assert!(problems.iter().any(|p| p.contains("unknown condition 'Hail'")));
        let distinct: BTreeSet<_> = problems.iter().collect();
        assert_eq!(distinct.len(), problems.len());
    }

    #[test]
    fn reports_condition_list_problems() {
        let mut def = complete();
        def.seasons.insert("spring".to_owned(), SeasonDefinition::default());
        def.seasons.insert("summer".to_owned(), season(&[]));
        def.seasons.insert("autumn".to_owned(), season(&["Fog", " ", "Fog"]));
        let problems = validate_region_definition("r", &def);
        assert!(problems.iter().any(|p| p.contains("season 'spring': missing 'conditions'")));
        assert!(problems.iter().any(|p| p.contains("season 'summer': 'conditions' list is empty")));
        assert!(problems.iter().any(|p| p.contains("condition #1 is blank")));
        assert!(problems.iter().any(|p| p.contains("'Fog' is listed more than once")));
    }

    #[test]
    fn reports_malformed_impacts() {
        let mut def = complete();
        let winter = def.seasons.get_mut("winter").unwrap();
        winter.insert_impact("Clear", json!(7));
        winter.insert_impact("Rain", json!(["Slick roads", {"dc": 12}]));
        let problems = validate_region_definition("r", &def);
        assert_eq!(problems.len(), 2, "{problems:?}");
        assert!(problems[0].contains("got a number") || problems[1].contains("got a number"));
        assert!(problems.iter().any(|p| p.contains("non-string entry at #1")));
    }

    #[test]
    fn reports_malformed_structures_with_other_problems() {
        let mut def = complete();
        def.seasons.remove("spring");
        def.seasons.remove("winter");
        def.seasons.get_mut("summer").unwrap().mechanical_impacts =
            Some(json!(["Heavily obscured"]));
        def.seasons.get_mut("autumn").unwrap().conditions = Some(json!("Fog"));
        let problems = validate_region_definition("broken", &def);
        assert_eq!(problems.len(), 4, "{problems:?}");
        assert!(problems.iter().any(|p| p.contains("missing season 'spring'")));
        assert!(problems.iter().any(|p| p.contains("missing season 'winter'")));
        assert!(problems.iter().any(|p| p.contains(
            "season 'summer': 'mechanical_impacts' must be a map of condition to impact, got a list"
        )));
        assert!(problems.iter().any(|p| p.contains(
            "season 'autumn': 'conditions' must be a list of strings, got a string"
        )));
    }

    #[test]
    fn reports_non_string_conditions() {
        let mut def = complete();
        def.seasons.get_mut("spring").unwrap().conditions = Some(json!(["Clear", 3, null]));
        let problems = validate_region_definition("r", &def);
        assert_eq!(problems.len(), 2, "{problems:?}");
        assert!(problems.iter().any(|p| p.contains("condition #1 must be a string, got a number")));
        assert!(problems.iter().any(|p| p.contains("condition #2 must be a string, got null")));
    }

    #[test]
    fn reports_unknown_and_duplicate_season_keys() {
        let mut def = complete();
        def.seasons.insert("fall".to_owned(), season(&["Leaves"]));
        def.seasons.insert("monsoon".to_owned(), season(&["Downpour"]));
        let problems = validate_region_definition("r", &def);
        assert!(problems.iter().any(|p| p.contains("'autumn' is defined more than once")));
        assert!(problems.iter().any(|p| p.contains("unknown season 'monsoon'")));
    }

    #[test]
    fn reports_bad_power_blank_id_and_bad_url() {
        let mut def = complete();
        def.selection = SelectionPolicy::Weighted { power: 0.0 };
        def.webhook_url = Some("ftp://nope".to_owned());
        let problems = validate_region_definition(" ", &def);
        assert_eq!(problems.len(), 3, "{problems:?}");
    }

    #[test]
    fn validate_all_concatenates_regions() {
        let mut defs = BTreeMap::new();
        defs.insert("good".to_owned(), complete());
        let mut bad = complete();
        bad.seasons.clear();
        defs.insert("bad".to_owned(), bad);
        let problems = validate_all_regions(&defs);
        assert_eq!(problems.len(), 4);
        assert!(problems.iter().all(|p| p.starts_with("region 'bad'")));
    }

    #[test]
    fn build_profile_converts_impacts() {
        let mut def = complete();
        def.name = "  ".to_owned();
        let summer = def.seasons.get_mut("summer").unwrap();
        summer.insert_impact("Clear", json!("Sunburn"));
        summer.insert_impact("Rain", json!(["Wet gear", "Tracks washed out"]));

        let profile = build_profile("southern_coast", &def).unwrap();
        assert_eq!(profile.name, "southern_coast");
        assert!(profile.delivery.is_configured());
        let set = profile.condition_set(Season::Summer).unwrap();
        assert_eq!(set.conditions, vec!["Clear".to_owned(), "Rain".to_owned()]);
        assert_eq!(set.impact_for("Clear"), Some(&ImpactEntry::Single("Sunburn".to_owned())));
        assert_eq!(
            set.impact_for("Rain"),
            Some(&ImpactEntry::List(vec!["Wet gear".to_owned(), "Tracks washed out".to_owned()]))
        );
    }

    #[test]
    fn build_profile_rejects_wholesale_with_all_messages() {
        let mut def = complete();
        def.seasons.remove("spring");
        def.seasons.remove("autumn");
        let err = build_profile("northern_reaches", &def).unwrap_err();
        let WeatherError::Configuration { region, reason, .. } = err else {
            unreachable!("expected a configuration error");
        };
        assert_eq!(region, "northern_reaches");
        assert!(reason.contains("'spring'") && reason.contains("'autumn'"));
    }

    #[test]
    fn shared_seed_bands_pairs_colliding_ids() {
        // Under the fold modulus 61 these two ids land in the same band.
        let pairs = shared_seed_bands(["aa", "bB", "default"]);
        assert_eq!(region_fold("aa"), region_fold("bB"));
        assert_eq!(pairs, vec![("aa".to_owned(), "bB".to_owned())]);
    }
}
