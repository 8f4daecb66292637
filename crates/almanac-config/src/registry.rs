//! Validated region profiles, looked up by id.

use std::collections::BTreeMap;

use almanac_engine::{
    DEFAULT_REGION_ID, WeatherError, build_profile, shared_seed_bands, validate_all_regions,
};
use almanac_types::{DeliveryTarget, RegionProfile};
use tracing::{info, warn};

use crate::config::{AlmanacConfig, ConfigError};
use crate::default_profile::default_profile;

/// Every region the bot knows about.
///
/// Built once at startup from [`AlmanacConfig`]; immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionRegistry {
    profiles: BTreeMap<String, RegionProfile>,
    builtin: bool,
    weekly_webhook_url: Option<String>,
}

impl RegionRegistry {
    /// Validate every configured region and build the registry.
    ///
    /// With no regions configured the registry holds only the built-in
    /// default region, delivering to `delivery.default_webhook_url`. With
    /// regions configured, the built-in default region is added alongside
    /// them when `delivery.default_webhook_url` is set, so non-regional
    /// lookups and the legacy webhook keep working. A configured region
    /// called `default` takes precedence and the legacy URL is unused.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Invalid`] listing every problem across all regions and
    /// the schedule section.
    pub fn from_config(config: &AlmanacConfig) -> Result<Self, ConfigError> {
        let mut problems = validate_all_regions(&config.regions);
        problems.extend(config.schedule.problems());
        if !problems.is_empty() {
            return Err(ConfigError::Invalid { problems });
        }

        for (a, b) in shared_seed_bands(config.regions.keys().map(String::as_str)) {
            warn!(
                first = a,
                second = b,
                "regions share a seed band; their weather will be identical"
            );
        }

        let weekly_webhook_url = non_blank(config.delivery.weekly_forecast_webhook_url.as_deref());
        let legacy_webhook_url = non_blank(config.delivery.default_webhook_url.as_deref());

        if config.regions.is_empty() {
            let delivery = DeliveryTarget {
                webhook_url: legacy_webhook_url,
            };
            info!("no regions configured, using the built-in default region");
            return Ok(Self::single(default_profile().with_delivery(delivery))
                .with_weekly_webhook(weekly_webhook_url));
        }

        let mut profiles = BTreeMap::new();
        for (id, definition) in &config.regions {
            let profile =
                build_profile(id, definition).map_err(|e| ConfigError::invalid(e.to_string()))?;
            profiles.insert(id.clone(), profile);
        }

        if let Some(url) = legacy_webhook_url {
            if profiles.contains_key(DEFAULT_REGION_ID) {
                warn!(
                    "WEBHOOK_URL is set but a region named 'default' is configured; \
                     the legacy webhook is unused"
                );
            } else {
                info!("WEBHOOK_URL is set, adding the built-in default region");
                let delivery = DeliveryTarget {
                    webhook_url: Some(url),
                };
                profiles.insert(
                    DEFAULT_REGION_ID.to_owned(),
                    default_profile().with_delivery(delivery),
                );
            }
        }
        info!(regions = profiles.len(), "region registry loaded");

        Ok(Self {
            profiles,
            builtin: false,
            weekly_webhook_url,
        })
    }

    /// A registry holding exactly one profile, treated as the built-in
    /// fallback.
    pub fn single(profile: RegionProfile) -> Self {
        Self {
            profiles: BTreeMap::from([(profile.id.clone(), profile)]),
            builtin: true,
            weekly_webhook_url: None,
        }
    }

    /// Set the consolidated weekly forecast destination.
    #[must_use]
    pub fn with_weekly_webhook(mut self, url: Option<String>) -> Self {
        self.weekly_webhook_url = url;
        self
    }

    /// Look up a region by id.
    ///
    /// # Errors
    ///
    /// [`WeatherError::NotFound`] if no region has this id.
    pub fn get(&self, region_id: &str) -> Result<&RegionProfile, WeatherError> {
        self.profiles
            .get(region_id)
            .ok_or_else(|| WeatherError::not_found(region_id))
    }

    /// Every profile, ordered by id.
    pub fn profiles(&self) -> impl Iterator<Item = &RegionProfile> {
        self.profiles.values()
    }

    /// Every region id, ordered.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }

    /// Number of regions.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Whether the registry is empty. Never true for a registry built by
    /// [`RegionRegistry::from_config`].
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Profiles with a delivery target, ordered by id.
    pub fn configured(&self) -> Vec<&RegionProfile> {
        self.profiles
            .values()
            .filter(|p| p.delivery.is_configured())
            .collect()
    }

    /// Whether the registry holds only the built-in default region.
    pub const fn is_builtin(&self) -> bool {
        self.builtin
    }

    /// Destination of the consolidated weekly forecast, if any.
    pub fn weekly_forecast_webhook_url(&self) -> Option<&str> {
        self.weekly_webhook_url.as_deref()
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToOwned::to_owned)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> AlmanacConfig {
        serde_yml::from_str(yaml).unwrap()
    }

    const TWO_REGIONS: &str = r#"
regions:
  southern_coast:
    name: Southern Coast
    webhook_url: https://example.invalid/coast
    seasons:
      spring: { conditions: [Sea breeze] }
      summer: { conditions: [Sea breeze, Fog bank] }
      autumn: { conditions: [Squalls] }
      winter: { conditions: [Grey swell] }
  northern_reaches:
    name: Northern Reaches
    seasons:
      spring: { conditions: [Thaw] }
      summer: { conditions: [Midnight sun] }
      autumn: { conditions: [Sleet] }
      winter:
        conditions: [Blizzard]
        mechanical_impacts:
          Blizzard: Heavily obscured
delivery:
  weekly_forecast_webhook_url: https://example.invalid/weekly
"#;

    #[test]
    fn empty_config_falls_back_to_default_region() {
        let mut config = AlmanacConfig::default();
        config.delivery.default_webhook_url = Some("https://example.invalid/default".to_owned());
        let registry = RegionRegistry::from_config(&config).unwrap();
        assert!(registry.is_builtin());
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.configured().len(), 1);
        let profile = registry.get(DEFAULT_REGION_ID).unwrap();
        assert_eq!(
            profile.delivery.webhook_url.as_deref(),
            Some("https://example.invalid/default")
        );
        assert_eq!(registry.weekly_forecast_webhook_url(), None);
    }

    #[test]
    fn configured_regions_are_loaded() {
        let registry = RegionRegistry::from_config(&parse(TWO_REGIONS)).unwrap();
        assert!(!registry.is_builtin());
        assert_eq!(
            registry.ids().collect::<Vec<_>>(),
            ["northern_reaches", "southern_coast"]
        );
        assert_eq!(registry.get("southern_coast").unwrap().name, "Southern Coast");
        assert!(!registry.get("northern_reaches").unwrap().delivery.is_configured());
        let configured: Vec<_> = registry.configured().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(configured, ["southern_coast"]);
        assert_eq!(
            registry.weekly_forecast_webhook_url(),
            Some("https://example.invalid/weekly")
        );
    }

    #[test]
    fn unknown_region_is_not_found() {
        let registry = RegionRegistry::from_config(&parse(TWO_REGIONS)).unwrap();
        let err = registry.get("atlantis").unwrap_err();
        assert_eq!(err, WeatherError::not_found("atlantis"));
        assert!(registry.get(DEFAULT_REGION_ID).is_err());
    }

    #[test]
    fn legacy_webhook_adds_default_region_next_to_named_ones() {
        let mut config = parse(TWO_REGIONS);
        config.delivery.default_webhook_url = Some("https://example.invalid/default".to_owned());
        let registry = RegionRegistry::from_config(&config).unwrap();
        assert!(!registry.is_builtin());
        assert_eq!(
            registry.ids().collect::<Vec<_>>(),
            [DEFAULT_REGION_ID, "northern_reaches", "southern_coast"]
        );
        let default = registry.get(DEFAULT_REGION_ID).unwrap();
        assert_eq!(
            default.delivery.webhook_url.as_deref(),
            Some("https://example.invalid/default")
        );
        let configured: Vec<_> = registry.configured().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(configured, [DEFAULT_REGION_ID, "southern_coast"]);
    }

    #[test]
    fn configured_default_region_wins_over_legacy_webhook() {
        let mut config = parse(
            r"
regions:
  default:
    name: Home Valley
    seasons:
      spring: { conditions: [Drizzle] }
      summer: { conditions: [Haze] }
      autumn: { conditions: [Gales] }
      winter: { conditions: [Frost] }
",
        );
        config.delivery.default_webhook_url = Some("https://example.invalid/default".to_owned());
        let registry = RegionRegistry::from_config(&config).unwrap();
        assert_eq!(registry.len(), 1);
        let default = registry.get(DEFAULT_REGION_ID).unwrap();
        assert_eq!(default.name, "Home Valley");
        assert!(!default.delivery.is_configured());
    }

    #[test]
    fn malformed_structures_are_reported_with_other_problems() {
        let config = parse(
            r"
regions:
  broken:
    seasons:
      summer:
        conditions: [Haze]
        mechanical_impacts: [Heavily obscured]
      autumn:
        conditions: Fog
",
        );
        let Err(ConfigError::Invalid { problems }) = RegionRegistry::from_config(&config) else {
            panic!("expected invalid configuration");
        };
        assert_eq!(problems.len(), 4, "{problems:?}");
        assert!(problems.iter().any(|p| p.contains("missing season 'spring'")));
        assert!(problems.iter().any(|p| p.contains("missing season 'winter'")));
        assert!(problems.iter().any(|p| p.contains("'mechanical_impacts' must be a map")));
        assert!(problems.iter().any(|p| p.contains("'conditions' must be a list of strings")));
    }

    #[test]
    fn invalid_regions_report_every_problem() {
        let config = parse(
            r#"
regions:
  a:
    seasons:
      summer: { conditions: [] }
  b:
    seasons:
      summer: { conditions: [Clear] }
"#,
        );
        let Err(ConfigError::Invalid { problems }) = RegionRegistry::from_config(&config) else {
            panic!("expected invalid configuration");
        };
        assert!(problems.len() >= 7, "{problems:?}");
        assert!(problems.iter().any(|p| p.contains("'a'")));
        assert!(problems.iter().any(|p| p.contains("'b'")));
    }

    #[test]
    fn shipped_config_is_valid() {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../..")
            .join(crate::config::DEFAULT_CONFIG_FILE);
        if path.exists() {
            let config = AlmanacConfig::from_file(&path).unwrap();
            let registry = RegionRegistry::from_config(&config);
            assert!(registry.is_ok(), "{registry:?}");
        }
    }

    #[test]
    fn invalid_schedule_is_reported() {
        let mut config = AlmanacConfig::default();
        config.schedule.weekly_on = "caturday".to_owned();
        assert!(matches!(
            RegionRegistry::from_config(&config),
            Err(ConfigError::Invalid { .. })
        ));
    }
}
