//! Configuration loading and typed config structures.
//!
//! The canonical configuration lives in `almanac-config.yaml`. This module
//! defines strongly-typed structs that mirror the YAML structure and a
//! loader that reads the file and applies environment overrides. Every
//! section is optional; an empty file (or no file) yields the built-in
//! default region and the defaults below.
//!
//! ```yaml
//! regions:
//!   southern_coast:
//!     name: Southern Coast
//!     seasons: { ... }
//! delivery:
//!   weekly_forecast_webhook_url: https://discord.com/api/webhooks/...
//!   chunk_delay_ms: 100
//! schedule:
//!   utc_offset_minutes: -300
//!   daily_at: "00:00"
//!   weekly_on: monday
//! logging:
//!   level: info
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use almanac_types::RegionDefinition;
use chrono::{FixedOffset, NaiveTime, Weekday};
use serde::Deserialize;
use tracing::{debug, info};

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "almanac-config.yaml";

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "ALMANAC_CONFIG";

/// Legacy single-region webhook URL.
pub const WEBHOOK_URL_ENV: &str = "WEBHOOK_URL";

/// Prefix of per-region webhook URL variables (`WEBHOOK_URL_SOUTHERN_COAST`).
pub const REGION_WEBHOOK_ENV_PREFIX: &str = "WEBHOOK_URL_";

/// Consolidated weekly forecast webhook URL.
pub const WEEKLY_WEBHOOK_URL_ENV: &str = "WEEKLY_FORECAST_WEBHOOK_URL";

/// Scheduler UTC offset override, in minutes.
pub const UTC_OFFSET_ENV: &str = "ALMANAC_UTC_OFFSET_MINUTES";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The configuration parsed but is not usable.
    #[error("invalid configuration ({} problem(s)): {}", .problems.len(), .problems.join("; "))]
    Invalid {
        /// Every problem found.
        problems: Vec<String>,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

impl ConfigError {
    /// A single-problem [`ConfigError::Invalid`].
    pub fn invalid(problem: impl Into<String>) -> Self {
        Self::Invalid {
            problems: vec![problem.into()],
        }
    }
}

/// Top-level configuration.
///
/// Mirrors the structure of `almanac-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AlmanacConfig {
    /// Region id -> raw region definition. Empty means "use the built-in
    /// default region".
    #[serde(default)]
    pub regions: BTreeMap<String, RegionDefinition>,

    /// Webhook delivery settings.
    #[serde(default)]
    pub delivery: DeliveryConfig,

    /// Scheduler settings.
    #[serde(default)]
    pub schedule: ScheduleConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AlmanacConfig {
    /// Load configuration from a YAML file at the given path, then apply
    /// environment overrides.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] if the file cannot be read, [`ConfigError::Yaml`]
    /// if it is not valid YAML, [`ConfigError::Invalid`] if an override is
    /// malformed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse_yaml(&contents)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Parse configuration from a YAML string and apply environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config = Self::parse_yaml(yaml)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Locate and load the configuration.
    ///
    /// Order: explicit `path`, then `$ALMANAC_CONFIG`, then
    /// [`DEFAULT_CONFIG_FILE`] in the working directory. When none exists the
    /// defaults are used (environment overrides still apply).
    ///
    /// # Errors
    ///
    /// As [`AlmanacConfig::from_file`]. An explicitly named file that does not
    /// exist is an [`ConfigError::Io`] error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let explicit = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from));

        if let Some(path) = explicit {
            info!(path = %path.display(), "loading configuration");
            return Self::from_file(&path);
        }

        let fallback = Path::new(DEFAULT_CONFIG_FILE);
        if fallback.exists() {
            info!(path = %fallback.display(), "loading configuration");
            return Self::from_file(fallback);
        }

        info!("no configuration file found, using built-in defaults");
        let mut config = Self::default();
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Apply overrides from the process environment.
    ///
    /// - `WEBHOOK_URL` -> [`DeliveryConfig::default_webhook_url`]
    /// - `WEBHOOK_URL_<REGION_ID>` -> that region's `webhook_url`
    /// - `WEEKLY_FORECAST_WEBHOOK_URL` -> [`DeliveryConfig::weekly_forecast_webhook_url`]
    /// - `ALMANAC_UTC_OFFSET_MINUTES` -> [`ScheduleConfig::utc_offset_minutes`]
    ///
    /// # Errors
    ///
    /// [`ConfigError::Invalid`] if the offset override is not an integer.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// As [`AlmanacConfig::apply_env_overrides`].
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(url) = non_blank(WEBHOOK_URL_ENV) {
            debug!(var = WEBHOOK_URL_ENV, "default webhook URL overridden");
            self.delivery.default_webhook_url = Some(url);
        }
        if let Some(url) = non_blank(WEEKLY_WEBHOOK_URL_ENV) {
            debug!(var = WEEKLY_WEBHOOK_URL_ENV, "weekly webhook URL overridden");
            self.delivery.weekly_forecast_webhook_url = Some(url);
        }
        for (id, region) in &mut self.regions {
            let var = region_webhook_var(id);
            if let Some(url) = non_blank(&var) {
                debug!(region = id, var, "region webhook URL overridden");
                region.webhook_url = Some(url);
            }
        }
        if let Some(raw) = non_blank(UTC_OFFSET_ENV) {
            self.schedule.utc_offset_minutes = raw.trim().parse().map_err(|e| {
                ConfigError::invalid(format!("invalid {UTC_OFFSET_ENV} '{raw}': {e}"))
            })?;
        }
        Ok(())
    }

    fn parse_yaml(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes as unit, not as an empty map.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }
}

/// Environment variable carrying the webhook URL for `region_id`.
pub fn region_webhook_var(region_id: &str) -> String {
    let suffix: String = region_id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("{REGION_WEBHOOK_ENV_PREFIX}{suffix}")
}

/// Webhook delivery settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeliveryConfig {
    /// Webhook URL for the built-in default region.
    #[serde(default)]
    pub default_webhook_url: Option<String>,

    /// Webhook URL for the consolidated weekly forecast.
    #[serde(default)]
    pub weekly_forecast_webhook_url: Option<String>,

    /// Pause between chunks of one long message, in milliseconds.
    #[serde(default = "default_chunk_delay_ms")]
    pub chunk_delay_ms: u64,

    /// Maximum characters per message (Discord allows 2000).
    #[serde(default = "default_max_message_length")]
    pub max_message_length: usize,

    /// HTTP request timeout, in milliseconds.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            default_webhook_url: None,
            weekly_forecast_webhook_url: None,
            chunk_delay_ms: default_chunk_delay_ms(),
            max_message_length: default_max_message_length(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

/// Scheduler settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScheduleConfig {
    /// Offset from UTC used to decide what "today" and "midnight" mean.
    #[serde(default = "default_utc_offset_minutes")]
    pub utc_offset_minutes: i32,

    /// Local time of the daily post, `HH:MM`.
    #[serde(default = "default_daily_at")]
    pub daily_at: String,

    /// Weekday of the consolidated weekly forecast.
    #[serde(default = "default_weekly_on")]
    pub weekly_on: String,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: default_utc_offset_minutes(),
            daily_at: default_daily_at(),
            weekly_on: default_weekly_on(),
        }
    }
}

impl ScheduleConfig {
    /// The configured UTC offset.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Invalid`] if the offset is beyond +/- 24 hours.
    pub fn offset(&self) -> Result<FixedOffset, ConfigError> {
        self.utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                ConfigError::invalid(format!(
                    "schedule.utc_offset_minutes {} is out of range",
                    self.utc_offset_minutes
                ))
            })
    }

    /// The configured daily post time.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Invalid`] if `daily_at` is not `HH:MM`.
    pub fn daily_time(&self) -> Result<NaiveTime, ConfigError> {
        NaiveTime::parse_from_str(self.daily_at.trim(), "%H:%M").map_err(|e| {
            ConfigError::invalid(format!("schedule.daily_at '{}': {e}", self.daily_at))
        })
    }

    /// The configured weekly forecast day.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Invalid`] if `weekly_on` is not a weekday name.
    pub fn weekly_day(&self) -> Result<Weekday, ConfigError> {
        self.weekly_on.trim().parse::<Weekday>().map_err(|e| {
            ConfigError::invalid(format!("schedule.weekly_on '{}': {e}", self.weekly_on))
        })
    }

    /// Every problem with the schedule section.
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        for result in [
            self.offset().map(|_| ()),
            self.daily_time().map(|_| ()),
            self.weekly_day().map(|_| ()),
        ] {
            if let Err(ConfigError::Invalid { problems: mut found }) = result {
                problems.append(&mut found);
            }
        }
        problems
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default `tracing` filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

const fn default_chunk_delay_ms() -> u64 {
    100
}

const fn default_max_message_length() -> usize {
    2000
}

const fn default_request_timeout_ms() -> u64 {
    10_000
}

const fn default_utc_offset_minutes() -> i32 {
    // US Eastern standard time.
    -300
}

fn default_daily_at() -> String {
    "00:00".to_owned()
}

fn default_weekly_on() -> String {
    "monday".to_owned()
}

fn default_log_level() -> String {
    "info".to_owned()
}
