//! Configuration for the Almanac campaign weather bot.
//!
//! - [`config`] -- [`AlmanacConfig`], loaded from `almanac-config.yaml` with
//!   environment overrides.
//! - [`registry`] -- [`RegionRegistry`], the validated region profiles.
//! - [`default_profile`] -- The built-in region used when none are configured.

pub mod config;
pub mod default_profile;
pub mod registry;

pub use config::{
    AlmanacConfig, ConfigError, DeliveryConfig, LoggingConfig, ScheduleConfig, region_webhook_var,
};
pub use default_profile::{DEFAULT_REGION_NAME, default_profile};
pub use registry::RegionRegistry;
