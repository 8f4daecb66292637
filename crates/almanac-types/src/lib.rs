//! Shared type definitions for the Almanac campaign weather bot.
//!
//! This crate is the single source of truth for the data model used across
//! the workspace: seasons, region profiles, raw region definitions and the
//! generated weather records.
//!
//! # Modules
//!
//! - [`enums`] -- [`Season`] and [`SelectionPolicy`]
//! - [`structs`] -- Validated profiles, condition sets, weather records and
//!   forecasts
//! - [`definition`] -- Raw region definitions as read from configuration

pub mod definition;
pub mod enums;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use definition::{RegionDefinition, SeasonDefinition};
pub use enums::{DEFAULT_BIAS_POWER, Season, SelectionPolicy, UnknownSeason};
pub use structs::{
    DeliveryTarget, ForecastDay, ForecastSequence, ImpactEntry, RegionProfile,
    SeasonalConditionSet, WeatherRecord,
};
