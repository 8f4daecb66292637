//! Deterministic weather generation for the Almanac campaign weather bot.
//!
//! Weather for a given date and region is a pure function of the two: the
//! date and region id derive a seed, the seed drives a fresh pseudo-random
//! stream, and one draw from that stream picks a condition from the
//! season's list. Asking twice gives the same answer; asking for a
//! different region gives an independent one.
//!
//! # Modules
//!
//! - [`rng`] -- [`SeededGenerator`], the frozen `mulberry32` stream.
//! - [`seed`] -- `(date, region)` -> seed derivation.
//! - [`season`] -- Calendar month -> [`Season`](almanac_types::Season).
//! - [`selector`] -- Uniform and weighted-toward-front condition selection
//!   and mechanical-impact lookup.
//! - [`daily`] -- [`build_day`]: one region, one date.
//! - [`forecast`] -- [`build_week`] and the per-region batch builders.
//! - [`validation`] -- Region definition checks and profile construction.
//! - [`error`] -- [`WeatherError`].

pub mod daily;
pub mod error;
pub mod forecast;
pub mod rng;
pub mod season;
pub mod seed;
pub mod selector;
pub mod validation;

// Re-export primary types at crate root.
pub use daily::{build_day, build_today, format_date, today_at};
pub use error::WeatherError;
pub use forecast::{FORECAST_DAYS, TODAY_LABEL, build_all_days, build_all_regions, build_week};
pub use rng::{GENERATOR_VERSION, SeededGenerator};
pub use season::season_for;
pub use seed::{DEFAULT_REGION_ID, derive_seed};
pub use selector::{Selection, select};
pub use validation::{
    build_profile, shared_seed_bands, validate_all_regions, validate_region_definition,
};
