//! Seed derivation from a calendar date and a region id.
//!
//! `seed = year*10000 + month*100 + day + fold(region) * 2^25`
//!
//! The date part stays below `2^25` for years up to 3355, so two dates never
//! share a seed. The region fold is a 31-multiplier polynomial hash over the
//! UTF-16 code units of the id, reduced to `1..=61`. The sentinel region
//! [`DEFAULT_REGION_ID`] folds to zero, which keeps single-region seeds equal
//! to the plain date number.
//!
//! Like the generator constants, the multiplier, modulus and stride are
//! frozen: changing them changes every region's historical weather.

use chrono::{Datelike, NaiveDate};

/// Region id used when none is given.
pub const DEFAULT_REGION_ID: &str = "default";

/// Polynomial hash multiplier.
const HASH_MULTIPLIER: i32 = 31;

/// Number of distinct non-default region folds.
const REGION_FOLD_MODULUS: i32 = 61;

/// Distance between region bands; the date part never reaches it.
const REGION_STRIDE: i32 = 1 << 25;

/// Derive the seed for `date` in `region_id` (or the default region).
pub fn derive_seed(date: NaiveDate, region_id: Option<&str>) -> i32 {
    let region = region_id.unwrap_or(DEFAULT_REGION_ID);
    date_base(date).wrapping_add(region_fold(region).wrapping_mul(REGION_STRIDE))
}

/// `year*10000 + month*100 + day`, e.g. `20240615`.
pub fn date_base(date: NaiveDate) -> i32 {
    // month and day are at most 12 and 31.
    let month = i32::try_from(date.month()).unwrap_or(0);
    let day = i32::try_from(date.day()).unwrap_or(0);
    date.year()
        .wrapping_mul(10_000)
        .wrapping_add(month.wrapping_mul(100))
        .wrapping_add(day)
}

/// The region band a region id falls in: 0 for the default region,
/// `1..=61` otherwise.
pub fn region_fold(region_id: &str) -> i32 {
    if region_id == DEFAULT_REGION_ID {
        return 0;
    }
    region_hash(region_id)
        .rem_euclid(REGION_FOLD_MODULUS)
        .wrapping_add(1)
}

/// 31-multiplier polynomial hash over UTF-16 code units, wrapping at 32 bits.
pub fn region_hash(region_id: &str) -> i32 {
    region_id.encode_utf16().fold(0_i32, |hash, unit| {
        hash.wrapping_mul(HASH_MULTIPLIER)
            .wrapping_add(i32::from(unit))
    })
}
