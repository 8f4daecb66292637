//! Condition selection from a season's ordered condition list.
//!
//! Two policies are supported, chosen per region:
//!
//! - [`SelectionPolicy::Uniform`] -- `index = floor(u * len)`.
//! - [`SelectionPolicy::Weighted`] -- `index = floor(u^power * len)`, clamped
//!   to the last entry. With `power = 2` the first of five entries is picked
//!   about 45% of the time and the last about 11%, so region authors list
//!   conditions from common to rare.
//!
//! Either policy consumes exactly one draw from the stream.

use almanac_types::{ImpactEntry, SeasonalConditionSet, SelectionPolicy};

use crate::error::WeatherError;
use crate::rng::SeededGenerator;

/// The outcome of one selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Position of the chosen condition in the list.
    pub index: usize,
    /// The chosen condition label.
    pub condition: String,
    /// Mechanical impacts of the condition (possibly empty).
    pub impacts: Vec<String>,
}

/// Pick one condition from `set` using `policy`.
///
/// Errors with [`WeatherError::Configuration`] when the list is empty or the
/// weighted power is not a positive finite number. The error carries no
/// region; callers attach it with [`WeatherError::within`].
pub fn select(
    stream: &mut SeededGenerator,
    set: &SeasonalConditionSet,
    policy: SelectionPolicy,
) -> Result<Selection, WeatherError> {
    if set.is_empty() {
        return Err(WeatherError::configuration(
            "",
            None,
            "conditions",
            "cannot select from an empty condition list",
        ));
    }

    let index = match policy {
        SelectionPolicy::Uniform => stream.next_index(set.len()).unwrap_or(0),
        SelectionPolicy::Weighted { power } => {
            if !power.is_finite() || power <= 0.0 {
                return Err(WeatherError::configuration(
                    "",
                    None,
                    "selection.power",
                    format!("power must be a positive finite number, got {power}"),
                ));
            }
            weighted_index(stream.next(), power, set.len())
        }
    };

    let condition = set
        .conditions
        .get(index)
        .cloned()
        .ok_or_else(|| {
            WeatherError::configuration(
                "",
                None,
                "conditions",
                format!("selected index {index} outside list of {}", set.len()),
            )
        })?;
    let impacts = resolve_impacts(set, &condition);

    Ok(Selection {
        index,
        condition,
        impacts,
    })
}

/// `floor(u^power * len)` clamped to `[0, len - 1]`.
pub fn weighted_index(u: f64, power: f64, len: usize) -> usize {
    let last = len.saturating_sub(1);
    let len_f = f64::from(u32::try_from(len).unwrap_or(u32::MAX));
    let scaled = (u.powf(power) * len_f).floor();
    // Float-to-int `as` saturates (NaN -> 0), then the clamp bounds the top.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let index = scaled as usize;
    index.min(last)
}

/// Mechanical impacts recorded for `condition`.
///
/// A condition without an entry has no impacts. A single string becomes a
/// one-element list; a list keeps only its non-empty strings.
pub fn resolve_impacts(set: &SeasonalConditionSet, condition: &str) -> Vec<String> {
    match set.impact_for(condition) {
        None => Vec::new(),
        Some(ImpactEntry::Single(text)) if text.trim().is_empty() => Vec::new(),
        Some(ImpactEntry::Single(text)) => vec![text.clone()],
        Some(ImpactEntry::List(items)) => items
            .iter()
            .filter(|item| !item.trim().is_empty())
            .cloned()
            .collect(),
    }
}
