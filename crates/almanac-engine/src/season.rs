//! Calendar month -> season (Northern hemisphere).

use almanac_types::Season;
use chrono::{Datelike, NaiveDate};

/// The season `date` falls in.
///
/// | Months | Season |
/// |---|---|
/// | Mar-May | Spring |
/// | Jun-Aug | Summer |
/// | Sep-Nov | Autumn |
/// | Dec-Feb | Winter |
pub fn season_for(date: NaiveDate) -> Season {
    match date.month() {
        3..=5 => Season::Spring,
        6..=8 => Season::Summer,
        9..=11 => Season::Autumn,
        _ => Season::Winter,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn reference_dates() {
        assert_eq!(season_for(date(2024, 1, 15)), Season::Winter);
        assert_eq!(season_for(date(2024, 4, 10)), Season::Spring);
        assert_eq!(season_for(date(2024, 7, 4)), Season::Summer);
        assert_eq!(season_for(date(2024, 10, 31)), Season::Autumn);
    }

    #[test]
    fn boundaries() {
        assert_eq!(season_for(date(2023, 12, 1)), Season::Winter);
        assert_eq!(season_for(date(2024, 2, 29)), Season::Winter);
        assert_eq!(season_for(date(2024, 3, 1)), Season::Spring);
        assert_eq!(season_for(date(2024, 5, 31)), Season::Spring);
        assert_eq!(season_for(date(2024, 6, 1)), Season::Summer);
        assert_eq!(season_for(date(2024, 8, 31)), Season::Summer);
        assert_eq!(season_for(date(2024, 9, 1)), Season::Autumn);
        assert_eq!(season_for(date(2024, 11, 30)), Season::Autumn);
    }
}
