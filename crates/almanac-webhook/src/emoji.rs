//! Condition label -> emoji.

/// Keyword rules, checked in order; the first rule with any matching keyword
/// wins. Matching is case-insensitive substring search.
const RULES: &[(&[&str], &str)] = &[
    (&["snow", "flurries", "blizzard"], "❄️"),
    (&["icy", "frost", "freezing"], "🧊"),
    (&["sleet", "hail"], "🌨️"),
    (&["thunder"], "⛈️"),
    (&["heavy rain", "downpour"], "🌧️"),
    (&["rain", "showers", "drizzle"], "🌦️"),
    (&["fog", "mist"], "🌫️"),
    (&["sunny", "bright", "clear", "sunshine"], "☀️"),
    (&["overcast", "grey", "gray"], "☁️"),
    (&["partly cloudy", "scattered clouds"], "⛅"),
    (&["cloudy"], "☁️"),
    (&["blustery", "windy", "gale"], "💨"),
    (&["breeze"], "🍃"),
    (&["hazy"], "🌤️"),
    (&["mild", "warm"], "🌤️"),
    (&["cool", "cold"], "❄️"),
    (&["hot"], "🔥"),
];

/// Fallback when no rule matches.
pub const DEFAULT_EMOJI: &str = "🌤️";

/// Emoji for a condition label.
pub fn condition_emoji(condition: &str) -> &'static str {
    let lower = condition.to_lowercase();
    RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map_or(DEFAULT_EMOJI, |&(_, emoji)| emoji)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_precedence() {
        assert_eq!(condition_emoji("Light snow flurries"), "❄️");
        assert_eq!(condition_emoji("Icy conditions"), "🧊");
        assert_eq!(condition_emoji("Overcast with sleet"), "🌨️");
        assert_eq!(condition_emoji("Thunderstorms in the afternoon"), "⛈️");
        assert_eq!(condition_emoji("Blustery with heavy rain"), "🌧️");
        assert_eq!(condition_emoji("Overcast with drizzle"), "🌦️");
        assert_eq!(condition_emoji("Thick fog"), "🌫️");
        assert_eq!(condition_emoji("Warm and sunny"), "☀️");
        assert_eq!(condition_emoji("Partly cloudy"), "⛅");
        assert_eq!(condition_emoji("Windy with scattered clouds"), "⛅");
        assert_eq!(condition_emoji("Light breeze"), "🍃");
        assert_eq!(condition_emoji("Hot and humid"), "🔥");
    }

    #[test]
    fn case_insensitive() {
        assert_eq!(condition_emoji("BLIZZARD"), "❄️");
    }

    #[test]
    fn unknown_falls_back() {
        assert_eq!(condition_emoji("Eerily still"), DEFAULT_EMOJI);
        assert_eq!(condition_emoji(""), DEFAULT_EMOJI);
    }
}
