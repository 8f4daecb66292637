//! Error types for the Almanac binary.
//!
//! [`BotError`] wraps every failure a command can surface so that `main`
//! can propagate with `?` and exit non-zero.

/// Top-level error for the Almanac binary.
#[derive(Debug, thiserror::Error)]
pub enum BotError {
    /// Configuration loading or validation failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: almanac_config::ConfigError,
    },

    /// Weather generation failed or a region was not found.
    #[error("weather error: {source}")]
    Weather {
        /// The underlying generation error.
        #[from]
        source: almanac_engine::WeatherError,
    },

    /// A webhook post failed.
    #[error("delivery error: {source}")]
    Delivery {
        /// The underlying delivery error.
        #[from]
        source: almanac_webhook::DeliveryError,
    },

    /// Some regions were not delivered.
    #[error("regional delivery incomplete: {summary}")]
    Incomplete {
        /// Counts of successes and failures.
        summary: String,
    },

    /// `validate` found problems.
    #[error("{count} configuration problem(s) found")]
    Invalid {
        /// Number of problems.
        count: usize,
    },

    /// The scheduler could not compute its next run.
    #[error("scheduler error: {message}")]
    Schedule {
        /// Description of the failure.
        message: String,
    },
}
