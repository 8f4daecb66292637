//! One function per CLI subcommand.

use std::path::Path;

use almanac_config::{AlmanacConfig, RegionRegistry};
use almanac_engine::{
    build_all_regions, build_day, shared_seed_bands, today_at, validate_all_regions,
};
use almanac_types::RegionProfile;
use almanac_webhook::{WebhookClient, post_daily, post_weekly, render_daily, render_weekly};
use chrono::{FixedOffset, NaiveDate};
use tracing::{info, warn};

use crate::error::BotError;

/// Loaded configuration plus everything derived from it.
pub struct Context {
    /// Raw configuration.
    pub config: AlmanacConfig,
    /// Validated regions.
    pub registry: RegionRegistry,
    /// Offset that defines "today".
    pub offset: FixedOffset,
}

impl Context {
    /// Build from an already loaded configuration.
    ///
    /// # Errors
    ///
    /// [`BotError::Config`] if any region or the schedule is invalid.
    pub fn new(config: AlmanacConfig) -> Result<Self, BotError> {
        let registry = RegionRegistry::from_config(&config)?;
        let offset = config.schedule.offset()?;
        Ok(Self {
            config,
            registry,
            offset,
        })
    }

    /// The given date, or today in the configured offset.
    pub fn date_or_today(&self, date: Option<NaiveDate>) -> NaiveDate {
        date.unwrap_or_else(|| today_at(self.offset))
    }

    fn client(&self) -> Result<WebhookClient, BotError> {
        Ok(WebhookClient::new(&self.config.delivery)?)
    }

    /// `region` alone, or every region in the registry.
    fn selected(&self, region: Option<&str>) -> Result<Vec<&RegionProfile>, BotError> {
        match region {
            Some(id) => Ok(vec![self.registry.get(id)?]),
            None => Ok(self.registry.profiles().collect()),
        }
    }
}

/// Post the daily update for one region, or every region with a webhook.
///
/// # Errors
///
/// [`BotError::Weather`] for an unknown region, [`BotError::Incomplete`] if
/// any region failed.
pub async fn daily(
    ctx: &Context,
    region: Option<&str>,
    date: Option<NaiveDate>,
) -> Result<(), BotError> {
    let date = ctx.date_or_today(date);
    let profiles = match region {
        Some(id) => vec![ctx.registry.get(id)?],
        None => ctx.registry.configured(),
    };
    if profiles.is_empty() {
        warn!("no regions configured with webhook URLs");
        return Ok(());
    }

    info!(regions = profiles.len(), %date, "sending daily weather updates");
    let summary = post_daily(&ctx.client()?, profiles, date).await;
    summary.log();
    if summary.all_succeeded() {
        Ok(())
    } else {
        Err(BotError::Incomplete {
            summary: summary.to_string(),
        })
    }
}

/// Post the consolidated weekly forecast.
///
/// # Errors
///
/// [`BotError::Delivery`] if no weekly webhook is configured or the post
/// fails.
pub async fn weekly(ctx: &Context, date: Option<NaiveDate>) -> Result<(), BotError> {
    let today = ctx.date_or_today(date);
    let messages = post_weekly(&ctx.client()?, &ctx.registry, today).await?;
    info!(messages, "consolidated weekly forecast posted");
    Ok(())
}

/// Print what would be posted, without touching the network.
///
/// # Errors
///
/// [`BotError::Weather`] for an unknown region or a generation failure in a
/// daily preview.
pub fn preview(
    ctx: &Context,
    region: Option<&str>,
    date: Option<NaiveDate>,
    weekly: bool,
) -> Result<(), BotError> {
    let date = ctx.date_or_today(date);
    let profiles = ctx.selected(region)?;

    if weekly {
        let results = build_all_regions(profiles.iter().copied(), date);
        println!("{}", render_weekly(profiles.iter().copied(), &results));
        return Ok(());
    }

    for profile in profiles {
        let record = build_day(date, profile)?;
        println!("{}", render_daily(profile, &record));
    }
    Ok(())
}

/// Print every configuration problem.
///
/// Takes the raw configuration so that broken regions can still be
/// reported.
///
/// # Errors
///
/// [`BotError::Invalid`] if anything is wrong.
pub fn validate(config: &AlmanacConfig) -> Result<(), BotError> {
    let mut problems = validate_all_regions(&config.regions);
    problems.extend(config.schedule.problems());

    for (a, b) in shared_seed_bands(config.regions.keys().map(String::as_str)) {
        println!("warning: regions '{a}' and '{b}' share a seed band");
    }

    if problems.is_empty() {
        let regions = if config.regions.is_empty() {
            "built-in default region".to_owned()
        } else {
            format!("{} region(s)", config.regions.len())
        };
        println!("configuration OK: {regions}");
        return Ok(());
    }

    for problem in &problems {
        println!("error: {problem}");
    }
    Err(BotError::Invalid {
        count: problems.len(),
    })
}

/// Load configuration from `path`, `$ALMANAC_CONFIG`, or the working
/// directory.
///
/// # Errors
///
/// [`BotError::Config`] if the file cannot be read or parsed.
pub fn load_config(path: Option<&Path>) -> Result<AlmanacConfig, BotError> {
    Ok(AlmanacConfig::load(path)?)
}
