//! Generate, render, and deliver in one step.
//!
//! Generation happens entirely before the first request, so a delivery
//! failure never leaves a region half-generated.

use almanac_config::RegionRegistry;
use almanac_engine::{build_all_regions, build_day};
use almanac_types::RegionProfile;
use chrono::NaiveDate;
use tracing::{info, warn};

use crate::client::WebhookClient;
use crate::error::DeliveryError;
use crate::render::{render_daily, render_weekly};
use crate::summary::DeliverySummary;

/// Post the weather for `date` to each profile's own webhook.
///
/// Every profile is attempted; failures (generation or delivery) are
/// recorded in the summary rather than returned.
pub async fn post_daily<'a, I>(
    client: &WebhookClient,
    profiles: I,
    date: NaiveDate,
) -> DeliverySummary
where
    I: IntoIterator<Item = &'a RegionProfile>,
{
    let mut summary = DeliverySummary::default();
    for profile in profiles {
        match post_daily_one(client, profile, date).await {
            Ok(messages) => {
                info!(region = profile.id, messages, "weather update posted");
                summary.record_success(profile.id.as_str());
            }
            Err(e) => {
                warn!(region = profile.id, error = %e, "weather update failed");
                summary.record_failure(profile.id.as_str(), e);
            }
        }
    }
    summary
}

async fn post_daily_one(
    client: &WebhookClient,
    profile: &RegionProfile,
    date: NaiveDate,
) -> Result<usize, DailyFailure> {
    let url = profile
        .delivery
        .webhook_url
        .as_deref()
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| DeliveryError::missing_target(format!("region '{}'", profile.id)))?;
    let record = build_day(date, profile)?;
    let content = render_daily(profile, &record);
    Ok(client.send_chunked(url, &content).await?)
}

/// Post the consolidated forecast for the week starting `today` to the
/// registry's weekly webhook.
///
/// Covers every region in the registry. A region that fails to generate is
/// shown with an error line; it does not stop the post.
///
/// Returns the number of messages posted.
///
/// # Errors
///
/// [`DeliveryError::MissingTarget`] if no weekly webhook is configured, or
/// the first delivery failure.
pub async fn post_weekly(
    client: &WebhookClient,
    registry: &RegionRegistry,
    today: NaiveDate,
) -> Result<usize, DeliveryError> {
    let url = registry
        .weekly_forecast_webhook_url()
        .ok_or_else(|| DeliveryError::missing_target("the weekly forecast"))?;

    let results = build_all_regions(registry.profiles(), today);
    let failed = results.values().filter(|r| r.is_err()).count();
    if failed > 0 {
        warn!(failed, "some regions could not be forecast");
    }
    info!(regions = results.len(), %today, "sending consolidated weekly forecast");

    let content = render_weekly(registry.profiles(), &results);
    client.send_chunked(url, &content).await
}

/// Why one region's daily post failed.
#[derive(Debug, thiserror::Error)]
enum DailyFailure {
    #[error(transparent)]
    Weather(#[from] almanac_engine::WeatherError),
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}
