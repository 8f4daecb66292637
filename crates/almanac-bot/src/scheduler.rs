//! Long-running daily/weekly posting loop.
//!
//! Fire times are computed in the configured fixed UTC offset. The loop
//! sleeps until the next fire time, posts, and repeats until Ctrl-C.

use std::time::Duration;

use almanac_webhook::{WebhookClient, post_daily, post_weekly};
use chrono::{DateTime, Datelike, Days, FixedOffset, NaiveDate, NaiveTime, Utc};
use tracing::{error, info, warn};

use crate::commands::Context;
use crate::error::BotError;

/// First instant strictly after `now` whose local time is `at`.
pub fn next_fire(
    now: DateTime<Utc>,
    offset: FixedOffset,
    at: NaiveTime,
) -> Option<DateTime<FixedOffset>> {
    let local = now.with_timezone(&offset);
    let mut candidate = local.date_naive().and_time(at);
    if candidate <= local.naive_local() {
        candidate = candidate.checked_add_days(Days::new(1))?;
    }
    candidate.and_local_timezone(offset).single()
}

/// Run until interrupted.
///
/// A failed post is logged and the loop carries on with the next fire
/// time.
///
/// # Errors
///
/// [`BotError::Config`] for an invalid schedule section,
/// [`BotError::Schedule`] if the next fire time is out of range.
pub async fn run(ctx: &Context) -> Result<(), BotError> {
    let at = ctx.config.schedule.daily_time()?;
    let weekly_on = ctx.config.schedule.weekly_day()?;
    let client = WebhookClient::new(&ctx.config.delivery)?;

    info!(
        daily_at = %at,
        weekly_on = %weekly_on,
        utc_offset_minutes = ctx.config.schedule.utc_offset_minutes,
        regions = ctx.registry.len(),
        "scheduler started"
    );

    loop {
        let now = Utc::now();
        let fire = next_fire(now, ctx.offset, at).ok_or_else(|| BotError::Schedule {
            message: format!("no fire time after {now}"),
        })?;
        let wait = fire
            .with_timezone(&Utc)
            .signed_duration_since(now)
            .to_std()
            .unwrap_or(Duration::ZERO);
        info!(next = %fire, wait_secs = wait.as_secs(), "waiting for next post");

        tokio::select! {
            () = tokio::time::sleep(wait) => {}
            _ = tokio::signal::ctrl_c() => {
                info!("shutdown signal received, scheduler stopping");
                return Ok(());
            }
        }

        let date = fire.date_naive();
        post_once(ctx, &client, date, date.weekday() == weekly_on).await;
    }
}

async fn post_once(
    ctx: &Context,
    client: &WebhookClient,
    date: NaiveDate,
    include_weekly: bool,
) {
    let targets = ctx.registry.configured();
    if targets.is_empty() {
        warn!("no regions configured with webhook URLs, skipping daily post");
    } else {
        post_daily(client, targets, date).await.log();
    }

    if !include_weekly {
        return;
    }
    match post_weekly(client, &ctx.registry, date).await {
        Ok(messages) => info!(messages, "consolidated weekly forecast posted"),
        Err(e) => error!(error = %e, "consolidated weekly forecast failed"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Weekday};

    use super::*;

    fn eastern() -> FixedOffset {
        FixedOffset::west_opt(18_000).unwrap()
    }

    fn midnight() -> NaiveTime {
        NaiveTime::from_hms_opt(0, 0, 0).unwrap()
    }

    #[test]
    fn next_midnight_is_local_midnight() {
        // 2024-06-15 03:00 UTC is 2024-06-14 22:00 at UTC-5.
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 3, 0, 0).unwrap();
        let fire = next_fire(now, eastern(), midnight()).unwrap();
        assert_eq!(fire.date_naive(), NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
        let expected = Utc.with_ymd_and_hms(2024, 6, 15, 5, 0, 0).unwrap();
        assert_eq!(fire.with_timezone(&Utc), expected);
    }

    #[test]
    fn exactly_at_fire_time_moves_to_tomorrow() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 5, 0, 0).unwrap();
        let fire = next_fire(now, eastern(), midnight()).unwrap();
        assert_eq!(fire.date_naive(), NaiveDate::from_ymd_opt(2024, 6, 16).unwrap());
    }

    #[test]
    fn later_today_is_today() {
        let at = NaiveTime::from_hms_opt(9, 30, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        let fire = next_fire(now, eastern(), at).unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        assert_eq!(fire.naive_local(), today.and_time(at));
    }

    #[test]
    fn already_past_today_is_tomorrow() {
        let at = NaiveTime::from_hms_opt(9, 30, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 13, 0, 0).unwrap();
        let fire = next_fire(now, FixedOffset::east_opt(0).unwrap(), at).unwrap();
        let tomorrow = NaiveDate::from_ymd_opt(2024, 6, 16).unwrap();
        assert_eq!(fire.naive_local(), tomorrow.and_time(at));
    }

    #[test]
    fn weekly_day_matches_fire_date() {
        // 2024-06-17 is a Monday.
        let now = Utc.with_ymd_and_hms(2024, 6, 17, 3, 0, 0).unwrap();
        let fire = next_fire(now, eastern(), midnight()).unwrap();
        assert_eq!(fire.date_naive().weekday(), Weekday::Mon);
    }
}
