//! Discord webhook delivery for the Almanac campaign weather bot.
//!
//! Turns generated weather into Discord markdown and posts it.
//!
//! - [`render`] -- Daily update and consolidated weekly forecast text.
//! - [`emoji`] -- Condition label -> emoji.
//! - [`chunk`] -- Splitting at Discord's 2000-character limit.
//! - [`client`] -- [`WebhookClient`], the `reqwest` poster.
//! - [`dispatch`] -- Generate-render-post for a whole registry.
//! - [`summary`] -- [`DeliverySummary`] of per-region outcomes.

pub mod chunk;
pub mod client;
pub mod dispatch;
pub mod emoji;
pub mod error;
pub mod render;
pub mod summary;

pub use chunk::{DISCORD_MAX_LENGTH, split_message};
pub use client::WebhookClient;
pub use dispatch::{post_daily, post_weekly};
pub use emoji::condition_emoji;
pub use error::{DeliveryError, redact};
pub use render::{render_daily, render_weekly};
pub use summary::DeliverySummary;
