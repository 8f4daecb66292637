//! Per-region delivery outcomes.

use std::fmt;

use tracing::{error, info, warn};

/// Which regions were delivered and which failed, in attempt order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliverySummary {
    succeeded: Vec<String>,
    failed: Vec<(String, String)>,
}

impl DeliverySummary {
    /// Record a successful delivery.
    pub fn record_success(&mut self, region_id: impl Into<String>) {
        self.succeeded.push(region_id.into());
    }

    /// Record a failed delivery and why.
    pub fn record_failure(&mut self, region_id: impl Into<String>, reason: impl fmt::Display) {
        self.failed.push((region_id.into(), reason.to_string()));
    }

    /// Region ids delivered successfully.
    pub fn succeeded(&self) -> &[String] {
        &self.succeeded
    }

    /// `(region id, reason)` for every failure.
    pub fn failed(&self) -> &[(String, String)] {
        &self.failed
    }

    /// Number of deliveries attempted.
    pub fn attempted(&self) -> usize {
        self.succeeded.len().saturating_add(self.failed.len())
    }

    /// True when nothing failed (including when nothing was attempted).
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }

    /// Emit the summary through `tracing`.
    pub fn log(&self) {
        if self.all_succeeded() {
            info!(succeeded = self.succeeded.len(), "all regional weather updates sent");
            return;
        }
        warn!(
            succeeded = self.succeeded.len(),
            failed = self.failed.len(),
            "some regional weather updates failed"
        );
        for (region, reason) in &self.failed {
            error!(region = %region, reason = %reason, "regional weather update failed");
        }
    }
}

impl fmt::Display for DeliverySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} successful, {} failed",
            self.succeeded.len(),
            self.failed.len()
        )
    }
}
