//! Progress snapshot published to the display on every tick

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::CountdownState;

/// Immutable view of countdown progress at one point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSnapshot {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    pub remaining_seconds: u64,
    /// 0.0 ..= 100.0, share of the cycle still to run
    pub progress_percent: f64,
    pub running: bool,
    pub next_notification_at: DateTime<Utc>,
}

impl ProgressSnapshot {
    /// Build a snapshot of `state` as seen at `now`
    pub fn capture(state: &CountdownState, now: DateTime<Utc>) -> Self {
        let remaining = state.remaining_seconds;
        Self {
            hours: remaining / 3600,
            minutes: (remaining % 3600) / 60,
            seconds: remaining % 60,
            remaining_seconds: remaining,
            progress_percent: progress_percent(remaining, state.total_seconds),
            running: state.running,
            next_notification_at: now + Duration::seconds(remaining as i64),
        }
    }

    /// `HH:MM:SS` rendering of the remaining time
    pub fn clock(&self) -> String {
        format!("{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

/// Remaining share of the cycle in percent; 0 when no cycle was configured
pub fn progress_percent(remaining_seconds: u64, total_seconds: u64) -> f64 {
    if total_seconds == 0 {
        return 0.0;
    }
    remaining_seconds as f64 / total_seconds as f64 * 100.0
}
