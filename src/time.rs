use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};

/// Source of "now", swappable for deterministic rendering in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

pub fn system_clock() -> Arc<dyn Clock> {
    Arc::new(SystemClock)
}

#[cfg(test)]
pub struct FixedClock(DateTime<Utc>);

#[cfg(test)]
impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[cfg(test)]
pub fn fixed_clock(timestamp: i64) -> Arc<dyn Clock> {
    Arc::new(FixedClock(
        Utc.timestamp_opt(timestamp, 0)
            .single()
            .unwrap_or_else(Utc::now),
    ))
}

/// Short relative age of a unix timestamp: `just now`, `5m ago`, `3h ago`,
/// `2d ago`, then a calendar date for anything older than a month.
pub fn format_relative(timestamp: u64, now: DateTime<Utc>) -> String {
    if timestamp == 0 {
        return "unknown".to_string();
    }
    let now_ts = now.timestamp().max(0) as u64;
    let secs = now_ts.saturating_sub(timestamp);
    match secs {
        0..60 => "just now".to_string(),
        60..3600 => format!("{}m ago", secs / 60),
        3600..86400 => format!("{}h ago", secs / 3600),
        86400..2_592_000 => format!("{}d ago", secs / 86400),
        _ => Utc
            .timestamp_opt(timestamp as i64, 0)
            .single()
            .map(|dt| dt.format("%b %d, %Y").to_string())
            .unwrap_or_else(|| "unknown".to_string()),
    }
}
