//! Time-axis tick label formatting.
//!
//! The renderer owns the tick placement; this module only turns an epoch
//! timestamp into a label whose granularity matches the visible span, so a
//! 10-minute window shows seconds while a 1-day window shows dates.

use chrono::{Local, TimeZone};

/// Granularity of a tick label, chosen from the visible span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeResolution {
    Seconds,
    Minutes,
    Days,
}

/// Pick a label granularity for a visible span of `span` seconds.
pub fn resolution_for_span(span: f64) -> TimeResolution {
    if span >= 2.0 * 86_400.0 {
        TimeResolution::Days
    } else if span >= 3_600.0 {
        TimeResolution::Minutes
    } else {
        TimeResolution::Seconds
    }
}

/// Format an epoch-seconds timestamp as a local-time tick label for the
/// given visible span. Non-finite timestamps yield an empty label.
pub fn format_tick(timestamp: f64, span: f64) -> String {
    if !timestamp.is_finite() {
        return String::new();
    }
    let secs = timestamp.floor() as i64;
    let dt = match Local.timestamp_opt(secs, 0).earliest() {
        Some(dt) => dt,
        None => return String::new(),
    };
    let fmt = match resolution_for_span(span) {
        TimeResolution::Seconds => "%H:%M:%S",
        TimeResolution::Minutes => "%H:%M",
        TimeResolution::Days => "%m-%d %H:%M",
    };
    dt.format(fmt).to_string()
}
