//! Battery state tracking for the HeadsUp indicator.
//!
//! [`BatteryMonitor`] consumes one [`BatteryReading`] per poll tick,
//! classifies it against the configured thresholds, and decides which
//! desktop notifications that tick should produce. It owns no I/O and
//! spawns no tasks; the poller drives it, and the host delivers whatever
//! it returns.
//!
//! [`BatteryReading`]: headsup_protocol::BatteryReading

mod color;
mod monitor;

pub use color::{Rgb, color_for};
pub use monitor::{
    BatteryMonitor, BatteryState, DEFAULT_LOW_THRESHOLD, DEFAULT_MEDIUM_THRESHOLD, Notification,
    Severity, ThresholdError, Thresholds, classify,
};
