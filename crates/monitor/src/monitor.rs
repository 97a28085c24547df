//! Battery classification and notification policy.

use headsup_protocol::BatteryReading;

/// Default percentage below which the battery counts as low.
pub const DEFAULT_LOW_THRESHOLD: u8 = 20;
/// Default percentage below which the battery counts as medium.
pub const DEFAULT_MEDIUM_THRESHOLD: u8 = 50;

/// Fine-grained per-percent tracking kicks in below this level.
const VERY_LOW_LEVEL: u8 = 11;

/// Classified battery state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatteryState {
    High,
    Medium,
    Low,
    Charging,
    Unavailable,
}

/// Invalid threshold configuration.
#[derive(Debug, thiserror::Error)]
pub enum ThresholdError {
    #[error("low threshold {low} must be below medium threshold {medium}")]
    Ordering { low: u8, medium: u8 },

    #[error("threshold {0} exceeds 100")]
    OutOfRange(u8),
}

/// Battery classification thresholds, in percent.
///
/// Invariant: `low < medium`, both at most 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    low: u8,
    medium: u8,
}

impl Thresholds {
    pub fn new(low: u8, medium: u8) -> Result<Self, ThresholdError> {
        for t in [low, medium] {
            if t > 100 {
                return Err(ThresholdError::OutOfRange(t));
            }
        }
        if low >= medium {
            return Err(ThresholdError::Ordering { low, medium });
        }
        Ok(Self { low, medium })
    }

    pub fn low(&self) -> u8 {
        self.low
    }

    pub fn medium(&self) -> u8 {
        self.medium
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            low: DEFAULT_LOW_THRESHOLD,
            medium: DEFAULT_MEDIUM_THRESHOLD,
        }
    }
}

/// Notification urgency tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

/// One notification request produced by a poll tick.
///
/// Delivery is the host's concern; the monitor only decides that a
/// notification is due and what it says.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub title: String,
    pub message: String,
}

impl Notification {
    fn new(severity: Severity, title: &str, message: String) -> Self {
        Self {
            severity,
            title: title.to_string(),
            message,
        }
    }
}

/// Classifies a reading against the thresholds.
///
/// Pure and total: charging maps to charging, unavailable and error both
/// map to unavailable, and a percentage buckets into low, medium, or high.
pub fn classify(reading: BatteryReading, thresholds: Thresholds) -> BatteryState {
    match reading {
        BatteryReading::Charging => BatteryState::Charging,
        BatteryReading::Unavailable | BatteryReading::Error => BatteryState::Unavailable,
        BatteryReading::Percent(p) => {
            if p < thresholds.low {
                BatteryState::Low
            } else if p < thresholds.medium {
                BatteryState::Medium
            } else {
                BatteryState::High
            }
        }
    }
}

/// Tracks battery state across polls and emits notification requests on
/// transitions.
///
/// The monitor is passive: the poller (or a manual refresh) calls
/// [`BatteryMonitor::on_reading`] once per cycle, and those calls must be
/// serialized by the caller; the read-modify-write of the tracked level
/// and state is not atomic across the individual checks.
#[derive(Debug)]
pub struct BatteryMonitor {
    thresholds: Thresholds,
    last_level: Option<u8>,
    last_state: Option<BatteryState>,
}

impl BatteryMonitor {
    pub fn new(thresholds: Thresholds) -> Self {
        Self {
            thresholds,
            last_level: None,
            last_state: None,
        }
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    /// State of the most recent reading, once one has been seen.
    pub fn state(&self) -> Option<BatteryState> {
        self.last_state
    }

    /// Most recent numeric charge level. Charging and unavailable readings
    /// leave this untouched, so it always holds a literal percentage.
    pub fn last_level(&self) -> Option<u8> {
        self.last_level
    }

    /// Feeds one poll result and returns the notifications it triggers,
    /// in the order the checks run.
    ///
    /// The first reading of any kind only establishes a baseline and never
    /// notifies. Percent-based checks additionally need a previous numeric
    /// level, so the first percentage after startup (or after starting out
    /// charging or disconnected) is also baseline-only.
    pub fn on_reading(&mut self, reading: BatteryReading) -> Vec<Notification> {
        let state = classify(reading, self.thresholds);
        let mut out = Vec::new();

        match reading {
            BatteryReading::Charging => {
                if self.last_state.is_some_and(|s| s != BatteryState::Charging) {
                    out.push(Notification::new(
                        Severity::Info,
                        "Headset Charging",
                        "Headset is now charging".to_string(),
                    ));
                }
            }
            BatteryReading::Unavailable | BatteryReading::Error => {
                if self
                    .last_state
                    .is_some_and(|s| s != BatteryState::Unavailable)
                {
                    out.push(Notification::new(
                        Severity::Info,
                        "Headset Disconnected",
                        "Headset battery unavailable".to_string(),
                    ));
                }
            }
            BatteryReading::Percent(percent) => {
                if let (Some(last_level), Some(last_state)) = (self.last_level, self.last_state) {
                    self.check_threshold_crossing(percent, state, last_state, &mut out);
                    check_low_battery_steps(percent, state, last_level, &mut out);
                }
                self.last_level = Some(percent);
            }
        }

        self.last_state = Some(state);

        if !out.is_empty() {
            tracing::debug!(?reading, ?state, count = out.len(), "battery notifications due");
        }
        out
    }

    /// Threshold transition checks between consecutive classified states.
    ///
    /// Rule scope is low/medium/high only: entering high from charging or
    /// unavailable fires nothing.
    fn check_threshold_crossing(
        &self,
        percent: u8,
        state: BatteryState,
        last_state: BatteryState,
        out: &mut Vec<Notification>,
    ) {
        if state == last_state {
            return;
        }
        match state {
            BatteryState::Low
                if matches!(last_state, BatteryState::Medium | BatteryState::High) =>
            {
                out.push(Notification::new(
                    Severity::Warning,
                    "Headset Battery Low",
                    format!(
                        "Battery level dropped to {percent}% (below {}%)",
                        self.thresholds.low
                    ),
                ));
            }
            BatteryState::Medium if last_state == BatteryState::High => {
                out.push(Notification::new(
                    Severity::Info,
                    "Headset Battery Medium",
                    format!(
                        "Battery level dropped to {percent}% (below {}%)",
                        self.thresholds.medium
                    ),
                ));
            }
            BatteryState::High
                if matches!(last_state, BatteryState::Low | BatteryState::Medium) =>
            {
                out.push(Notification::new(
                    Severity::Info,
                    "Headset Battery Recovered",
                    format!("Battery level increased to {percent}%"),
                ));
            }
            _ => {}
        }
    }
}

/// Low-battery step checks: the multiple-of-5 reminder while low, and the
/// per-percent tracking under 11%. Both may fire for the same reading
/// (e.g. 15% to 10%); the host delivers every entry.
fn check_low_battery_steps(
    percent: u8,
    state: BatteryState,
    last_level: u8,
    out: &mut Vec<Notification>,
) {
    if state == BatteryState::Low && percent != last_level && percent % 5 == 0 {
        out.push(Notification::new(
            Severity::Critical,
            "Headset Battery Critical",
            format!("Battery level: {percent}%"),
        ));
    }

    if percent < VERY_LOW_LEVEL && percent < last_level {
        if last_level >= VERY_LOW_LEVEL {
            out.push(Notification::new(
                Severity::Critical,
                "Headset Battery Very Low",
                format!("Battery critically low: {percent}%"),
            ));
        } else {
            out.push(Notification::new(
                Severity::Critical,
                "Headset Battery Critical",
                format!("Battery: {percent}% (was {last_level}%)"),
            ));
        }
    }
}
