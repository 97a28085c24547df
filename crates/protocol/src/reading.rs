use std::collections::HashSet;

use crate::output::{ControlOutput, STATUS_CHARGING, STATUS_UNAVAILABLE};

/// Outcome of one battery poll.
///
/// Produced at the control boundary; by the time a reading reaches the
/// monitor, subprocess and parse failures have already been folded into
/// [`BatteryReading::Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatteryReading {
    /// Literal charge percentage, 0 to 100.
    Percent(u8),
    /// The headset is charging; no percentage is reported.
    Charging,
    /// The tool reports no battery data (headset off or out of range).
    Unavailable,
    /// The poll itself failed (spawn, exit status, or parse).
    Error,
}

impl BatteryReading {
    /// Derives the reading from a parsed output document.
    ///
    /// Only the charging and unavailable status strings are special; any
    /// other status falls through to the numeric level.
    pub fn from_output(output: &ControlOutput) -> Self {
        let Some(device) = output.first_device() else {
            return Self::Unavailable;
        };
        let Some(battery) = &device.battery else {
            return Self::Unavailable;
        };
        match battery.status.as_str() {
            STATUS_CHARGING => Self::Charging,
            STATUS_UNAVAILABLE => Self::Unavailable,
            _ => Self::Percent(battery.level.clamp(0, 100) as u8),
        }
    }

    /// The numeric charge level, if this reading carries one.
    pub fn percent(self) -> Option<u8> {
        match self {
            Self::Percent(p) => Some(p),
            _ => None,
        }
    }
}

/// A feature the connected headset supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Battery,
    ChatMix,
    Sidetone,
    Led,
    InactiveTime,
}

impl Capability {
    pub const ALL: [Capability; 5] = [
        Capability::Battery,
        Capability::ChatMix,
        Capability::Sidetone,
        Capability::Led,
        Capability::InactiveTime,
    ];

    /// Parses a `CAP_*` capability string. Unknown strings are ignored by
    /// the caller.
    pub fn from_cap_string(s: &str) -> Option<Self> {
        match s {
            "CAP_BATTERY_STATUS" => Some(Self::Battery),
            "CAP_CHATMIX" => Some(Self::ChatMix),
            "CAP_SIDETONE" => Some(Self::Sidetone),
            "CAP_LED" => Some(Self::Led),
            "CAP_INACTIVE_TIME" => Some(Self::InactiveTime),
            _ => None,
        }
    }
}

/// Set of capabilities reported by (or assumed for) a headset.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Capabilities {
    set: HashSet<Capability>,
}

impl Capabilities {
    /// Empty set.
    pub fn none() -> Self {
        Self::default()
    }

    /// Full set. Assumed when the capability probe fails, so that no menu
    /// section gets hidden on a transient error.
    pub fn all() -> Self {
        Self {
            set: Capability::ALL.into_iter().collect(),
        }
    }

    /// Capabilities of the first device in a parsed document. Unknown
    /// capability strings are skipped.
    pub fn from_output(output: &ControlOutput) -> Self {
        let mut caps = Self::none();
        if let Some(device) = output.first_device() {
            for s in &device.capabilities {
                if let Some(cap) = Capability::from_cap_string(s) {
                    caps.set.insert(cap);
                }
            }
        }
        caps
    }

    pub fn insert(&mut self, cap: Capability) {
        self.set.insert(cap);
    }

    pub fn supports(&self, cap: Capability) -> bool {
        self.set.contains(&cap)
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }
}

/// ChatMix dial state, as surfaced in the tray menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatMix {
    /// Dial position reported by the device.
    Level(i32),
    /// The device reported a chatmix-specific error string.
    Fault(String),
    /// Device present but no chatmix data in the output.
    NotAvailable,
    /// No device in the output.
    NoDevice,
    /// The poll itself failed.
    Error,
}

impl ChatMix {
    /// Derives the dial state from a parsed output document. The
    /// per-feature error string wins over any chatmix block.
    pub fn from_output(output: &ControlOutput) -> Self {
        let Some(device) = output.first_device() else {
            return Self::NoDevice;
        };
        if let Some(msg) = device.errors.get("chatmix") {
            return Self::Fault(msg.clone());
        }
        match &device.chatmix {
            Some(info) => Self::Level(info.level),
            None => Self::NotAvailable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> ControlOutput {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn reading_available_level() {
        let output = parse(
            r#"{"devices": [{"battery": {"status": "BATTERY_AVAILABLE", "level": 42}}]}"#,
        );
        assert_eq!(BatteryReading::from_output(&output), BatteryReading::Percent(42));
    }

    #[test]
    fn reading_charging() {
        let output =
            parse(r#"{"devices": [{"battery": {"status": "BATTERY_CHARGING", "level": 0}}]}"#);
        assert_eq!(BatteryReading::from_output(&output), BatteryReading::Charging);
        assert_eq!(BatteryReading::Charging.percent(), None);
    }

    #[test]
    fn reading_unavailable() {
        let output = parse(
            r#"{"devices": [{"battery": {"status": "BATTERY_UNAVAILABLE", "level": -1}}]}"#,
        );
        assert_eq!(
            BatteryReading::from_output(&output),
            BatteryReading::Unavailable
        );
    }

    #[test]
    fn reading_no_device_is_unavailable() {
        let output = parse(r#"{"devices": []}"#);
        assert_eq!(
            BatteryReading::from_output(&output),
            BatteryReading::Unavailable
        );
    }

    #[test]
    fn reading_missing_battery_block_is_unavailable() {
        let output = parse(r#"{"devices": [{"device": "X"}]}"#);
        assert_eq!(
            BatteryReading::from_output(&output),
            BatteryReading::Unavailable
        );
    }

    #[test]
    fn reading_unknown_status_uses_level() {
        let output =
            parse(r#"{"devices": [{"battery": {"status": "BATTERY_FULL", "level": 100}}]}"#);
        assert_eq!(
            BatteryReading::from_output(&output),
            BatteryReading::Percent(100)
        );
    }

    #[test]
    fn reading_level_clamped() {
        let output =
            parse(r#"{"devices": [{"battery": {"status": "BATTERY_AVAILABLE", "level": 150}}]}"#);
        assert_eq!(
            BatteryReading::from_output(&output),
            BatteryReading::Percent(100)
        );
    }

    #[test]
    fn capabilities_from_output() {
        let output = parse(
            r#"{"devices": [{"capabilities": ["CAP_BATTERY_STATUS", "CAP_SIDETONE", "CAP_BOGUS"]}]}"#,
        );
        let caps = Capabilities::from_output(&output);
        assert!(caps.supports(Capability::Battery));
        assert!(caps.supports(Capability::Sidetone));
        assert!(!caps.supports(Capability::ChatMix));
    }

    #[test]
    fn capabilities_all_supports_everything() {
        let caps = Capabilities::all();
        for cap in Capability::ALL {
            assert!(caps.supports(cap));
        }
    }

    #[test]
    fn capabilities_empty_device_list() {
        let caps = Capabilities::from_output(&parse(r#"{"devices": []}"#));
        assert!(caps.is_empty());
    }

    #[test]
    fn chatmix_level() {
        let output = parse(r#"{"devices": [{"chatmix": {"level": 64}}]}"#);
        assert_eq!(ChatMix::from_output(&output), ChatMix::Level(64));
    }

    #[test]
    fn chatmix_error_string_wins() {
        let output = parse(
            r#"{"devices": [{"chatmix": {"level": 64}, "errors": {"chatmix": "device busy"}}]}"#,
        );
        assert_eq!(
            ChatMix::from_output(&output),
            ChatMix::Fault("device busy".into())
        );
    }

    #[test]
    fn chatmix_missing_block() {
        let output = parse(r#"{"devices": [{"device": "X"}]}"#);
        assert_eq!(ChatMix::from_output(&output), ChatMix::NotAvailable);
    }

    #[test]
    fn chatmix_no_device() {
        let output = parse(r#"{"devices": []}"#);
        assert_eq!(ChatMix::from_output(&output), ChatMix::NoDevice);
    }
}
