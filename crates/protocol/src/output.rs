use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Battery status string for a readable charge level.
pub const STATUS_AVAILABLE: &str = "BATTERY_AVAILABLE";
/// Battery status string while the headset is charging.
pub const STATUS_CHARGING: &str = "BATTERY_CHARGING";
/// Battery status string when no charge data can be read.
pub const STATUS_UNAVAILABLE: &str = "BATTERY_UNAVAILABLE";

/// Top-level document printed by `headsetcontrol -o JSON`.
///
/// Fields the indicator does not consume (version, hidapi info, per-action
/// results) are ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlOutput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub devices: Vec<Device>,
}

impl ControlOutput {
    /// The device the indicator tracks. Multi-headset setups are not
    /// supported; like the original tool output handling, only the first
    /// entry is consulted.
    pub fn first_device(&self) -> Option<&Device> {
        self.devices.first()
    }
}

/// One connected headset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    #[serde(default)]
    pub device: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub vendor: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub product: String,
    /// `CAP_*` capability strings.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub capabilities: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery: Option<Battery>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chatmix: Option<ChatMixInfo>,
    /// Per-feature error strings, keyed by feature name (e.g. "chatmix").
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub errors: HashMap<String, String>,
}

/// Battery block of a device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Battery {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub level: i32,
}

/// ChatMix block of a device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMixInfo {
    #[serde(default)]
    pub level: i32,
}
