//! Icon theme lookup tables.
//!
//! The indicator never touches pixels; it hands the shell an ordered list
//! of theme icon names to try, first match wins. The lists mirror common
//! freedesktop icon theme naming, symbolic variants first for the base
//! icon.

use headsup_protocol::BatteryReading;

/// Candidates for the tray's base headset icon.
pub fn base_icon_candidates() -> &'static [&'static str] {
    &[
        "audio-headset-symbolic",
        "audio-headphones-symbolic",
        "audio-headset",
        "audio-headphones",
        "audio-card",
        "multimedia-player",
    ]
}

/// Ordered battery icon candidates for a reading.
pub fn battery_icon_candidates(reading: BatteryReading) -> &'static [&'static str] {
    match reading {
        BatteryReading::Charging => &[
            "battery-charging",
            "battery-charging-symbolic",
            "battery-full-charging",
        ],
        BatteryReading::Unavailable | BatteryReading::Error => {
            &["battery-missing", "battery-missing-symbolic", "battery-empty"]
        }
        BatteryReading::Percent(p) => match p {
            90..=u8::MAX => &["battery-full", "battery-100", "battery-full-symbolic"],
            75..=89 => &["battery-good", "battery-080", "battery-good-symbolic"],
            50..=74 => &["battery-medium", "battery-060", "battery-medium-symbolic"],
            25..=49 => &["battery-low", "battery-040", "battery-low-symbolic"],
            10..=24 => &["battery-caution", "battery-020", "battery-caution-symbolic"],
            _ => &["battery-empty", "battery-000", "battery-empty-symbolic"],
        },
    }
}

/// Generic fallbacks when none of the battery candidates resolve.
pub fn fallback_icon_candidates() -> &'static [&'static str] {
    &["battery", "battery-symbolic", "power-profile-balanced"]
}
