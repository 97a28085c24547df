//! Tray tooltip model.

use headsup_protocol::BatteryReading;

/// Title/subtitle pair for the tray tooltip.
///
/// Shells with rich tooltips (KDE StatusNotifierItem) show the two parts
/// separately; others join them through [`Tooltip::plain_text`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tooltip {
    pub title: String,
    pub subtitle: String,
}

impl Tooltip {
    /// Builds the tooltip for a reading (`None` means no poll has
    /// completed yet).
    pub fn for_battery(battery: Option<BatteryReading>) -> Self {
        let subtitle = match battery {
            Some(BatteryReading::Percent(p)) => format!("Battery: {p}%"),
            Some(BatteryReading::Charging) => "Charging".into(),
            Some(BatteryReading::Unavailable) => "Battery Unavailable".into(),
            Some(BatteryReading::Error) => "Connection Error".into(),
            None => "Initializing...".into(),
        };
        Self {
            title: "Headset".into(),
            subtitle,
        }
    }

    /// Single-string form for shells without rich tooltips.
    pub fn plain_text(&self) -> String {
        format!("{}\n{}", self.title, self.subtitle)
    }
}
