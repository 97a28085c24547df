//! Dynamic context menu for the tray icon.

use headsup_protocol::{BatteryReading, Capabilities, Capability, ChatMix};

/// Sidetone presets mapped onto HeadsetControl's 0-128 range.
pub const SIDETONE_PRESETS: [(&str, u8); 5] = [
    ("off", 0),
    ("low", 32),
    ("medium", 64),
    ("high", 96),
    ("max", 128),
];

/// Auto power-off presets in minutes (0 disables).
pub const INACTIVE_TIME_PRESETS: [(&str, u8); 6] = [
    ("off", 0),
    ("5 min", 5),
    ("15 min", 15),
    ("30 min", 30),
    ("60 min", 60),
    ("90 min", 90),
];

/// Actions that can be triggered from the tray context menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// User requested an immediate poll.
    Refresh,
    /// Sidetone level preset selected.
    SetSidetone(u8),
    /// LED state selected.
    SetLed(bool),
    /// Auto power-off preset selected.
    SetInactiveTime(u8),
    /// User requested to quit the application.
    Quit,
}

/// A single menu item.
#[derive(Debug, Clone)]
pub struct MenuItem {
    /// Display text; empty for separators.
    pub label: String,
    /// Whether the item is enabled (clickable).
    pub enabled: bool,
    /// Checkmark state for preset entries; `None` for plain items.
    pub checked: Option<bool>,
    /// Optional action triggered on click.
    pub action: Option<MenuAction>,
    /// Submenu entries; empty for leaf items.
    pub children: Vec<MenuItem>,
}

impl MenuItem {
    fn action(label: impl Into<String>, action: MenuAction) -> Self {
        Self {
            label: label.into(),
            enabled: true,
            checked: None,
            action: Some(action),
            children: Vec::new(),
        }
    }

    fn display(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            enabled: false,
            checked: None,
            action: None,
            children: Vec::new(),
        }
    }

    /// Separator (represented as disabled empty item).
    fn separator() -> Self {
        Self::display(String::new())
    }

    fn preset(label: &str, checked: bool, action: MenuAction) -> Self {
        Self {
            label: label.to_string(),
            enabled: true,
            checked: Some(checked),
            action: Some(action),
            children: Vec::new(),
        }
    }

    fn submenu(label: &str, children: Vec<MenuItem>) -> Self {
        Self {
            label: label.to_string(),
            enabled: true,
            checked: None,
            action: None,
            children,
        }
    }
}

/// Current state used to build the context menu.
///
/// Feature sections appear only when the capability set allows them;
/// preset checkmarks reflect the persisted settings.
#[derive(Debug, Clone)]
pub struct MenuState {
    pub capabilities: Capabilities,
    pub battery: Option<BatteryReading>,
    pub chatmix: Option<ChatMix>,
    pub sidetone_level: Option<u8>,
    pub led_on: Option<bool>,
    pub inactive_time_min: Option<u8>,
}

impl Default for MenuState {
    fn default() -> Self {
        Self {
            capabilities: Capabilities::all(),
            battery: None,
            chatmix: None,
            sidetone_level: None,
            led_on: None,
            inactive_time_min: None,
        }
    }
}

impl MenuState {
    /// Builds the menu items from the current state.
    pub fn build_menu(&self) -> Vec<MenuItem> {
        let mut items = vec![MenuItem::action("Refresh", MenuAction::Refresh)];

        if self.capabilities.supports(Capability::Battery) {
            items.push(MenuItem::display(format!(
                "Charge: {}",
                charge_text(self.battery)
            )));
        }

        if self.capabilities.supports(Capability::ChatMix) {
            items.push(MenuItem::display(chatmix_text(self.chatmix.as_ref())));
        }

        if self.capabilities.supports(Capability::Sidetone) {
            let children = SIDETONE_PRESETS
                .iter()
                .map(|&(name, level)| {
                    MenuItem::preset(
                        name,
                        self.sidetone_level == Some(level),
                        MenuAction::SetSidetone(level),
                    )
                })
                .collect();
            items.push(MenuItem::submenu("Sidetone", children));
        }

        if self.capabilities.supports(Capability::Led) {
            let children = vec![
                MenuItem::preset("off", self.led_on == Some(false), MenuAction::SetLed(false)),
                MenuItem::preset("on", self.led_on == Some(true), MenuAction::SetLed(true)),
            ];
            items.push(MenuItem::submenu("LED", children));
        }

        if self.capabilities.supports(Capability::InactiveTime) {
            let children = INACTIVE_TIME_PRESETS
                .iter()
                .map(|&(name, minutes)| {
                    MenuItem::preset(
                        name,
                        self.inactive_time_min == Some(minutes),
                        MenuAction::SetInactiveTime(minutes),
                    )
                })
                .collect();
            items.push(MenuItem::submenu("Inactive time", children));
        }

        items.push(MenuItem::separator());
        items.push(MenuItem::action("Quit", MenuAction::Quit));

        items
    }
}

/// Short charge text for the menu entry and tray label.
pub fn charge_text(battery: Option<BatteryReading>) -> String {
    match battery {
        Some(BatteryReading::Percent(p)) => format!("{p}%"),
        Some(BatteryReading::Charging) => "Chg".into(),
        Some(BatteryReading::Unavailable) => "Off".into(),
        Some(BatteryReading::Error) | None => "N/A".into(),
    }
}

/// ChatMix menu entry text.
pub fn chatmix_text(chatmix: Option<&ChatMix>) -> String {
    match chatmix {
        Some(ChatMix::Level(level)) => format!("ChatMix: {level}"),
        Some(ChatMix::Fault(msg)) => format!("ChatMix: {msg}"),
        Some(ChatMix::NotAvailable) => "ChatMix: Not available".into(),
        Some(ChatMix::NoDevice) => "ChatMix: No device".into(),
        Some(ChatMix::Error) | None => "ChatMix: N/A".into(),
    }
}
