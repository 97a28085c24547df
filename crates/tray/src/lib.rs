//! Tray models for the HeadsUp indicator.
//!
//! GUI-free by design: the menu, tooltip, and icon lookups are plain data
//! derived from the latest snapshot, for whatever shell hosts the
//! indicator (StatusNotifierItem, Qt tray, ...) to render. Icon theme
//! resolution and pixel work stay on the shell side.

mod icon;
mod menu;
mod tooltip;

pub use icon::{base_icon_candidates, battery_icon_candidates, fallback_icon_candidates};
pub use menu::{
    INACTIVE_TIME_PRESETS, MenuAction, MenuItem, MenuState, SIDETONE_PRESETS, charge_text,
    chatmix_text,
};
pub use tooltip::Tooltip;
