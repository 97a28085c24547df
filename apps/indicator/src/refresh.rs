//! Snapshot handling: monitor update, notification dispatch, tray model
//! refresh.

use headsup_control::Snapshot;
use headsup_monitor::color_for;
use headsup_protocol::BatteryReading;
use headsup_tray::{Tooltip, battery_icon_candidates};

use crate::state::IndicatorState;

/// Applies one snapshot. Runs inside the poller's serialized delivery, so
/// two cycles never interleave here.
pub fn apply_snapshot(state: &IndicatorState, snapshot: Snapshot) {
    let notifications = match snapshot.battery {
        Some(reading) => {
            let mut monitor = state.monitor.lock().expect("monitor mutex poisoned");
            let notifications = monitor.on_reading(reading);

            if let BatteryReading::Percent(p) = reading {
                let color = color_for(p);
                tracing::debug!(
                    percent = p,
                    r = color.r,
                    g = color.g,
                    b = color.b,
                    icon = battery_icon_candidates(reading)[0],
                    "battery badge updated"
                );
            }
            notifications
        }
        None => Vec::new(),
    };

    {
        let mut menu = state.menu.lock().expect("menu mutex poisoned");
        menu.capabilities = snapshot.capabilities;
        menu.battery = snapshot.battery;
        menu.chatmix = snapshot.chatmix;

        let tooltip = Tooltip::for_battery(menu.battery);
        tracing::debug!(
            tooltip = %tooltip.subtitle,
            items = menu.build_menu().len(),
            "tray refreshed"
        );
    }

    if state.notifications_enabled {
        for notification in &notifications {
            state.notifier.notify(notification);
        }
    }
}
