//! Shared indicator state.

use std::sync::Mutex;

use headsup_monitor::BatteryMonitor;
use headsup_settings::Settings;
use headsup_tray::MenuState;
use tokio_util::sync::CancellationToken;

use crate::notify::Notifier;

/// State shared between the poll callback, the signal handlers, and menu
/// action handling.
pub struct IndicatorState {
    /// Monitor behind a sync mutex: snapshots arrive in a sync callback,
    /// and timer ticks must not interleave with manual refreshes.
    pub monitor: Mutex<BatteryMonitor>,
    /// Latest tray menu inputs; rebuilt after every snapshot.
    pub menu: Mutex<MenuState>,
    /// Persisted preferences (sync callbacks never touch these, so an
    /// async mutex fits the setter paths).
    pub settings: tokio::sync::Mutex<Settings>,
    pub notifier: Box<dyn Notifier>,
    /// `--no-notifications` clears this.
    pub notifications_enabled: bool,
    /// Cancelled on Ctrl-C or the Quit menu action.
    pub shutdown: CancellationToken,
}

impl IndicatorState {
    pub fn new(
        monitor: BatteryMonitor,
        settings: Settings,
        notifier: Box<dyn Notifier>,
        notifications_enabled: bool,
    ) -> Self {
        let menu = MenuState {
            sidetone_level: settings.sidetone_level,
            led_on: settings.led_on,
            inactive_time_min: settings.inactive_time_min,
            ..MenuState::default()
        };
        Self {
            monitor: Mutex::new(monitor),
            menu: Mutex::new(menu),
            settings: tokio::sync::Mutex::new(settings),
            notifier,
            notifications_enabled,
            shutdown: CancellationToken::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::testing::RecordingNotifier;
    use headsup_monitor::Thresholds;

    #[test]
    fn menu_checkmarks_seeded_from_settings() {
        let mut settings = Settings::default();
        settings.sidetone_level = Some(32);
        settings.inactive_time_min = Some(15);

        let state = IndicatorState::new(
            BatteryMonitor::new(Thresholds::default()),
            settings,
            Box::new(RecordingNotifier::default()),
            true,
        );

        let menu = state.menu.lock().unwrap();
        assert_eq!(menu.sidetone_level, Some(32));
        assert_eq!(menu.led_on, None);
        assert_eq!(menu.inactive_time_min, Some(15));
    }
}
