//! Tray menu action handling.

use headsup_control::{Control, Poller};
use headsup_tray::MenuAction;

use crate::state::IndicatorState;

/// Applies one menu action.
///
/// Setters go to the headset first and persist on success, so a failed
/// write never leaves a stale checkmark behind.
pub async fn handle_action(
    state: &IndicatorState,
    control: &Control,
    poller: &Poller,
    action: MenuAction,
) {
    match action {
        MenuAction::Refresh => poller.refresh_now().await,
        MenuAction::Quit => state.shutdown.cancel(),
        MenuAction::SetSidetone(level) => {
            if let Err(e) = control.set_sidetone(level).await {
                tracing::error!("failed to set sidetone: {e}");
                return;
            }
            let mut settings = state.settings.lock().await;
            settings.sidetone_level = Some(level);
            persist(&settings);
            drop(settings);

            let mut menu = state.menu.lock().expect("menu mutex poisoned");
            menu.sidetone_level = Some(level);
            tracing::info!(level, "sidetone updated");
        }
        MenuAction::SetLed(on) => {
            if let Err(e) = control.set_led(on).await {
                tracing::error!("failed to set LED: {e}");
                return;
            }
            let mut settings = state.settings.lock().await;
            settings.led_on = Some(on);
            persist(&settings);
            drop(settings);

            let mut menu = state.menu.lock().expect("menu mutex poisoned");
            menu.led_on = Some(on);
            tracing::info!(on, "LED updated");
        }
        MenuAction::SetInactiveTime(minutes) => {
            if let Err(e) = control.set_inactive_time(minutes).await {
                tracing::error!("failed to set inactive time: {e}");
                return;
            }
            let mut settings = state.settings.lock().await;
            settings.inactive_time_min = Some(minutes);
            persist(&settings);
            drop(settings);

            let mut menu = state.menu.lock().expect("menu mutex poisoned");
            menu.inactive_time_min = Some(minutes);
            tracing::info!(minutes, "inactive time updated");
        }
    }
}

fn persist(settings: &headsup_settings::Settings) {
    if let Err(e) = settings.save() {
        tracing::warn!("failed to save settings: {e}");
    }
}

/// Pushes previously saved preferences back to the headset. Failures are
/// reported and skipped; a missing headset must not block startup.
pub async fn restore_headset_settings(control: &Control, settings: &headsup_settings::Settings) {
    if let Some(level) = settings.sidetone_level {
        if let Err(e) = control.set_sidetone(level).await {
            tracing::warn!("failed to restore sidetone level: {e}");
        }
    }
    if let Some(on) = settings.led_on {
        if let Err(e) = control.set_led(on).await {
            tracing::warn!("failed to restore LED state: {e}");
        }
    }
    if let Some(minutes) = settings.inactive_time_min {
        if let Err(e) = control.set_inactive_time(minutes).await {
            tracing::warn!("failed to restore inactive time: {e}");
        }
    }
}
