//! HeadsUp entry point: wiring between the CLI, the poller, the battery
//! monitor, and the tray models.

mod actions;
mod cli;
mod notify;
mod refresh;
mod state;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use headsup_control::{Control, Poller, locate_binary};
use headsup_monitor::{BatteryMonitor, Thresholds};
use headsup_settings::Settings;
use headsup_tray::base_icon_candidates;

use crate::cli::Cli;
use crate::notify::LogNotifier;
use crate::state::IndicatorState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let thresholds = Thresholds::new(cli.low_battery, cli.medium_battery)
        .context("invalid battery thresholds")?;

    if cli.poll_interval == 0 {
        anyhow::bail!("polling interval must be at least 1 second");
    }
    if cli.poll_interval > 3600 {
        tracing::warn!("polling interval is longer than 1 hour");
    }

    let Some(binary) = locate_binary(&cli.headsetcontrol_binary) else {
        tracing::error!(
            "unable to locate headsetcontrol binary at: {}",
            cli.headsetcontrol_binary
        );
        std::process::exit(2);
    };
    tracing::info!(binary = %binary.display(), "using headsetcontrol");

    let control = Control::new(binary);

    let settings = Settings::load();
    actions::restore_headset_settings(&control, &settings).await;

    let state = Arc::new(IndicatorState::new(
        BatteryMonitor::new(thresholds),
        settings,
        Box::new(LogNotifier),
        !cli.no_notifications,
    ));

    // Icon selection order for the hosting shell; a user-supplied name is
    // tried before the built-in chain.
    match &cli.icon_name {
        Some(name) => tracing::info!(icon = %name, "using requested tray icon"),
        None => tracing::debug!(candidates = ?base_icon_candidates(), "tray icon candidates"),
    }

    let callback_state = Arc::clone(&state);
    let poller = Arc::new(Poller::new(
        control.clone(),
        Box::new(move |snapshot| refresh::apply_snapshot(&callback_state, snapshot)),
    ));

    poller.start(cli.poll_interval).await;
    // Refresh values right away instead of waiting out the first interval.
    poller.refresh_now().await;

    #[cfg(unix)]
    spawn_manual_refresh_task(Arc::clone(&state), control, Arc::clone(&poller));

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("interrupt received, shutting down");
        }
        _ = state.shutdown.cancelled() => {}
    }

    poller.stop().await;
    Ok(())
}

/// SIGUSR1 stands in for the menu's Refresh click while the indicator
/// runs headless; it goes through the same action path a shell would use.
#[cfg(unix)]
fn spawn_manual_refresh_task(state: Arc<IndicatorState>, control: Control, poller: Arc<Poller>) {
    use headsup_tray::MenuAction;
    use tokio::signal::unix::{SignalKind, signal};

    tokio::spawn(async move {
        let mut usr1 = match signal(SignalKind::user_defined1()) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!("failed to install SIGUSR1 handler: {e}");
                return;
            }
        };

        loop {
            tokio::select! {
                _ = state.shutdown.cancelled() => break,
                received = usr1.recv() => {
                    if received.is_none() {
                        break;
                    }
                    tracing::info!("manual refresh requested");
                    actions::handle_action(&state, &control, &poller, MenuAction::Refresh).await;
                }
            }
        }
    });
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default_filter = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
