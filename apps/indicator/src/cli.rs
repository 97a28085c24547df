//! Command-line interface.

use clap::Parser;

/// Tray-style charge indicator for wireless headsets, driven by the
/// HeadsetControl executable.
#[derive(Debug, Parser)]
#[command(name = "headsup", version, about)]
pub struct Cli {
    /// Path or name of the headsetcontrol binary.
    #[arg(long, default_value = "headsetcontrol")]
    pub headsetcontrol_binary: String,

    /// Battery percentage threshold for the low (red) state.
    #[arg(long, default_value_t = headsup_monitor::DEFAULT_LOW_THRESHOLD)]
    pub low_battery: u8,

    /// Battery percentage threshold for the medium (orange) state.
    #[arg(long, default_value_t = headsup_monitor::DEFAULT_MEDIUM_THRESHOLD)]
    pub medium_battery: u8,

    /// Disable desktop notifications.
    #[arg(long)]
    pub no_notifications: bool,

    /// Polling interval in seconds.
    #[arg(long, default_value_t = headsup_control::DEFAULT_INTERVAL_SECS)]
    pub poll_interval: u64,

    /// Specific theme icon name for the tray icon (e.g.
    /// "audio-headset-symbolic" for monochrome).
    #[arg(long)]
    pub icon_name: Option<String>,

    /// Increase output verbosity.
    #[arg(long)]
    pub verbose: bool,
}
