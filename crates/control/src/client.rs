//! HeadsetControl invocations.
//!
//! Every call runs the binary once with `-c` (silent) and `-o JSON` and
//! works from the document it prints. Query failures never escape to the
//! monitor as errors; they fold into the error/unavailable readings at
//! this boundary.

use std::path::{Path, PathBuf};

use headsup_protocol::{BatteryReading, Capabilities, ChatMix, ControlOutput};
use tokio::process::Command;

/// Flags understood by HeadsetControl.
const OPT_CAPABILITIES: &str = "-?";
const OPT_BATTERY: &str = "-b";
const OPT_CHATMIX: &str = "-m";
const OPT_SIDETONE: &str = "-s";
const OPT_LED: &str = "-l";
const OPT_INACTIVE_TIME: &str = "-i";
const OPT_SILENT: &str = "-c";
const OPT_OUTPUT: &str = "-o";
const OUTPUT_FORMAT: &str = "JSON";

/// Sidetone range accepted by the tool.
pub const SIDETONE_MAX: u8 = 128;
/// Inactive-time range accepted by the tool, in minutes.
pub const INACTIVE_TIME_MAX_MIN: u8 = 90;

/// Errors from driving the HeadsetControl binary.
#[derive(Debug, thiserror::Error)]
pub enum ControlError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("headsetcontrol exited with {status}: {stderr}")]
    Failed {
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("sidetone level {0} out of range (0-{SIDETONE_MAX})")]
    SidetoneRange(u8),

    #[error("inactive time {0} out of range (0-{INACTIVE_TIME_MAX_MIN} minutes)")]
    InactiveTimeRange(u8),
}

/// Client for one HeadsetControl binary.
#[derive(Debug, Clone)]
pub struct Control {
    binary: PathBuf,
}

impl Control {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Polls the battery. Failures map to [`BatteryReading::Error`], so
    /// the caller never needs a fallback path.
    pub async fn battery(&self) -> BatteryReading {
        match self.query(&[OPT_BATTERY]).await {
            Ok(output) => BatteryReading::from_output(&output),
            Err(e) => {
                tracing::warn!("battery query failed: {e}");
                BatteryReading::Error
            }
        }
    }

    /// Polls the ChatMix dial.
    pub async fn chatmix(&self) -> ChatMix {
        match self.query(&[OPT_CHATMIX]).await {
            Ok(output) => ChatMix::from_output(&output),
            Err(e) => {
                tracing::warn!("chatmix query failed: {e}");
                ChatMix::Error
            }
        }
    }

    /// Probes device capabilities. A failed probe reports the full set so
    /// a transient error hides nothing from the menu.
    pub async fn capabilities(&self) -> Capabilities {
        match self.query(&[OPT_CAPABILITIES]).await {
            Ok(output) => Capabilities::from_output(&output),
            Err(e) => {
                tracing::warn!("capabilities probe failed: {e}");
                Capabilities::all()
            }
        }
    }

    /// Sets the sidetone level (0 disables, max 128).
    pub async fn set_sidetone(&self, level: u8) -> Result<(), ControlError> {
        if level > SIDETONE_MAX {
            return Err(ControlError::SidetoneRange(level));
        }
        let level = level.to_string();
        self.run(&[OPT_SIDETONE, &level]).await
    }

    /// Turns the headset LEDs on or off.
    pub async fn set_led(&self, on: bool) -> Result<(), ControlError> {
        self.run(&[OPT_LED, if on { "1" } else { "0" }]).await
    }

    /// Sets the auto power-off time in minutes (0 disables, max 90).
    pub async fn set_inactive_time(&self, minutes: u8) -> Result<(), ControlError> {
        if minutes > INACTIVE_TIME_MAX_MIN {
            return Err(ControlError::InactiveTimeRange(minutes));
        }
        let minutes = minutes.to_string();
        self.run(&[OPT_INACTIVE_TIME, &minutes]).await
    }

    /// Runs the binary and parses its stdout as an output document.
    async fn query(&self, args: &[&str]) -> Result<ControlOutput, ControlError> {
        let output = self.invoke(args).await?;
        Ok(serde_json::from_slice(&output.stdout)?)
    }

    /// Runs the binary for its side effect, ignoring stdout.
    async fn run(&self, args: &[&str]) -> Result<(), ControlError> {
        self.invoke(args).await.map(drop)
    }

    async fn invoke(&self, args: &[&str]) -> Result<std::process::Output, ControlError> {
        let output = Command::new(&self.binary)
            .args(args)
            .arg(OPT_SILENT)
            .args([OPT_OUTPUT, OUTPUT_FORMAT])
            .output()
            .await?;

        if !output.status.success() {
            return Err(ControlError::Failed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(output)
    }
}

/// Resolves a binary name against `PATH`.
///
/// A name containing a path separator is checked as-is instead.
pub fn locate_binary(name: &str) -> Option<PathBuf> {
    let candidate = Path::new(name);
    if candidate.components().count() > 1 {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }

    let path_var = std::env::var_os("PATH")?;
    std::env::split_paths(&path_var)
        .map(|dir| dir.join(name))
        .find(|full| full.is_file())
}
