//! Periodic poll loop.
//!
//! One refresh cycle probes capabilities first, then queries battery and
//! ChatMix only for what the device supports, and hands the assembled
//! [`Snapshot`] to the host through a callback. Timer ticks and manual
//! refreshes both deliver under the same internal lock, so the host's
//! callback never observes two cycles interleaving.

use std::sync::Arc;
use std::time::Duration;

use headsup_protocol::{BatteryReading, Capabilities, Capability, ChatMix};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use crate::client::Control;

/// Default polling interval in seconds.
pub const DEFAULT_INTERVAL_SECS: u64 = 60;

/// Callback invoked with each snapshot.
pub type SendFn = Box<dyn Fn(Snapshot) + Send + Sync + 'static>;

/// Results of one refresh cycle.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub timestamp_ms: i64,
    pub capabilities: Capabilities,
    /// Present when the device reports battery support.
    pub battery: Option<BatteryReading>,
    /// Present when the device reports ChatMix support.
    pub chatmix: Option<ChatMix>,
}

/// Periodic driver for a [`Control`] client.
pub struct Poller {
    inner: Arc<Mutex<PollerInner>>,
    control: Control,
}

struct PollerInner {
    send_fn: SendFn,
    cancel: Option<CancellationToken>,
}

impl Poller {
    /// Creates a poller delivering snapshots to the given callback.
    pub fn new(control: Control, send_fn: SendFn) -> Self {
        Self {
            inner: Arc::new(Mutex::new(PollerInner {
                send_fn,
                cancel: None,
            })),
            control,
        }
    }

    /// Starts periodic polling at the given interval (seconds).
    ///
    /// Minimum interval is 1 second; 0 falls back to the 60s default.
    /// Restarts the loop if one is already running.
    pub async fn start(&self, interval_secs: u64) {
        let mut inner = self.inner.lock().await;

        if let Some(cancel) = inner.cancel.take() {
            cancel.cancel();
        }

        let interval_secs = match interval_secs {
            0 => DEFAULT_INTERVAL_SECS,
            v => v,
        };

        let cancel = CancellationToken::new();
        inner.cancel = Some(cancel.clone());

        let poller = Arc::clone(&self.inner);
        let control = self.control.clone();
        let interval = Duration::from_secs(interval_secs);

        tokio::spawn(async move {
            poll_loop(poller, control, interval, cancel).await;
        });

        tracing::info!(interval_secs, "poller started");
    }

    /// Stops the poll loop.
    pub async fn stop(&self) {
        let mut inner = self.inner.lock().await;
        if let Some(cancel) = inner.cancel.take() {
            cancel.cancel();
            tracing::info!("poller stopped");
        }
    }

    /// Returns `true` if the poll loop is running.
    pub async fn is_running(&self) -> bool {
        self.inner.lock().await.cancel.is_some()
    }

    /// Runs one refresh immediately, outside the timer cadence (the
    /// "Refresh" menu action). Serializes with in-flight ticks through
    /// the same lock.
    pub async fn refresh_now(&self) {
        let snapshot = take_snapshot(&self.control).await;
        let inner = self.inner.lock().await;
        (inner.send_fn)(snapshot);
    }
}

/// Main poll loop.
async fn poll_loop(
    inner: Arc<Mutex<PollerInner>>,
    control: Control,
    interval: Duration,
    cancel: CancellationToken,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    // Skip the first immediate tick; the host refreshes once on startup.
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {
                let snapshot = take_snapshot(&control).await;
                let guard = inner.lock().await;
                (guard.send_fn)(snapshot);
            }
        }
    }
}

/// Collects one snapshot: the capability probe gates the other queries.
async fn take_snapshot(control: &Control) -> Snapshot {
    let timestamp_ms = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0);

    let capabilities = control.capabilities().await;

    let battery = if capabilities.supports(Capability::Battery) {
        Some(control.battery().await)
    } else {
        None
    };

    let chatmix = if capabilities.supports(Capability::ChatMix) {
        Some(control.chatmix().await)
    } else {
        None
    };

    Snapshot {
        timestamp_ms,
        capabilities,
        battery,
        chatmix,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::{Path, PathBuf};
    use std::sync::atomic::{AtomicU32, Ordering};

    const FULL_OUTPUT: &str = r#"{"name": "HeadsetControl", "devices": [{"device": "Test", "capabilities": ["CAP_BATTERY_STATUS", "CAP_CHATMIX"], "battery": {"status": "BATTERY_AVAILABLE", "level": 55}, "chatmix": {"level": 64}}]}"#;

    const NO_CHATMIX_OUTPUT: &str = r#"{"name": "HeadsetControl", "devices": [{"device": "Test", "capabilities": ["CAP_BATTERY_STATUS"], "battery": {"status": "BATTERY_AVAILABLE", "level": 55}}]}"#;

    fn fake_binary(dir: &Path, stdout: &str) -> PathBuf {
        let path = dir.join("headsetcontrol");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "#!/bin/sh\ncat <<'JSON'\n{stdout}\nJSON").unwrap();
        drop(file);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        }
        path
    }

    #[tokio::test]
    async fn refresh_now_delivers_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let control = Control::new(fake_binary(dir.path(), FULL_OUTPUT));

        let count = Arc::new(AtomicU32::new(0));
        let count2 = Arc::clone(&count);
        let poller = Poller::new(
            control,
            Box::new(move |snapshot| {
                assert_eq!(snapshot.battery, Some(BatteryReading::Percent(55)));
                assert_eq!(snapshot.chatmix, Some(ChatMix::Level(64)));
                assert!(snapshot.timestamp_ms > 0);
                count2.fetch_add(1, Ordering::SeqCst);
            }),
        );

        poller.refresh_now().await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(!poller.is_running().await);
    }

    #[tokio::test]
    async fn missing_capability_skips_query() {
        let dir = tempfile::tempdir().unwrap();
        let control = Control::new(fake_binary(dir.path(), NO_CHATMIX_OUTPUT));

        let poller = Poller::new(
            control,
            Box::new(|snapshot| {
                assert!(snapshot.battery.is_some());
                assert!(snapshot.chatmix.is_none());
            }),
        );
        poller.refresh_now().await;
    }

    #[tokio::test]
    async fn poll_loop_ticks() {
        let dir = tempfile::tempdir().unwrap();
        let control = Control::new(fake_binary(dir.path(), FULL_OUTPUT));

        let count = Arc::new(AtomicU32::new(0));
        let count2 = Arc::clone(&count);
        let poller = Poller::new(
            control,
            Box::new(move |_| {
                count2.fetch_add(1, Ordering::SeqCst);
            }),
        );

        poller.start(1).await;
        assert!(poller.is_running().await);

        tokio::time::sleep(Duration::from_millis(2500)).await;

        poller.stop().await;
        assert!(!poller.is_running().await);

        let ticks = count.load(Ordering::SeqCst);
        assert!(ticks >= 1, "expected at least 1 tick, got {ticks}");
    }

    #[tokio::test]
    async fn stop_when_not_running() {
        let dir = tempfile::tempdir().unwrap();
        let control = Control::new(fake_binary(dir.path(), FULL_OUTPUT));
        let poller = Poller::new(control, Box::new(|_| {}));
        poller.stop().await; // Should not panic.
    }

    #[tokio::test]
    async fn restart_replaces_loop() {
        let dir = tempfile::tempdir().unwrap();
        let control = Control::new(fake_binary(dir.path(), FULL_OUTPUT));
        let poller = Poller::new(control, Box::new(|_| {}));

        poller.start(30).await;
        poller.start(60).await;
        assert!(poller.is_running().await);
        poller.stop().await;
    }

    #[tokio::test]
    async fn failing_binary_still_produces_snapshot() {
        // A dead binary means the probe assumes all capabilities and the
        // battery query reports an error reading; the host still gets its
        // snapshot every cycle.
        let control = Control::new("/nonexistent/headsetcontrol");
        let poller = Poller::new(
            control,
            Box::new(|snapshot| {
                assert_eq!(snapshot.battery, Some(BatteryReading::Error));
                assert_eq!(snapshot.chatmix, Some(ChatMix::Error));
            }),
        );
        poller.refresh_now().await;
    }
}
