//! Subprocess client and poll loop for HeadsetControl.
//!
//! [`Control`] shells out to the `headsetcontrol` binary for queries
//! (battery, ChatMix, capabilities) and setters (sidetone, LED, inactive
//! time). [`Poller`] drives it on a fixed interval and delivers each
//! [`Snapshot`] through a callback.

mod client;
mod poller;

pub use client::{Control, ControlError, locate_binary};
pub use poller::{DEFAULT_INTERVAL_SECS, Poller, SendFn, Snapshot};
