//! Types for HeadsetControl's JSON output.
//!
//! HeadsetControl (`-o JSON`) prints one document per invocation describing
//! the connected headsets. This crate owns the serde schema for that
//! document and the domain values the indicator derives from it: the
//! per-poll [`BatteryReading`], the device [`Capabilities`], and the
//! [`ChatMix`] dial state.

mod output;
mod reading;

pub use output::{
    Battery, ChatMixInfo, ControlOutput, Device, STATUS_AVAILABLE, STATUS_CHARGING,
    STATUS_UNAVAILABLE,
};
pub use reading::{BatteryReading, Capabilities, Capability, ChatMix};
