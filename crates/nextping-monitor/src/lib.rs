//! The probe/analyze/render loop.

pub mod monitor;
pub mod stop;

pub use monitor::{Monitor, MonitorSettings, RoundSummary};
pub use stop::StopSignal;
