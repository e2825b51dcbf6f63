mod monitor;

pub use monitor::{MonitorRecord, NewMonitor};
