pub mod log;
pub mod metrics;

pub use log::EventLog;
pub use metrics::{LoadMetrics, LoadSnapshot};
