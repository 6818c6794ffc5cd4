pub mod counters;
pub mod scheduler;

pub use counters::FlowCounters;
pub use scheduler::{run_workers, ScheduleError};
