// Library exports for flow-tagger
pub mod aggregate;
pub mod app;
pub mod classify;
pub mod config;
pub mod lookup;
pub mod report;

pub use aggregate::{run_workers, FlowCounters, ScheduleError};
pub use app::{App, RunSummary};
pub use classify::{classify, translate_protocol, Classification};
pub use config::settings;
pub use lookup::{LookupTable, DEFAULT_TAG};
pub use report::writer;

// Error types
pub use anyhow::{Error, Result};
