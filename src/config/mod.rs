pub mod settings;

pub use settings::{Config, InputConfig, OutputConfig, WorkerConfig};
