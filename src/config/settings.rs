use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::thread;

use anyhow::Context;

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub workers: WorkerConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    pub flow_log: PathBuf,
    pub lookup_table: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub tag_counts: PathBuf,
    pub port_protocol_counts: PathBuf,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct WorkerConfig {
    /// Number of aggregation workers; absent or 0 means one per
    /// available CPU.
    pub count: Option<usize>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            flow_log: PathBuf::from("attachments/input/flow_logs.txt"),
            lookup_table: PathBuf::from("attachments/input/lookup_table.csv"),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            tag_counts: PathBuf::from("attachments/output/tag_counts.csv"),
            port_protocol_counts: PathBuf::from("attachments/output/port_protocol_counts.csv"),
        }
    }
}

impl WorkerConfig {
    /// Effective worker count: the configured value when non-zero,
    /// otherwise one worker per available CPU (at least one).
    pub fn resolve(&self) -> usize {
        match self.count {
            Some(count) if count > 0 => count,
            _ => thread::available_parallelism().map(usize::from).unwrap_or(1),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &str) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path))?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &str) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).with_context(|| format!("failed to write config file {}", path))?;
        Ok(())
    }
}
