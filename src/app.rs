use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, info};

use crate::aggregate::run_workers;
use crate::config::Config;
use crate::lookup::LookupTable;
use crate::report::{write_counts, PORT_PROTOCOL_HEADER, TAG_HEADER};

/// What a completed run produced, for the CLI to print.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub records_read: usize,
    pub tag_entries: usize,
    pub port_protocol_entries: usize,
    pub workers: usize,
}

/// Drives one full run: read inputs, build the lookup table, fan the
/// records out across workers, write both reports.
pub struct App {
    config: Config,
}

impl App {
    pub fn new(config: Config) -> App {
        App { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn run(&self) -> Result<RunSummary> {
        // The lookup table must be complete before any worker starts.
        let lookup_raw = read_lines(&self.config.input.lookup_table)?;
        let lookup = LookupTable::from_lines(lookup_raw.iter().map(String::as_str));
        info!("loaded {} lookup entries", lookup.len());

        let records = read_lines(&self.config.input.flow_log)?;
        let workers = self.config.workers.resolve();
        debug!("aggregating {} records across {} workers", records.len(), workers);

        let counters = run_workers(&records, &lookup, workers)?;
        let tag_counts = counters.tag_counts();
        let port_protocol_counts = counters.port_protocol_counts();

        // Reports are only written once aggregation has fully finished,
        // so a failed run never leaves partial tables behind.
        ensure_parent_dir(&self.config.output.tag_counts)?;
        ensure_parent_dir(&self.config.output.port_protocol_counts)?;
        write_counts(&self.config.output.tag_counts, TAG_HEADER, &tag_counts)?;
        write_counts(
            &self.config.output.port_protocol_counts,
            PORT_PROTOCOL_HEADER,
            &port_protocol_counts,
        )?;

        Ok(RunSummary {
            records_read: records.len(),
            tag_entries: tag_counts.len(),
            port_protocol_entries: port_protocol_counts.len(),
            workers,
        })
    }
}

fn read_lines(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read input file {}", path.display()))?;
    Ok(content.lines().map(str::to_string).collect())
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create output directory {}", parent.display()))?;
        }
    }
    Ok(())
}
