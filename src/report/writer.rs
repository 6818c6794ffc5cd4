use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Header for the tag frequency report.
pub const TAG_HEADER: &str = "Tag,Count";
/// Header for the port-protocol frequency report. Keys are already
/// comma-joined, so each row lands as three CSV columns.
pub const PORT_PROTOCOL_HEADER: &str = "Port,Protocol,Count";

/// Write one frequency table as CSV: header line, then `key,count` rows
/// in no particular order.
///
/// The whole file is rendered in memory and written with a single
/// `fs::write`, so a failed write cannot leave behind a file that looks
/// like a valid partial report. An empty table still produces the
/// header-only file.
pub fn write_counts(path: &Path, header: &str, counts: &HashMap<String, u64>) -> Result<()> {
    let mut content = String::with_capacity(header.len() + 1 + counts.len() * 16);
    content.push_str(header);
    content.push('\n');
    for (key, count) in counts {
        content.push_str(key);
        content.push(',');
        content.push_str(&count.to_string());
        content.push('\n');
    }

    fs::write(path, content)
        .with_context(|| format!("failed to write report file {}", path.display()))
}
