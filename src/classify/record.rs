use crate::classify::protocol::translate_protocol;
use crate::lookup::LookupTable;

// Field layout of a flow-log record (per the AWS VPC flow-log default
// format): index 5 is the destination port, index 7 the protocol number.
const DST_PORT_FIELD: usize = 5;
const PROTOCOL_FIELD: usize = 7;
const MIN_FIELDS: usize = 8;

/// Result of classifying one flow-log record.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification<'a> {
    /// "port,protocol" identity of the record, e.g. `"443,tcp"`.
    pub key: String,
    /// Tag resolved from the lookup table, or `"Untagged"`.
    pub tag: &'a str,
}

/// Classify a single flow-log line against the lookup table.
///
/// Lines with fewer than 8 space-separated fields are expected noise in
/// flow data and are skipped silently. Records whose protocol number has
/// no canonical name are also skipped; they contribute to neither
/// frequency table. The destination port is taken verbatim as a string.
pub fn classify<'a>(line: &str, lookup: &'a LookupTable) -> Option<Classification<'a>> {
    let fields: Vec<&str> = line.split(' ').collect();
    if fields.len() < MIN_FIELDS {
        return None;
    }

    let dst_port = fields[DST_PORT_FIELD];
    let protocol = translate_protocol(fields[PROTOCOL_FIELD])?;

    let key = format!("{},{}", dst_port, protocol);
    let tag = lookup.tag_for(&key);
    Some(Classification { key, tag })
}
