use std::collections::HashMap;

use log::warn;

/// Tag assigned to a (port, protocol) combination with no lookup entry.
pub const DEFAULT_TAG: &str = "Untagged";

/// Immutable mapping from a "port,protocol" combination to its tag.
///
/// Built once from the lookup CSV before any worker starts; after
/// construction it is only ever read, so workers share it by plain
/// reference with no locking.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LookupTable {
    entries: HashMap<String, String>,
}

impl LookupTable {
    /// Build a table from lookup CSV lines.
    ///
    /// The first line is a column header and is skipped without
    /// inspection. Each remaining line must have at least 3
    /// comma-separated fields (port, protocol, tag); shorter lines are
    /// logged and skipped. The protocol is lowercased so keys match the
    /// canonical form the classifier produces. Duplicate keys keep the
    /// last occurrence in file order.
    pub fn from_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> LookupTable {
        let mut entries = HashMap::new();

        for (index, line) in lines.into_iter().enumerate().skip(1) {
            let fields: Vec<&str> = line.split(',').collect();
            if fields.len() < 3 {
                warn!("skipping malformed lookup line {}: {:?}", index + 1, line);
                continue;
            }

            let key = format!("{},{}", fields[0].trim(), fields[1].trim().to_lowercase());
            entries.insert(key, fields[2].trim().to_string());
        }

        LookupTable { entries }
    }

    /// Look up the tag for a "port,protocol" combination.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Tag for a combination, falling back to [`DEFAULT_TAG`].
    pub fn tag_for(&self, key: &str) -> &str {
        self.get(key).unwrap_or(DEFAULT_TAG)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
