mod reader;
mod writer;

pub use reader::StoreReader;
pub use writer::{StoreWriter, create_timestamped};

use crate::stats::SummaryRecord;
use std::collections::BTreeMap;

/// Summary records keyed by identifier, iterated in identifier order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryStore {
    records: BTreeMap<String, SummaryRecord>,
}

impl SummaryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, returning the one it replaced if the identifier was taken
    pub fn insert(&mut self, record: SummaryRecord) -> Option<SummaryRecord> {
        let previous = self.records.insert(record.identifier.clone(), record);
        if let Some(previous) = &previous {
            tracing::warn!(
                "Duplicate summary for {}, keeping the latest",
                previous.identifier
            );
        }
        previous
    }

    pub fn get(&self, identifier: &str) -> Option<&SummaryRecord> {
        self.records.get(identifier)
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn records(&self) -> impl Iterator<Item = &SummaryRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<SummaryRecord> for SummaryStore {
    fn from_iter<I: IntoIterator<Item = SummaryRecord>>(iter: I) -> Self {
        let mut store = SummaryStore::new();
        for record in iter {
            store.insert(record);
        }
        store
    }
}

impl Extend<SummaryRecord> for SummaryStore {
    fn extend<I: IntoIterator<Item = SummaryRecord>>(&mut self, iter: I) {
        for record in iter {
            self.insert(record);
        }
    }
}
