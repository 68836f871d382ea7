use crate::date_key::DateKey;
use crate::models::EntryRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Date-keyed diary entries. Serializes as a bare `{ "YYYY-MM-DD": record }` map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct EntryStore {
    entries: BTreeMap<DateKey, EntryRecord>,
}

impl EntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &DateKey) -> Option<&EntryRecord> {
        self.entries.get(key)
    }

    /// Returns a new store with `key` set to `record`; an existing record is
    /// replaced whole.
    pub fn put(&self, key: DateKey, record: EntryRecord) -> EntryStore {
        let mut entries = self.entries.clone();
        entries.insert(key, record);
        EntryStore { entries }
    }

    pub fn contains(&self, key: &DateKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
