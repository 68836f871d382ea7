use crate::date_key::DateKey;
use crate::models::{EntryField, EntryRecord};
use crate::store::EntryStore;
use chrono::NaiveDate;

/// Unsaved edits for the current date.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EntryEditor {
    record: EntryRecord,
}

impl EntryEditor {
    pub fn record(&self) -> &EntryRecord {
        &self.record
    }

    /// Drops any pending edits and loads the stored record for `date`, or an
    /// empty one.
    pub fn reload(&mut self, store: &EntryStore, date: NaiveDate) {
        self.record = store
            .get(&DateKey::from_date(date))
            .cloned()
            .unwrap_or_default();
    }

    pub fn set_field(&mut self, field: EntryField, value: impl Into<String>) {
        self.record.set(field, value.into());
    }

    pub fn save(&self, store: &EntryStore, date: NaiveDate) -> EntryStore {
        store.put(DateKey::from_date(date), self.record.clone())
    }
}
