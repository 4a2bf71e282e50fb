use crate::models::day_entry::DayEntry;
use crate::models::field::DayField;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Per-date work entries staged since the last successful save or submit.
///
/// Pure state: it never validates or rejects a value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayRecordStore {
    days: BTreeMap<NaiveDate, DayEntry>,
}

impl DayRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set one field of the entry for `date`, creating the entry on first edit.
    pub fn set_field(&mut self, date: NaiveDate, field: DayField) {
        self.days
            .entry(date)
            .or_insert_with(|| DayEntry::empty(date))
            .apply(field);
    }

    /// Entry for `date`, or an empty record when nothing was edited yet.
    pub fn get(&self, date: NaiveDate) -> DayEntry {
        self.days
            .get(&date)
            .cloned()
            .unwrap_or_else(|| DayEntry::empty(date))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.days.contains_key(&date)
    }

    pub fn entries(&self) -> impl Iterator<Item = &DayEntry> {
        self.days.values()
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn clear(&mut self) {
        self.days.clear();
    }
}
