use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Decides which calendar dates can still be edited.
///
/// A date is disabled when it lies in the future or when the backend already
/// holds a finalized submission for it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateAvailabilityPolicy {
    uploaded: BTreeSet<NaiveDate>,
}

impl DateAvailabilityPolicy {
    pub fn new(uploaded: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            uploaded: uploaded.into_iter().collect(),
        }
    }

    pub fn is_disabled(&self, date: NaiveDate, today: NaiveDate) -> bool {
        date > today || self.uploaded.contains(&date)
    }

    pub fn is_uploaded(&self, date: NaiveDate) -> bool {
        self.uploaded.contains(&date)
    }

    pub fn uploaded_dates(&self) -> &BTreeSet<NaiveDate> {
        &self.uploaded
    }

    /// Replace the uploaded set with a fresh copy from the backend.
    pub fn replace_uploaded(&mut self, dates: impl IntoIterator<Item = NaiveDate>) {
        self.uploaded = dates.into_iter().collect();
    }
}
