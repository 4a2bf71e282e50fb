use super::{field::DayField, lunch::LunchBreak, time_slot::TimeSlot};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayEntry {
    pub date: NaiveDate,
    pub time_in: Option<TimeSlot>,
    pub time_out: Option<TimeSlot>,
    pub lunch: LunchBreak,
    pub total_hours: Option<f64>,
}

impl DayEntry {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            time_in: None,
            time_out: None,
            lunch: LunchBreak::None,
            total_hours: None,
        }
    }

    pub fn apply(&mut self, field: DayField) {
        match field {
            DayField::TimeIn(t) => self.time_in = Some(t),
            DayField::TimeOut(t) => self.time_out = Some(t),
            DayField::Lunch(l) => self.lunch = l,
            DayField::TotalHours(h) => self.total_hours = Some(h),
        }
    }

    /// Time in, time out and total hours are all set.
    pub fn is_complete(&self) -> bool {
        self.time_in.is_some() && self.time_out.is_some() && self.total_hours.is_some()
    }

    /// At least one of time in, time out or total hours is set.
    /// The lunch break alone does not count.
    pub fn has_any_time_field(&self) -> bool {
        self.time_in.is_some() || self.time_out.is_some() || self.total_hours.is_some()
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}
