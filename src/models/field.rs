use super::{lunch::LunchBreak, time_slot::TimeSlot};
use crate::core::slots::TimeSlotCatalog;
use crate::errors::{AppError, AppResult};

/// One editable field of a day entry together with its new value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DayField {
    TimeIn(TimeSlot),
    TimeOut(TimeSlot),
    Lunch(LunchBreak),
    TotalHours(f64),
}

impl DayField {
    pub fn name(&self) -> &'static str {
        match self {
            DayField::TimeIn(_) => "time_in",
            DayField::TimeOut(_) => "time_out",
            DayField::Lunch(_) => "lunch_timeout",
            DayField::TotalHours(_) => "total_hours",
        }
    }

    /// Build a field from its name and raw text value.
    /// Accepts both the wire names (`time_in`) and the UI names (`timeIn`);
    /// anything else is rejected.
    pub fn parse(name: &str, value: &str) -> AppResult<Self> {
        match name {
            "time_in" | "timeIn" => Ok(DayField::TimeIn(TimeSlot::parse(value)?)),
            "time_out" | "timeOut" => Ok(DayField::TimeOut(TimeSlot::parse(value)?)),
            "lunch" | "lunch_timeout" | "lunchMinutes" => {
                Ok(DayField::Lunch(LunchBreak::parse(value)?))
            }
            "total_hours" | "totalHours" => Ok(DayField::TotalHours(parse_hours(value)?)),
            other => Err(AppError::UnknownField(other.to_string())),
        }
    }

    /// Like [`DayField::parse`], but time labels must also be slots of `catalog`.
    pub fn parse_with(catalog: &TimeSlotCatalog, name: &str, value: &str) -> AppResult<Self> {
        let field = Self::parse(name, value)?;
        match field {
            DayField::TimeIn(slot) | DayField::TimeOut(slot) if !catalog.contains(&slot) => {
                Err(AppError::InvalidTime(format!(
                    "{} is not on the {}-minute grid",
                    value.trim(),
                    catalog.step_minutes()
                )))
            }
            _ => Ok(field),
        }
    }
}

pub fn parse_hours(value: &str) -> AppResult<f64> {
    let hours: f64 = value
        .trim()
        .parse()
        .map_err(|_| AppError::InvalidHours(value.to_string()))?;
    if !hours.is_finite() || hours < 0.0 {
        return Err(AppError::InvalidHours(value.to_string()));
    }
    Ok(hours)
}
