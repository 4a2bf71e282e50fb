//! Selectable clock-time labels for the time-in / time-out pickers.

use crate::errors::{AppError, AppResult};
use crate::models::time_slot::TimeSlot;

pub const DEFAULT_STEP_MINUTES: u32 = 10;

/// Ordered list of time slots covering a full day (`12:00 AM` .. last step before midnight).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSlotCatalog {
    step: u32,
    slots: Vec<TimeSlot>,
}

impl TimeSlotCatalog {
    /// Build the catalog for the given granularity. The step must divide an hour.
    pub fn new(step_minutes: u32) -> AppResult<Self> {
        if step_minutes == 0 || 60 % step_minutes != 0 {
            return Err(AppError::Config(format!(
                "slot step must divide 60 minutes, got {}",
                step_minutes
            )));
        }

        let mut slots = Vec::with_capacity((24 * 60 / step_minutes) as usize);
        for hour in 0..24 {
            for minute in (0..60).step_by(step_minutes as usize) {
                if let Some(slot) = TimeSlot::from_hm(hour, minute) {
                    slots.push(slot);
                }
            }
        }

        Ok(Self {
            step: step_minutes,
            slots,
        })
    }

    pub fn step_minutes(&self) -> u32 {
        self.step
    }

    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    pub fn iter(&self) -> impl Iterator<Item = &TimeSlot> {
        self.slots.iter()
    }

    pub fn labels(&self) -> Vec<String> {
        self.slots.iter().map(TimeSlot::label).collect()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn contains(&self, slot: &TimeSlot) -> bool {
        self.slots.binary_search(slot).is_ok()
    }
}
