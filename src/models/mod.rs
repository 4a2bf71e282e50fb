pub mod attachment;
pub mod day_entry;
pub mod draft_row;
pub mod field;
pub mod lunch;
pub mod time_slot;
