use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lunch break length. Only the picker values are representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum LunchBreak {
    #[default]
    None,
    Quarter,
    Half,
    ThreeQuarters,
    Hour,
}

impl LunchBreak {
    pub const ALL: [LunchBreak; 5] = [
        LunchBreak::None,
        LunchBreak::Quarter,
        LunchBreak::Half,
        LunchBreak::ThreeQuarters,
        LunchBreak::Hour,
    ];

    pub fn minutes(&self) -> u32 {
        match self {
            LunchBreak::None => 0,
            LunchBreak::Quarter => 15,
            LunchBreak::Half => 30,
            LunchBreak::ThreeQuarters => 45,
            LunchBreak::Hour => 60,
        }
    }

    pub fn from_minutes(minutes: u32) -> Option<Self> {
        match minutes {
            0 => Some(LunchBreak::None),
            15 => Some(LunchBreak::Quarter),
            30 => Some(LunchBreak::Half),
            45 => Some(LunchBreak::ThreeQuarters),
            60 => Some(LunchBreak::Hour),
            _ => None,
        }
    }

    /// Helper: parse CLI/UI input such as `30` or `30 min`
    pub fn parse(s: &str) -> AppResult<Self> {
        let trimmed = s.trim().trim_end_matches("min").trim();
        trimmed
            .parse::<u32>()
            .ok()
            .and_then(Self::from_minutes)
            .ok_or_else(|| AppError::InvalidLunch(s.to_string()))
    }
}

impl TryFrom<u32> for LunchBreak {
    type Error = AppError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::from_minutes(value).ok_or_else(|| AppError::InvalidLunch(value.to_string()))
    }
}

impl From<LunchBreak> for u32 {
    fn from(value: LunchBreak) -> Self {
        value.minutes()
    }
}

impl fmt::Display for LunchBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} min", self.minutes())
    }
}
