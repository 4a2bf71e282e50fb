use crate::errors::{AppError, AppResult};
use chrono::{NaiveTime, Timelike};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// A time of day as shown in the pickers: `9:00 AM`, `12:10 PM`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeSlot(NaiveTime);

fn label_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?i)\s*(\d{1,2}):(\d{2})\s*(AM|PM)\s*$").expect("static regex is valid")
    })
}

impl TimeSlot {
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    pub fn time(&self) -> NaiveTime {
        self.0
    }

    /// Parse a 12-hour label (`h:mm AM|PM`).
    pub fn parse(label: &str) -> AppResult<Self> {
        let caps = label_re()
            .captures(label)
            .ok_or_else(|| AppError::InvalidTime(label.to_string()))?;

        let hour12: u32 = caps[1]
            .parse()
            .map_err(|_| AppError::InvalidTime(label.to_string()))?;
        let minute: u32 = caps[2]
            .parse()
            .map_err(|_| AppError::InvalidTime(label.to_string()))?;
        if !(1..=12).contains(&hour12) {
            return Err(AppError::InvalidTime(label.to_string()));
        }

        let pm = caps[3].eq_ignore_ascii_case("PM");
        let hour = match (hour12, pm) {
            (12, false) => 0,
            (12, true) => 12,
            (h, false) => h,
            (h, true) => h + 12,
        };

        Self::from_hm(hour, minute).ok_or_else(|| AppError::InvalidTime(label.to_string()))
    }

    pub fn label(&self) -> String {
        let hour = self.0.hour();
        let period = if hour >= 12 { "PM" } else { "AM" };
        let display_hour = match hour % 12 {
            0 => 12,
            h => h,
        };
        format!("{}:{:02} {}", display_hour, self.0.minute(), period)
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl FromStr for TimeSlot {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeSlot::parse(s)
    }
}

impl Serialize for TimeSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label())
    }
}

impl<'de> Deserialize<'de> for TimeSlot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        TimeSlot::parse(&s).map_err(serde::de::Error::custom)
    }
}
