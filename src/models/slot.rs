//! Weekly schedule slots.
//!
//! A slot is one teaching period in the weekly grid, identified by
//! weekday, shift, and period within the shift. Slots are totally ordered
//! by `(weekday, shift, period)`.
//!
//! # Shift codes
//! Loaders commonly tag shifts with one-letter codes: `M` (morning),
//! `A` (afternoon), `E` (evening). [`Shift`] parses both codes and full names.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

/// Named portion of the school day. Gates teacher availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Shift {
    Morning,
    Afternoon,
    Evening,
}

impl Shift {
    /// All shifts in day order.
    pub const ALL: [Shift; 3] = [Shift::Morning, Shift::Afternoon, Shift::Evening];

    /// One-letter code (`M`, `A`, `E`).
    pub fn code(&self) -> char {
        match self {
            Shift::Morning => 'M',
            Shift::Afternoon => 'A',
            Shift::Evening => 'E',
        }
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Shift::Morning => "morning",
            Shift::Afternoon => "afternoon",
            Shift::Evening => "evening",
        };
        f.write_str(name)
    }
}

impl FromStr for Shift {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "m" | "morning" => Ok(Shift::Morning),
            "a" | "afternoon" => Ok(Shift::Afternoon),
            "e" | "evening" => Ok(Shift::Evening),
            other => Err(format!("unknown shift '{other}'")),
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl FromStr for Weekday {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mon" | "monday" => Ok(Weekday::Monday),
            "tue" | "tuesday" => Ok(Weekday::Tuesday),
            "wed" | "wednesday" => Ok(Weekday::Wednesday),
            "thu" | "thursday" => Ok(Weekday::Thursday),
            "fri" | "friday" => Ok(Weekday::Friday),
            "sat" | "saturday" => Ok(Weekday::Saturday),
            "sun" | "sunday" => Ok(Weekday::Sunday),
            other => Err(format!("unknown weekday '{other}'")),
        }
    }
}

/// One period of the weekly grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSlot {
    /// Unique slot identifier.
    pub id: String,
    /// Day of the week.
    pub weekday: Weekday,
    /// Shift within the day.
    pub shift: Shift,
    /// Period within the shift (1-based by convention).
    pub period: u32,
    /// Display label (e.g. "07:30-08:20").
    pub label: String,
}

impl ScheduleSlot {
    /// Creates a slot.
    pub fn new(id: impl Into<String>, weekday: Weekday, shift: Shift, period: u32) -> Self {
        Self {
            id: id.into(),
            weekday,
            shift,
            period,
            label: String::new(),
        }
    }

    /// Sets the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Position of this slot in the weekly grid.
    #[inline]
    pub fn order_key(&self) -> (Weekday, Shift, u32) {
        (self.weekday, self.shift, self.period)
    }
}
