//! Teacher model.
//!
//! A teacher teaches one subject, is available in a subset of the day's
//! shifts, and has a weekly workload ceiling expressed in hours. One
//! scheduled session counts as one hour.

use serde::{Deserialize, Serialize};

use super::Shift;

/// A teacher that can be assigned to class sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Teacher {
    /// Unique teacher identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Taught subject.
    pub subject: String,
    /// Shift availability.
    pub availability: Availability,
    /// Maximum weekly workload (hours).
    pub max_workload: u32,
}

/// Per-shift availability flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    pub morning: bool,
    pub afternoon: bool,
    pub evening: bool,
}

impl Availability {
    /// Available in every shift.
    pub const ALL: Self = Self {
        morning: true,
        afternoon: true,
        evening: true,
    };

    /// Available in no shift.
    pub const NONE: Self = Self {
        morning: false,
        afternoon: false,
        evening: false,
    };

    /// Available only in the given shift.
    pub fn only(shift: Shift) -> Self {
        Self::NONE.with(shift, true)
    }

    /// Returns a copy with the flag for `shift` set to `available`.
    pub fn with(mut self, shift: Shift, available: bool) -> Self {
        match shift {
            Shift::Morning => self.morning = available,
            Shift::Afternoon => self.afternoon = available,
            Shift::Evening => self.evening = available,
        }
        self
    }

    /// Whether the flag for `shift` is set.
    #[inline]
    pub fn allows(&self, shift: Shift) -> bool {
        match shift {
            Shift::Morning => self.morning,
            Shift::Afternoon => self.afternoon,
            Shift::Evening => self.evening,
        }
    }
}

impl Default for Availability {
    fn default() -> Self {
        Self::ALL
    }
}

impl Teacher {
    /// Creates a teacher available in every shift with a 40-hour ceiling.
    pub fn new(id: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            subject: subject.into(),
            availability: Availability::ALL,
            max_workload: 40,
        }
    }

    /// Sets the teacher name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the shift availability.
    pub fn with_availability(mut self, availability: Availability) -> Self {
        self.availability = availability;
        self
    }

    /// Sets the weekly workload ceiling (hours).
    pub fn with_max_workload(mut self, hours: u32) -> Self {
        self.max_workload = hours;
        self
    }

    /// Whether this teacher teaches `subject`.
    #[inline]
    pub fn teaches(&self, subject: &str) -> bool {
        self.subject == subject
    }

    /// Whether this teacher works during `shift`.
    #[inline]
    pub fn is_available(&self, shift: Shift) -> bool {
        self.availability.allows(shift)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_teacher_builder() {
        let t = Teacher::new("P1", "math")
            .with_name("Ada")
            .with_availability(Availability::only(Shift::Morning))
            .with_max_workload(12);

        assert_eq!(t.id, "P1");
        assert_eq!(t.name, "Ada");
        assert!(t.teaches("math"));
        assert!(!t.teaches("history"));
        assert!(t.is_available(Shift::Morning));
        assert!(!t.is_available(Shift::Afternoon));
        assert!(!t.is_available(Shift::Evening));
        assert_eq!(t.max_workload, 12);
    }

    #[test]
    fn test_availability_flags() {
        let a = Availability::NONE
            .with(Shift::Afternoon, true)
            .with(Shift::Evening, true);
        assert!(!a.allows(Shift::Morning));
        assert!(a.allows(Shift::Afternoon));
        assert!(a.allows(Shift::Evening));
        assert_eq!(Availability::default(), Availability::ALL);
    }
}
