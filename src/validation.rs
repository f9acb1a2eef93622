//! Input integrity checks for timetabling problems.
//!
//! Runs before any index is built. Detects:
//! - Duplicate IDs within each registry
//! - Empty class, room, or slot registries and classes without sessions
//! - Fixed assignments referencing unknown classes, teachers, or sessions
//! - Fixed assignments whose teacher does not teach the locked subject
//! - Two fixed assignments locking one session to different teachers
//!
//! All problems are collected and returned together.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::models::{FixedAssignment, Room, ScheduleSlot, SchoolClass, Teacher};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities of the same registry share an ID.
    DuplicateId,
    /// A required registry (classes, rooms, slots) is empty.
    EmptyRegistry,
    /// A class has no required sessions.
    EmptyClass,
    /// A fixed assignment references a class that doesn't exist.
    UnknownClass,
    /// A fixed assignment references a teacher that doesn't exist.
    UnknownTeacher,
    /// A fixed assignment references a session index past the class's sessions.
    SessionOutOfRange,
    /// A fixed teacher does not teach the subject of the locked session(s).
    SubjectMismatch,
    /// One session is locked to two different teachers.
    ConflictingLock,
}

impl ValidationError {
    /// Creates a validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

/// Validates the input registries of a timetabling problem.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    classes: &[SchoolClass],
    rooms: &[Room],
    teachers: &[Teacher],
    slots: &[ScheduleSlot],
    fixed: &[FixedAssignment],
) -> ValidationResult {
    let mut errors = Vec::new();

    check_unique("class", classes.iter().map(|c| c.id.as_str()), &mut errors);
    check_unique("room", rooms.iter().map(|r| r.id.as_str()), &mut errors);
    check_unique("teacher", teachers.iter().map(|t| t.id.as_str()), &mut errors);
    check_unique("slot", slots.iter().map(|s| s.id.as_str()), &mut errors);

    for (name, empty) in [
        ("class", classes.is_empty()),
        ("room", rooms.is_empty()),
        ("slot", slots.is_empty()),
    ] {
        if empty {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyRegistry,
                format!("No {name} registered"),
            ));
        }
    }

    for class in classes {
        if class.sessions.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyClass,
                format!("Class '{}' has no sessions", class.id),
            ));
        }
    }

    check_fixed_assignments(classes, teachers, fixed, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_unique<'a>(
    registry: &str,
    ids: impl Iterator<Item = &'a str>,
    errors: &mut Vec<ValidationError>,
) {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate {registry} ID: {id}"),
            ));
        }
    }
}

fn check_fixed_assignments(
    classes: &[SchoolClass],
    teachers: &[Teacher],
    fixed: &[FixedAssignment],
    errors: &mut Vec<ValidationError>,
) {
    let class_by_id: HashMap<&str, &SchoolClass> =
        classes.iter().map(|c| (c.id.as_str(), c)).collect();
    let teacher_by_id: HashMap<&str, &Teacher> =
        teachers.iter().map(|t| (t.id.as_str(), t)).collect();

    // (class, session) -> teacher locked so far
    let mut locks: HashMap<(&str, usize), &str> = HashMap::new();

    for fa in fixed {
        let class = class_by_id.get(fa.class_id.as_str());
        let teacher = teacher_by_id.get(fa.teacher_id.as_str());

        if class.is_none() {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownClass,
                format!(
                    "Fixed assignment references unknown class '{}'",
                    fa.class_id
                ),
            ));
        }
        if teacher.is_none() {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownTeacher,
                format!(
                    "Fixed assignment references unknown teacher '{}'",
                    fa.teacher_id
                ),
            ));
        }
        let (Some(class), Some(teacher)) = (class, teacher) else {
            continue;
        };

        let sessions: Vec<usize> = match fa.session {
            Some(idx) if idx >= class.sessions.len() => {
                errors.push(ValidationError::new(
                    ValidationErrorKind::SessionOutOfRange,
                    format!(
                        "Fixed assignment locks session {idx} of class '{}', which has {} sessions",
                        class.id,
                        class.sessions.len()
                    ),
                ));
                continue;
            }
            Some(idx) => {
                if !teacher.teaches(&class.sessions[idx].subject) {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::SubjectMismatch,
                        format!(
                            "Teacher '{}' ({}) cannot be locked to session {idx} of class '{}' ({})",
                            teacher.id, teacher.subject, class.id, class.sessions[idx].subject
                        ),
                    ));
                    continue;
                }
                vec![idx]
            }
            None => {
                let matching: Vec<usize> = class
                    .sessions
                    .iter()
                    .enumerate()
                    .filter(|(_, s)| teacher.teaches(&s.subject))
                    .map(|(i, _)| i)
                    .collect();
                if matching.is_empty() {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::SubjectMismatch,
                        format!(
                            "Teacher '{}' ({}) teaches no session of class '{}'",
                            teacher.id, teacher.subject, class.id
                        ),
                    ));
                }
                matching
            }
        };

        for idx in sessions {
            match locks.get(&(class.id.as_str(), idx)) {
                Some(&prev) if prev != teacher.id => {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::ConflictingLock,
                        format!(
                            "Session {idx} of class '{}' is locked to both '{prev}' and '{}'",
                            class.id, teacher.id
                        ),
                    ));
                }
                _ => {
                    locks.insert((class.id.as_str(), idx), teacher.id.as_str());
                }
            }
        }
    }
}
