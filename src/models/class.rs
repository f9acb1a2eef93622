//! School class model.
//!
//! A class is a group of students that must attend a list of weekly
//! sessions. Each session is tagged with a subject; the session's index in
//! the list identifies it inside the class. Classes are produced upstream
//! (enrollment forecasting) and are read-only here.

use serde::{Deserialize, Serialize};

/// A class to be timetabled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchoolClass {
    /// Unique class identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Grade / education level.
    pub grade: String,
    /// Enrolled students.
    pub students: u32,
    /// Required weekly sessions, in order.
    pub sessions: Vec<Session>,
}

/// One required weekly session of a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Subject taught in this session.
    pub subject: String,
}

impl Session {
    /// Creates a session for `subject`.
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
        }
    }
}

impl SchoolClass {
    /// Creates a class with no sessions.
    pub fn new(id: impl Into<String>, students: u32) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            grade: String::new(),
            students,
            sessions: Vec::new(),
        }
    }

    /// Sets the class name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the grade.
    pub fn with_grade(mut self, grade: impl Into<String>) -> Self {
        self.grade = grade.into();
        self
    }

    /// Appends one session of `subject`.
    pub fn with_session(mut self, subject: impl Into<String>) -> Self {
        self.sessions.push(Session::new(subject));
        self
    }

    /// Appends `count` sessions of `subject` (lessons per week).
    pub fn with_sessions(mut self, subject: impl Into<String>, count: usize) -> Self {
        let subject = subject.into();
        for _ in 0..count {
            self.sessions.push(Session::new(subject.clone()));
        }
        self
    }

    /// Number of required weekly sessions.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Distinct subjects, in first-occurrence order.
    pub fn subjects(&self) -> Vec<&str> {
        let mut subjects: Vec<&str> = Vec::new();
        for session in &self.sessions {
            if !subjects.contains(&session.subject.as_str()) {
                subjects.push(&session.subject);
            }
        }
        subjects
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_builder() {
        let c = SchoolClass::new("C1", 28)
            .with_name("7th A")
            .with_grade("7")
            .with_sessions("math", 3)
            .with_session("history");

        assert_eq!(c.id, "C1");
        assert_eq!(c.students, 28);
        assert_eq!(c.session_count(), 4);
        assert_eq!(c.sessions[3].subject, "history");
        assert_eq!(c.subjects(), vec!["math", "history"]);
    }

    #[test]
    fn test_class_without_sessions() {
        let c = SchoolClass::new("C0", 10);
        assert_eq!(c.session_count(), 0);
        assert!(c.subjects().is_empty());
    }
}
