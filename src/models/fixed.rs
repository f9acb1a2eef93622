//! Fixed teacher assignments.
//!
//! A fixed assignment locks a teacher to a class before optimization
//! starts. It is a hard pre-constraint: the optimizer never changes the
//! teacher of a locked session.

use serde::{Deserialize, Serialize};

/// An externally imposed (class, teacher) lock.
///
/// Without a session index the lock covers every session of the class whose
/// subject the teacher teaches. With a session index it covers exactly that
/// session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedAssignment {
    /// Locked class.
    pub class_id: String,
    /// Teacher the class is locked to.
    pub teacher_id: String,
    /// Session index within the class. `None` = all matching sessions.
    pub session: Option<usize>,
}

impl FixedAssignment {
    /// Locks `teacher_id` to every matching session of `class_id`.
    pub fn new(class_id: impl Into<String>, teacher_id: impl Into<String>) -> Self {
        Self {
            class_id: class_id.into(),
            teacher_id: teacher_id.into(),
            session: None,
        }
    }

    /// Narrows the lock to one session.
    pub fn for_session(mut self, session: usize) -> Self {
        self.session = Some(session);
        self
    }
}
