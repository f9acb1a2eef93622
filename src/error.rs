//! Error types.
//!
//! Failures are fatal and happen before the search starts: an inconsistent
//! domain model, a session with no legal assignment, or an invalid
//! configuration. Constraint violations found during the search are never
//! errors; they are reported through [`FitnessScore`](crate::fitness::FitnessScore).

use std::fmt;

use crate::validation::ValidationError;

/// Errors raised while building a domain model or starting a run.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TimetableError {
    /// The domain model is malformed or inconsistent.
    #[error("invalid domain model: {}", ValidationErrors(.0))]
    Validation(Vec<ValidationError>),

    /// A class session has no legal (slot, room, teacher) combination.
    #[error(transparent)]
    Infeasible(#[from] DataInfeasibility),

    /// The evolution configuration is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// A class session that cannot be assigned under subject and availability rules.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("class '{class_id}' session {session} ({subject}) has no legal assignment: {reason}")]
pub struct DataInfeasibility {
    /// Offending class.
    pub class_id: String,
    /// Session index within the class.
    pub session: usize,
    /// Session subject.
    pub subject: String,
    /// Why the legality domain is empty.
    pub reason: String,
}

struct ValidationErrors<'a>(&'a [ValidationError]);

impl fmt::Display for ValidationErrors<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", err.message)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_infeasibility_message_names_session() {
        let err = TimetableError::from(DataInfeasibility {
            class_id: "C1".into(),
            session: 2,
            subject: "chemistry".into(),
            reason: "no teacher teaches the subject".into(),
        });
        let msg = err.to_string();
        assert!(msg.contains("C1"));
        assert!(msg.contains("session 2"));
        assert!(msg.contains("chemistry"));
    }

    #[test]
    fn test_validation_message_lists_all_errors() {
        let err = TimetableError::Validation(vec![
            ValidationError::new(ValidationErrorKind::DuplicateId, "Duplicate room ID: R1"),
            ValidationError::new(ValidationErrorKind::UnknownTeacher, "Unknown teacher 'P9'"),
        ]);
        let msg = err.to_string();
        assert!(msg.contains("Duplicate room ID: R1; Unknown teacher 'P9'"));
    }
}
