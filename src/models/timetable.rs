//! Timetable (solution) model.
//!
//! A timetable is a decoded chromosome: one placement per required class
//! session, expressed with identifiers instead of registry indices, plus the
//! constraint violations it still carries. This is the hand-off format for
//! reporting and export.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A complete timetable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Timetable {
    /// One placement per required session.
    pub placements: Vec<Placement>,
    /// Constraint violations detected in this timetable.
    pub violations: Vec<Violation>,
}

/// A class session placed in a slot, a room, and with a teacher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// Class identifier.
    pub class_id: String,
    /// Session index within the class.
    pub session: usize,
    /// Session subject (denormalized for query convenience).
    pub subject: String,
    /// Assigned slot.
    pub slot_id: String,
    /// Assigned room.
    pub room_id: String,
    /// Assigned teacher.
    pub teacher_id: String,
}

/// A constraint violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Primary entity involved (class, room, or teacher).
    pub entity_id: String,
    /// Slot where the violation occurs, if it is slot-bound.
    pub slot_id: Option<String>,
    /// Human-readable description.
    pub message: String,
}

/// Constraint categories scored by the fitness evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ViolationType {
    /// Two sessions share a slot and a teacher, class, or room.
    TimeConflict,
    /// Class enrollment exceeds room capacity.
    CapacityExceeded,
    /// Teacher assigned more weekly sessions than their workload ceiling.
    WorkloadExceeded,
    /// Teacher scheduled in a shift they are not available for.
    TeacherUnavailable,
}

impl ViolationType {
    /// All categories, in reporting order.
    pub const ALL: [ViolationType; 4] = [
        ViolationType::TimeConflict,
        ViolationType::CapacityExceeded,
        ViolationType::WorkloadExceeded,
        ViolationType::TeacherUnavailable,
    ];

    /// Hard categories must be driven to zero; the rest are tolerated but penalized.
    pub fn is_hard(&self) -> bool {
        matches!(
            self,
            ViolationType::TimeConflict
                | ViolationType::CapacityExceeded
                | ViolationType::TeacherUnavailable
        )
    }
}

impl Violation {
    /// Creates a violation.
    pub fn new(
        violation_type: ViolationType,
        entity_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            violation_type,
            entity_id: entity_id.into(),
            slot_id: None,
            message: message.into(),
        }
    }

    /// Binds the violation to a slot.
    pub fn at_slot(mut self, slot_id: impl Into<String>) -> Self {
        self.slot_id = Some(slot_id.into());
        self
    }
}

impl Timetable {
    /// Creates an empty timetable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a placement.
    pub fn add_placement(&mut self, placement: Placement) {
        self.placements.push(placement);
    }

    /// Adds a violation.
    pub fn add_violation(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    /// Whether the timetable carries no violations.
    pub fn is_feasible(&self) -> bool {
        self.violations.is_empty()
    }

    /// Number of placements.
    pub fn placement_count(&self) -> usize {
        self.placements.len()
    }

    /// All placements of a class, in session order.
    pub fn placements_for_class(&self, class_id: &str) -> Vec<&Placement> {
        let mut found: Vec<&Placement> = self
            .placements
            .iter()
            .filter(|p| p.class_id == class_id)
            .collect();
        found.sort_by_key(|p| p.session);
        found
    }

    /// All placements taught by a teacher.
    pub fn placements_for_teacher(&self, teacher_id: &str) -> Vec<&Placement> {
        self.placements
            .iter()
            .filter(|p| p.teacher_id == teacher_id)
            .collect()
    }

    /// All placements hosted by a room.
    pub fn placements_for_room(&self, room_id: &str) -> Vec<&Placement> {
        self.placements
            .iter()
            .filter(|p| p.room_id == room_id)
            .collect()
    }

    /// All placements in a slot.
    pub fn placements_in_slot(&self, slot_id: &str) -> Vec<&Placement> {
        self.placements
            .iter()
            .filter(|p| p.slot_id == slot_id)
            .collect()
    }

    /// Weekly sessions per teacher.
    pub fn teacher_loads(&self) -> HashMap<String, u32> {
        let mut loads: HashMap<String, u32> = HashMap::new();
        for p in &self.placements {
            *loads.entry(p.teacher_id.clone()).or_insert(0) += 1;
        }
        loads
    }

    /// Violations of one type.
    pub fn violations_of(&self, violation_type: ViolationType) -> Vec<&Violation> {
        self.violations
            .iter()
            .filter(|v| v.violation_type == violation_type)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placement(class_id: &str, session: usize, slot: &str, room: &str, teacher: &str) -> Placement {
        Placement {
            class_id: class_id.into(),
            session,
            subject: "math".into(),
            slot_id: slot.into(),
            room_id: room.into(),
            teacher_id: teacher.into(),
        }
    }

    fn sample_timetable() -> Timetable {
        let mut t = Timetable::new();
        t.add_placement(placement("C1", 1, "S2", "R1", "P1"));
        t.add_placement(placement("C1", 0, "S1", "R1", "P1"));
        t.add_placement(placement("C2", 0, "S1", "R2", "P2"));
        t
    }

    #[test]
    fn test_queries() {
        let t = sample_timetable();
        assert_eq!(t.placement_count(), 3);

        let c1 = t.placements_for_class("C1");
        assert_eq!(c1.len(), 2);
        assert_eq!(c1[0].session, 0);
        assert_eq!(c1[1].session, 1);

        assert_eq!(t.placements_for_teacher("P1").len(), 2);
        assert_eq!(t.placements_for_room("R2").len(), 1);
        assert_eq!(t.placements_in_slot("S1").len(), 2);
        assert!(t.placements_for_class("C9").is_empty());
    }

    #[test]
    fn test_teacher_loads() {
        let t = sample_timetable();
        let loads = t.teacher_loads();
        assert_eq!(loads["P1"], 2);
        assert_eq!(loads["P2"], 1);
    }

    #[test]
    fn test_feasibility_and_violations() {
        let mut t = sample_timetable();
        assert!(t.is_feasible());

        t.add_violation(
            Violation::new(ViolationType::CapacityExceeded, "R1", "40 students in 30 seats")
                .at_slot("S1"),
        );
        assert!(!t.is_feasible());
        assert_eq!(t.violations_of(ViolationType::CapacityExceeded).len(), 1);
        assert!(t.violations_of(ViolationType::TimeConflict).is_empty());
        assert_eq!(t.violations[0].slot_id.as_deref(), Some("S1"));
    }

    #[test]
    fn test_hard_categories() {
        assert!(ViolationType::TimeConflict.is_hard());
        assert!(ViolationType::CapacityExceeded.is_hard());
        assert!(!ViolationType::WorkloadExceeded.is_hard());
    }

    #[test]
    fn test_json_shape() {
        let t = sample_timetable();
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["placements"][0]["class_id"], "C1");
        assert_eq!(json["placements"][0]["slot_id"], "S2");
    }
}
