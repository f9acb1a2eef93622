//! Indexed, immutable domain model.
//!
//! [`DomainModel`] is built once from the input registries and shared
//! read-only by the encoding, the fitness evaluator, and the evolution
//! engine for the lifetime of a run. Construction validates the registries,
//! builds lookup indices, and rejects sessions that cannot be assigned.
//!
//! # Indexing
//! Genes refer to registry entries by position. Slots are stored sorted by
//! `(weekday, shift, period)`, so slot indices follow the weekly grid.
//! The sequence of required session units (class order, then session order)
//! defines the gene order of every chromosome.

use std::collections::HashMap;

use crate::error::{DataInfeasibility, TimetableError};
use crate::models::{FixedAssignment, Room, ScheduleSlot, SchoolClass, Teacher};
use crate::validation::validate_input;

/// One required (class, session) pair. Owns exactly one gene per chromosome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionUnit {
    /// Class index.
    pub class: usize,
    /// Session index within the class.
    pub session: usize,
}

/// Validated registries plus lookup indices.
#[derive(Debug, Clone)]
pub struct DomainModel {
    classes: Vec<SchoolClass>,
    rooms: Vec<Room>,
    teachers: Vec<Teacher>,
    slots: Vec<ScheduleSlot>,
    fixed: Vec<FixedAssignment>,
    units: Vec<SessionUnit>,
    class_index: HashMap<String, usize>,
    room_index: HashMap<String, usize>,
    teacher_index: HashMap<String, usize>,
    slot_index: HashMap<String, usize>,
    teachers_by_subject: HashMap<String, Vec<usize>>,
    /// Room indices, ascending by capacity.
    rooms_by_capacity: Vec<usize>,
    /// (class, session) -> locked teacher.
    locks: HashMap<(usize, usize), usize>,
}

impl DomainModel {
    /// Builds the model.
    ///
    /// # Errors
    /// - [`TimetableError::Validation`] if the registries are inconsistent.
    /// - [`TimetableError::Infeasible`] if a session has no legal
    ///   (slot, teacher) pair.
    pub fn new(
        classes: Vec<SchoolClass>,
        rooms: Vec<Room>,
        teachers: Vec<Teacher>,
        mut slots: Vec<ScheduleSlot>,
        fixed: Vec<FixedAssignment>,
    ) -> Result<Self, TimetableError> {
        validate_input(&classes, &rooms, &teachers, &slots, &fixed)
            .map_err(TimetableError::Validation)?;

        slots.sort_by_key(|s| s.order_key());

        let class_index = index_by_id(classes.iter().map(|c| c.id.as_str()));
        let room_index = index_by_id(rooms.iter().map(|r| r.id.as_str()));
        let teacher_index = index_by_id(teachers.iter().map(|t| t.id.as_str()));
        let slot_index = index_by_id(slots.iter().map(|s| s.id.as_str()));

        let mut teachers_by_subject: HashMap<String, Vec<usize>> = HashMap::new();
        for (idx, teacher) in teachers.iter().enumerate() {
            teachers_by_subject
                .entry(teacher.subject.clone())
                .or_default()
                .push(idx);
        }

        let mut rooms_by_capacity: Vec<usize> = (0..rooms.len()).collect();
        rooms_by_capacity.sort_by_key(|&r| rooms[r].capacity);

        let units: Vec<SessionUnit> = classes
            .iter()
            .enumerate()
            .flat_map(|(c, class)| {
                (0..class.sessions.len()).map(move |s| SessionUnit {
                    class: c,
                    session: s,
                })
            })
            .collect();

        // Validation guarantees references resolve and subjects match.
        let mut locks = HashMap::new();
        for fa in &fixed {
            let (Some(&c), Some(&t)) = (
                class_index.get(&fa.class_id),
                teacher_index.get(&fa.teacher_id),
            ) else {
                continue;
            };
            match fa.session {
                Some(s) => {
                    locks.insert((c, s), t);
                }
                None => {
                    for (s, session) in classes[c].sessions.iter().enumerate() {
                        if teachers[t].teaches(&session.subject) {
                            locks.insert((c, s), t);
                        }
                    }
                }
            }
        }

        let model = Self {
            classes,
            rooms,
            teachers,
            slots,
            fixed,
            units,
            class_index,
            room_index,
            teacher_index,
            slot_index,
            teachers_by_subject,
            rooms_by_capacity,
            locks,
        };

        for unit in 0..model.units.len() {
            model.check_unit(unit)?;
        }

        Ok(model)
    }

    /// Class registry.
    pub fn classes(&self) -> &[SchoolClass] {
        &self.classes
    }

    /// Room registry.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Teacher registry.
    pub fn teachers(&self) -> &[Teacher] {
        &self.teachers
    }

    /// Slot registry, sorted by `(weekday, shift, period)`.
    pub fn slots(&self) -> &[ScheduleSlot] {
        &self.slots
    }

    /// Fixed assignments as supplied.
    pub fn fixed_assignments(&self) -> &[FixedAssignment] {
        &self.fixed
    }

    /// Required session units, in gene order.
    pub fn units(&self) -> &[SessionUnit] {
        &self.units
    }

    /// Total number of required sessions (chromosome length).
    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    pub fn class(&self, idx: usize) -> &SchoolClass {
        &self.classes[idx]
    }

    pub fn room(&self, idx: usize) -> &Room {
        &self.rooms[idx]
    }

    pub fn teacher(&self, idx: usize) -> &Teacher {
        &self.teachers[idx]
    }

    pub fn slot(&self, idx: usize) -> &ScheduleSlot {
        &self.slots[idx]
    }

    /// Index of a class by ID.
    pub fn class_idx(&self, id: &str) -> Option<usize> {
        self.class_index.get(id).copied()
    }

    /// Index of a room by ID.
    pub fn room_idx(&self, id: &str) -> Option<usize> {
        self.room_index.get(id).copied()
    }

    /// Index of a teacher by ID.
    pub fn teacher_idx(&self, id: &str) -> Option<usize> {
        self.teacher_index.get(id).copied()
    }

    /// Index of a slot by ID.
    pub fn slot_idx(&self, id: &str) -> Option<usize> {
        self.slot_index.get(id).copied()
    }

    /// Gene position of a (class, session) pair.
    pub fn unit_idx(&self, class_id: &str, session: usize) -> Option<usize> {
        let class = self.class_idx(class_id)?;
        self.units
            .iter()
            .position(|u| u.class == class && u.session == session)
    }

    /// Subject of a unit's session.
    pub fn unit_subject(&self, unit: usize) -> &str {
        let u = self.units[unit];
        &self.classes[u.class].sessions[u.session].subject
    }

    /// Teachers of a subject.
    pub fn teachers_for_subject(&self, subject: &str) -> &[usize] {
        self.teachers_by_subject
            .get(subject)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Rooms seating at least `students`, ascending by capacity.
    pub fn rooms_with_capacity_at_least(&self, students: u32) -> &[usize] {
        let start = self
            .rooms_by_capacity
            .partition_point(|&r| self.rooms[r].capacity < students);
        &self.rooms_by_capacity[start..]
    }

    /// Teacher a unit is locked to, if any.
    pub fn locked_teacher(&self, unit: usize) -> Option<usize> {
        let u = self.units[unit];
        self.locks.get(&(u.class, u.session)).copied()
    }

    /// Teachers allowed for a unit regardless of shift: the lock, or every
    /// teacher of the session's subject.
    pub fn candidate_teachers(&self, unit: usize) -> Vec<usize> {
        match self.locked_teacher(unit) {
            Some(t) => vec![t],
            None => self.teachers_for_subject(self.unit_subject(unit)).to_vec(),
        }
    }

    /// Whether `teacher` is available in the shift of `slot`.
    #[inline]
    pub fn is_available(&self, teacher: usize, slot: usize) -> bool {
        self.teachers[teacher].is_available(self.slots[slot].shift)
    }

    /// All legal (slot, teacher) pairs of a unit, slot-major.
    pub fn legal_pairs(&self, unit: usize) -> Vec<(usize, usize)> {
        let candidates = self.candidate_teachers(unit);
        let mut pairs = Vec::new();
        for slot in 0..self.slots.len() {
            for &teacher in &candidates {
                if self.is_available(teacher, slot) {
                    pairs.push((slot, teacher));
                }
            }
        }
        pairs
    }

    /// Fails if a unit has no legal (slot, teacher) pair.
    pub fn check_unit(&self, unit: usize) -> Result<(), DataInfeasibility> {
        let candidates = self.candidate_teachers(unit);
        let reason = if candidates.is_empty() {
            format!("no teacher teaches '{}'", self.unit_subject(unit))
        } else if self.legal_pairs(unit).is_empty() {
            "no candidate teacher is available in the shift of any slot".to_string()
        } else {
            return Ok(());
        };

        let u = self.units[unit];
        Err(DataInfeasibility {
            class_id: self.classes[u.class].id.clone(),
            session: u.session,
            subject: self.unit_subject(unit).to_string(),
            reason,
        })
    }

    /// Classes whose enrollment exceeds every room's capacity.
    ///
    /// Such classes always carry a capacity violation. They are not
    /// rejected: capacity is scored, not enforced.
    pub fn capacity_shortfalls(&self) -> Vec<&SchoolClass> {
        self.classes
            .iter()
            .filter(|c| self.rooms_with_capacity_at_least(c.students).is_empty())
            .collect()
    }
}

fn index_by_id<'a>(ids: impl Iterator<Item = &'a str>) -> HashMap<String, usize> {
    ids.enumerate().map(|(i, id)| (id.to_string(), i)).collect()
}
