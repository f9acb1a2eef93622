//! Room model.
//!
//! Rooms host class sessions. A room has a seating capacity and a type tag
//! (regular classroom, laboratory, ...). Capacity is compared against class
//! enrollment when scoring a timetable.

use serde::{Deserialize, Serialize};

/// A room that can host class sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    /// Unique room identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Seating capacity (students).
    pub capacity: u32,
    /// Room classification.
    pub room_type: RoomType,
}

/// Room type classification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomType {
    /// Ordinary classroom.
    Regular,
    /// Laboratory (science, computing, ...).
    Lab,
    /// Domain-specific type (gym, auditorium, ...).
    Custom(String),
}

impl Default for RoomType {
    fn default() -> Self {
        Self::Regular
    }
}

impl Room {
    /// Creates a room with the given capacity.
    pub fn new(id: impl Into<String>, capacity: u32) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            capacity,
            room_type: RoomType::Regular,
        }
    }

    /// Creates a laboratory.
    pub fn lab(id: impl Into<String>, capacity: u32) -> Self {
        Self::new(id, capacity).with_type(RoomType::Lab)
    }

    /// Sets the room name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the room type.
    pub fn with_type(mut self, room_type: RoomType) -> Self {
        self.room_type = room_type;
        self
    }

    /// Whether `students` fit in this room.
    #[inline]
    pub fn fits(&self, students: u32) -> bool {
        students <= self.capacity
    }
}
