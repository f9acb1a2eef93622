//! Timetabling domain models.
//!
//! Plain data types describing the timetabling problem and its solution.
//! Entities are referenced by string identifiers; the
//! [`DomainModel`](crate::DomainModel) turns them into indexed registries.
//!
//! # Domain Mappings
//!
//! | u-timetable | Meaning |
//! |-------------|---------|
//! | SchoolClass | Student group with required weekly sessions |
//! | Room | Physical space with a seating capacity |
//! | Teacher | Staff member teaching one subject in some shifts |
//! | ScheduleSlot | One period of the weekly grid |
//! | Timetable | Decoded solution (placements + violations) |

mod class;
mod fixed;
mod room;
mod slot;
mod teacher;
mod timetable;

pub use class::{SchoolClass, Session};
pub use fixed::FixedAssignment;
pub use room::{Room, RoomType};
pub use slot::{ScheduleSlot, Shift, Weekday};
pub use teacher::{Availability, Teacher};
pub use timetable::{Placement, Timetable, Violation, ViolationType};
