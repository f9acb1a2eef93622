//! School timetabling for the U-Engine ecosystem.
//!
//! Assigns every required class session a time slot, a room, and a
//! teacher, then searches for the assignment with the fewest constraint
//! violations using a genetic algorithm.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `SchoolClass`, `Room`, `Teacher`,
//!   `ScheduleSlot`, `FixedAssignment`, `Timetable`
//! - **`validation`**: Input integrity checks (duplicate IDs, lock references)
//! - **`domain`**: Validated, indexed problem instance with legality queries
//! - **`fitness`**: Weighted constraint-violation scoring
//! - **`ga`**: Chromosome encoding, operators, and the evolution engine
//! - **`kpi`**: Timetable quality indicators (room occupancy, teacher load)
//!
//! # Constraints
//!
//! | Constraint | Kind | Handling |
//! |------------|------|----------|
//! | Subject qualification | hard | enforced by the encoding |
//! | Shift availability | hard | enforced by the encoding, scored if violated |
//! | Fixed teacher | hard | enforced by the encoding |
//! | Time conflict | hard | scored |
//! | Room capacity | hard | scored |
//! | Teacher workload | soft | scored |
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - Burke & Petrovic (2002), "Recent research directions in automated timetabling"

pub mod domain;
pub mod error;
pub mod fitness;
pub mod ga;
pub mod kpi;
pub mod models;
pub mod validation;

pub use domain::{DomainModel, SessionUnit};
pub use error::{DataInfeasibility, TimetableError};
pub use ga::{EvolutionConfig, EvolutionEngine, EvolutionResult, run};
