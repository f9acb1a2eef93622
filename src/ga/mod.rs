//! Genetic timetable optimization.
//!
//! A self-contained generational GA specialized to timetabling.
//!
//! # Encoding
//!
//! One gene per required (class, session) unit, holding a (slot, room,
//! teacher) triple. Slot and teacher are always drawn together from the
//! unit's legal pairs, so every gene respects subject qualification,
//! shift availability, and teacher locks. Room capacity is left to the
//! fitness function.
//!
//! # Submodules
//!
//! - [`operators`]: Runtime-selectable crossover and mutation strategies
//! - [`EvolutionEngine`]: Stepwise generational loop with elitism
//!
//! # Reference
//! - Goldberg (1989), "Genetic Algorithms in Search, Optimization and Machine Learning"
//! - Burke & Petrovic (2002), "Recent research directions in automated timetabling"

mod chromosome;
mod config;
mod encoding;
mod engine;
pub mod operators;
mod selection;

pub use chromosome::{Chromosome, Gene};
pub use config::EvolutionConfig;
pub use encoding::{Encoding, GeneComponent, GeneDomain};
pub use engine::{
    EngineState, EvolutionEngine, EvolutionResult, GenerationStats, Individual, run,
};
pub use operators::{CrossoverType, GeneticOperators, MutationMode};
pub use selection::tournament_select;
