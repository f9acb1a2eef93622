//! Fitness evaluation.
//!
//! Scores a chromosome as a weighted sum of constraint violations. Lower is
//! better; zero is a fully feasible timetable.
//!
//! | Category | Counted per | Default weight |
//! |----------|-------------|----------------|
//! | Time conflict | pair of genes sharing slot and teacher, room, or class | 100 |
//! | Capacity | gene whose class exceeds the room | 50 |
//! | Workload | session beyond a teacher's ceiling | 10 |
//! | Availability | gene outside the teacher's shifts | 80 |
//!
//! Scoring is a pure function of the chromosome and the domain model.

mod evaluator;
mod score;

pub use evaluator::FitnessEvaluator;
pub use score::{ConstraintWeights, FitnessScore, ViolationCounts};
