//! Fitness scores and constraint weights.

use serde::{Deserialize, Serialize};

use crate::error::TimetableError;
use crate::models::ViolationType;

/// Penalty weight per constraint category.
///
/// # Defaults
///
/// | Category | Weight |
/// |----------|--------|
/// | Time conflict | 100 |
/// | Capacity | 50 |
/// | Workload | 10 |
/// | Availability | 80 |
///
/// ```
/// use u_timetable::fitness::ConstraintWeights;
/// use u_timetable::models::ViolationType;
///
/// let w = ConstraintWeights::default().with_weight(ViolationType::WorkloadExceeded, 25.0);
/// assert_eq!(w.weight(ViolationType::TimeConflict), 100.0);
/// assert_eq!(w.weight(ViolationType::WorkloadExceeded), 25.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstraintWeights {
    pub time_conflict: f64,
    pub capacity: f64,
    pub workload: f64,
    pub availability: f64,
}

impl Default for ConstraintWeights {
    fn default() -> Self {
        Self {
            time_conflict: 100.0,
            capacity: 50.0,
            workload: 10.0,
            availability: 80.0,
        }
    }
}

impl ConstraintWeights {
    /// Weight of a category.
    pub fn weight(&self, category: ViolationType) -> f64 {
        match category {
            ViolationType::TimeConflict => self.time_conflict,
            ViolationType::CapacityExceeded => self.capacity,
            ViolationType::WorkloadExceeded => self.workload,
            ViolationType::TeacherUnavailable => self.availability,
        }
    }

    /// Sets the weight of a category.
    pub fn with_weight(mut self, category: ViolationType, weight: f64) -> Self {
        match category {
            ViolationType::TimeConflict => self.time_conflict = weight,
            ViolationType::CapacityExceeded => self.capacity = weight,
            ViolationType::WorkloadExceeded => self.workload = weight,
            ViolationType::TeacherUnavailable => self.availability = weight,
        }
        self
    }

    /// Checks that every weight is finite and strictly positive, so a zero
    /// penalty means zero violations.
    pub fn validate(&self) -> Result<(), TimetableError> {
        for category in ViolationType::ALL {
            let w = self.weight(category);
            if !w.is_finite() || w <= 0.0 {
                return Err(TimetableError::InvalidConfig(format!(
                    "weight for {category:?} must be finite and positive, got {w}"
                )));
            }
        }
        Ok(())
    }
}

/// Violation counts per category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationCounts {
    /// Gene pairs sharing a slot and a teacher, class, or room.
    pub time_conflicts: u32,
    /// Genes whose class does not fit in the room.
    pub capacity: u32,
    /// Sessions assigned beyond teachers' workload ceilings (summed excess).
    pub workload: u32,
    /// Genes whose teacher is not available in the slot's shift.
    pub availability: u32,
}

impl ViolationCounts {
    /// Count of a category.
    pub fn get(&self, category: ViolationType) -> u32 {
        match category {
            ViolationType::TimeConflict => self.time_conflicts,
            ViolationType::CapacityExceeded => self.capacity,
            ViolationType::WorkloadExceeded => self.workload,
            ViolationType::TeacherUnavailable => self.availability,
        }
    }

    /// Sum over all categories.
    pub fn total(&self) -> u32 {
        self.time_conflicts + self.capacity + self.workload + self.availability
    }

    /// Sum over hard categories.
    pub fn hard(&self) -> u32 {
        ViolationType::ALL
            .iter()
            .filter(|c| c.is_hard())
            .map(|&c| self.get(c))
            .sum()
    }
}

/// Weighted penalty plus its per-category breakdown. Lower is better.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FitnessScore {
    /// Σ weight × count. Zero means a fully feasible timetable.
    pub penalty: f64,
    /// Per-category counts.
    pub counts: ViolationCounts,
}

impl FitnessScore {
    /// Weighs counts into a score.
    pub fn from_counts(counts: ViolationCounts, weights: &ConstraintWeights) -> Self {
        let penalty = ViolationType::ALL
            .iter()
            .map(|&c| weights.weight(c) * f64::from(counts.get(c)))
            .sum();
        Self { penalty, counts }
    }

    /// Whether no category has a violation.
    pub fn is_feasible(&self) -> bool {
        self.counts.total() == 0
    }

    /// Weighted contribution of one category.
    pub fn contribution(&self, category: ViolationType, weights: &ConstraintWeights) -> f64 {
        weights.weight(category) * f64::from(self.counts.get(category))
    }
}
