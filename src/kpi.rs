//! Timetable quality metrics (KPIs).
//!
//! Computes summary indicators from a decoded timetable and the domain
//! model it was built from.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Seat occupancy | students / room capacity, per placed session |
//! | Slot utilization | used (slot, room) cells / (slots × rooms) |
//! | Teacher utilization | assigned sessions / max workload |
//! | Rooms used | Distinct rooms with at least one session |
//! | Violations | Violations recorded on the timetable |

use std::collections::{HashMap, HashSet};

use crate::domain::DomainModel;
use crate::models::Timetable;

/// Timetable performance indicators.
///
/// Ratios are in 0.0..=1.0 except seat occupancy, which exceeds 1.0 when a
/// room is over capacity.
#[derive(Debug, Clone)]
pub struct TimetableKpi {
    /// Mean seat occupancy over all placements.
    pub avg_room_occupancy: f64,
    /// Mean seat occupancy per room id.
    pub occupancy_by_room: HashMap<String, f64>,
    /// Sessions per teacher id.
    pub teacher_loads: HashMap<String, u32>,
    /// Sessions / max workload per teacher id.
    pub teacher_utilization: HashMap<String, f64>,
    /// Fraction of (slot, room) cells in use.
    pub slot_utilization: f64,
    /// Distinct rooms in use.
    pub rooms_used: usize,
    /// Number of recorded violations.
    pub violation_count: usize,
}

impl TimetableKpi {
    /// Computes KPIs for a timetable.
    ///
    /// Placements referring to ids unknown to `domain` are skipped.
    pub fn calculate(timetable: &Timetable, domain: &DomainModel) -> Self {
        let mut fills: HashMap<String, (f64, usize)> = HashMap::new();
        let mut total_fill = 0.0;
        let mut counted = 0usize;
        let mut cells: HashSet<(&str, &str)> = HashSet::new();

        for p in &timetable.placements {
            let (Some(class), Some(room)) = (domain.class_idx(&p.class_id), domain.room_idx(&p.room_id))
            else {
                continue;
            };
            cells.insert((p.slot_id.as_str(), p.room_id.as_str()));

            let capacity = domain.room(room).capacity;
            if capacity == 0 {
                continue;
            }
            let fill = f64::from(domain.class(class).students) / f64::from(capacity);
            let entry = fills.entry(p.room_id.clone()).or_insert((0.0, 0));
            entry.0 += fill;
            entry.1 += 1;
            total_fill += fill;
            counted += 1;
        }

        let occupancy_by_room: HashMap<String, f64> = fills
            .into_iter()
            .map(|(id, (sum, n))| (id, sum / n as f64))
            .collect();

        let avg_room_occupancy = if counted == 0 {
            0.0
        } else {
            total_fill / counted as f64
        };

        let teacher_loads = timetable.teacher_loads();
        let teacher_utilization = teacher_loads
            .iter()
            .filter_map(|(id, &load)| {
                let teacher = domain.teacher(domain.teacher_idx(id)?);
                (teacher.max_workload > 0)
                    .then(|| (id.clone(), f64::from(load) / f64::from(teacher.max_workload)))
            })
            .collect();

        let total_cells = domain.slots().len() * domain.rooms().len();
        let slot_utilization = if total_cells == 0 {
            0.0
        } else {
            cells.len() as f64 / total_cells as f64
        };

        let rooms_used = cells.iter().map(|&(_, room)| room).collect::<HashSet<_>>().len();

        Self {
            avg_room_occupancy,
            occupancy_by_room,
            teacher_loads,
            teacher_utilization,
            slot_utilization,
            rooms_used,
            violation_count: timetable.violations.len(),
        }
    }

    /// Whether the timetable meets the given quality thresholds.
    pub fn meets_thresholds(&self, max_violations: usize, min_occupancy: f64) -> bool {
        self.violation_count <= max_violations && self.avg_room_occupancy >= min_occupancy
    }
}
