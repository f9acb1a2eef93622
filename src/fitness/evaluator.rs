//! Constraint-violation scoring.
//!
//! # Algorithm
//!
//! One pass over the genes in unit order, with three occupancy maps built
//! fresh for each evaluation:
//! - (slot, teacher), (slot, room), (slot, class) -> genes holding the key
//!
//! A time conflict is a pair of genes sharing a slot and at least one of
//! teacher, room, or class. Each gene adds one conflict per distinct earlier
//! gene it collides with; a pair sharing several keys counts once, so k genes
//! all colliding in one slot add k(k − 1)/2.
//! Capacity and availability are checked per gene; workload is the summed
//! excess of each teacher's session count over their ceiling.
//!
//! # Complexity
//! O(n + c) expected per evaluation, n = chromosome length, c = conflicting pairs.

use std::collections::HashMap;

use rayon::prelude::*;

use super::score::{ConstraintWeights, FitnessScore, ViolationCounts};
use crate::domain::DomainModel;
use crate::ga::Chromosome;
use crate::models::{Violation, ViolationType};

/// Scores chromosomes against the constraint catalog.
///
/// Holds only shared references and weights; scoring takes `&self` and
/// keeps no state between calls, so one evaluator serves parallel workers.
#[derive(Debug, Clone)]
pub struct FitnessEvaluator<'a> {
    domain: &'a DomainModel,
    weights: ConstraintWeights,
}

/// Per-evaluation slot occupancy: genes holding each (slot, key).
#[derive(Default)]
struct Occupancy {
    teachers: HashMap<(usize, usize), Vec<usize>>,
    rooms: HashMap<(usize, usize), Vec<usize>>,
    classes: HashMap<(usize, usize), Vec<usize>>,
}

/// A collision with one earlier gene and the keys they share.
#[derive(Debug, Clone, Copy)]
struct Clash {
    other: usize,
    teacher: bool,
    room: bool,
    class: bool,
}

impl Occupancy {
    fn with_capacity(n: usize) -> Self {
        Self {
            teachers: HashMap::with_capacity(n),
            rooms: HashMap::with_capacity(n),
            classes: HashMap::with_capacity(n),
        }
    }

    /// Occupies all three keys for `gene` and returns one clash per distinct
    /// earlier gene sharing any of them.
    fn occupy(
        &mut self,
        gene: usize,
        slot: usize,
        teacher: usize,
        room: usize,
        class: usize,
    ) -> Vec<Clash> {
        let mut clashes: Vec<Clash> = Vec::new();

        let holders = self.teachers.entry((slot, teacher)).or_default();
        for &other in holders.iter() {
            clash_with(&mut clashes, other).teacher = true;
        }
        holders.push(gene);

        let holders = self.rooms.entry((slot, room)).or_default();
        for &other in holders.iter() {
            clash_with(&mut clashes, other).room = true;
        }
        holders.push(gene);

        let holders = self.classes.entry((slot, class)).or_default();
        for &other in holders.iter() {
            clash_with(&mut clashes, other).class = true;
        }
        holders.push(gene);

        clashes
    }
}

fn clash_with(clashes: &mut Vec<Clash>, other: usize) -> &mut Clash {
    let pos = match clashes.iter().position(|c| c.other == other) {
        Some(pos) => pos,
        None => {
            clashes.push(Clash {
                other,
                teacher: false,
                room: false,
                class: false,
            });
            clashes.len() - 1
        }
    };
    &mut clashes[pos]
}

impl<'a> FitnessEvaluator<'a> {
    /// Creates an evaluator with the given weights.
    pub fn new(domain: &'a DomainModel, weights: ConstraintWeights) -> Self {
        Self { domain, weights }
    }

    /// Creates an evaluator with default weights.
    pub fn with_default_weights(domain: &'a DomainModel) -> Self {
        Self::new(domain, ConstraintWeights::default())
    }

    pub fn weights(&self) -> &ConstraintWeights {
        &self.weights
    }

    /// Scores one chromosome.
    ///
    /// The chromosome must hold one gene per session unit of the domain
    /// model, as produced by [`Encoding`](crate::ga::Encoding).
    pub fn score(&self, chromosome: &Chromosome) -> FitnessScore {
        FitnessScore::from_counts(self.count(chromosome), &self.weights)
    }

    /// Scores many chromosomes, preserving order.
    pub fn score_all(&self, chromosomes: &[Chromosome], parallel: bool) -> Vec<FitnessScore> {
        if parallel {
            chromosomes.par_iter().map(|c| self.score(c)).collect()
        } else {
            chromosomes.iter().map(|c| self.score(c)).collect()
        }
    }

    /// Raw violation counts.
    pub fn count(&self, chromosome: &Chromosome) -> ViolationCounts {
        let domain = self.domain;
        debug_assert_eq!(chromosome.len(), domain.unit_count(), "one gene per session unit");
        let mut counts = ViolationCounts::default();
        let mut occupancy = Occupancy::with_capacity(chromosome.len());
        let mut loads = vec![0u32; domain.teachers().len()];

        for (idx, (gene, unit)) in chromosome.genes.iter().zip(domain.units()).enumerate() {
            let clashes = occupancy.occupy(idx, gene.slot, gene.teacher, gene.room, unit.class);
            counts.time_conflicts += clashes.len() as u32;
            if !domain.room(gene.room).fits(domain.class(unit.class).students) {
                counts.capacity += 1;
            }
            if !domain.is_available(gene.teacher, gene.slot) {
                counts.availability += 1;
            }
            loads[gene.teacher] += 1;
        }

        counts.workload = loads
            .iter()
            .zip(domain.teachers())
            .map(|(&load, t)| load.saturating_sub(t.max_workload))
            .sum();

        counts
    }

    /// Lists every violation with the entities involved.
    ///
    /// Produces exactly as many violations of each type as [`count`](Self::count)
    /// reports (one per conflicting pair), except workload, which yields one
    /// violation per overloaded teacher.
    pub fn explain(&self, chromosome: &Chromosome) -> Vec<Violation> {
        let domain = self.domain;
        debug_assert_eq!(chromosome.len(), domain.unit_count(), "one gene per session unit");
        let mut violations = Vec::new();
        let mut occupancy = Occupancy::with_capacity(chromosome.len());
        let mut loads = vec![0u32; domain.teachers().len()];

        for (idx, (gene, unit)) in chromosome.genes.iter().zip(domain.units()).enumerate() {
            let class = domain.class(unit.class);
            let room = domain.room(gene.room);
            let teacher = domain.teacher(gene.teacher);
            let slot = domain.slot(gene.slot);

            for clash in occupancy.occupy(idx, gene.slot, gene.teacher, gene.room, unit.class) {
                let mut what = Vec::new();
                if clash.teacher {
                    what.push(format!("teacher '{}'", teacher.id));
                }
                if clash.room {
                    what.push(format!("room '{}'", room.id));
                }
                if clash.class {
                    what.push(format!("class '{}'", class.id));
                }
                let other = domain.units()[clash.other];
                violations.push(
                    Violation::new(
                        ViolationType::TimeConflict,
                        &class.id,
                        format!(
                            "Session {} of class '{}' and session {} of class '{}' share {} in slot '{}'",
                            unit.session,
                            class.id,
                            other.session,
                            domain.class(other.class).id,
                            what.join(", "),
                            slot.id
                        ),
                    )
                    .at_slot(&slot.id),
                );
            }

            if !room.fits(class.students) {
                violations.push(
                    Violation::new(
                        ViolationType::CapacityExceeded,
                        &room.id,
                        format!(
                            "Room '{}' (capacity {}) hosts class '{}' with {} students",
                            room.id, room.capacity, class.id, class.students
                        ),
                    )
                    .at_slot(&slot.id),
                );
            }

            if !teacher.is_available(slot.shift) {
                violations.push(
                    Violation::new(
                        ViolationType::TeacherUnavailable,
                        &teacher.id,
                        format!(
                            "Teacher '{}' is not available in the {} shift but teaches class '{}' in slot '{}'",
                            teacher.id, slot.shift, class.id, slot.id
                        ),
                    )
                    .at_slot(&slot.id),
                );
            }

            loads[gene.teacher] += 1;
        }

        for (teacher, &load) in domain.teachers().iter().zip(&loads) {
            if load > teacher.max_workload {
                violations.push(Violation::new(
                    ViolationType::WorkloadExceeded,
                    &teacher.id,
                    format!(
                        "Teacher '{}' exceeds workload ({} > {})",
                        teacher.id, load, teacher.max_workload
                    ),
                ));
            }
        }

        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::{Encoding, Gene};
    use crate::models::{
        Availability, Room, ScheduleSlot, SchoolClass, Shift, Teacher, Weekday,
    };
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn slots() -> Vec<ScheduleSlot> {
        vec![
            ScheduleSlot::new("S1", Weekday::Monday, Shift::Morning, 1),
            ScheduleSlot::new("S2", Weekday::Monday, Shift::Morning, 2),
            ScheduleSlot::new("S3", Weekday::Monday, Shift::Afternoon, 1),
        ]
    }

    /// Two classes, two math teachers, three rooms.
    fn sample_domain() -> DomainModel {
        DomainModel::new(
            vec![
                SchoolClass::new("C1", 25).with_sessions("math", 2),
                SchoolClass::new("C2", 40).with_session("math"),
            ],
            vec![Room::new("R30", 30), Room::new("R45", 45), Room::new("R20", 20)],
            vec![
                Teacher::new("P1", "math")
                    .with_availability(Availability::only(Shift::Morning))
                    .with_max_workload(2),
                Teacher::new("P2", "math"),
            ],
            slots(),
            vec![],
        )
        .unwrap()
    }

    #[test]
    fn test_conflict_free_timetable_scores_zero() {
        let d = sample_domain();
        let eval = FitnessEvaluator::with_default_weights(&d);
        // C1/0: S1 R30 P1; C1/1: S2 R30 P1; C2/0: S1 R45 P2
        let ch = Chromosome::new(vec![
            Gene::new(0, 0, 0),
            Gene::new(1, 0, 0),
            Gene::new(0, 1, 1),
        ]);
        let score = eval.score(&ch);
        assert_eq!(score.penalty, 0.0);
        assert!(score.is_feasible());
        assert!(eval.explain(&ch).is_empty());
    }

    #[test]
    fn test_capacity_violation_counts_once() {
        let d = sample_domain();
        let eval = FitnessEvaluator::with_default_weights(&d);
        // C2 (40 students) in R30
        let ch = Chromosome::new(vec![
            Gene::new(0, 0, 0),
            Gene::new(1, 0, 0),
            Gene::new(0, 0, 1),
        ]);
        // same capacity violation without the S1/R30 room clash
        let ch_isolated = Chromosome::new(vec![
            Gene::new(0, 1, 0),
            Gene::new(1, 1, 0),
            Gene::new(2, 0, 1),
        ]);
        let isolated = eval.score(&ch_isolated);
        assert_eq!(isolated.counts.capacity, 1);
        assert_eq!(isolated.counts.time_conflicts, 0);
        assert_eq!(isolated.penalty, 50.0);

        let both = eval.score(&ch);
        assert_eq!(both.counts.capacity, 1);
        assert_eq!(both.counts.time_conflicts, 1);
        assert_eq!(both.penalty, 150.0);
    }

    #[test]
    fn test_teacher_conflict() {
        let d = sample_domain();
        let eval = FitnessEvaluator::with_default_weights(&d);
        // P2 teaches C1/0 and C2/0 in S3, different rooms
        let ch = Chromosome::new(vec![
            Gene::new(2, 0, 1),
            Gene::new(0, 0, 0),
            Gene::new(2, 1, 1),
        ]);
        let score = eval.score(&ch);
        assert_eq!(score.counts.time_conflicts, 1);
        assert_eq!(score.penalty, 100.0);

        let v = eval.explain(&ch);
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].violation_type, ViolationType::TimeConflict);
        assert!(v[0].message.contains("teacher 'P2'"));
        assert_eq!(v[0].slot_id.as_deref(), Some("S3"));
    }

    #[test]
    fn test_class_conflict() {
        let d = sample_domain();
        let eval = FitnessEvaluator::with_default_weights(&d);
        // both C1 sessions in S1, different rooms and teachers
        let ch = Chromosome::new(vec![
            Gene::new(0, 0, 0),
            Gene::new(0, 1, 1),
            Gene::new(2, 1, 1),
        ]);
        assert_eq!(eval.count(&ch).time_conflicts, 1);
        let v = eval.explain(&ch);
        assert!(v[0].message.contains("class 'C1'"));
    }

    #[test]
    fn test_three_way_collision_counts_every_pair() {
        let d = sample_domain();
        let eval = FitnessEvaluator::with_default_weights(&d);
        let ch = Chromosome::new(vec![
            Gene::new(0, 1, 1),
            Gene::new(0, 1, 1),
            Gene::new(0, 1, 1),
        ]);
        assert_eq!(eval.count(&ch).time_conflicts, 3);
        assert_eq!(eval.explain(&ch).len(), 3);
    }

    #[test]
    fn test_gene_clashing_with_two_genes_on_different_keys() {
        // A = (S, R1, T), B = (S, R2, U), C = (S, R2, T): C shares T with A
        // and R2 with B, two conflicting pairs
        let d = DomainModel::new(
            vec![
                SchoolClass::new("CA", 20).with_session("math"),
                SchoolClass::new("CB", 20).with_session("math"),
                SchoolClass::new("CC", 20).with_session("math"),
            ],
            vec![Room::new("R1", 30), Room::new("R2", 30)],
            vec![Teacher::new("T", "math"), Teacher::new("U", "math")],
            vec![ScheduleSlot::new("S", Weekday::Monday, Shift::Morning, 1)],
            vec![],
        )
        .unwrap();
        let eval = FitnessEvaluator::with_default_weights(&d);
        let ch = Chromosome::new(vec![
            Gene::new(0, 0, 0),
            Gene::new(0, 1, 1),
            Gene::new(0, 1, 0),
        ]);

        let score = eval.score(&ch);
        assert_eq!(score.counts.time_conflicts, 2);
        assert_eq!(score.penalty, 200.0);

        let v = eval.explain(&ch);
        assert_eq!(v.len(), 2);
        assert!(v[0].message.contains("class 'CA'"));
        assert!(v[0].message.contains("teacher 'T'"));
        assert!(v[1].message.contains("class 'CB'"));
        assert!(v[1].message.contains("room 'R2'"));
    }

    #[test]
    fn test_pair_sharing_several_keys_counts_once() {
        let d = sample_domain();
        let eval = FitnessEvaluator::with_default_weights(&d);
        // C1/0 and C2/0 share slot, room, and teacher; C1/1 is elsewhere
        let ch = Chromosome::new(vec![
            Gene::new(0, 1, 1),
            Gene::new(1, 1, 0),
            Gene::new(0, 1, 1),
        ]);
        assert_eq!(eval.count(&ch).time_conflicts, 1);
        let v = eval.explain(&ch);
        assert_eq!(v.len(), 1);
        assert!(v[0].message.contains("teacher 'P2', room 'R45'"));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "one gene per session unit")]
    fn test_short_chromosome_is_rejected() {
        let d = sample_domain();
        let eval = FitnessEvaluator::with_default_weights(&d);
        eval.score(&Chromosome::new(vec![Gene::new(0, 0, 0)]));
    }

    #[test]
    fn test_room_mutation_into_small_room_adds_capacity_penalty() {
        let d = sample_domain();
        let enc = Encoding::new(&d).unwrap();
        let eval = FitnessEvaluator::with_default_weights(&d);
        let r45 = d.room_idx("R45").unwrap();
        // C2 (40 students) alone in S3, seated in R45
        let mut ch = Chromosome::new(vec![
            Gene::new(0, 0, 0),
            Gene::new(1, 0, 0),
            Gene::new(2, r45, 1),
        ]);
        let before = eval.score(&ch);
        assert_eq!(before.penalty, 0.0);

        let mut rng = SmallRng::seed_from_u64(17);
        while ch.genes[2].room == r45 {
            enc.redraw_room(&mut ch.genes[2], &mut rng);
        }

        let after = eval.score(&ch);
        assert_eq!(after.counts.capacity, 1);
        assert_eq!(after.counts.time_conflicts, before.counts.time_conflicts);
        assert_eq!(after.contribution(ViolationType::CapacityExceeded, eval.weights()), 50.0);
        assert_eq!(after.penalty, 50.0);
    }

    #[test]
    fn test_availability_violation() {
        let d = sample_domain();
        let eval = FitnessEvaluator::with_default_weights(&d);
        // P1 (mornings only) in afternoon slot S3
        let ch = Chromosome::new(vec![
            Gene::new(2, 0, 0),
            Gene::new(0, 0, 0),
            Gene::new(1, 1, 1),
        ]);
        let score = eval.score(&ch);
        assert_eq!(score.counts.availability, 1);
        assert_eq!(score.penalty, 80.0);
        let v = eval.explain(&ch);
        assert_eq!(v[0].violation_type, ViolationType::TeacherUnavailable);
        assert_eq!(v[0].entity_id, "P1");
    }

    #[test]
    fn test_workload_excess() {
        let d = sample_domain();
        let eval = FitnessEvaluator::with_default_weights(&d);
        // P1 (max 2) teaches all three sessions; only two morning slots exist,
        // so the third also double-books P1 in S1
        let ch = Chromosome::new(vec![
            Gene::new(0, 0, 0),
            Gene::new(1, 0, 0),
            Gene::new(0, 1, 0),
        ]);
        let counts = eval.count(&ch);
        assert_eq!(counts.workload, 1);
        assert_eq!(counts.time_conflicts, 1);
        assert_eq!(eval.score(&ch).penalty, 100.0 + 10.0);

        let v = eval.explain(&ch);
        let workload: Vec<_> = v
            .iter()
            .filter(|v| v.violation_type == ViolationType::WorkloadExceeded)
            .collect();
        assert_eq!(workload.len(), 1);
        assert!(workload[0].message.contains("3 > 2"));
    }

    #[test]
    fn test_custom_weights() {
        let d = sample_domain();
        let weights = ConstraintWeights::default().with_weight(ViolationType::CapacityExceeded, 7.0);
        let eval = FitnessEvaluator::new(&d, weights);
        let ch = Chromosome::new(vec![
            Gene::new(0, 1, 0),
            Gene::new(1, 1, 0),
            Gene::new(2, 2, 1),
        ]);
        let score = eval.score(&ch);
        assert_eq!(score.counts.capacity, 1);
        assert_eq!(score.penalty, 7.0);
    }

    #[test]
    fn test_penalty_zero_iff_no_violation() {
        let d = sample_domain();
        let eval = FitnessEvaluator::with_default_weights(&d);
        let enc = Encoding::new(&d).unwrap();
        let mut rng = SmallRng::seed_from_u64(42);

        for _ in 0..300 {
            let ch = enc.random_chromosome(&mut rng);
            let score = eval.score(&ch);
            assert!(score.penalty >= 0.0);
            assert_eq!(score.penalty == 0.0, score.counts.total() == 0);
        }
    }

    #[test]
    fn test_scoring_is_deterministic_and_parallel_safe() {
        let d = sample_domain();
        let eval = FitnessEvaluator::with_default_weights(&d);
        let enc = Encoding::new(&d).unwrap();
        let mut rng = SmallRng::seed_from_u64(9);
        let population: Vec<Chromosome> = (0..64).map(|_| enc.random_chromosome(&mut rng)).collect();

        let sequential = eval.score_all(&population, false);
        let parallel = eval.score_all(&population, true);
        assert_eq!(sequential, parallel);
        assert_eq!(eval.score(&population[0]), sequential[0]);
    }
}
