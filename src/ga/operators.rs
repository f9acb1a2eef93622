//! Genetic operators for timetable chromosomes.
//!
//! Provides runtime-selectable crossover and mutation strategies via
//! [`GeneticOperators`]. Every operator respects teacher locks: a locked
//! gene is never exchanged between parents and its teacher is never redrawn.
//!
//! # Mutation semantics
//!
//! The mutation rate is interpreted according to [`MutationMode`]:
//! - `PerGene` (default): each gene mutates independently with probability `rate`.
//! - `PerIndividual`: with probability `rate`, one uniformly chosen gene mutates.
//!
//! A mutating gene redraws one of its free components (slot, room, or an
//! unlocked teacher), chosen uniformly, inside its legality domain.
//!
//! ```
//! use u_timetable::ga::{CrossoverType, GeneticOperators, MutationMode};
//!
//! let ops = GeneticOperators::default();
//! assert_eq!(ops.crossover_type, CrossoverType::TwoPoint);
//! assert_eq!(ops.mutation_mode, MutationMode::PerGene);
//! ```

use rand::Rng;
use rand::prelude::IndexedRandom;
use serde::{Deserialize, Serialize};

use super::chromosome::{Chromosome, Gene};
use super::encoding::{Encoding, GeneComponent};

/// Crossover strategy: number of cut points used to split the gene sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrossoverType {
    /// One cut point.
    SinglePoint,
    /// Two cut points; the middle segment is exchanged.
    TwoPoint,
    /// `k` cut points; every other segment is exchanged.
    MultiPoint(usize),
}

impl CrossoverType {
    /// Number of cut points.
    pub fn cut_points(&self) -> usize {
        match self {
            CrossoverType::SinglePoint => 1,
            CrossoverType::TwoPoint => 2,
            CrossoverType::MultiPoint(k) => *k,
        }
    }
}

/// How the mutation rate is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MutationMode {
    /// Each gene mutates independently with probability `rate`.
    PerGene,
    /// With probability `rate`, exactly one random gene mutates.
    PerIndividual,
}

/// Runtime-selectable genetic operators.
#[derive(Debug, Clone)]
pub struct GeneticOperators {
    /// Crossover strategy.
    pub crossover_type: CrossoverType,
    /// Mutation-rate interpretation.
    pub mutation_mode: MutationMode,
    /// Mutation probability (see [`MutationMode`]).
    pub mutation_rate: f64,
}

impl Default for GeneticOperators {
    fn default() -> Self {
        Self {
            crossover_type: CrossoverType::TwoPoint,
            mutation_mode: MutationMode::PerGene,
            mutation_rate: 0.2,
        }
    }
}

impl GeneticOperators {
    /// Recombines two parents using the configured strategy.
    pub fn crossover<R: Rng>(
        &self,
        p1: &Chromosome,
        p2: &Chromosome,
        encoding: &Encoding<'_>,
        rng: &mut R,
    ) -> (Chromosome, Chromosome) {
        k_point_crossover(p1, p2, self.crossover_type.cut_points(), encoding, rng)
    }

    /// Mutates in place. Returns the number of genes that mutated.
    pub fn mutate<R: Rng>(
        &self,
        chromosome: &mut Chromosome,
        encoding: &Encoding<'_>,
        rng: &mut R,
    ) -> usize {
        match self.mutation_mode {
            MutationMode::PerGene => per_gene_mutation(chromosome, encoding, self.mutation_rate, rng),
            MutationMode::PerIndividual => {
                if rng.random_bool(self.mutation_rate) {
                    single_gene_mutation(chromosome, encoding, rng)
                } else {
                    0
                }
            }
        }
    }
}

// ======================== Crossover ========================

/// K-point crossover.
///
/// Draws `cuts` distinct cut positions in `1..len`, splitting both parents
/// into segments; every other segment (starting with the second) is
/// exchanged. Locked genes stay with their own parent.
pub fn k_point_crossover<R: Rng>(
    p1: &Chromosome,
    p2: &Chromosome,
    cuts: usize,
    encoding: &Encoding<'_>,
    rng: &mut R,
) -> (Chromosome, Chromosome) {
    let len = p1.len().min(p2.len());
    if len < 2 || cuts == 0 {
        return (p1.clone(), p2.clone());
    }

    let mut points: Vec<usize> = rand::seq::index::sample(rng, len - 1, cuts.min(len - 1))
        .into_iter()
        .map(|p| p + 1)
        .collect();
    points.sort_unstable();

    let mut c1 = p1.clone();
    let mut c2 = p2.clone();
    let mut exchanging = false;
    let mut next = 0;

    for i in 0..len {
        if next < points.len() && points[next] == i {
            exchanging = !exchanging;
            next += 1;
        }
        if exchanging && !encoding.is_locked(i) {
            c1.genes[i] = p2.genes[i];
            c2.genes[i] = p1.genes[i];
        }
    }

    (c1, c2)
}

// ======================== Mutation ========================

/// Redraws one free component of a gene, chosen uniformly.
pub fn mutate_gene<R: Rng>(encoding: &Encoding<'_>, unit: usize, gene: &mut Gene, rng: &mut R) {
    let component = encoding
        .free_components(unit)
        .choose(rng)
        .copied()
        .unwrap_or(GeneComponent::Room);
    match component {
        GeneComponent::Slot => encoding.redraw_slot(unit, gene, rng),
        GeneComponent::Room => encoding.redraw_room(gene, rng),
        GeneComponent::Teacher => encoding.redraw_teacher(unit, gene, rng),
    }
}

/// Mutates each gene independently with probability `rate`.
pub fn per_gene_mutation<R: Rng>(
    chromosome: &mut Chromosome,
    encoding: &Encoding<'_>,
    rate: f64,
    rng: &mut R,
) -> usize {
    let mut mutated = 0;
    for (unit, gene) in chromosome.genes.iter_mut().enumerate() {
        if rng.random_bool(rate) {
            mutate_gene(encoding, unit, gene, rng);
            mutated += 1;
        }
    }
    mutated
}

/// Mutates one uniformly chosen gene.
pub fn single_gene_mutation<R: Rng>(
    chromosome: &mut Chromosome,
    encoding: &Encoding<'_>,
    rng: &mut R,
) -> usize {
    if chromosome.is_empty() {
        return 0;
    }
    let unit = rng.random_range(0..chromosome.len());
    mutate_gene(encoding, unit, &mut chromosome.genes[unit], rng);
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainModel;
    use crate::models::{FixedAssignment, Room, ScheduleSlot, SchoolClass, Shift, Teacher, Weekday};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn sample_domain(fixed: Vec<FixedAssignment>) -> DomainModel {
        let slots = (0..6)
            .map(|p| ScheduleSlot::new(format!("S{p}"), Weekday::Monday, Shift::Morning, p))
            .collect();
        DomainModel::new(
            vec![
                SchoolClass::new("C1", 20).with_sessions("math", 3),
                SchoolClass::new("C2", 20).with_sessions("art", 3),
                SchoolClass::new("C3", 20).with_sessions("math", 2),
            ],
            vec![Room::new("R1", 30), Room::new("R2", 30), Room::new("R3", 30)],
            vec![
                Teacher::new("P1", "math"),
                Teacher::new("P2", "math"),
                Teacher::new("P3", "art"),
            ],
            slots,
            fixed,
        )
        .unwrap()
    }

    #[test]
    fn test_cut_points() {
        assert_eq!(CrossoverType::SinglePoint.cut_points(), 1);
        assert_eq!(CrossoverType::TwoPoint.cut_points(), 2);
        assert_eq!(CrossoverType::MultiPoint(4).cut_points(), 4);
    }

    #[test]
    fn test_crossover_takes_each_gene_from_a_parent() {
        let domain = sample_domain(vec![]);
        let enc = Encoding::new(&domain).unwrap();
        let mut rng = SmallRng::seed_from_u64(42);

        for cuts in 1..=5 {
            let p1 = enc.random_chromosome(&mut rng);
            let p2 = enc.random_chromosome(&mut rng);
            let (c1, c2) = k_point_crossover(&p1, &p2, cuts, &enc, &mut rng);

            assert_eq!(c1.len(), p1.len());
            assert_eq!(c2.len(), p2.len());
            for i in 0..p1.len() {
                let from_p1 = c1.genes[i] == p1.genes[i] && c2.genes[i] == p2.genes[i];
                let swapped = c1.genes[i] == p2.genes[i] && c2.genes[i] == p1.genes[i];
                assert!(from_p1 || swapped);
            }
            assert!(enc.is_valid(&c1));
            assert!(enc.is_valid(&c2));
        }
    }

    #[test]
    fn test_single_point_exchanges_a_suffix() {
        let domain = sample_domain(vec![]);
        let enc = Encoding::new(&domain).unwrap();
        let mut rng = SmallRng::seed_from_u64(3);
        let p1 = Chromosome::new(vec![Gene::new(0, 0, 0); 8]);
        let p2 = Chromosome::new(vec![Gene::new(1, 1, 1); 8]);

        let (c1, _) = k_point_crossover(&p1, &p2, 1, &enc, &mut rng);
        let cut = c1.genes.iter().position(|g| *g == p2.genes[0]).unwrap();
        assert!(cut >= 1);
        assert!(c1.genes[cut..].iter().all(|g| *g == p2.genes[0]));
        assert!(c1.genes[..cut].iter().all(|g| *g == p1.genes[0]));
    }

    #[test]
    fn test_crossover_keeps_locked_genes_with_own_parent() {
        let domain = sample_domain(vec![FixedAssignment::new("C1", "P2")]);
        let enc = Encoding::new(&domain).unwrap();
        let mut rng = SmallRng::seed_from_u64(8);

        for _ in 0..50 {
            let p1 = enc.random_chromosome(&mut rng);
            let p2 = enc.random_chromosome(&mut rng);
            let (c1, c2) = k_point_crossover(&p1, &p2, 3, &enc, &mut rng);
            for unit in 0..3 {
                assert_eq!(c1.genes[unit], p1.genes[unit]);
                assert_eq!(c2.genes[unit], p2.genes[unit]);
            }
        }
    }

    #[test]
    fn test_crossover_short_chromosome_is_clone() {
        let domain = sample_domain(vec![]);
        let enc = Encoding::new(&domain).unwrap();
        let mut rng = SmallRng::seed_from_u64(1);
        let p1 = Chromosome::new(vec![Gene::new(0, 0, 0)]);
        let p2 = Chromosome::new(vec![Gene::new(1, 1, 1)]);
        let (c1, c2) = k_point_crossover(&p1, &p2, 2, &enc, &mut rng);
        assert_eq!(c1, p1);
        assert_eq!(c2, p2);
    }

    #[test]
    fn test_per_gene_mutation_rates() {
        let domain = sample_domain(vec![]);
        let enc = Encoding::new(&domain).unwrap();
        let mut rng = SmallRng::seed_from_u64(42);
        let mut ch = enc.random_chromosome(&mut rng);

        assert_eq!(per_gene_mutation(&mut ch, &enc, 0.0, &mut rng), 0);
        assert_eq!(per_gene_mutation(&mut ch, &enc, 1.0, &mut rng), ch.len());
        assert!(enc.is_valid(&ch));
    }

    #[test]
    fn test_per_individual_mutation_touches_one_gene() {
        let domain = sample_domain(vec![]);
        let enc = Encoding::new(&domain).unwrap();
        let mut rng = SmallRng::seed_from_u64(5);
        let ops = GeneticOperators {
            mutation_mode: MutationMode::PerIndividual,
            mutation_rate: 1.0,
            ..GeneticOperators::default()
        };

        for _ in 0..50 {
            let original = enc.random_chromosome(&mut rng);
            let mut ch = original.clone();
            assert_eq!(ops.mutate(&mut ch, &enc, &mut rng), 1);
            assert!(original.distance(&ch) <= 1);
            assert!(enc.is_valid(&ch));
        }
    }

    #[test]
    fn test_mutation_never_changes_locked_teacher() {
        let domain = sample_domain(vec![FixedAssignment::new("C3", "P1")]);
        let enc = Encoding::new(&domain).unwrap();
        let mut rng = SmallRng::seed_from_u64(13);
        let p1 = domain.teacher_idx("P1").unwrap();
        let mut ch = enc.random_chromosome(&mut rng);
        let locked_before: Vec<Gene> = ch.genes[6..8].to_vec();

        let mut slot_or_room_changed = false;
        for _ in 0..100 {
            per_gene_mutation(&mut ch, &enc, 1.0, &mut rng);
            assert_eq!(ch.genes[6].teacher, p1);
            assert_eq!(ch.genes[7].teacher, p1);
            if ch.genes[6..8] != locked_before[..] {
                slot_or_room_changed = true;
            }
        }
        assert!(slot_or_room_changed, "slot and room stay free under a teacher lock");
    }

    #[test]
    fn test_mutation_changes_something_eventually() {
        let domain = sample_domain(vec![]);
        let enc = Encoding::new(&domain).unwrap();
        let ops = GeneticOperators::default();
        let mut rng = SmallRng::seed_from_u64(42);
        let original = enc.random_chromosome(&mut rng);

        let mut changed = false;
        for _ in 0..50 {
            let mut ch = original.clone();
            ops.mutate(&mut ch, &enc, &mut rng);
            if ch != original {
                changed = true;
                break;
            }
        }
        assert!(changed);
    }
}
