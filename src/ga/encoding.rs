//! Legality domains and random gene generation.
//!
//! For each session unit the encoding knows which teachers may teach it
//! (subject match, or the fixed-assignment lock) and which (slot, teacher)
//! pairs respect shift availability. Rooms are unrestricted: capacity is
//! scored by the fitness evaluator, not enforced here.
//!
//! All operations are pure queries; randomness comes from the caller's RNG.

use rand::Rng;
use rand::prelude::IndexedRandom;

use super::chromosome::{Chromosome, Gene};
use crate::domain::{DomainModel, SessionUnit};
use crate::error::DataInfeasibility;
use crate::models::{Placement, Timetable};

/// Legality domain of one session unit.
#[derive(Debug, Clone)]
pub struct GeneDomain {
    /// The unit this domain belongs to.
    pub unit: SessionUnit,
    /// Locked teacher, if a fixed assignment covers the unit.
    pub locked: Option<usize>,
    /// Teachers allowed regardless of shift.
    pub candidates: Vec<usize>,
    /// Legal (slot, teacher) pairs.
    pub pairs: Vec<(usize, usize)>,
}

/// Per-unit legality domains over a domain model.
#[derive(Debug, Clone)]
pub struct Encoding<'a> {
    domain: &'a DomainModel,
    domains: Vec<GeneDomain>,
}

/// Gene component redrawn by a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneComponent {
    Slot,
    Room,
    Teacher,
}

impl<'a> Encoding<'a> {
    /// Computes the legality domain of every unit.
    ///
    /// # Errors
    /// Returns [`DataInfeasibility`] for the first unit with no legal
    /// (slot, teacher) pair.
    pub fn new(domain: &'a DomainModel) -> Result<Self, DataInfeasibility> {
        let mut domains = Vec::with_capacity(domain.unit_count());
        for (idx, &unit) in domain.units().iter().enumerate() {
            domain.check_unit(idx)?;
            let pairs = domain.legal_pairs(idx);
            domains.push(GeneDomain {
                unit,
                locked: domain.locked_teacher(idx),
                candidates: domain.candidate_teachers(idx),
                pairs,
            });
        }
        Ok(Self { domain, domains })
    }

    /// The underlying domain model.
    pub fn domain(&self) -> &'a DomainModel {
        self.domain
    }

    /// Chromosome length.
    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    /// Legality domain of a unit.
    pub fn gene_domain(&self, unit: usize) -> &GeneDomain {
        &self.domains[unit]
    }

    /// Whether the unit's teacher is locked.
    pub fn is_locked(&self, unit: usize) -> bool {
        self.domains[unit].locked.is_some()
    }

    /// Draws a gene uniformly from the unit's legality domain.
    pub fn random_gene<R: Rng>(&self, unit: usize, rng: &mut R) -> Gene {
        let d = &self.domains[unit];
        // Encoding::new rejects empty pair lists.
        let (slot, teacher) = d.pairs[rng.random_range(0..d.pairs.len())];
        let room = rng.random_range(0..self.domain.rooms().len());
        Gene::new(slot, room, teacher)
    }

    /// Draws a full chromosome, one legal gene per unit.
    pub fn random_chromosome<R: Rng>(&self, rng: &mut R) -> Chromosome {
        Chromosome::new((0..self.len()).map(|u| self.random_gene(u, rng)).collect())
    }

    /// Whether a gene lies inside the unit's legality domain.
    pub fn is_legal(&self, unit: usize, gene: &Gene) -> bool {
        let d = &self.domains[unit];
        gene.room < self.domain.rooms().len()
            && gene.slot < self.domain.slots().len()
            && d.candidates.contains(&gene.teacher)
            && self.domain.is_available(gene.teacher, gene.slot)
    }

    /// Whether every gene is legal and the length matches.
    pub fn is_valid(&self, chromosome: &Chromosome) -> bool {
        chromosome.len() == self.len()
            && chromosome
                .genes
                .iter()
                .enumerate()
                .all(|(u, g)| self.is_legal(u, g))
    }

    /// Components a mutation may redraw. The teacher of a locked unit is excluded.
    pub fn free_components(&self, unit: usize) -> &'static [GeneComponent] {
        if self.is_locked(unit) {
            &[GeneComponent::Slot, GeneComponent::Room]
        } else {
            &[GeneComponent::Slot, GeneComponent::Room, GeneComponent::Teacher]
        }
    }

    /// Redraws the slot among slots where the gene's teacher is available.
    ///
    /// A gene whose teacher is outside the domain is redrawn entirely.
    pub fn redraw_slot<R: Rng>(&self, unit: usize, gene: &mut Gene, rng: &mut R) {
        let slots: Vec<usize> = self.domains[unit]
            .pairs
            .iter()
            .filter(|&&(_, t)| t == gene.teacher)
            .map(|&(s, _)| s)
            .collect();
        match slots.choose(rng) {
            Some(&slot) => gene.slot = slot,
            None => *gene = self.random_gene(unit, rng),
        }
    }

    /// Redraws the room uniformly.
    pub fn redraw_room<R: Rng>(&self, gene: &mut Gene, rng: &mut R) {
        gene.room = rng.random_range(0..self.domain.rooms().len());
    }

    /// Redraws the teacher among teachers legal for the gene's slot.
    ///
    /// Locked units keep their teacher. If no teacher is legal for the
    /// current slot the gene is redrawn entirely (keeping any lock).
    pub fn redraw_teacher<R: Rng>(&self, unit: usize, gene: &mut Gene, rng: &mut R) {
        if self.is_locked(unit) {
            return;
        }
        let teachers: Vec<usize> = self.domains[unit]
            .pairs
            .iter()
            .filter(|&&(s, _)| s == gene.slot)
            .map(|&(_, t)| t)
            .collect();
        match teachers.choose(rng) {
            Some(&teacher) => gene.teacher = teacher,
            None => *gene = self.random_gene(unit, rng),
        }
    }

    /// Decodes a chromosome into identifier-level placements.
    pub fn decode(&self, chromosome: &Chromosome) -> Timetable {
        let mut timetable = Timetable::new();
        for (d, gene) in self.domains.iter().zip(&chromosome.genes) {
            let class = self.domain.class(d.unit.class);
            timetable.add_placement(Placement {
                class_id: class.id.clone(),
                session: d.unit.session,
                subject: class.sessions[d.unit.session].subject.clone(),
                slot_id: self.domain.slot(gene.slot).id.clone(),
                room_id: self.domain.room(gene.room).id.clone(),
                teacher_id: self.domain.teacher(gene.teacher).id.clone(),
            });
        }
        timetable
    }
}
