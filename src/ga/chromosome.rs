//! Gene-per-session chromosome.
//!
//! # Encoding
//!
//! A chromosome holds one [`Gene`] per required (class, session) unit, in
//! the unit order of the [`DomainModel`](crate::DomainModel). Each gene
//! stores registry indices for its slot, room, and teacher. The length is
//! fixed by the domain model and never changes during a run.

use serde::{Deserialize, Serialize};

/// One (slot, room, teacher) assignment for a class session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Gene {
    /// Slot index (into the sorted slot registry).
    pub slot: usize,
    /// Room index.
    pub room: usize,
    /// Teacher index.
    pub teacher: usize,
}

impl Gene {
    pub fn new(slot: usize, room: usize, teacher: usize) -> Self {
        Self {
            slot,
            room,
            teacher,
        }
    }
}

/// A candidate timetable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Chromosome {
    /// One gene per session unit.
    pub genes: Vec<Gene>,
}

impl Chromosome {
    /// Wraps a gene sequence.
    pub fn new(genes: Vec<Gene>) -> Self {
        Self { genes }
    }

    /// Number of genes.
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Whether the chromosome has no genes.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Gene at a unit position.
    pub fn gene(&self, unit: usize) -> Option<&Gene> {
        self.genes.get(unit)
    }

    /// Number of positions where two chromosomes differ.
    pub fn distance(&self, other: &Chromosome) -> usize {
        self.genes
            .iter()
            .zip(&other.genes)
            .filter(|(a, b)| a != b)
            .count()
            + self.len().abs_diff(other.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chromosome_accessors() {
        let ch = Chromosome::new(vec![Gene::new(0, 1, 2), Gene::new(3, 4, 5)]);
        assert_eq!(ch.len(), 2);
        assert!(!ch.is_empty());
        assert_eq!(ch.gene(1), Some(&Gene::new(3, 4, 5)));
        assert_eq!(ch.gene(2), None);
    }

    #[test]
    fn test_distance() {
        let a = Chromosome::new(vec![Gene::new(0, 0, 0), Gene::new(1, 1, 1)]);
        let b = Chromosome::new(vec![Gene::new(0, 0, 0), Gene::new(1, 2, 1)]);
        let c = Chromosome::new(vec![Gene::new(0, 0, 0)]);
        assert_eq!(a.distance(&a), 0);
        assert_eq!(a.distance(&b), 1);
        assert_eq!(a.distance(&c), 1);
    }
}
