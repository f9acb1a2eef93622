//! Evolution configuration.
//!
//! [`EvolutionConfig`] holds every parameter of a timetable run. All fields
//! have defaults, so a partial JSON document deserializes cleanly.
//!
//! ```
//! use u_timetable::ga::{CrossoverType, EvolutionConfig};
//!
//! let config = EvolutionConfig::default()
//!     .with_population_size(60)
//!     .with_generation_count(40)
//!     .with_crossover(CrossoverType::MultiPoint(3))
//!     .with_seed(7);
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use super::operators::{CrossoverType, GeneticOperators, MutationMode};
use crate::error::TimetableError;
use crate::fitness::ConstraintWeights;

/// Parameters of an evolutionary timetable run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    /// Individuals per generation. Must be at least 1 and exceed `elite_count`.
    pub population_size: usize,
    /// Generations to evolve after the initial population. 0 is allowed.
    pub generation_count: usize,
    /// Probability that a parent pair is recombined (0.0..=1.0).
    pub crossover_rate: f64,
    /// Mutation probability, interpreted per [`MutationMode`] (0.0..=1.0).
    pub mutation_rate: f64,
    /// Best individuals copied unchanged into the next generation.
    pub elite_count: usize,
    /// Penalty weights per violation category.
    pub weights: ConstraintWeights,
    /// Random seed. `None` draws one from system entropy.
    pub seed: Option<u64>,
    /// Contestants per tournament.
    pub tournament_size: usize,
    /// Crossover strategy.
    pub crossover: CrossoverType,
    /// Mutation-rate interpretation.
    pub mutation_mode: MutationMode,
    /// Score offspring in parallel with rayon.
    pub parallel: bool,
    /// Keep the last population in the result.
    pub keep_final_population: bool,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 150,
            generation_count: 80,
            crossover_rate: 0.7,
            mutation_rate: 0.2,
            elite_count: 1,
            weights: ConstraintWeights::default(),
            seed: None,
            tournament_size: 3,
            crossover: CrossoverType::TwoPoint,
            mutation_mode: MutationMode::PerGene,
            parallel: true,
            keep_final_population: false,
        }
    }
}

impl EvolutionConfig {
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_generation_count(mut self, n: usize) -> Self {
        self.generation_count = n;
        self
    }

    /// Sets the crossover rate, clamped to 0.0..=1.0.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation rate, clamped to 0.0..=1.0.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    pub fn with_elite_count(mut self, n: usize) -> Self {
        self.elite_count = n;
        self
    }

    pub fn with_weights(mut self, weights: ConstraintWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_tournament_size(mut self, n: usize) -> Self {
        self.tournament_size = n;
        self
    }

    pub fn with_crossover(mut self, crossover: CrossoverType) -> Self {
        self.crossover = crossover;
        self
    }

    pub fn with_mutation_mode(mut self, mode: MutationMode) -> Self {
        self.mutation_mode = mode;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_keep_final_population(mut self, keep: bool) -> Self {
        self.keep_final_population = keep;
        self
    }

    /// Operator set described by this configuration.
    pub fn operators(&self) -> GeneticOperators {
        GeneticOperators {
            crossover_type: self.crossover,
            mutation_mode: self.mutation_mode,
            mutation_rate: self.mutation_rate,
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// Returns [`TimetableError::InvalidConfig`] naming the first bad parameter.
    pub fn validate(&self) -> Result<(), TimetableError> {
        let invalid = |msg: String| Err(TimetableError::InvalidConfig(msg));

        if self.population_size == 0 {
            return invalid(format!(
                "population_size must be >= 1, got {}",
                self.population_size
            ));
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return invalid(format!(
                "crossover_rate must be in [0, 1], got {}",
                self.crossover_rate
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return invalid(format!(
                "mutation_rate must be in [0, 1], got {}",
                self.mutation_rate
            ));
        }
        if self.elite_count >= self.population_size {
            return invalid(format!(
                "elite_count ({}) must be less than population_size ({})",
                self.elite_count, self.population_size
            ));
        }
        if self.tournament_size == 0 {
            return invalid("tournament_size must be >= 1".to_string());
        }
        if let CrossoverType::MultiPoint(0) = self.crossover {
            return invalid("multi-point crossover needs at least one cut".to_string());
        }
        self.weights.validate()
    }
}
