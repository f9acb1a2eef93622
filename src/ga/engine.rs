//! Generational evolution engine.
//!
//! # Lifecycle
//!
//! ```text
//! Initialized ──step()──▶ Evolving ──(generation_count steps)──▶ Terminated
//!                                                                     │
//!                                  finish() (any state) ──▶ BestSelected
//! ```
//!
//! [`EvolutionEngine::new`] validates the configuration, builds the
//! legality domains, and scores a uniformly random generation 0. Each
//! [`step`](EvolutionEngine::step) builds a fresh population: elites are
//! copied unchanged, the rest are offspring produced by tournament
//! selection, crossover, and mutation. The best individual over all
//! generations is tracked incrementally; only a strictly lower penalty
//! replaces it.
//!
//! All randomness flows from one `SmallRng` seeded from the configuration,
//! so a seed reproduces a run exactly. Scoring may run on rayon; results
//! are collected in population order.
//!
//! # Example
//!
//! ```
//! use u_timetable::models::{Room, ScheduleSlot, SchoolClass, Shift, Teacher, Weekday};
//! use u_timetable::{run, DomainModel, EvolutionConfig};
//!
//! let domain = DomainModel::new(
//!     vec![SchoolClass::new("C1", 25).with_sessions("math", 2)],
//!     vec![Room::new("R1", 30)],
//!     vec![Teacher::new("T1", "math")],
//!     vec![
//!         ScheduleSlot::new("S1", Weekday::Monday, Shift::Morning, 1),
//!         ScheduleSlot::new("S2", Weekday::Monday, Shift::Morning, 2),
//!     ],
//!     vec![],
//! )
//! .unwrap();
//!
//! let config = EvolutionConfig::default()
//!     .with_population_size(20)
//!     .with_generation_count(30)
//!     .with_seed(42);
//! let result = run(&domain, config).unwrap();
//! assert_eq!(result.score.penalty, 0.0);
//! assert_eq!(result.timetable.placement_count(), 2);
//! ```

use log::{debug, info, warn};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::chromosome::Chromosome;
use super::config::EvolutionConfig;
use super::encoding::Encoding;
use super::operators::GeneticOperators;
use super::selection::tournament_select;
use crate::domain::DomainModel;
use crate::error::TimetableError;
use crate::fitness::{FitnessEvaluator, FitnessScore};
use crate::models::Timetable;

/// Engine lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    /// Generation 0 created and scored.
    Initialized,
    /// At least one generation step taken, more remain.
    Evolving,
    /// All configured generations ran.
    Terminated,
    /// The result has been extracted.
    BestSelected,
}

/// A scored chromosome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Individual {
    pub chromosome: Chromosome,
    pub score: FitnessScore,
}

/// Penalty statistics of one generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Generation number (0 = initial population).
    pub generation: usize,
    /// Lowest penalty in this generation.
    pub best_penalty: f64,
    /// Mean penalty in this generation.
    pub mean_penalty: f64,
    /// Highest penalty in this generation.
    pub worst_penalty: f64,
    /// Individuals with no hard violation.
    pub feasible_count: usize,
    /// Lowest penalty seen so far in the run.
    pub best_so_far: f64,
}

impl GenerationStats {
    fn from_population(generation: usize, population: &[Individual], best_so_far: f64) -> Self {
        let mut best = f64::INFINITY;
        let mut worst = f64::NEG_INFINITY;
        let mut sum = 0.0;
        let mut feasible_count = 0;
        for ind in population {
            let p = ind.score.penalty;
            best = best.min(p);
            worst = worst.max(p);
            sum += p;
            if ind.score.counts.hard() == 0 {
                feasible_count += 1;
            }
        }
        Self {
            generation,
            best_penalty: best,
            mean_penalty: sum / population.len().max(1) as f64,
            worst_penalty: worst,
            feasible_count,
            best_so_far,
        }
    }
}

/// Outcome of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionResult {
    /// Best chromosome over all generations.
    pub best: Chromosome,
    /// Its score.
    pub score: FitnessScore,
    /// The best chromosome decoded to identifiers, with its violations.
    pub timetable: Timetable,
    /// Generation in which the best was first found.
    pub best_generation: usize,
    /// Generation steps actually run.
    pub generations: usize,
    /// Statistics for generation 0 and every step.
    pub history: Vec<GenerationStats>,
    /// Seed that reproduces this run.
    pub seed: u64,
    /// Last population, when requested.
    pub final_population: Option<Vec<Individual>>,
}

/// Stepwise evolutionary optimizer over a [`DomainModel`].
pub struct EvolutionEngine<'a> {
    config: EvolutionConfig,
    operators: GeneticOperators,
    encoding: Encoding<'a>,
    evaluator: FitnessEvaluator<'a>,
    rng: SmallRng,
    seed: u64,
    population: Vec<Individual>,
    generation: usize,
    best: Individual,
    best_generation: usize,
    history: Vec<GenerationStats>,
    state: EngineState,
}

impl<'a> EvolutionEngine<'a> {
    /// Creates and scores generation 0.
    ///
    /// # Errors
    /// - [`TimetableError::InvalidConfig`] for a bad configuration
    /// - [`TimetableError::Infeasible`] if a session has no legal assignment
    pub fn new(domain: &'a DomainModel, config: EvolutionConfig) -> Result<Self, TimetableError> {
        config.validate()?;
        let encoding = Encoding::new(domain)?;
        let evaluator = FitnessEvaluator::new(domain, config.weights);

        for class in domain.capacity_shortfalls() {
            warn!(
                "class '{}' ({} students) fits in no room; capacity violations are unavoidable",
                class.id, class.students
            );
        }

        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        let mut rng = SmallRng::seed_from_u64(seed);

        let chromosomes: Vec<Chromosome> = (0..config.population_size)
            .map(|_| encoding.random_chromosome(&mut rng))
            .collect();
        let scores = evaluator.score_all(&chromosomes, config.parallel);
        let population: Vec<Individual> = chromosomes
            .into_iter()
            .zip(scores)
            .map(|(chromosome, score)| Individual { chromosome, score })
            .collect();

        let best = population[best_index(&population)].clone();
        let stats = GenerationStats::from_population(0, &population, best.score.penalty);

        info!(
            "evolution start: {} units, population {}, {} generations, seed {}, initial best {}",
            encoding.len(),
            config.population_size,
            config.generation_count,
            seed,
            best.score.penalty
        );

        let state = if config.generation_count == 0 {
            EngineState::Terminated
        } else {
            EngineState::Initialized
        };

        Ok(Self {
            operators: config.operators(),
            config,
            encoding,
            evaluator,
            rng,
            seed,
            population,
            generation: 0,
            best,
            best_generation: 0,
            history: vec![stats],
            state,
        })
    }

    /// Runs one generation. Returns `None` once the run has terminated.
    pub fn step(&mut self) -> Option<&GenerationStats> {
        if self.is_terminated() {
            return None;
        }

        let next = self.next_population();
        self.population = next;
        self.generation += 1;

        let gen_best = best_index(&self.population);
        if self.population[gen_best].score.penalty < self.best.score.penalty {
            self.best = self.population[gen_best].clone();
            self.best_generation = self.generation;
            info!(
                "generation {}: new best penalty {} ({} violations)",
                self.generation,
                self.best.score.penalty,
                self.best.score.counts.total()
            );
        }

        let stats =
            GenerationStats::from_population(self.generation, &self.population, self.best.score.penalty);
        debug!(
            "generation {}: best {} mean {:.2} worst {} feasible {}/{}",
            stats.generation,
            stats.best_penalty,
            stats.mean_penalty,
            stats.worst_penalty,
            stats.feasible_count,
            self.population.len()
        );
        self.history.push(stats);

        self.state = if self.generation >= self.config.generation_count {
            EngineState::Terminated
        } else {
            EngineState::Evolving
        };
        self.history.last()
    }

    /// Extracts the result. May be called before termination to stop early,
    /// and again afterwards; the engine keeps its population.
    pub fn finish(&mut self) -> EvolutionResult {
        self.state = EngineState::BestSelected;

        let mut timetable = self.encoding.decode(&self.best.chromosome);
        for violation in self.evaluator.explain(&self.best.chromosome) {
            timetable.add_violation(violation);
        }

        info!(
            "evolution done: {} generations, best penalty {} found in generation {}",
            self.generation, self.best.score.penalty, self.best_generation
        );

        let final_population = if self.config.keep_final_population {
            Some(self.population.clone())
        } else {
            None
        };

        EvolutionResult {
            best: self.best.chromosome.clone(),
            score: self.best.score,
            timetable,
            best_generation: self.best_generation,
            generations: self.generation,
            history: self.history.clone(),
            seed: self.seed,
            final_population,
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Generation steps taken so far.
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn population(&self) -> &[Individual] {
        &self.population
    }

    /// Best individual over all generations so far.
    pub fn best(&self) -> &Individual {
        &self.best
    }

    pub fn history(&self) -> &[GenerationStats] {
        &self.history
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Whether no further steps will run.
    pub fn is_terminated(&self) -> bool {
        matches!(self.state, EngineState::Terminated | EngineState::BestSelected)
    }

    fn next_population(&mut self) -> Vec<Individual> {
        let size = self.config.population_size;
        let elite_count = self.config.elite_count.min(size);

        let mut order: Vec<usize> = (0..self.population.len()).collect();
        order.sort_by(|&a, &b| {
            self.population[a]
                .score
                .penalty
                .total_cmp(&self.population[b].score.penalty)
                .then(a.cmp(&b))
        });

        let mut next: Vec<Individual> = Vec::with_capacity(size);
        next.extend(order[..elite_count].iter().map(|&i| self.population[i].clone()));

        let penalties: Vec<f64> = self.population.iter().map(|ind| ind.score.penalty).collect();
        let needed = size - elite_count;
        let mut children: Vec<Chromosome> = Vec::with_capacity(needed + 1);

        while children.len() < needed {
            let a = tournament_select(&penalties, self.config.tournament_size, &mut self.rng);
            let b = tournament_select(&penalties, self.config.tournament_size, &mut self.rng);
            let p1 = &self.population[a].chromosome;
            let p2 = &self.population[b].chromosome;

            let (mut c1, mut c2) = if self.rng.random_bool(self.config.crossover_rate) {
                self.operators.crossover(p1, p2, &self.encoding, &mut self.rng)
            } else {
                (p1.clone(), p2.clone())
            };

            self.operators.mutate(&mut c1, &self.encoding, &mut self.rng);
            children.push(c1);
            if children.len() < needed {
                self.operators.mutate(&mut c2, &self.encoding, &mut self.rng);
                children.push(c2);
            }
        }

        let scores = self.evaluator.score_all(&children, self.config.parallel);
        next.extend(
            children
                .into_iter()
                .zip(scores)
                .map(|(chromosome, score)| Individual { chromosome, score }),
        );
        next
    }
}

/// Index of the lowest penalty; the first wins ties.
fn best_index(population: &[Individual]) -> usize {
    let mut best = 0;
    for (i, ind) in population.iter().enumerate().skip(1) {
        if ind.score.penalty < population[best].score.penalty {
            best = i;
        }
    }
    best
}

/// Evolves a timetable for `domain` from start to finish.
///
/// # Errors
/// See [`EvolutionEngine::new`].
pub fn run(domain: &DomainModel, config: EvolutionConfig) -> Result<EvolutionResult, TimetableError> {
    let mut engine = EvolutionEngine::new(domain, config)?;
    while engine.step().is_some() {}
    Ok(engine.finish())
}
