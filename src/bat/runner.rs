//! Generational bat-algorithm loop.
//!
//! # Generation
//!
//! Every bat reads the global best as it stood when the generation began:
//!
//! 1. `velocity += (best - position) * u`, `u ~ U[0, 1)`;
//!    `candidate = position + velocity`.
//! 2. With probability `pulse_rate` the candidate is replaced by a local
//!    walk around the best: `best + noise * loudness`, one `noise ~ U[0, 1)`
//!    shared by all coordinates.
//! 3. The candidate is projected, rounded up and evaluated.
//! 4. With probability `loudness`, a candidate no worse than the bat's
//!    fitness is accepted: the bat moves, `pulse_rate = 1 - exp(-lambda * t)`
//!    and `loudness *= alpha`.
//!
//! Afterwards the bats are scanned in index order and the first one whose
//! candidate fitness is `<=` the global best replaces it. The scan stops
//! there, so a later and strictly better bat of the same generation does
//! not get in until a following generation.
//!
//! # Determinism
//!
//! The master RNG hands one seed to every bat before the per-bat phase.
//! Each bat draws from its own generator, so the sequential and the rayon
//! path produce identical runs for the same seed.
//!
//! # Reference
//! Yang (2010), "A New Metaheuristic Bat-Inspired Algorithm"

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::config::BatConfig;
use super::population::{discretize, Bat};
use super::problem::BatProblem;
use crate::error::Result;

/// Best position found so far.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalBest {
    /// Discrete position (start days).
    pub position: Vec<usize>,
    /// Its fitness.
    pub fitness: f64,
}

/// Outcome of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatResult {
    /// Best fitness found.
    pub best_fitness: f64,
    /// Best position found.
    pub best_position: Vec<usize>,
    /// Best fitness of the initial population, then after each generation.
    pub evolution: Vec<f64>,
    /// Generations run.
    pub generations: usize,
    /// Accepted bat moves over the whole run.
    pub accepted_moves: usize,
}

/// Evaluated candidate of one bat in one generation.
#[derive(Debug, Clone)]
struct Flight {
    position: Vec<usize>,
    fitness: f64,
    accepted: bool,
}

/// Runs the bat algorithm on a [`BatProblem`].
pub struct BatRunner;

impl BatRunner {
    /// Runs `config.generations` generations and returns the best position.
    ///
    /// # Errors
    /// Configuration errors, and any error raised by
    /// [`BatProblem::project`].
    #[tracing::instrument(level = "debug", name = "bat search", skip_all)]
    pub fn run<P: BatProblem>(problem: &P, config: &BatConfig) -> Result<BatResult> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };

        let mut bats: Vec<Bat> = (0..config.population_size)
            .map(|_| Bat::spawn(problem, &mut rng))
            .collect::<Result<_>>()?;

        let mut best = initial_best(&bats);
        let mut evolution = Vec::with_capacity(config.generations + 1);
        evolution.push(best.fitness);
        let mut accepted_moves = 0;

        tracing::info!(
            dimension = problem.dimension(),
            population = config.population_size,
            generations = config.generations,
            initial_best = best.fitness,
            "bat search started"
        );

        for t in 1..=config.generations {
            let seeds: Vec<u64> = (0..bats.len()).map(|_| rng.random()).collect();
            let frozen = &best;
            let flights: Vec<Flight> = if config.parallel {
                bats.par_iter_mut()
                    .zip(seeds.par_iter())
                    .map(|(bat, &seed)| fly(bat, problem, frozen, t, config, seed))
                    .collect::<Result<_>>()?
            } else {
                bats.iter_mut()
                    .zip(&seeds)
                    .map(|(bat, &seed)| fly(bat, problem, frozen, t, config, seed))
                    .collect::<Result<_>>()?
            };
            accepted_moves += flights.iter().filter(|f| f.accepted).count();

            let improved = match first_non_worsening(&flights, best.fitness) {
                Some(idx) => {
                    let flight = &flights[idx];
                    tracing::trace!(
                        generation = t,
                        bat = idx,
                        fitness = flight.fitness,
                        "new global best"
                    );
                    best = GlobalBest {
                        position: flight.position.clone(),
                        fitness: flight.fitness,
                    };
                    true
                }
                None => false,
            };
            evolution.push(best.fitness);
            tracing::debug!(generation = t, best = best.fitness, improved, "generation done");
        }

        tracing::info!(best = best.fitness, accepted_moves, "bat search finished");

        Ok(BatResult {
            best_fitness: best.fitness,
            best_position: best.position,
            evolution,
            generations: config.generations,
            accepted_moves,
        })
    }
}

/// First bat with the lowest fitness.
fn initial_best(bats: &[Bat]) -> GlobalBest {
    bats.iter()
        .min_by(|a, b| a.fitness.total_cmp(&b.fitness))
        .map(|bat| GlobalBest {
            position: bat.start_days(),
            fitness: bat.fitness,
        })
        .unwrap_or(GlobalBest {
            position: Vec::new(),
            fitness: f64::INFINITY,
        })
}

/// Index of the first flight no worse than `best`.
///
/// Later flights are not looked at, even when strictly better.
fn first_non_worsening(flights: &[Flight], best: f64) -> Option<usize> {
    flights.iter().position(|f| f.fitness <= best)
}

/// One bat's move in generation `t`.
fn fly<P: BatProblem>(
    bat: &mut Bat,
    problem: &P,
    best: &GlobalBest,
    t: usize,
    config: &BatConfig,
    seed: u64,
) -> Result<Flight> {
    let mut rng = SmallRng::seed_from_u64(seed);

    let u: f64 = rng.random();
    for ((v, &x), &b) in bat.velocity.iter_mut().zip(&bat.position).zip(&best.position) {
        *v += (b as f64 - x) * u;
    }
    let mut candidate: Vec<f64> = bat
        .position
        .iter()
        .zip(&bat.velocity)
        .map(|(x, v)| x + v)
        .collect();

    if rng.random::<f64>() < bat.pulse_rate {
        let noise: f64 = rng.random();
        candidate = best
            .position
            .iter()
            .map(|&b| b as f64 + noise * bat.loudness)
            .collect();
    }

    problem.project(&mut candidate)?;
    let position = discretize(&candidate);
    let fitness = problem.evaluate(&position);

    let accepted = rng.random::<f64>() < bat.loudness && fitness <= bat.fitness;
    if accepted {
        bat.position = candidate;
        bat.fitness = fitness;
        bat.pulse_rate = 1.0 - (-config.lambda * t as f64).exp();
        bat.loudness *= config.alpha;
    }

    Ok(Flight {
        position,
        fitness,
        accepted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MaintenanceError;
    use std::sync::Mutex;

    /// Integer grid `0..=max` per coordinate, fitness = squared distance to `target`.
    struct GridProblem {
        target: Vec<usize>,
        max: usize,
    }

    impl BatProblem for GridProblem {
        fn dimension(&self) -> usize {
            self.target.len()
        }

        fn random_position<R: Rng>(&self, rng: &mut R) -> Result<Vec<usize>> {
            Ok((0..self.target.len())
                .map(|_| rng.random_range(0..=self.max))
                .collect())
        }

        fn project(&self, candidate: &mut [f64]) -> Result<()> {
            for x in candidate.iter_mut() {
                *x = x.clamp(0.0, self.max as f64).round();
            }
            Ok(())
        }

        fn evaluate(&self, position: &[usize]) -> f64 {
            position
                .iter()
                .zip(&self.target)
                .map(|(&p, &t)| (p as f64 - t as f64).powi(2))
                .sum()
        }
    }

    struct FailingProblem;

    impl BatProblem for FailingProblem {
        fn dimension(&self) -> usize {
            1
        }

        fn random_position<R: Rng>(&self, _rng: &mut R) -> Result<Vec<usize>> {
            Ok(vec![0])
        }

        fn project(&self, candidate: &mut [f64]) -> Result<()> {
            Err(MaintenanceError::ProjectionFailure {
                unit: 0,
                value: candidate[0],
            })
        }

        fn evaluate(&self, _position: &[usize]) -> f64 {
            0.0
        }
    }

    /// Records every candidate handed to `project`.
    #[derive(Default)]
    struct RecordingProblem {
        candidates: Mutex<Vec<Vec<f64>>>,
    }

    impl BatProblem for RecordingProblem {
        fn dimension(&self) -> usize {
            3
        }

        fn random_position<R: Rng>(&self, _rng: &mut R) -> Result<Vec<usize>> {
            Ok(vec![0; 3])
        }

        fn project(&self, candidate: &mut [f64]) -> Result<()> {
            self.candidates.lock().unwrap().push(candidate.to_vec());
            for x in candidate.iter_mut() {
                *x = x.max(0.0).round();
            }
            Ok(())
        }

        fn evaluate(&self, _position: &[usize]) -> f64 {
            0.0
        }
    }

    fn flight(fitness: f64) -> Flight {
        Flight {
            position: vec![0],
            fitness,
            accepted: false,
        }
    }

    fn grid() -> GridProblem {
        GridProblem {
            target: vec![3, 17, 8],
            max: 20,
        }
    }

    #[test]
    fn test_evolution_non_increasing() {
        for seed in [1, 7, 42, 1234, 98765] {
            let config = BatConfig::default()
                .with_population_size(8)
                .with_generations(40)
                .with_seed(seed);
            let result = BatRunner::run(&grid(), &config).unwrap();

            assert_eq!(result.evolution.len(), 41);
            for w in result.evolution.windows(2) {
                assert!(w[1] <= w[0], "seed {seed}: {} after {}", w[1], w[0]);
            }
            assert_eq!(*result.evolution.last().unwrap(), result.best_fitness);
        }
    }

    #[test]
    fn test_best_matches_position() {
        let problem = grid();
        let config = BatConfig::default().with_generations(30).with_seed(42);
        let result = BatRunner::run(&problem, &config).unwrap();
        assert_eq!(problem.evaluate(&result.best_position), result.best_fitness);
    }

    #[test]
    fn test_improves_on_initial_population() {
        let config = BatConfig::default()
            .with_population_size(20)
            .with_generations(200)
            .with_seed(42);
        let result = BatRunner::run(&grid(), &config).unwrap();
        assert!(result.best_fitness <= result.evolution[0]);
        assert!(result.best_fitness < 100.0);
    }

    #[test]
    fn test_same_seed_same_run() {
        let config = BatConfig::default().with_generations(25).with_seed(9);
        let a = BatRunner::run(&grid(), &config).unwrap();
        let b = BatRunner::run(&grid(), &config).unwrap();
        assert_eq!(a.evolution, b.evolution);
        assert_eq!(a.best_position, b.best_position);
        assert_eq!(a.accepted_moves, b.accepted_moves);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let config = BatConfig::default()
            .with_population_size(16)
            .with_generations(30)
            .with_seed(2024);
        let seq = BatRunner::run(&grid(), &config).unwrap();
        let par = BatRunner::run(&grid(), &config.clone().with_parallel(true)).unwrap();
        assert_eq!(seq.evolution, par.evolution);
        assert_eq!(seq.best_position, par.best_position);
        assert_eq!(seq.accepted_moves, par.accepted_moves);
    }

    #[test]
    fn test_zero_generations() {
        let config = BatConfig::default().with_generations(0).with_seed(1);
        let result = BatRunner::run(&grid(), &config).unwrap();
        assert_eq!(result.evolution, vec![result.best_fitness]);
        assert_eq!(result.accepted_moves, 0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = BatConfig::default().with_population_size(0);
        assert!(matches!(
            BatRunner::run(&grid(), &config),
            Err(MaintenanceError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_projection_failure_propagates() {
        let config = BatConfig::default().with_generations(3).with_seed(1);
        assert!(matches!(
            BatRunner::run(&FailingProblem, &config),
            Err(MaintenanceError::ProjectionFailure { unit: 0, .. })
        ));
    }

    #[test]
    fn test_single_point_search_space() {
        let problem = GridProblem {
            target: vec![0],
            max: 0,
        };
        let config = BatConfig::default().with_generations(2).with_seed(5);
        let result = BatRunner::run(&problem, &config).unwrap();
        assert_eq!(result.best_position, vec![0]);
        assert_eq!(result.evolution, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_acceptance_updates_bat() {
        let problem = grid();
        let config = BatConfig::default().with_alpha(0.5).with_lambda(1.0);
        let best = GlobalBest {
            position: vec![3, 17, 8],
            fitness: 0.0,
        };
        // A bat sitting on the optimum never gets worse, so acceptance only
        // depends on the loudness draw, which loudness 1.0 always passes.
        let mut bat = Bat::new(&[3, 17, 8], 0.0);
        let flight = fly(&mut bat, &problem, &best, 2, &config, 11).unwrap();
        assert!(flight.accepted);
        assert_eq!(flight.position, vec![3, 17, 8]);
        assert_eq!(bat.loudness, 0.5);
        assert!((bat.pulse_rate - (1.0 - (-2.0f64).exp())).abs() < 1e-12);
    }

    #[test]
    fn test_first_non_worsening_takes_earliest() {
        let flights = vec![flight(5.0), flight(1.0)];
        // Index 1 is strictly better, but index 0 is reached first.
        assert_eq!(first_non_worsening(&flights, 6.0), Some(0));
        assert_eq!(first_non_worsening(&flights, 3.0), Some(1));
        assert_eq!(first_non_worsening(&flights, 0.5), None);
        assert_eq!(first_non_worsening(&[flight(2.0)], 2.0), Some(0));
        assert_eq!(first_non_worsening(&[], 2.0), None);
    }

    #[test]
    fn test_local_walk_around_best() {
        let problem = RecordingProblem::default();
        let best = GlobalBest {
            position: vec![3, 17, 8],
            fitness: 0.0,
        };
        let mut bat = Bat::new(&[10, 10, 10], 5.0);
        bat.pulse_rate = 1.0;
        bat.loudness = 0.5;

        fly(&mut bat, &problem, &best, 1, &BatConfig::default(), 7).unwrap();

        let candidates = problem.candidates.lock().unwrap();
        assert_eq!(candidates.len(), 1);
        let candidate = &candidates[0];
        // One noise value shared by every coordinate.
        let noise = (candidate[0] - 3.0) / 0.5;
        assert!((0.0..1.0).contains(&noise), "noise {noise}");
        for (c, &b) in candidate.iter().zip(&best.position) {
            assert!((c - (b as f64 + noise * 0.5)).abs() < 1e-12);
        }
    }
}
