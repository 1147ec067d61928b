//! Evolve a population of [`Agent`]s.
mod config;
use crate::{
    record::{Record, RecordValue, Recorder},
    selector::{rank, select_parent_pool},
    util::mean,
    Agent, DefaultEvaluator, EliteSelector, Env, Evaluator, Reproducer,
};
use anyhow::Result;
use chrono::Local;
pub use config::EvolutionConfig;
use log::info;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use std::marker::PhantomData;

/// Number of best scores averaged in the progress report.
const N_TOP_REPORTED: usize = 5;

/// State threaded from one generation to the next.
#[derive(Clone, Debug)]
pub struct Generation<A> {
    /// The agents.
    pub population: Vec<A>,

    /// Index of the elite in `population`, if an elite has been selected.
    pub elite_index: Option<usize>,
}

/// Outcome of [`Evolution::run`].
#[derive(Clone, Debug)]
pub struct EvolutionResult<A> {
    /// The last population.
    pub population: Vec<A>,

    /// Index of the elite in `population`, `None` if no elite was selected
    /// in the last generation.
    pub elite_index: Option<usize>,
}

impl<A> EvolutionResult<A> {
    /// The elite index, or `0` when there is no elite.
    pub fn elite_index_or_default(&self) -> usize {
        self.elite_index.unwrap_or(0)
    }

    /// The elite, or the first agent when there is no elite.
    pub fn best(&self) -> &A {
        &self.population[self.elite_index_or_default()]
    }
}

impl<A> From<Generation<A>> for EvolutionResult<A> {
    fn from(g: Generation<A>) -> Self {
        Self {
            population: g.population,
            elite_index: g.elite_index,
        }
    }
}

/// Manages the generational loop of the genetic algorithm.
///
/// # Generation
///
/// 0. Initially, the population consists of `population_size` random agents
///    and there is no elite.
/// 1. Every agent is scored with the mean return of `n_episodes_eval` episodes.
/// 2. Agents are ranked by score; the `top_limit` best form the parent pool.
/// 3. The `elite_candidates` best parents and the previous elite are scored
///    again with `n_episodes_elite` episodes, the best of them becomes the elite.
/// 4. The next population is made of `population_size - 1` mutated copies of
///    parents sampled uniformly from the pool, followed by a copy of the elite.
/// 5. Progress is logged and written to the recorder.
///
/// Steps 1 to 5 are repeated `n_generations` times. An error at any point,
/// typically from the environment, aborts the run.
///
/// # Randomness
///
/// A single [`SmallRng`] seeded with `seed` feeds initialization, action
/// sampling, parent sampling and mutation, so a run is reproducible given the
/// seed and a deterministic environment. The environment is built once, with
/// the same seed, and reused for all evaluations.
pub struct Evolution<E, A>
where
    E: Env,
    A: Agent<E>,
{
    config: EvolutionConfig,

    /// Configuration of the environment for evaluation.
    env_config: E::Config,

    /// Architecture of the agents.
    agent_config: A::Config,

    reproducer: Reproducer,

    phantom: PhantomData<(E, A)>,
}

impl<E, A> Evolution<E, A>
where
    E: Env,
    A: Agent<E>,
{
    /// Constructs an [`Evolution`], rejecting invalid configurations.
    pub fn build(
        config: EvolutionConfig,
        env_config: E::Config,
        agent_config: A::Config,
    ) -> Result<Self> {
        config.validate()?;
        let elite_selector = EliteSelector::new(
            config.elite_candidates,
            config.n_episodes_elite,
            config.elite_min_score,
        );
        let reproducer = Reproducer::new(config.mutation_power, elite_selector);
        Ok(Self {
            config,
            env_config,
            agent_config,
            reproducer,
            phantom: PhantomData,
        })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    /// Creates the first generation.
    pub fn init<R: Rng + ?Sized>(&self, rng: &mut R) -> Generation<A> {
        let population = (0..self.config.population_size)
            .map(|_| A::random(&self.agent_config, rng))
            .collect();
        Generation {
            population,
            elite_index: None,
        }
    }

    /// Runs all the generations and returns the last one.
    pub fn run<R: Recorder>(&self, recorder: &mut R) -> Result<EvolutionResult<A>> {
        let mut rng = SmallRng::seed_from_u64(self.config.seed);
        let mut evaluator = DefaultEvaluator::<E>::new(
            &self.env_config,
            self.config.seed as i64,
            self.config.max_steps,
        )?;

        let mut generation = self.init(&mut rng);
        for ix in 0..self.config.n_generations {
            generation = self.step(ix, generation, &mut evaluator, &mut rng, recorder)?;
        }

        Ok(generation.into())
    }

    /// Evaluates, selects and reproduces a generation.
    pub fn step<V, R, C>(
        &self,
        ix: usize,
        generation: Generation<A>,
        evaluator: &mut V,
        rng: &mut R,
        recorder: &mut C,
    ) -> Result<Generation<A>>
    where
        V: Evaluator<E>,
        R: Rng + ?Sized,
        C: Recorder,
    {
        let population = generation.population;

        let scores = population
            .iter()
            .map(|agent| evaluator.evaluate(agent, self.config.n_episodes_eval, rng))
            .collect::<Result<Vec<f32>>>()?;

        let parent_pool = select_parent_pool(&rank(&scores), self.config.top_limit)?;
        let parent_scores: Vec<f32> = parent_pool.iter().map(|&i| scores[i]).collect();
        let mean_score = mean(&scores);
        let n_top = N_TOP_REPORTED.min(parent_scores.len());
        let mean_top = mean(&parent_scores[..n_top]);
        info!(
            "Generation {} | Mean rewards: {} | Mean of top {}: {}",
            ix, mean_score, n_top, mean_top
        );
        info!("Top {} agents: {:?}", parent_pool.len(), parent_pool);
        info!("Rewards for top: {:?}", parent_scores);

        let offspring = self.reproducer.reproduce::<E, _, _, _>(
            &population,
            &parent_pool,
            generation.elite_index,
            evaluator,
            rng,
        )?;

        let mut record = Record::from_slice(&[
            ("generation", RecordValue::Scalar(ix as f32)),
            ("mean_score", RecordValue::Scalar(mean_score)),
            ("mean_top5", RecordValue::Scalar(mean_top)),
            (
                "parent_indices",
                RecordValue::Array1(parent_pool.iter().map(|&i| i as f32).collect()),
            ),
            ("parent_scores", RecordValue::Array1(parent_scores)),
            ("datetime", RecordValue::DateTime(Local::now())),
        ]);
        if let Some(score) = offspring.elite_score {
            record.insert("elite_score", RecordValue::Scalar(score));
        }
        recorder.write(record);

        Ok(Generation {
            population: offspring.population,
            elite_index: offspring.elite_index,
        })
    }
}
