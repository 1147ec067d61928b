//! Configuration of [`Evolution`](super::Evolution).
use crate::error::EvoError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`Evolution`](super::Evolution).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
#[serde(default)]
pub struct EvolutionConfig {
    /// Number of agents in every generation.
    pub population_size: usize,

    /// Number of best agents that can be sampled as parents.
    pub top_limit: usize,

    /// Number of generations.
    pub n_generations: usize,

    /// Standard deviation of the Gaussian noise added to every parameter of a child.
    pub mutation_power: f32,

    /// Episodes per agent when scoring a generation.
    pub n_episodes_eval: usize,

    /// Episodes per candidate when re-validating the elite.
    pub n_episodes_elite: usize,

    /// Number of best parents considered for the elite.
    pub elite_candidates: usize,

    /// Score an elite candidate must strictly exceed.
    pub elite_min_score: f32,

    /// Step cap of an episode.
    pub max_steps: usize,

    /// Random seed of the run.
    pub seed: u64,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 500,
            top_limit: 20,
            n_generations: 0,
            mutation_power: 0.02,
            n_episodes_eval: 3,
            n_episodes_elite: 5,
            elite_candidates: 10,
            elite_min_score: 0.0,
            max_steps: 250,
            seed: 42,
        }
    }
}

impl EvolutionConfig {
    /// Sets the population size.
    pub fn population_size(mut self, v: usize) -> Self {
        self.population_size = v;
        self
    }

    /// Sets the size of the parent pool.
    pub fn top_limit(mut self, v: usize) -> Self {
        self.top_limit = v;
        self
    }

    /// Sets the number of generations.
    pub fn n_generations(mut self, v: usize) -> Self {
        self.n_generations = v;
        self
    }

    /// Sets the mutation power.
    pub fn mutation_power(mut self, v: f32) -> Self {
        self.mutation_power = v;
        self
    }

    /// Sets the number of episodes per agent when scoring a generation.
    pub fn n_episodes_eval(mut self, v: usize) -> Self {
        self.n_episodes_eval = v;
        self
    }

    /// Sets the number of episodes per elite candidate.
    pub fn n_episodes_elite(mut self, v: usize) -> Self {
        self.n_episodes_elite = v;
        self
    }

    /// Sets the number of parents considered for the elite.
    pub fn elite_candidates(mut self, v: usize) -> Self {
        self.elite_candidates = v;
        self
    }

    /// Sets the score an elite candidate must strictly exceed.
    pub fn elite_min_score(mut self, v: f32) -> Self {
        self.elite_min_score = v;
        self
    }

    /// Sets the step cap of an episode.
    pub fn max_steps(mut self, v: usize) -> Self {
        self.max_steps = v;
        self
    }

    /// Sets the random seed.
    pub fn seed(mut self, v: u64) -> Self {
        self.seed = v;
        self
    }

    /// Checks the configuration.
    pub fn validate(&self) -> Result<(), EvoError> {
        let err = |msg: String| Err(EvoError::InvalidConfig(msg));

        if self.population_size == 0 {
            return err("population_size must be positive".to_string());
        }
        if self.top_limit == 0 || self.top_limit > self.population_size {
            return err(format!(
                "top_limit must be in 1..={}, got {}",
                self.population_size, self.top_limit
            ));
        }
        if !(self.mutation_power >= 0.0 && self.mutation_power.is_finite()) {
            return err(format!(
                "mutation_power must be finite and non-negative, got {}",
                self.mutation_power
            ));
        }
        if self.n_episodes_eval == 0 || self.n_episodes_elite == 0 {
            return err("episode counts must be positive".to_string());
        }
        if self.elite_candidates == 0 {
            return err("elite_candidates must be positive".to_string());
        }
        if self.max_steps == 0 {
            return err("max_steps must be positive".to_string());
        }
        Ok(())
    }

    /// Constructs [`EvolutionConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`EvolutionConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
