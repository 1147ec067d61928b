//! Default implementation of the [`Evaluator`] trait.
//!
//! A single environment is built when the evaluator is constructed and is
//! only reset between episodes, whatever the number of agents evaluated.
use super::Evaluator;
use crate::{error::EvoError, Env, Policy};
use anyhow::Result;
use log::trace;
use rand::Rng;

/// Default step cap of an episode.
pub const DEFAULT_MAX_STEPS: usize = 250;

/// Runs a number of episodes and averages their returns.
///
/// Each episode is played until the environment reports termination or
/// truncation, or `max_steps` steps have been taken, which bounds the cost
/// of an environment that never terminates.
///
/// # Examples
///
/// ```ignore
/// let mut evaluator = DefaultEvaluator::<CartPoleEnv>::new(&env_config, 42, 250)?;
/// let score = evaluator.evaluate(&agent, 3, &mut rng)?;
/// ```
pub struct DefaultEvaluator<E: Env> {
    /// The maximum number of steps of an episode.
    max_steps: usize,

    /// The environment instance used for evaluation.
    env: E,
}

impl<E: Env> Evaluator<E> for DefaultEvaluator<E> {
    /// Evaluates a policy by running `n_episodes` episodes.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `n_episodes` is zero
    /// - The environment fails to reset or to step
    /// - The policy fails to sample an action
    fn evaluate<P, R>(&mut self, policy: &P, n_episodes: usize, rng: &mut R) -> Result<f32>
    where
        P: Policy<E>,
        R: Rng + ?Sized,
    {
        if n_episodes == 0 {
            return Err(EvoError::InvalidConfig("n_episodes must be positive".to_string()).into());
        }

        let mut r_total = 0f32;

        for ix in 0..n_episodes {
            let r = self.run_episode(policy, rng)?;
            trace!("Episode {}: return = {}", ix, r);
            r_total += r;
        }

        Ok(r_total / n_episodes as f32)
    }
}

impl<E: Env> DefaultEvaluator<E> {
    /// Constructs a new [`DefaultEvaluator`], building its environment.
    ///
    /// # Arguments
    ///
    /// * `config` - Configuration for the environment
    /// * `seed` - Random seed for environment initialization
    /// * `max_steps` - Step cap of an episode
    pub fn new(config: &E::Config, seed: i64, max_steps: usize) -> Result<Self> {
        Ok(Self::from_env(E::build(config, seed)?, max_steps))
    }

    /// Constructs a new [`DefaultEvaluator`] on an already built environment.
    pub fn from_env(env: E, max_steps: usize) -> Self {
        Self { max_steps, env }
    }

    /// Returns the environment.
    pub fn env(&self) -> &E {
        &self.env
    }

    /// Plays a single episode and returns its return.
    pub fn run_episode<P, R>(&mut self, policy: &P, rng: &mut R) -> Result<f32>
    where
        P: Policy<E>,
        R: Rng + ?Sized,
    {
        let mut prev_obs = self.env.reset()?;
        let mut r_total = 0f32;

        for _ in 0..self.max_steps {
            let act = policy.sample(&prev_obs, rng)?;
            let step = self.env.step(&act)?;
            r_total += step.reward;
            if step.is_done() {
                break;
            }
            prev_obs = step.obs;
        }

        Ok(r_total)
    }
}
