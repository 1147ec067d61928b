//! Evaluate the fitness of a [`Policy`].
use crate::{Env, Policy};
use anyhow::Result;
use rand::Rng;
mod default_evaluator;
pub use default_evaluator::DefaultEvaluator;

/// Scores a [`Policy`] by running it in an environment.
pub trait Evaluator<E: Env> {
    /// Runs `n_episodes` episodes and returns the mean episode return.
    ///
    /// Every stochastic decision made during the episodes, like action
    /// sampling, draws from `rng`.
    fn evaluate<P, R>(&mut self, policy: &P, n_episodes: usize, rng: &mut R) -> Result<f32>
    where
        P: Policy<E>,
        R: Rng + ?Sized;
}
