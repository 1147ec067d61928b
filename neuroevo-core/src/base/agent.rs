//! Agent.
use super::{Env, Policy};
use anyhow::Result;
use rand::Rng;
use std::path::Path;

/// Represents an evolvable policy on an environment.
///
/// An agent is pure data: a fixed architecture and a set of parameters,
/// without any training state. Parameters are never modified in place;
/// [`Agent::mutate`] returns an independent, perturbed copy.
pub trait Agent<E: Env>: Policy<E> + Clone {
    /// Architecture of the agent.
    type Config: Clone;

    /// Creates an agent with randomly initialized parameters.
    fn random<R: Rng + ?Sized>(config: &Self::Config, rng: &mut R) -> Self;

    /// Returns a copy of the agent whose every parameter is perturbed with
    /// Gaussian noise of standard deviation `power`.
    fn mutate<R: Rng + ?Sized>(&self, power: f32, rng: &mut R) -> Self;

    /// Saves the parameters of the agent in the given file.
    fn save_params(&self, path: &Path) -> Result<()>;

    /// Loads an agent from a file written by [`Agent::save_params`].
    fn load_params(path: &Path) -> Result<Self>
    where
        Self: Sized;
}
