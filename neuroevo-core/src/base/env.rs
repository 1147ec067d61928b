//! Environment.
use super::{Act, Info, Obs, Step};
use anyhow::Result;

/// Represents an environment with a discrete action space.
///
/// An environment is built once per evaluation session and reset at the
/// beginning of every episode. Any error returned from [`Env::reset`] or
/// [`Env::step`] aborts the run; there is no way to resume a partial episode.
pub trait Env {
    /// Configurations.
    type Config: Clone;

    /// Observation of the environment.
    type Obs: Obs;

    /// Action of the environment.
    type Act: Act;

    /// Information in the [`Step`] object.
    type Info: Info;

    /// Builds an environment with a given random seed.
    fn build(config: &Self::Config, seed: i64) -> Result<Self>
    where
        Self: Sized;

    /// Starts a new episode and returns its first observation.
    fn reset(&mut self) -> Result<Self::Obs>;

    /// Performes an environment step.
    fn step(&mut self, a: &Self::Act) -> Result<Step<Self>>
    where
        Self: Sized;

    /// Number of elements of an observation.
    fn obs_dim(&self) -> usize;

    /// Number of discrete actions.
    fn n_actions(&self) -> usize;
}
