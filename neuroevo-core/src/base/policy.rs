//! Policy.
use super::Env;
use anyhow::Result;
use rand::Rng;

/// A stochastic policy on an environment.
///
/// Policy is a mapping from an observation to a distribution over actions,
/// from which an action is drawn with the given random number generator.
/// Sampling reads the policy only, so a single agent can be evaluated
/// any number of times without changing it.
pub trait Policy<E: Env> {
    /// Samples an action given an observation.
    ///
    /// Fails if the policy does not produce a valid probability distribution
    /// for `obs`.
    fn sample<R: Rng + ?Sized>(&self, obs: &E::Obs, rng: &mut R) -> Result<E::Act>;
}
