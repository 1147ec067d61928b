//! Neuroevolution of policy networks in Rust.
//!
//! The workspace consists of the following crates:
//!
//! * [`neuroevo_core`] provides the traits of environments and agents,
//!   the fitness evaluator, and the genetic algorithm: ranking and parent pool
//!   selection, elite re-validation, mutation-based reproduction and the
//!   generational loop.
//! * [`neuroevo_policy_no_backend`] includes an MLP policy written
//!   without any deep learning backend, which can be mutated and saved.
//! * [`neuroevo_cartpole_env`] is a cart-pole simulator.
//!
//! The `ga_cartpole` example trains MLP agents on the cart-pole task and
//! replays the elite.
pub use neuroevo_cartpole_env;
pub use neuroevo_core;
pub use neuroevo_policy_no_backend;

use anyhow::Result;
use log::info;
use neuroevo_core::{DefaultEvaluator, Env, Evaluator, Policy};
use rand::Rng;

/// Plays `n_episodes` episodes of `policy` and returns their returns.
///
/// There is no step cap other than the truncation of the environment itself.
pub fn replay<E, P, R>(env: E, policy: &P, n_episodes: usize, rng: &mut R) -> Result<Vec<f32>>
where
    E: Env,
    P: Policy<E>,
    R: Rng + ?Sized,
{
    let mut evaluator = DefaultEvaluator::from_env(env, usize::MAX);
    (0..n_episodes)
        .map(|ix| {
            let r = evaluator.evaluate(policy, 1, rng)?;
            info!("Rewards of episode {}: {}", ix, r);
            Ok(r)
        })
        .collect()
}
