//! Cart-pole environment.
//!
//! A pole is attached by an unactuated joint to a cart moving along a
//! frictionless track. The agent pushes the cart to the left (action `0`) or
//! to the right (action `1`) and receives a reward of 1 for every step, the
//! last one included, until the pole falls more than 12 degrees from upright
//! or the cart leaves the track. Episodes are truncated after
//! `max_episode_steps` steps.
//!
//! The observation is `[x, x_dot, theta, theta_dot]`.
mod base;
mod config;
mod render;
pub use base::{CartPoleAct, CartPoleEnv, CartPoleObs};
pub use config::CartPoleConfig;
