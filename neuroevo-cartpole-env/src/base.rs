use crate::{render::track, CartPoleConfig};
use anyhow::{bail, Result};
use log::{info, trace};
use neuroevo_core::{Act, Env, Obs, Step};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use std::{thread, time::Duration};

const GRAVITY: f32 = 9.8;
const MASS_CART: f32 = 1.0;
const MASS_POLE: f32 = 0.1;
const TOTAL_MASS: f32 = MASS_CART + MASS_POLE;
/// Half the pole's length.
const LENGTH: f32 = 0.5;
const POLE_MASS_LENGTH: f32 = MASS_POLE * LENGTH;
const FORCE_MAG: f32 = 10.0;
/// Seconds between state updates.
const TAU: f32 = 0.02;
pub(crate) const X_THRESHOLD: f32 = 2.4;
const THETA_THRESHOLD: f32 = 12.0 * 2.0 * std::f32::consts::PI / 360.0;
const INIT_RANGE: f32 = 0.05;

/// Observation `[x, x_dot, theta, theta_dot]`.
#[derive(Clone, Debug, PartialEq)]
pub struct CartPoleObs(pub [f32; 4]);

impl Obs for CartPoleObs {
    fn len(&self) -> usize {
        4
    }
}

impl AsRef<[f32]> for CartPoleObs {
    fn as_ref(&self) -> &[f32] {
        &self.0
    }
}

/// Push to the left (`0`) or to the right (`1`).
#[derive(Clone, Debug, PartialEq)]
pub struct CartPoleAct(pub usize);

impl Act for CartPoleAct {}

impl From<usize> for CartPoleAct {
    fn from(ix: usize) -> Self {
        Self(ix)
    }
}

/// Cart-pole simulated with Euler integration.
pub struct CartPoleEnv {
    config: CartPoleConfig,
    rng: SmallRng,

    /// `None` before the first reset.
    state: Option<[f32; 4]>,

    count_steps: usize,
    is_done: bool,
}

impl CartPoleEnv {
    fn obs(&self) -> Result<CartPoleObs> {
        match self.state {
            Some(s) => Ok(CartPoleObs(s)),
            None => bail!("CartPoleEnv is used before reset"),
        }
    }

    fn render(&self, state: &[f32; 4]) {
        info!("{} step {:>3}", track(state[0], state[2]), self.count_steps);
        if self.config.wait_in_millis > 0 {
            thread::sleep(Duration::from_millis(self.config.wait_in_millis));
        }
    }
}

impl Env for CartPoleEnv {
    type Config = CartPoleConfig;
    type Obs = CartPoleObs;
    type Act = CartPoleAct;
    type Info = ();

    fn build(config: &Self::Config, seed: i64) -> Result<Self> {
        Ok(Self {
            config: config.clone(),
            rng: SmallRng::seed_from_u64(seed as u64),
            state: None,
            count_steps: 0,
            is_done: false,
        })
    }

    fn reset(&mut self) -> Result<Self::Obs> {
        let mut state = [0f32; 4];
        for v in state.iter_mut() {
            *v = self.rng.gen_range(-INIT_RANGE..INIT_RANGE);
        }
        self.state = Some(state);
        self.count_steps = 0;
        self.is_done = false;
        if self.config.render {
            self.render(&state);
        }
        self.obs()
    }

    fn step(&mut self, a: &Self::Act) -> Result<Step<Self>> {
        let [x, x_dot, theta, theta_dot] = self.obs()?.0;
        if self.is_done {
            bail!("CartPoleEnv is stepped after the end of an episode; call reset()");
        }
        let force = match a.0 {
            0 => -FORCE_MAG,
            1 => FORCE_MAG,
            _ => bail!("Invalid action {:?}", a),
        };

        let (sin, cos) = theta.sin_cos();
        let temp = (force + POLE_MASS_LENGTH * theta_dot * theta_dot * sin) / TOTAL_MASS;
        let theta_acc = (GRAVITY * sin - cos * temp)
            / (LENGTH * (4.0 / 3.0 - MASS_POLE * cos * cos / TOTAL_MASS));
        let x_acc = temp - POLE_MASS_LENGTH * theta_acc * cos / TOTAL_MASS;

        let state = [
            x + TAU * x_dot,
            x_dot + TAU * x_acc,
            theta + TAU * theta_dot,
            theta_dot + TAU * theta_acc,
        ];
        self.state = Some(state);
        self.count_steps += 1;
        trace!("CartPoleEnv::step(): {:?}", state);

        let is_terminated = state[0].abs() > X_THRESHOLD || state[2].abs() > THETA_THRESHOLD;
        let is_truncated = match self.config.max_episode_steps {
            Some(max) => !is_terminated && self.count_steps >= max,
            None => false,
        };
        self.is_done = is_terminated || is_truncated;
        if self.config.render {
            self.render(&state);
        }

        Ok(Step::new(
            CartPoleObs(state),
            a.clone(),
            1.0,
            is_terminated,
            is_truncated,
            (),
        ))
    }

    fn obs_dim(&self) -> usize {
        4
    }

    fn n_actions(&self) -> usize {
        2
    }
}
