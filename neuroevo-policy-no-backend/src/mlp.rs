use crate::Mat;
use neuroevo_core::{error::EvoError, util::gaussian};
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
/// Configuration of [`Mlp`].
pub struct MlpConfig {
    pub in_dim: usize,
    pub hidden_dim: usize,
    pub out_dim: usize,
}

impl Default for MlpConfig {
    /// Cart-pole policy: 4 observations, 128 hidden units, 2 actions.
    fn default() -> Self {
        Self::new(4, 128, 2)
    }
}

impl MlpConfig {
    /// Creates configuration of MLP.
    pub fn new(in_dim: usize, hidden_dim: usize, out_dim: usize) -> Self {
        Self {
            in_dim,
            hidden_dim,
            out_dim,
        }
    }

    fn layer_dims(&self) -> [(usize, usize); 2] {
        [(self.in_dim, self.hidden_dim), (self.hidden_dim, self.out_dim)]
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
/// Two-layer perceptron with ReLU hidden activation and softmax output.
pub struct Mlp {
    config: MlpConfig,

    /// Weights of layers, of shape `[out, in]`.
    ws: Vec<Mat>,

    /// Biases of layers, of shape `[out, 1]`.
    bs: Vec<Mat>,
}

impl Mlp {
    /// Creates a network with Xavier-uniform weights and zero biases.
    ///
    /// Weights of a layer are drawn from `U(-a, a)` with
    /// `a = sqrt(6 / (fan_in + fan_out))`.
    pub fn xavier<R: Rng + ?Sized>(config: &MlpConfig, rng: &mut R) -> Self {
        let (ws, bs): (Vec<Mat>, Vec<Mat>) = config
            .layer_dims()
            .iter()
            .map(|&(fan_in, fan_out)| {
                let a = (6.0 / (fan_in + fan_out) as f32).sqrt();
                let data = (0..fan_in * fan_out)
                    .map(|_| rng.gen_range(-a..=a))
                    .collect();
                (Mat::new(data, [fan_out, fan_in]), Mat::zeros([fan_out, 1]))
            })
            .unzip();

        Self {
            config: config.clone(),
            ws,
            bs,
        }
    }

    pub fn config(&self) -> &MlpConfig {
        &self.config
    }

    /// Action probabilities for an observation.
    pub fn forward(&self, x: &[f32]) -> Result<Vec<f32>, EvoError> {
        if x.len() != self.config.in_dim {
            return Err(EvoError::DimensionMismatch {
                expected: self.config.in_dim,
                actual: x.len(),
            });
        }

        let n_layers = self.ws.len();
        let mut x = Mat::from(x);
        for i in 0..n_layers {
            x = self.ws[i].matmul(&x).add(&self.bs[i]);
            if i != n_layers - 1 {
                x = x.relu();
            }
        }
        Ok(x.softmax().data)
    }

    /// Returns a copy with `power * N(0, 1)` added to every weight and bias.
    pub fn perturbed<R: Rng + ?Sized>(&self, power: f32, rng: &mut R) -> Self {
        let mut perturb = |m: &Mat| m.map(|v| v + power * gaussian(rng));
        Self {
            config: self.config.clone(),
            ws: self.ws.iter().map(&mut perturb).collect(),
            bs: self.bs.iter().map(&mut perturb).collect(),
        }
    }

    /// Checks that every layer agrees with the configuration.
    ///
    /// Networks built by [`Mlp::xavier`] always pass; a network decoded from
    /// a file may not.
    pub fn validate(&self) -> Result<(), EvoError> {
        let dims = self.config.layer_dims();
        if self.ws.len() != dims.len() || self.bs.len() != dims.len() {
            return Err(EvoError::InvalidModel(format!(
                "{} weights and {} biases for {} layers",
                self.ws.len(),
                self.bs.len(),
                dims.len()
            )));
        }

        let layers = self.ws.iter().zip(self.bs.iter()).zip(dims.iter());
        for (i, ((w, b), &(fan_in, fan_out))) in layers.enumerate() {
            let expected = [("weight", w, [fan_out, fan_in]), ("bias", b, [fan_out, 1])];
            for (name, m, shape) in expected.iter() {
                if m.shape != *shape || m.data.len() != shape[0] * shape[1] {
                    return Err(EvoError::InvalidModel(format!(
                        "{} of layer {} has shape {:?} with {} elements, expected {:?}",
                        name,
                        i,
                        m.shape,
                        m.data.len(),
                        shape
                    )));
                }
            }
        }
        Ok(())
    }

    /// All weights and biases, layer by layer.
    pub fn params(&self) -> impl Iterator<Item = &f32> {
        self.ws
            .iter()
            .zip(self.bs.iter())
            .flat_map(|(w, b)| w.data.iter().chain(b.data.iter()))
    }

    /// Number of weights and biases.
    pub fn n_params(&self) -> usize {
        self.params().count()
    }
}

#[cfg(test)]
impl Mlp {
    /// Replaces the configuration without touching the layers.
    pub(crate) fn with_config(self, config: MlpConfig) -> Self {
        Self { config, ..self }
    }
}
