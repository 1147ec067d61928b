//! Policy networks independent of any deep learning backend.
//!
//! Evolution needs no gradient, so the networks are plain matrices of `f32`
//! with a forward pass written in Rust.
mod agent;
mod mat;
mod mlp;
pub use agent::MlpAgent;
pub use mat::Mat;
pub use mlp::{Mlp, MlpConfig};
