use serde::{Deserialize, Serialize};

/// Row-major matrix of `f32`.
///
/// Vectors are column matrices of shape `[n, 1]`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Mat {
    pub data: Vec<f32>,
    pub shape: [usize; 2],
}

impl Mat {
    /// Creates a matrix; `data.len()` must be `shape[0] * shape[1]`.
    pub fn new(data: Vec<f32>, shape: [usize; 2]) -> Self {
        assert_eq!(
            data.len(),
            shape[0] * shape[1],
            "Data does not fit shape {:?}",
            shape
        );
        Self { data, shape }
    }

    pub fn zeros(shape: [usize; 2]) -> Self {
        Self {
            data: vec![0.0; shape[0] * shape[1]],
            shape,
        }
    }

    pub fn shape(&self) -> [usize; 2] {
        self.shape
    }

    pub fn matmul(&self, x: &Mat) -> Self {
        let (m, l, n) = (self.shape[0], self.shape[1], x.shape[1]);
        if l != x.shape[0] {
            panic!(
                "Trying to multiply matrices of incompatible sizes: {:?}",
                (&self.shape, &x.shape)
            );
        }
        let mut data = vec![0.0f32; m * n];
        for i in 0..m {
            for j in 0..n {
                let kk = i * n + j;
                for k in 0..l {
                    data[kk] += self.data[i * l + k] * x.data[k * n + j];
                }
            }
        }

        Self {
            shape: [m, n],
            data,
        }
    }

    pub fn add(&self, x: &Mat) -> Self {
        if self.shape != x.shape {
            panic!(
                "Trying to add matrices of different sizes: {:?}",
                (&self.shape, &x.shape)
            );
        }
        self.zip_map(x, |a, b| a + b)
    }

    pub fn relu(&self) -> Self {
        self.map(|a| if a < 0. { 0. } else { a })
    }

    /// Softmax over all the elements, shifted by the maximum for stability.
    pub fn softmax(&self) -> Self {
        let max = self.data.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        let exp = self.map(|a| (a - max).exp());
        let total: f32 = exp.data.iter().sum();
        exp.map(|a| a / total)
    }

    /// Applies `f` to every element.
    pub fn map(&self, mut f: impl FnMut(f32) -> f32) -> Self {
        Self {
            data: self.data.iter().map(|a| f(*a)).collect(),
            shape: self.shape,
        }
    }

    fn zip_map(&self, x: &Mat, f: impl Fn(f32, f32) -> f32) -> Self {
        Self {
            data: self
                .data
                .iter()
                .zip(x.data.iter())
                .map(|(a, b)| f(*a, *b))
                .collect(),
            shape: self.shape,
        }
    }
}

impl From<Vec<f32>> for Mat {
    fn from(x: Vec<f32>) -> Self {
        let shape = [x.len(), 1];
        Self { shape, data: x }
    }
}

impl From<&[f32]> for Mat {
    fn from(x: &[f32]) -> Self {
        x.to_vec().into()
    }
}
