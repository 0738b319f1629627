// ============================================================
// Layer 4 — Sequence Reshaper
// ============================================================
// Recurrent layers expect input shaped
//
//   [samples, timesteps, features]
//
// Each tabular row becomes a sequence of length 1, so a
// (n, f) matrix becomes (n, 1, f). The flat row-major buffer
// is identical before and after; only the shape changes.
//
// Values are narrowed to f32 here because that is what the
// model tensors use.

use burn::prelude::*;

use crate::data::matrix::FeatureMatrix;

#[derive(Debug, Clone, PartialEq)]
pub struct SequenceBatch {
    samples:   usize,
    timesteps: usize,
    features:  usize,
    values:    Vec<f32>,
}

impl SequenceBatch {
    /// Wrap every row as a single-timestep sequence.
    pub fn from_matrix(x: &FeatureMatrix) -> Self {
        Self {
            samples:   x.rows(),
            timesteps: 1,
            features:  x.cols(),
            values:    x.values().iter().map(|&v| v as f32).collect(),
        }
    }

    /// [samples, timesteps, features]
    pub fn shape(&self) -> [usize; 3] {
        [self.samples, self.timesteps, self.features]
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    pub fn timesteps(&self) -> usize {
        self.timesteps
    }

    pub fn features(&self) -> usize {
        self.features
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// The flat (timesteps × features) slice for one sample.
    pub fn sequence(&self, i: usize) -> &[f32] {
        let len = self.timesteps * self.features;
        &self.values[i * len..(i + 1) * len]
    }

    pub fn to_tensor<B: Backend>(&self, device: &B::Device) -> Tensor<B, 3> {
        let data = TensorData::new(self.values.clone(), self.shape());
        Tensor::<B, 3>::from_data(data, device)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    fn matrix() -> FeatureMatrix {
        FeatureMatrix::new(
            vec!["a".into(), "b".into(), "c".into()],
            2,
            vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
        ).unwrap()
    }

    #[test]
    fn test_shape_gains_unit_timestep() {
        let s = SequenceBatch::from_matrix(&matrix());
        assert_eq!(s.shape(), [2, 1, 3]);
    }

    #[test]
    fn test_values_preserved() {
        let x = matrix();
        let s = SequenceBatch::from_matrix(&x);
        assert_eq!(s.values(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(s.sequence(1), &[4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_tensor_matches_buffer() {
        let device = Default::default();
        let s = SequenceBatch::from_matrix(&matrix());
        let t = s.to_tensor::<NdArray>(&device);
        assert_eq!(t.dims(), [2, 1, 3]);
        let back: Vec<f32> = t.into_data().to_vec().unwrap();
        assert_eq!(back, s.values());
    }
}
