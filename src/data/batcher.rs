// ============================================================
// Layer 4 — Yield Batcher
// ============================================================
// Implements Burn's Batcher trait to stack YieldSamples into
// model-ready tensors.
//
// How batching works here:
//   Input:  Vec of N YieldSamples, each a flat T×F sequence
//   Output: YieldBatch with
//             inputs  [N, T, F]
//             targets [N, 1]
//
//   All sequences have the same length, so we flatten them into
//   one Vec and reshape — no padding needed.
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::data::dataset::YieldSample;

// ─── YieldBatch ───────────────────────────────────────────────────────────────
/// A batch of samples ready for the model forward pass.
#[derive(Debug, Clone)]
pub struct YieldBatch<B: Backend> {
    /// Sequences — shape: [batch_size, timesteps, features]
    pub inputs: Tensor<B, 3>,

    /// Yield targets — shape: [batch_size, 1]
    pub targets: Tensor<B, 2>,
}

// ─── YieldBatcher ─────────────────────────────────────────────────────────────
/// Holds the sequence geometry needed to reshape the flat buffer.
#[derive(Clone, Debug)]
pub struct YieldBatcher {
    pub timesteps: usize,
    pub features:  usize,
}

impl YieldBatcher {
    pub fn new(timesteps: usize, features: usize) -> Self {
        Self { timesteps, features }
    }
}

impl<B: Backend> Batcher<B, YieldSample, YieldBatch<B>> for YieldBatcher {
    fn batch(&self, items: Vec<YieldSample>, device: &B::Device) -> YieldBatch<B> {
        let batch_size = items.len();

        let flat: Vec<f32> = items
            .iter()
            .flat_map(|s| s.sequence.iter().copied())
            .collect();

        let targets: Vec<f32> = items.iter().map(|s| s.target).collect();

        let inputs = Tensor::<B, 3>::from_data(
            TensorData::new(flat, [batch_size, self.timesteps, self.features]),
            device,
        );

        let targets = Tensor::<B, 2>::from_data(
            TensorData::new(targets, [batch_size, 1]),
            device,
        );

        YieldBatch { inputs, targets }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    #[test]
    fn test_batch_shapes() {
        let device  = Default::default();
        let batcher = YieldBatcher::new(1, 3);
        let items = vec![
            YieldSample { sequence: vec![1.0, 2.0, 3.0], target: 5.0 },
            YieldSample { sequence: vec![4.0, 5.0, 6.0], target: 7.0 },
        ];
        let batch: YieldBatch<NdArray> = batcher.batch(items, &device);
        assert_eq!(batch.inputs.dims(), [2, 1, 3]);
        assert_eq!(batch.targets.dims(), [2, 1]);
        let t: Vec<f32> = batch.targets.into_data().to_vec().unwrap();
        assert_eq!(t, vec![5.0, 7.0]);
    }
}
