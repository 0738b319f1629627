use anyhow::{ensure, Result};
use burn::data::dataset::Dataset;
use serde::{Deserialize, Serialize};

use crate::data::sequence::SequenceBatch;

/// One training example: a flattened (timesteps × features)
/// sequence and its yield target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YieldSample {
    pub sequence: Vec<f32>,
    pub target:   f32,
}

pub struct YieldDataset {
    samples:   Vec<YieldSample>,
    timesteps: usize,
    features:  usize,
}

impl YieldDataset {
    /// Pair each sequence with its target. Both must have the same length.
    pub fn new(sequences: &SequenceBatch, targets: &[f64]) -> Result<Self> {
        ensure!(
            sequences.samples() == targets.len(),
            "{} sequences but {} targets",
            sequences.samples(),
            targets.len()
        );
        let samples = targets
            .iter()
            .enumerate()
            .map(|(i, &y)| YieldSample {
                sequence: sequences.sequence(i).to_vec(),
                target:   y as f32,
            })
            .collect();
        Ok(Self {
            samples,
            timesteps: sequences.timesteps(),
            features:  sequences.features(),
        })
    }

    pub fn sample_count(&self) -> usize { self.samples.len() }

    pub fn timesteps(&self) -> usize { self.timesteps }

    pub fn features(&self) -> usize { self.features }
}

impl Dataset<YieldSample> for YieldDataset {
    fn get(&self, index: usize) -> Option<YieldSample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::matrix::FeatureMatrix;

    #[test]
    fn test_pairs_rows_with_targets() {
        let x = FeatureMatrix::new(vec!["a".into(), "b".into()], 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let ds = YieldDataset::new(&SequenceBatch::from_matrix(&x), &[10.0, 20.0]).unwrap();
        assert_eq!(ds.len(), 2);
        let s = ds.get(1).unwrap();
        assert_eq!(s.sequence, vec![3.0, 4.0]);
        assert_eq!(s.target, 20.0);
        assert!(ds.get(2).is_none());
        assert_eq!((ds.timesteps(), ds.features()), (1, 2));
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let x = FeatureMatrix::new(vec!["a".into()], 2, vec![1.0, 2.0]).unwrap();
        assert!(YieldDataset::new(&SequenceBatch::from_matrix(&x), &[1.0]).is_err());
    }
}
