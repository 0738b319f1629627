// ============================================================
// Layer 5 — Inferencer
// ============================================================
// Reloads a trained model and its scaler from the model
// directory and predicts yields for new feature rows.
//
// Input rows must already be encoded and carry the derived
// features; the inferencer only scales, reshapes, and runs
// the forward pass.
use anyhow::{bail, Result};
use burn::prelude::*;

use crate::data::{matrix::FeatureMatrix, scaler::StandardScaler, sequence::SequenceBatch};
use crate::infra::checkpoint::ArtifactStore;
use crate::ml::model::YieldLstm;

pub struct Inferencer<B: Backend> {
    model:      YieldLstm<B>,
    scaler:     StandardScaler,
    n_features: usize,
    device:     B::Device,
}

impl<B: Backend> Inferencer<B> {
    pub fn from_artifacts(store: &ArtifactStore, device: B::Device) -> Result<Self> {
        let n_features = store.load_model_config()?.n_features;
        let model      = store.load_model::<B>(&device)?;
        let scaler     = store.load_scaler()?;
        if scaler.columns.len() != n_features {
            bail!(
                "Scaler has {} columns but the model expects {} features",
                scaler.columns.len(), n_features
            );
        }
        tracing::info!("Model loaded from '{}'", store.dir().display());
        Ok(Self { model, scaler, n_features, device })
    }


    /// Raw model output for already-scaled sequences: [k, 1]
    pub fn predict_tensor(&self, batch: &SequenceBatch) -> Result<Tensor<B, 2>> {
        if batch.features() != self.n_features {
            bail!(
                "Model expects {} features, got {}",
                self.n_features, batch.features()
            );
        }
        Ok(self.model.forward(batch.to_tensor::<B>(&self.device)))
    }

    /// One prediction per already-scaled sequence.
    pub fn predict(&self, batch: &SequenceBatch) -> Result<Vec<f32>> {
        if batch.samples() == 0 {
            return Ok(Vec::new());
        }
        self.predict_tensor(batch)?
            .into_data()
            .to_vec::<f32>()
            .map_err(|e| anyhow::anyhow!("Cannot read predictions: {e:?}"))
    }

    /// Scale raw feature rows with the saved scaler, then predict.
    pub fn predict_features(&self, x: &FeatureMatrix) -> Result<Vec<f32>> {
        let scaled = self.scaler.transform(x)?;
        self.predict(&SequenceBatch::from_matrix(&scaled))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;
    use crate::ml::model::YieldLstmConfig;

    type TestBackend = NdArray;

    fn store_with_model(dir: &std::path::Path, n: usize) -> ArtifactStore {
        let store  = ArtifactStore::new(dir).unwrap();
        let device = Default::default();
        let cfg    = YieldLstmConfig::new(n);
        let model: YieldLstm<TestBackend> = cfg.init(&device);
        store.save_model_config(&cfg).unwrap();
        store.save_model(&model).unwrap();
        let names: Vec<String> = (0..n).map(|i| format!("f{i}")).collect();
        let x = FeatureMatrix::new(names, 2, (0..2 * n).map(|v| v as f64).collect()).unwrap();
        store.save_scaler(&StandardScaler::fit(&x)).unwrap();
        store
    }

    #[test]
    fn test_batch_of_k_gives_k_by_1() {
        let dir   = tempfile::tempdir().unwrap();
        let store = store_with_model(dir.path(), 3);
        let inf   = Inferencer::<TestBackend>::from_artifacts(&store, Default::default()).unwrap();

        let x = FeatureMatrix::new(
            vec!["f0".into(), "f1".into(), "f2".into()],
            7,
            vec![0.5; 21],
        ).unwrap();
        let batch = SequenceBatch::from_matrix(&x);
        assert_eq!(inf.predict_tensor(&batch).unwrap().dims(), [7, 1]);
        assert_eq!(inf.predict_features(&x).unwrap().len(), 7);
    }

    #[test]
    fn test_feature_count_mismatch() {
        let dir   = tempfile::tempdir().unwrap();
        let store = store_with_model(dir.path(), 3);
        let inf   = Inferencer::<TestBackend>::from_artifacts(&store, Default::default()).unwrap();
        let x = FeatureMatrix::new(vec!["f0".into()], 1, vec![1.0]).unwrap();
        assert!(inf.predict(&SequenceBatch::from_matrix(&x)).is_err());
    }
}
