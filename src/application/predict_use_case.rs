// ============================================================
// Layer 2 — Predict Use Case
// ============================================================
// Applies a trained model to a CSV file with the same layout as
// the training data:
//   1. Load the CSV
//   2. Rename, encode, and derive features exactly like training
//   3. Drop the Yield column if present
//   4. Scale with the SAVED scaler, reshape, predict
//
// Category codes are re-derived from the CSV being predicted on,
// because training never saved its encoder mapping. Codes only
// line up with training when this file contains the same set of
// Crop and Region labels.

use anyhow::Result;
use burn::{
    backend::{ndarray::NdArrayDevice, wgpu::WgpuDevice, NdArray, Wgpu},
    prelude::*,
};

use crate::application::train_use_case::{engineer_features, BackendKind};
use crate::data::{loader::CsvLoader, matrix::features_only};
use crate::domain::{schema::YIELD, traits::TableSource};
use crate::infra::checkpoint::ArtifactStore;
use crate::ml::inferencer::Inferencer;

/// One prediction, with the observed yield when the file had one.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub row:       usize,
    pub predicted: f32,
    pub actual:    Option<f64>,
}

pub struct PredictUseCase {
    model_dir: String,
    backend:   BackendKind,
}

impl PredictUseCase {
    pub fn new(model_dir: impl Into<String>, backend: BackendKind) -> Self {
        Self { model_dir: model_dir.into(), backend }
    }

    pub fn execute(&self, data_path: &str) -> Result<Vec<Prediction>> {
        let store = ArtifactStore::open(&self.model_dir)?;
        match self.backend {
            BackendKind::NdArray => self.run::<NdArray>(&store, NdArrayDevice::default(), data_path),
            BackendKind::Wgpu    => self.run::<Wgpu>(&store, WgpuDevice::default(), data_path),
        }
    }

    fn run<B: Backend>(
        &self,
        store:     &ArtifactStore,
        device:    B::Device,
        data_path: &str,
    ) -> Result<Vec<Prediction>> {
        let inferencer = Inferencer::<B>::from_artifacts(store, device)?;
        let trained    = store.load_train_config()?;
        tracing::info!(
            "Using model trained on '{}' for {} epochs",
            trained.data_path,
            trained.epochs
        );

        let mut table = CsvLoader::new(data_path).load()?;
        tracing::info!("Loaded {} rows for prediction", table.row_count());
        engineer_features(&mut table)?;

        let actual = table.numeric(YIELD).ok().map(<[f64]>::to_vec);
        let (x, _) = features_only(&table, Some(YIELD))?;

        let predicted = inferencer.predict_features(&x)?;
        Ok(predicted
            .into_iter()
            .enumerate()
            .map(|(row, p)| Prediction {
                row,
                predicted: p,
                actual: actual.as_ref().map(|a| a[row]),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::train_use_case::{tests::write_synthetic_csv, TrainConfig, TrainUseCase};

    #[test]
    fn test_predicts_one_value_per_row() {
        let dir  = tempfile::tempdir().unwrap();
        let data = dir.path().join("train.csv");
        write_synthetic_csv(&data, 40);
        let model_dir = dir.path().join("MODEL");

        let cfg = TrainConfig {
            data_path: data.display().to_string(),
            model_dir: model_dir.display().to_string(),
            epochs:    1,
            ..TrainConfig::default()
        };
        TrainUseCase::new(cfg).execute().unwrap();

        let uc    = PredictUseCase::new(model_dir.display().to_string(), BackendKind::NdArray);
        let preds = uc.execute(&data.display().to_string()).unwrap();
        assert_eq!(preds.len(), 40);
        assert!(preds.iter().all(|p| p.actual.is_some()));
        assert_eq!(preds[3].row, 3);
    }

    #[test]
    fn test_missing_model_dir() {
        let dir = tempfile::tempdir().unwrap();
        let uc  = PredictUseCase::new(dir.path().join("MODEL").display().to_string(), BackendKind::NdArray);
        assert!(uc.execute("whatever.csv").is_err());
    }
}
