// ============================================================
// Layer 6 — Artifact Store
// ============================================================
// Saves and restores everything a training run produces,
// all inside one model directory (default `MODEL/`):
//
//   MODEL/
//     lstm_model.mpk      ← model weights (Burn CompactRecorder)
//     model_config.json   ← architecture needed to rebuild the model
//     scaler.json         ← fitted StandardScaler (mean/std per column)
//     train_config.json   ← the run's TrainConfig
//     metrics.csv         ← per-epoch losses (written by MetricsLogger)
//
// Why save the model config separately?
//   Burn records hold weights only. To load them we first have
//   to rebuild a model with the same shapes (n_features, layer
//   widths), then call load_record() on it.
//
// Writes are plain overwrites: no versioning, no temp-file +
// rename, so a crash mid-write can leave a truncated file.
//
// Reference: Burn Book §5 (Records and Checkpointing)

use anyhow::{Context, Result};
use std::{fs, path::{Path, PathBuf}};
use burn::{
    prelude::*,
    record::{CompactRecorder, Recorder},
};

use crate::application::train_use_case::TrainConfig;
use crate::data::scaler::StandardScaler;
use crate::domain::traits::Persistable;
use crate::ml::model::{YieldLstm, YieldLstmConfig};

const MODEL_FILE:        &str = "lstm_model";
/// Extension CompactRecorder appends to MODEL_FILE.
const MODEL_EXTENSION:   &str = "mpk";
const MODEL_CONFIG_FILE: &str = "model_config.json";
const SCALER_FILE:       &str = "scaler.json";
const TRAIN_CONFIG_FILE: &str = "train_config.json";

/// Manages the files of one model directory.
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    /// Open a model directory, creating it if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create model directory '{}'", dir.display()))?;
        Ok(Self { dir })
    }

    /// Open an existing model directory without creating it.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if !dir.is_dir() {
            anyhow::bail!(
                "Model directory '{}' not found. Have you run 'train' first?",
                dir.display()
            );
        }
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of the weights file, including the recorder's extension.
    pub fn model_file(&self) -> PathBuf {
        self.dir.join(MODEL_FILE).with_extension(MODEL_EXTENSION)
    }

    pub fn scaler_file(&self) -> PathBuf {
        self.dir.join(SCALER_FILE)
    }

    /// Save model weights.
    ///
    /// CompactRecorder serialises to named MessagePack at half
    /// precision and appends `.mpk` to the path it is given.
    pub fn save_model<B: Backend>(&self, model: &YieldLstm<B>) -> Result<()> {
        let path = self.dir.join(MODEL_FILE);
        CompactRecorder::new()
            .record(model.clone().into_record(), path.clone())
            .with_context(|| format!("Failed to save model to '{}'", path.display()))?;
        tracing::debug!("Saved model weights to '{}'", self.model_file().display());
        Ok(())
    }

    /// Rebuild the model from model_config.json and load its weights.
    pub fn load_model<B: Backend>(&self, device: &B::Device) -> Result<YieldLstm<B>> {
        let cfg   = self.load_model_config()?;
        let model = cfg.init::<B>(device);
        let path  = self.dir.join(MODEL_FILE);

        let record = CompactRecorder::new()
            .load(path.clone(), device)
            .with_context(|| {
                format!("Cannot load model '{}'. Have you trained the model first?",
                    path.display())
            })?;

        Ok(model.load_record(record))
    }

    pub fn save_model_config(&self, cfg: &YieldLstmConfig) -> Result<()> {
        write_json(&self.dir.join(MODEL_CONFIG_FILE), cfg)
    }

    pub fn load_model_config(&self) -> Result<YieldLstmConfig> {
        read_json(&self.dir.join(MODEL_CONFIG_FILE))
    }

    pub fn save_scaler(&self, scaler: &StandardScaler) -> Result<()> {
        scaler.save(&self.scaler_file())
    }

    pub fn load_scaler(&self) -> Result<StandardScaler> {
        StandardScaler::load(&self.scaler_file())
    }

    pub fn save_train_config(&self, cfg: &TrainConfig) -> Result<()> {
        write_json(&self.dir.join(TRAIN_CONFIG_FILE), cfg)
    }

    pub fn load_train_config(&self) -> Result<TrainConfig> {
        read_json(&self.dir.join(TRAIN_CONFIG_FILE))
    }
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)
        .with_context(|| format!("Cannot write '{}'", path.display()))?;
    tracing::debug!("Wrote '{}'", path.display());
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let json = fs::read_to_string(path)
        .with_context(|| {
            format!(
                "Cannot read '{}'. Make sure you have run 'train' first.",
                path.display()
            )
        })?;
    serde_json::from_str(&json)
        .with_context(|| format!("Malformed JSON in '{}'", path.display()))
}
