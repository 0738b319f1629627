// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full training pipeline in order:
//
//   Step 1: Load the CSV dataset        (Layer 4 - data)
//   Step 2: Rename + encode Crop/Region (Layer 4 - data)
//   Step 3: Add derived features        (Layer 4 - data)
//   Step 4: Split X / y                 (Layer 4 - data)
//   Step 5: Fit + apply the scaler      (Layer 4 - data)
//   Step 6: Seeded train/test split     (Layer 4 - data)
//   Step 7: Reshape to (n, 1, f)        (Layer 4 - data)
//   Step 8: Save config + scaler        (Layer 6 - infra)
//   Step 9: Run training loop           (Layer 5 - ml)
//
// The scaler is fit in Step 5 on ALL rows, before the split in
// Step 6, so test-set statistics leak into training inputs.
// This matches the reference training run.
//
// Reference: Burn Book §5 (Training)

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

use crate::data::{
    dataset::YieldDataset,
    encoder::CategoryEncoders,
    features::add_derived_features,
    loader::CsvLoader,
    matrix::split_features_target,
    scaler::StandardScaler,
    sequence::SequenceBatch,
    splitter::split_indices,
};
use crate::domain::{
    schema::{CATEGORICAL_COLUMNS, COLUMN_RENAMES, YIELD},
    table::Table,
    traits::TableSource,
};
use crate::infra::checkpoint::ArtifactStore;
use crate::ml::trainer::{run_training, TrainingReport};

// ─── Backend choice ──────────────────────────────────────────────────────────
/// Which Burn backend runs the tensors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// CPU, via ndarray
    NdArray,
    /// GPU, via wgpu
    Wgpu,
}

// ─── Training Configuration ──────────────────────────────────────────────────
// All paths and hyperparameters for a training run.
// Serialisable so it is saved next to the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub data_path:     String,
    pub model_dir:     String,
    pub epochs:        usize,
    pub batch_size:    usize,
    pub lr:            f64,
    pub test_fraction: f64,
    pub seed:          u64,
    pub lstm1_units:   usize,
    pub lstm2_units:   usize,
    pub dense_units:   usize,
    pub dropout:       f64,
    pub backend:       BackendKind,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            data_path:     "Data/crop_yield_dataset.csv".to_string(),
            model_dir:     "MODEL".to_string(),
            epochs:        50,
            batch_size:    16,
            lr:            1e-3,
            test_fraction: 0.2,
            seed:          42,
            lstm1_units:   50,
            lstm2_units:   30,
            dense_units:   20,
            dropout:       0.2,
            backend:       BackendKind::NdArray,
        }
    }
}

impl TrainConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(self.batch_size > 0, "batch_size must be at least 1");
        ensure!(
            (0.0..1.0).contains(&self.test_fraction),
            "test_fraction must be in [0, 1), got {}",
            self.test_fraction
        );
        ensure!(
            (0.0..1.0).contains(&self.dropout),
            "dropout must be in [0, 1), got {}",
            self.dropout
        );
        ensure!(self.lr > 0.0, "lr must be positive");
        Ok(())
    }
}

// ─── Feature engineering ──────────────────────────────────────────────────────
/// Rename raw columns, label-encode the categorical ones, and
/// append the derived features. Mutates the table in place and
/// returns the fitted encoders.
pub fn engineer_features(table: &mut Table) -> Result<CategoryEncoders> {
    for (from, to) in COLUMN_RENAMES {
        table.rename_column(from, to)?;
    }

    let encoders = CategoryEncoders::fit_transform(table, CATEGORICAL_COLUMNS)?;
    tracing::info!("Encoding completed for {}", CATEGORICAL_COLUMNS.join(" & "));

    add_derived_features(table)?;
    tracing::info!("New features added successfully");

    Ok(encoders)
}

/// Everything the training loop needs, plus the fitted state
/// that gets persisted or reported.
pub struct PreparedData {
    pub train:         YieldDataset,
    pub test:          YieldDataset,
    pub scaler:        StandardScaler,
    pub encoders:      CategoryEncoders,
    pub feature_names: Vec<String>,
    pub train_rows:    Vec<usize>,
    pub test_rows:     Vec<usize>,
}

/// Steps 2–7: from a freshly loaded table to train/test datasets.
pub fn prepare(cfg: &TrainConfig, mut table: Table) -> Result<PreparedData> {
    let encoders = engineer_features(&mut table)?;

    let (x, y) = split_features_target(&table, YIELD)?;
    let (scaler, x_scaled) = StandardScaler::fit_transform(&x)?;
    tracing::debug!("Scaled {} feature columns", scaler.columns.len());

    let (train_rows, test_rows) = split_indices(x_scaled.rows(), cfg.test_fraction, cfg.seed);

    let gather = |rows: &[usize]| -> Result<YieldDataset> {
        let seqs    = SequenceBatch::from_matrix(&x_scaled.select_rows(rows));
        let targets: Vec<f64> = rows.iter().map(|&i| y[i]).collect();
        YieldDataset::new(&seqs, &targets)
    };
    let train = gather(&train_rows)?;
    let test  = gather(&test_rows)?;

    tracing::info!(
        "Split: {} train, {} test, {} features",
        train.sample_count(), test.sample_count(), train.features()
    );

    Ok(PreparedData {
        train,
        test,
        scaler,
        encoders,
        feature_names: x.column_names().to_vec(),
        train_rows,
        test_rows,
    })
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
// Owns the config and runs the full training pipeline.
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Execute the full training pipeline end to end
    pub fn execute(&self) -> Result<TrainingReport> {
        let cfg = &self.config;
        cfg.validate()?;

        // ── Step 1: Load the dataset ──────────────────────────────────────────
        // The only stage whose failure is logged here; the error still
        // propagates so the caller picks the exit code.
        let loader = CsvLoader::new(&cfg.data_path);
        let table = match loader.load() {
            Ok(table) => {
                tracing::info!(
                    "Dataset loaded successfully ({} rows, {} columns)",
                    table.row_count(),
                    table.column_count()
                );
                table
            }
            Err(e) => {
                tracing::error!("Failed to load dataset: {e:#}");
                return Err(e);
            }
        };

        // ── Steps 2–7: features, scaling, split, reshape ──────────────────────
        let prepared = prepare(cfg, table)?;
        for name in CATEGORICAL_COLUMNS {
            if let Some(enc) = prepared.encoders.get(name) {
                tracing::info!("'{}' encoded as {:?}", name, enc.classes());
            }
        }

        // ── Step 8: Save config + scaler ──────────────────────────────────────
        let store = ArtifactStore::new(&cfg.model_dir)?;
        store.save_train_config(cfg)?;
        store.save_scaler(&prepared.scaler)?;

        // ── Step 9: Train ─────────────────────────────────────────────────────
        tracing::info!("Training LSTM model...");
        let report = run_training(cfg, prepared.train, prepared.test, &store)?;
        tracing::info!("LSTM model training completed");

        tracing::info!(
            "Model and scaler saved successfully to '{}' and '{}'",
            store.model_file().display(),
            store.scaler_file().display()
        );
        Ok(report)
    }
}
