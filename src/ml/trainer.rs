// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Full train + validation loop using Burn's DataLoader and Adam.
//
//   - Training uses Autodiff<Backend> for gradients
//   - model.valid() returns the model on the inner backend,
//     where dropout is a no-op
//   - The test set is evaluated after every epoch, only to
//     report val_loss: no early stopping, no checkpoints, and
//     a NaN loss is logged but not acted on
//
// Reference: Burn Book §5, Kingma & Ba (2015) Adam

use anyhow::Result;
use burn::{
    backend::{
        ndarray::NdArrayDevice,
        wgpu::WgpuDevice,
        Autodiff, NdArray, Wgpu,
    },
    data::dataloader::DataLoaderBuilder,
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
    tensor::{backend::AutodiffBackend, ElementConversion},
};

use crate::application::train_use_case::{BackendKind, TrainConfig};
use crate::data::{batcher::{YieldBatch, YieldBatcher}, dataset::YieldDataset};
use crate::infra::{
    checkpoint::ArtifactStore,
    metrics::{EpochMetrics, MetricsLogger},
};
use crate::ml::model::{YieldLstm, YieldLstmConfig};

/// Loss history of a finished run.
#[derive(Debug, Clone)]
pub struct TrainingReport {
    pub history: Vec<EpochMetrics>,
}

impl TrainingReport {
    pub fn final_metrics(&self) -> Option<&EpochMetrics> {
        self.history.last()
    }
}

/// Model architecture for a given feature count, from the run config.
pub fn model_config(cfg: &TrainConfig, n_features: usize) -> YieldLstmConfig {
    YieldLstmConfig::new(n_features)
        .with_lstm1_units(cfg.lstm1_units)
        .with_lstm2_units(cfg.lstm2_units)
        .with_dense_units(cfg.dense_units)
        .with_dropout(cfg.dropout)
}

/// Train on the configured backend, then save the final weights.
pub fn run_training(
    cfg:           &TrainConfig,
    train_dataset: YieldDataset,
    val_dataset:   YieldDataset,
    store:         &ArtifactStore,
) -> Result<TrainingReport> {
    match cfg.backend {
        BackendKind::NdArray => {
            let device = NdArrayDevice::default();
            tracing::info!("Using NdArray device: {:?}", device);
            train_loop::<Autodiff<NdArray>>(cfg, train_dataset, val_dataset, store, device)
        }
        BackendKind::Wgpu => {
            let device = WgpuDevice::default();
            tracing::info!("Using WGPU device: {:?}", device);
            train_loop::<Autodiff<Wgpu>>(cfg, train_dataset, val_dataset, store, device)
        }
    }
}

fn train_loop<B: AutodiffBackend>(
    cfg:           &TrainConfig,
    train_dataset: YieldDataset,
    val_dataset:   YieldDataset,
    store:         &ArtifactStore,
    device:        B::Device,
) -> Result<TrainingReport> {
    let timesteps = train_dataset.timesteps();
    let features  = train_dataset.features();

    // ── Build model ───────────────────────────────────────────────────────────
    let model_cfg = model_config(cfg, features);
    let mut model: YieldLstm<B> = model_cfg.init(&device);
    store.save_model_config(&model_cfg)?;
    tracing::info!(
        "Model ready: LSTM({}) → LSTM({}) → Dense({}) → Dense(1), {} input features",
        model_cfg.lstm1_units, model_cfg.lstm2_units, model_cfg.dense_units, features
    );

    // ── Adam optimiser ────────────────────────────────────────────────────────
    // m = β1*m + (1-β1)*g        (mean)
    // v = β2*v + (1-β2)*g²       (variance)
    // θ = θ - lr * m / (√v + ε)  (update)
    let mut optim = AdamConfig::new()
        .with_beta_1(0.9)
        .with_beta_2(0.999)
        .with_epsilon(1e-7)
        .init();

    // ── Training data loader: reshuffled every epoch ──────────────────────────
    let train_loader = DataLoaderBuilder::new(YieldBatcher::new(timesteps, features))
        .batch_size(cfg.batch_size)
        .shuffle(cfg.seed)
        .num_workers(1)
        .build(train_dataset);

    // ── Validation data loader (inner backend — no autodiff overhead) ─────────
    let val_loader = DataLoaderBuilder::new(YieldBatcher::new(timesteps, features))
        .batch_size(cfg.batch_size)
        .num_workers(1)
        .build(val_dataset);

    let metrics_log = MetricsLogger::new(store.dir())?;
    let mut history = Vec::with_capacity(cfg.epochs);
    let mut best_val_loss = f64::INFINITY;
    let mut best_epoch = 0usize;

    // ── Epoch loop ────────────────────────────────────────────────────────────
    for epoch in 1..=cfg.epochs {

        // ── Training phase ────────────────────────────────────────────────────
        let mut train_loss_sum = 0.0f64;
        let mut train_samples  = 0usize;

        for batch in train_loader.iter() {
            let batch: YieldBatch<B> = batch;
            let batch_size = batch.targets.dims()[0];

            let (loss, _) = model.forward_loss(batch.inputs, batch.targets);

            let loss_val: f64 = loss.clone().into_scalar().elem::<f64>();
            train_loss_sum += loss_val * batch_size as f64;
            train_samples  += batch_size;

            // Backward pass + Adam update
            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(cfg.lr, model, grads);
        }

        let train_loss = if train_samples > 0 {
            train_loss_sum / train_samples as f64
        } else { f64::NAN };

        // ── Validation phase ──────────────────────────────────────────────────
        let model_valid = model.valid();

        let mut val_loss_sum = 0.0f64;
        let mut val_samples  = 0usize;

        for batch in val_loader.iter() {
            let batch: YieldBatch<B::InnerBackend> = batch;
            let batch_size = batch.targets.dims()[0];

            let (loss, _) = model_valid.forward_loss(batch.inputs, batch.targets);
            val_loss_sum += loss.into_scalar().elem::<f64>() * batch_size as f64;
            val_samples  += batch_size;
        }

        let val_loss = if val_samples > 0 {
            val_loss_sum / val_samples as f64
        } else { f64::NAN };

        if !train_loss.is_finite() && train_samples > 0 {
            tracing::warn!("Epoch {}: training loss is {}", epoch, train_loss);
        }

        tracing::info!(
            "Epoch {:>3}/{} | loss={:.4} | val_loss={:.4}",
            epoch, cfg.epochs, train_loss, val_loss,
        );

        let m = EpochMetrics::new(epoch, train_loss, val_loss);
        metrics_log.log(&m)?;
        if m.is_improvement(best_val_loss) {
            best_val_loss = m.val_loss;
            best_epoch     = epoch;
        }
        history.push(m);
    }
    if best_epoch > 0 {
        tracing::info!("Lowest val_loss {:.4} at epoch {}", best_val_loss, best_epoch);
    }

    // ── Save final weights (last epoch, not the best one) ─────────────────────
    store.save_model(&model.valid())?;

    Ok(TrainingReport { history })
}
