// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// This layer contains the Burn model and training code.
// Other layers only touch Burn for the Dataset/Batcher
// plumbing in Layer 4.
//
// What's in this layer:
//
//   model.rs      — The stacked-LSTM regressor
//                   • ReLU-gated LSTM (50 units, full sequence)
//                   • Dropout 0.2
//                   • ReLU-gated LSTM (30 units, last step)
//                   • Dropout 0.2
//                   • Dense 20 (ReLU) → Dense 1 (linear)
//
//   trainer.rs    — The training loop
//                   Forward pass, MSE loss, backward pass,
//                   Adam step, per-epoch test-set loss, and
//                   the final weight save
//
//   inferencer.rs — Reloads model + scaler and predicts
//
// Reference: Burn Book §3 (Building Blocks)
//            Burn Book §5 (Training)
//            Hochreiter & Schmidhuber (1997) LSTM

/// Stacked-LSTM yield regressor
pub mod model;

/// Training loop with per-epoch validation
pub mod trainer;

/// Inference from saved artifacts
pub mod inferencer;
