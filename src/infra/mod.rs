// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Handles cross-cutting file concerns that don't belong in
// any specific business layer:
//
//   checkpoint.rs — The model directory
//                   Saves/loads model weights with Burn's
//                   CompactRecorder, plus the model config,
//                   the fitted scaler, and the TrainConfig
//                   as JSON.
//
//   metrics.rs    — Training metrics logging
//                   Appends per-epoch train/val loss to a
//                   CSV file for later plotting.
//
// Reference: Rust Book §7 (Modules)
//            Burn Book §5 (Checkpointing)

/// Model, config, and scaler persistence
pub mod checkpoint;

/// Training metrics CSV logger
pub mod metrics;
