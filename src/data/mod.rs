// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// This layer handles everything from the raw CSV file all the
// way to tensor batches.
//
// The pipeline flows in this order:
//
//   crop_yield_dataset.csv
//       │
//       ▼
//   CsvLoader         → reads the file into a Table
//       │
//       ▼
//   LabelEncoder      → Crop / Region → integer codes
//       │
//       ▼
//   features          → appends the three derived columns
//       │
//       ▼
//   FeatureMatrix     → drops Yield, packs features row-major
//       │
//       ▼
//   StandardScaler    → (x - mean) / std per column
//       │
//       ▼
//   splitter          → seeded 80/20 train/test split
//       │
//       ▼
//   SequenceBatch     → (n, f) → (n, 1, f)
//       │
//       ▼
//   YieldDataset      → implements Burn's Dataset trait
//       │
//       ▼
//   YieldBatcher      → stacks samples into tensor batches
//
// Each module is responsible for exactly one step.
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Reads the CSV dataset into a Table
pub mod loader;

/// Label-encodes categorical columns
pub mod encoder;

/// Derived ratio / interaction features
pub mod features;

/// Dense feature matrix and target extraction
pub mod matrix;

/// Per-column standardisation
pub mod scaler;

/// Seeded train/test split
pub mod splitter;

/// Reshapes rows into single-timestep sequences
pub mod sequence;

/// Implements Burn's Dataset trait for yield samples
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;
