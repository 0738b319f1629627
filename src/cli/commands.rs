// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands: `train` and `predict`
// and all their configurable flags.
//
// Every default below reproduces the reference training run:
// 50 epochs, batch 16, Adam lr 1e-3, 80/20 split with seed 42.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand, ValueEnum};
use crate::application::train_use_case::{BackendKind, TrainConfig};

/// The two top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the LSTM yield model on a CSV dataset
    Train(TrainArgs),

    /// Predict yields for a CSV file using a trained model
    Predict(PredictArgs),
}

/// Tensor backend, as accepted on the command line
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum BackendArg {
    /// CPU (ndarray)
    Ndarray,
    /// GPU (wgpu)
    Wgpu,
}

impl From<BackendArg> for BackendKind {
    fn from(b: BackendArg) -> Self {
        match b {
            BackendArg::Ndarray => BackendKind::NdArray,
            BackendArg::Wgpu    => BackendKind::Wgpu,
        }
    }
}

/// All arguments for the `train` command.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// CSV file with the crop yield dataset
    #[arg(long, default_value = "Data/crop_yield_dataset.csv")]
    pub data_path: String,

    /// Directory for the model, scaler, configs, and metrics
    #[arg(long, default_value = "MODEL")]
    pub model_dir: String,

    /// Number of full passes through the training data
    #[arg(long, default_value_t = 50)]
    pub epochs: usize,

    /// Samples per gradient update
    #[arg(long, default_value_t = 16)]
    pub batch_size: usize,

    /// Adam learning rate
    #[arg(long, default_value_t = 1e-3)]
    pub lr: f64,

    /// Fraction of rows held out as the test set
    #[arg(long, default_value_t = 0.2)]
    pub test_fraction: f64,

    /// Seed for the train/test split and batch shuffling
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Units in the first LSTM layer
    #[arg(long, default_value_t = 50)]
    pub lstm1_units: usize,

    /// Units in the second LSTM layer
    #[arg(long, default_value_t = 30)]
    pub lstm2_units: usize,

    /// Units in the hidden dense layer
    #[arg(long, default_value_t = 20)]
    pub dense_units: usize,

    /// Dropout after each LSTM layer
    #[arg(long, default_value_t = 0.2)]
    pub dropout: f64,

    #[arg(long, value_enum, default_value_t = BackendArg::Ndarray)]
    pub backend: BackendArg,
}

/// Convert CLI TrainArgs into the application-layer TrainConfig.
/// The application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            data_path:     a.data_path,
            model_dir:     a.model_dir,
            epochs:        a.epochs,
            batch_size:    a.batch_size,
            lr:            a.lr,
            test_fraction: a.test_fraction,
            seed:          a.seed,
            lstm1_units:   a.lstm1_units,
            lstm2_units:   a.lstm2_units,
            dense_units:   a.dense_units,
            dropout:       a.dropout,
            backend:       a.backend.into(),
        }
    }
}

/// All arguments for the `predict` command
#[derive(Args, Debug)]
pub struct PredictArgs {
    /// CSV file to predict on (same columns as training; Yield optional)
    #[arg(long)]
    pub data_path: String,

    /// Directory the model was saved to during training
    #[arg(long, default_value = "MODEL")]
    pub model_dir: String,

    #[arg(long, value_enum, default_value_t = BackendArg::Ndarray)]
    pub backend: BackendArg,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    #[test]
    fn test_train_defaults_match_config_defaults() {
        let cli = Cli::try_parse_from(["crop-yield-lstm", "train"]).unwrap();
        let Commands::Train(args) = cli.command else { panic!("expected train") };
        let cfg: TrainConfig = args.into();
        let def = TrainConfig::default();
        assert_eq!(cfg.data_path, def.data_path);
        assert_eq!(cfg.model_dir, def.model_dir);
        assert_eq!((cfg.epochs, cfg.batch_size, cfg.seed), (def.epochs, def.batch_size, def.seed));
        assert_eq!(cfg.backend, BackendKind::NdArray);
    }

    #[test]
    fn test_backend_flag() {
        let cli = Cli::try_parse_from([
            "crop-yield-lstm", "predict", "--data-path", "x.csv", "--backend", "wgpu",
        ]).unwrap();
        let Commands::Predict(args) = cli.command else { panic!("expected predict") };
        assert_eq!(BackendKind::from(args.backend), BackendKind::Wgpu);
    }

    #[test]
    fn test_predict_requires_data_path() {
        assert!(Cli::try_parse_from(["crop-yield-lstm", "predict"]).is_err());
    }
}
