// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// This is the entry point for all user interaction.
// It uses the `clap` crate to parse command line arguments.
// All business logic is delegated to Layer 2 (application).
//
// Two commands are supported:
//   1. `train`   — runs the full pipeline and saves the model
//   2. `predict` — loads the saved model and scores a CSV
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, PredictArgs, TrainArgs};

/// The main CLI struct
#[derive(Parser, Debug)]
#[command(
    name = "crop-yield-lstm",
    version = "0.1.0",
    about = "Train a stacked-LSTM crop yield regressor on tabular data, then predict with it."
)]
pub struct Cli {
    /// The subcommand to run (train or predict)
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Dispatch to the matching use case. Routes only, never computes.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args)   => run_train(args),
            Commands::Predict(args) => run_predict(args),
        }
    }
}

fn run_train(args: TrainArgs) -> Result<()> {
    use crate::application::train_use_case::TrainUseCase;

    tracing::info!("Starting training on dataset: {}", args.data_path);

    let use_case = TrainUseCase::new(args.into());
    let report   = use_case.execute()?;

    if let Some(last) = report.final_metrics() {
        println!(
            "Training complete. Final loss={:.4}, val_loss={:.4}",
            last.train_loss, last.val_loss
        );
    } else {
        println!("Training complete.");
    }
    Ok(())
}

fn run_predict(args: PredictArgs) -> Result<()> {
    use crate::application::predict_use_case::PredictUseCase;

    let use_case    = PredictUseCase::new(args.model_dir, args.backend.into());
    let predictions = use_case.execute(&args.data_path)?;

    println!("row,predicted_yield,actual_yield");
    for p in &predictions {
        match p.actual {
            Some(a) => println!("{},{:.4},{}", p.row, p.predicted, a),
            None    => println!("{},{:.4},", p.row, p.predicted),
        }
    }
    Ok(())
}
