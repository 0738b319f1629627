// ============================================================
// Layer 4 — Standard Scaler
// ============================================================
// Standardises every feature column to zero mean and unit
// variance:
//
//   z = (x - mean) / std
//
// std is the population standard deviation (divide by n).
//
// Zero-variance columns are NOT patched: their std is 0, so
// every value becomes 0/0 = NaN. A warning is logged at fit
// time, but the numbers go through as-is. scikit-learn's
// StandardScaler swaps a zero std for 1 and would emit 0.0
// here instead; one NaN input column makes every prediction
// and loss of the model NaN.
//
// The scaler is fit on the full feature matrix before the
// train/test split, so test-set statistics leak into the
// training inputs. Kept for parity with the reference run.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::data::matrix::FeatureMatrix;
use crate::domain::traits::Persistable;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    /// Column names the scaler was fit on, in matrix order
    pub columns: Vec<String>,
    pub mean:    Vec<f64>,
    pub std:     Vec<f64>,
    /// Number of rows seen during fit
    pub n_samples_seen: usize,
}

impl StandardScaler {
    /// Compute per-column mean and population std.
    pub fn fit(x: &FeatureMatrix) -> Self {
        let n = x.rows() as f64;
        let mut mean = Vec::with_capacity(x.cols());
        let mut std  = Vec::with_capacity(x.cols());

        for j in 0..x.cols() {
            let m   = x.column(j).sum::<f64>() / n;
            let var = x.column(j).map(|v| (v - m).powi(2)).sum::<f64>() / n;
            if var == 0.0 {
                tracing::warn!(
                    "Column '{}' has zero variance; scaled values will be NaN",
                    x.column_names()[j]
                );
            }
            mean.push(m);
            std.push(var.sqrt());
        }

        Self {
            columns: x.column_names().to_vec(),
            mean,
            std,
            n_samples_seen: x.rows(),
        }
    }

    /// Apply (x - mean) / std column-wise, returning a new matrix.
    pub fn transform(&self, x: &FeatureMatrix) -> Result<FeatureMatrix> {
        if x.column_names() != self.columns.as_slice() {
            bail!(
                "Scaler was fit on columns {:?}, got {:?}",
                self.columns,
                x.column_names()
            );
        }
        let mut out = x.clone();
        let f = self.columns.len();
        for (k, v) in out.values_mut().iter_mut().enumerate() {
            let j = k % f;
            *v = (*v - self.mean[j]) / self.std[j];
        }
        Ok(out)
    }

    pub fn fit_transform(x: &FeatureMatrix) -> Result<(Self, FeatureMatrix)> {
        let scaler = Self::fit(x);
        let scaled = scaler.transform(x)?;
        Ok((scaler, scaled))
    }
}

impl Persistable for StandardScaler {
    fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
            .with_context(|| format!("Cannot write scaler to '{}'", path.display()))?;
        Ok(())
    }

    fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Cannot read scaler from '{}'", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Malformed scaler file '{}'", path.display()))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(cols: &[&str], rows: usize, values: Vec<f64>) -> FeatureMatrix {
        FeatureMatrix::new(cols.iter().map(|c| c.to_string()).collect(), rows, values).unwrap()
    }

    #[test]
    fn test_scaled_columns_have_zero_mean_unit_std() {
        let x = matrix(&["a", "b"], 4, vec![
            1.0, 10.0,
            2.0, 20.0,
            3.0, 35.0,
            4.0, 90.0,
        ]);
        let (_, z) = StandardScaler::fit_transform(&x).unwrap();
        for j in 0..z.cols() {
            let n    = z.rows() as f64;
            let mean = z.column(j).sum::<f64>() / n;
            let var  = z.column(j).map(|v| (v - mean).powi(2)).sum::<f64>() / n;
            assert!(mean.abs() < 1e-12, "mean {mean}");
            assert!((var.sqrt() - 1.0).abs() < 1e-12, "std {}", var.sqrt());
        }
    }

    #[test]
    fn test_population_std() {
        let x = matrix(&["a"], 2, vec![0.0, 2.0]);
        let s = StandardScaler::fit(&x);
        assert_eq!(s.mean, vec![1.0]);
        assert_eq!(s.std, vec![1.0]);
    }

    #[test]
    fn test_zero_variance_column_gives_nan() {
        let x = matrix(&["const", "v"], 3, vec![5.0, 1.0, 5.0, 2.0, 5.0, 3.0]);
        let (s, z) = StandardScaler::fit_transform(&x).unwrap();
        assert_eq!(s.std[0], 0.0);
        assert!(z.column(0).all(f64::is_nan));
        assert!(z.column(1).all(f64::is_finite));
    }

    #[test]
    fn test_column_mismatch_rejected() {
        let s = StandardScaler::fit(&matrix(&["a"], 1, vec![1.0]));
        assert!(s.transform(&matrix(&["b"], 1, vec![1.0])).is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("scaler.json");
        let s = StandardScaler::fit(&matrix(&["a", "b"], 2, vec![1.0, 2.0, 3.0, 5.0]));
        s.save(&path).unwrap();
        assert_eq!(StandardScaler::load(&path).unwrap(), s);
    }
}
