// ============================================================
// Layer 4 — Feature Matrix
// ============================================================
// Dense row-major (samples × features) matrix with column
// names, built by dropping the target column from the table.
//
//   values = [r0c0, r0c1, ..., r0cF, r1c0, ..., rNcF]

use anyhow::{bail, Result};

use crate::domain::table::{ColumnData, Table};

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    columns: Vec<String>,
    rows:    usize,
    values:  Vec<f64>,
}

impl FeatureMatrix {
    pub fn new(columns: Vec<String>, rows: usize, values: Vec<f64>) -> Result<Self> {
        if values.len() != rows * columns.len() {
            bail!(
                "Matrix buffer has {} values, expected {} x {}",
                values.len(), rows, columns.len()
            );
        }
        Ok(Self { columns, rows, values })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut [f64] {
        &mut self.values
    }

    pub fn row(&self, i: usize) -> &[f64] {
        let f = self.cols();
        &self.values[i * f..(i + 1) * f]
    }

    /// Iterator over one column's values.
    pub fn column(&self, j: usize) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().skip(j).step_by(self.cols().max(1)).copied()
    }

    /// New matrix containing the given rows, in the given order.
    pub fn select_rows(&self, indices: &[usize]) -> Self {
        let mut values = Vec::with_capacity(indices.len() * self.cols());
        for &i in indices {
            values.extend_from_slice(self.row(i));
        }
        Self { columns: self.columns.clone(), rows: indices.len(), values }
    }
}

/// Split a fully numeric table into (features, target).
///
/// Features are every column except `target`, in table order.
/// A text column left among the features is an error.
pub fn split_features_target(table: &Table, target: &str) -> Result<(FeatureMatrix, Vec<f64>)> {
    let y = table.numeric(target)?.to_vec();
    let (matrix, _) = features_only(table, Some(target))?;
    Ok((matrix, y))
}

/// Build the feature matrix from every column except `exclude`.
/// Returns the matrix and whether the excluded column was present.
pub fn features_only(table: &Table, exclude: Option<&str>) -> Result<(FeatureMatrix, bool)> {
    let mut excluded = false;
    let mut names    = Vec::new();
    let mut cols: Vec<&[f64]> = Vec::new();

    for col in table.columns() {
        if Some(col.name.as_str()) == exclude {
            excluded = true;
            continue;
        }
        match &col.data {
            ColumnData::Numeric(v) => {
                names.push(col.name.clone());
                cols.push(v);
            }
            ColumnData::Text(_) => bail!("Feature column '{}' is not numeric", col.name),
        }
    }

    let rows = table.row_count();
    let mut values = Vec::with_capacity(rows * cols.len());
    for i in 0..rows {
        values.extend(cols.iter().map(|c| c[i]));
    }

    Ok((FeatureMatrix::new(names, rows, values)?, excluded))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::table::Column;

    fn table() -> Table {
        Table::new(vec![
            Column::numeric("a", vec![1.0, 2.0, 3.0]),
            Column::numeric("Yield", vec![10.0, 20.0, 30.0]),
            Column::numeric("b", vec![4.0, 5.0, 6.0]),
        ]).unwrap()
    }

    #[test]
    fn test_drops_target_keeps_order() {
        let (x, y) = split_features_target(&table(), "Yield").unwrap();
        assert_eq!(x.column_names(), &["a".to_string(), "b".to_string()]);
        assert_eq!(x.row(1), &[2.0, 5.0]);
        assert_eq!(y, vec![10.0, 20.0, 30.0]);
        assert_eq!(x.column(1).collect::<Vec<_>>(), vec![4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_text_feature_rejected() {
        let t = Table::new(vec![
            Column::text("Crop", vec!["x".into()]),
            Column::numeric("Yield", vec![1.0]),
        ]).unwrap();
        assert!(split_features_target(&t, "Yield").is_err());
    }

    #[test]
    fn test_select_rows() {
        let (x, _) = split_features_target(&table(), "Yield").unwrap();
        let s = x.select_rows(&[2, 0]);
        assert_eq!(s.rows(), 2);
        assert_eq!(s.values(), &[3.0, 6.0, 1.0, 4.0]);
    }
}
